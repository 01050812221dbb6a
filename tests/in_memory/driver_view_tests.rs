//! In-memory integration tests for the driver month view.

use super::helpers::{TestService, caller, date, raw_job, service};
use driver_jobs::job::{
    calendar::{DayCell, YearMonth},
    domain::{CallerIdentity, Driver},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn month_view_lays_out_leap_february(
    service: TestService,
    caller: CallerIdentity,
) -> Result<(), eyre::Report> {
    service
        .create_job(&caller, &raw_job("Driver 3", "2024-02-29", "Leap day job"))
        .await?;
    let february = YearMonth::new(2024, 2)?;

    let view = service
        .driver_month(&caller, Driver::D3, february, Some(date(2024, 2, 29)?))
        .await?;

    eyre::ensure!(view.grid().leading_blanks() == 4, "1 Feb 2024 is a Thursday");
    eyre::ensure!(view.grid().day_count() == 29, "leap February should have 29 day cells");
    eyre::ensure!(view.selected_jobs().len() == 1, "expected the leap day job on the selected day");
    let last_cell = view
        .grid()
        .cells()
        .last()
        .ok_or_else(|| eyre::eyre!("grid has no cells"))?;
    eyre::ensure!(
        matches!(last_cell, DayCell::Day { is_selected: true, .. }),
        "the 29th should be the selected cell"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn month_view_navigates_between_months(
    service: TestService,
    caller: CallerIdentity,
) -> Result<(), eyre::Report> {
    let january = YearMonth::new(2024, 1)?;
    let february = january
        .next()
        .ok_or_else(|| eyre::eyre!("no month after January"))?;

    let view = service
        .driver_month(&caller, Driver::D1, february, Some(date(2024, 2, 1)?))
        .await?;

    eyre::ensure!(view.grid().year_month() == february, "view shows the wrong month");
    eyre::ensure!(view.grid().day_count() == 29, "leap February should have 29 day cells");
    eyre::ensure!(view.selected_jobs().is_empty(), "no jobs were scheduled for the selected day");
    Ok(())
}
