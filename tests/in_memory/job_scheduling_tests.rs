//! In-memory integration tests for job creation, editing and status changes.

use super::helpers::{TestService, caller, date, job_types, raw_job, service};
use driver_jobs::job::{
    domain::{Actor, CallerIdentity, Driver, JobStatus, Price},
    ports::JobRepositoryError,
    services::{BulkSubmitPolicy, JobServiceError},
    validation::RawJobInput,
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn job_lifecycle_from_creation_to_deletion(
    service: TestService,
    caller: CallerIdentity,
) -> Result<(), eyre::Report> {
    let input = RawJobInput {
        postcode: "NW1 2AB".to_owned(),
        price: "120.5".to_owned(),
        notes: "Call ahead".to_owned(),
        ..raw_job("Driver 7", "2024-06-10", "Clearance")
    };
    let created = service.create_job(&caller, &input).await?;
    eyre::ensure!(
        created.price() == Some(Price::from_minor_units(12_050)),
        "price should be held as 12050 pence"
    );
    eyre::ensure!(created.status() == JobStatus::Pending, "new jobs start pending");

    let completed = service
        .set_status(&caller, &created, "complete", Actor::Driver(Driver::D7))
        .await?;
    eyre::ensure!(completed.status() == JobStatus::Complete, "driver completion was not stored");
    eyre::ensure!(completed.notes() == "Call ahead", "status change altered the notes");

    let edited = service
        .update_job(
            &caller,
            created.id(),
            &RawJobInput {
                status: "incomplete - issue".to_owned(),
                ..RawJobInput::from(&completed.details())
            },
        )
        .await?;
    eyre::ensure!(edited.status() == JobStatus::IncompleteIssue, "edit did not change the status");
    eyre::ensure!(edited.postcode() == Some("NW1 2AB"), "edit dropped the postcode");

    service.delete_job(&caller, created.id()).await?;
    let found = service.find_job(&caller, created.id()).await?;
    eyre::ensure!(found.is_none(), "deleted job is still stored");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_edit_keeps_stored_job(
    service: TestService,
    caller: CallerIdentity,
) -> Result<(), eyre::Report> {
    let created = service
        .create_job(&caller, &raw_job("Driver 1", "2024-06-10", "Survey"))
        .await?;

    let result = service
        .update_job(&caller, created.id(), &raw_job("Driver 1", "2024-06-10", "  "))
        .await;

    eyre::ensure!(
        matches!(result, Err(JobServiceError::Validation(_))),
        "expected validation failure, got {result:?}"
    );
    let stored = service.find_job(&caller, created.id()).await?;
    eyre::ensure!(stored == Some(created), "stored job changed");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn status_change_on_deleted_job_reports_not_found(
    service: TestService,
    caller: CallerIdentity,
) -> Result<(), eyre::Report> {
    let created = service
        .create_job(&caller, &raw_job("Driver 1", "2024-06-10", "Survey"))
        .await?;
    service.delete_job(&caller, created.id()).await?;

    let result = service
        .set_status(&caller, &created, "complete", Actor::Staff)
        .await;

    eyre::ensure!(
        matches!(
            result,
            Err(JobServiceError::Repository(JobRepositoryError::NotFound(id))) if id == created.id()
        ),
        "expected not found, got {result:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn bulk_import_feeds_every_view(
    service: TestService,
    caller: CallerIdentity,
) -> Result<(), eyre::Report> {
    let text = "Driver 10,2024-06-10,Clearance,NW1,45.50,,Notes here\n\
                \n\
                Driver 2,2024-06-10,Delivery,,,complete,\n\
                Driver 2,2024-06-11,Survey,,,,\n\
                Driver 13,2024-06-10,Survey,,,,";

    let outcome = service
        .import_bulk(&caller, text, BulkSubmitPolicy::ValidOnly)
        .await?;
    eyre::ensure!(
        outcome.submitted_lines() == [1, 3, 4],
        "unexpected submitted lines {:?}",
        outcome.submitted_lines()
    );
    let error_lines: Vec<usize> = outcome
        .line_errors()
        .iter()
        .map(|error| error.line_number)
        .collect();
    eyre::ensure!(error_lines == vec![5], "unexpected error lines {error_lines:?}");

    let board = service
        .admin_board(&caller, Some(date(2024, 6, 10)?))
        .await?;
    eyre::ensure!(
        job_types(board.jobs()) == ["Delivery", "Clearance", "Survey"],
        "board is not in date then driver order"
    );

    let driver_two = service.driver_jobs(&caller, Driver::D2).await?;
    eyre::ensure!(
        job_types(&driver_two) == ["Delivery", "Survey"],
        "driver jobs are not ordered by date"
    );

    let day = service
        .driver_day(&caller, Driver::D10, date(2024, 6, 10)?)
        .await?;
    eyre::ensure!(job_types(&day) == ["Clearance"], "driver day returned the wrong jobs");
    Ok(())
}
