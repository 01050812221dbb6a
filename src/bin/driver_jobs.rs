//! Command-line front end for scheduling and tracking driver jobs.
//!
//! Usage:
//!
//! ```text
//! driver-jobs [--json] <command> [args]
//! ```
//!
//! Every command reads the database URL from `--database-url` or
//! `DATABASE_URL`. Results are written to standard output as plain text, or
//! as JSON with `--json`; logs go to standard error.

use chrono::{Datelike, NaiveDate};
use clap::{Parser, Subcommand};
use driver_jobs::{
    config::{AppConfig, init_tracing},
    job::{
        adapters::postgres::{PostgresJobRepository, apply_schema, build_pool},
        calendar::{DayCell, YearMonth},
        domain::{Actor, CallerIdentity, Driver, Job, JobId, ParseDriverError},
        services::{BulkSubmitPolicy, DriverMonthView, JobSchedulingService, JobServiceError},
        validation::RawJobInput,
    },
};
use eyre::{WrapErr, eyre};
use mockable::DefaultClock;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

type Service = JobSchedulingService<PostgresJobRepository, DefaultClock>;

/// Schedule jobs for drivers and track their completion.
#[derive(Parser, Debug)]
#[command(name = "driver-jobs", author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    config: AppConfig,

    /// Caller identity passed to the job store
    #[arg(long, env = "DRIVER_JOBS_CALLER", default_value = "cli")]
    caller: String,

    /// Write results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the job table if it does not exist
    Migrate,
    /// Schedule a single job
    Add(JobFields),
    /// Import jobs from a file with one comma-separated job per line
    Import {
        /// File to read
        file: PathBuf,
        /// Store nothing unless every line is valid
        #[arg(long)]
        strict: bool,
    },
    /// Show every job from yesterday to tomorrow
    Board {
        /// Day to centre the board on instead of today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List every job of a driver
    Driver {
        /// Driver label, such as "Driver 3"
        #[arg(value_parser = parse_driver)]
        driver: Driver,
    },
    /// List a driver's jobs on one day
    Day {
        /// Driver label, such as "Driver 3"
        #[arg(value_parser = parse_driver)]
        driver: Driver,
        /// Day in YYYY-MM-DD form
        date: NaiveDate,
    },
    /// Show a driver's month calendar with the selected day's jobs
    Month {
        /// Driver label, such as "Driver 3"
        #[arg(value_parser = parse_driver)]
        driver: Driver,
        /// Month in YYYY-MM form
        month: YearMonth,
        /// Selected day; defaults to today
        #[arg(long)]
        selected: Option<NaiveDate>,
    },
    /// Change the status of a job
    Status {
        /// Job identifier
        id: JobId,
        /// New status: pending, complete or "incomplete - issue"
        status: String,
        /// Record the change as made by this driver instead of staff
        #[arg(long = "as-driver", value_parser = parse_driver)]
        as_driver: Option<Driver>,
    },
    /// Edit a job; omitted fields keep their current value
    Edit {
        /// Job identifier
        id: JobId,
        #[command(flatten)]
        fields: EditFields,
    },
    /// Delete a job permanently
    Delete {
        /// Job identifier
        id: JobId,
    },
}

#[derive(clap::Args, Debug)]
struct JobFields {
    /// Driver label, such as "Driver 3"
    #[arg(long)]
    driver: String,
    /// Day in YYYY-MM-DD form
    #[arg(long)]
    date: String,
    /// Kind of work
    #[arg(long = "type")]
    job_type: String,
    /// Site postcode
    #[arg(long, default_value = "")]
    postcode: String,
    /// Price with at most two decimal places
    #[arg(long, default_value = "")]
    price: String,
    /// Initial status; defaults to pending
    #[arg(long, default_value = "")]
    status: String,
    /// Free-form notes
    #[arg(long, default_value = "")]
    notes: String,
}

impl From<JobFields> for RawJobInput {
    fn from(fields: JobFields) -> Self {
        Self {
            driver: fields.driver,
            date: fields.date,
            job_type: fields.job_type,
            postcode: fields.postcode,
            price: fields.price,
            status: fields.status,
            notes: fields.notes,
        }
    }
}

#[derive(clap::Args, Debug)]
struct EditFields {
    /// Driver label, such as "Driver 3"
    #[arg(long)]
    driver: Option<String>,
    /// Day in YYYY-MM-DD form
    #[arg(long)]
    date: Option<String>,
    /// Kind of work
    #[arg(long = "type")]
    job_type: Option<String>,
    /// Site postcode; an empty value clears it
    #[arg(long)]
    postcode: Option<String>,
    /// Price; an empty value clears it
    #[arg(long)]
    price: Option<String>,
    /// Status
    #[arg(long)]
    status: Option<String>,
    /// Free-form notes
    #[arg(long)]
    notes: Option<String>,
}

impl EditFields {
    fn apply_to(self, mut raw: RawJobInput) -> RawJobInput {
        let overrides = [
            (self.driver, &mut raw.driver),
            (self.date, &mut raw.date),
            (self.job_type, &mut raw.job_type),
            (self.postcode, &mut raw.postcode),
            (self.price, &mut raw.price),
            (self.status, &mut raw.status),
            (self.notes, &mut raw.notes),
        ];
        for (value, slot) in overrides {
            if let Some(new_value) = value {
                *slot = new_value;
            }
        }
        raw
    }
}

fn parse_driver(value: &str) -> Result<Driver, ParseDriverError> {
    Driver::try_from(value)
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.config)?;

    let pool = build_pool(&cli.config.database_url, cli.config.pool_size)
        .wrap_err("failed to connect to the job database")?;
    if matches!(cli.command, Command::Migrate) {
        apply_schema(&pool).await?;
        tracing::info!("job schema applied");
        return Ok(());
    }

    let service = JobSchedulingService::new(
        Arc::new(PostgresJobRepository::new(pool)),
        Arc::new(DefaultClock),
    );
    let caller = CallerIdentity::new(cli.caller);
    let mut out = io::stdout().lock();
    run(&service, &caller, cli.command, cli.json, &mut out).await
}

async fn run(
    service: &Service,
    caller: &CallerIdentity,
    command: Command,
    json: bool,
    out: &mut impl Write,
) -> eyre::Result<()> {
    match command {
        Command::Migrate => Ok(()),
        Command::Add(fields) => {
            let job = service.create_job(caller, &fields.into()).await?;
            write_jobs(out, json, std::slice::from_ref(&job))
        }
        Command::Import { file, strict } => {
            import_file(service, caller, &file, strict, json, out).await
        }
        Command::Board { date } => {
            let board = service.admin_board(caller, date).await?;
            if json {
                return write_json(out, &board);
            }
            for day in board.window().dates() {
                writeln!(out, "== {day} ==")?;
                for job in board.for_day(day) {
                    write_job_line(out, job)?;
                }
            }
            Ok(())
        }
        Command::Driver { driver } => {
            let jobs = service.driver_jobs(caller, driver).await?;
            write_jobs(out, json, &jobs)
        }
        Command::Day { driver, date } => {
            let jobs = service.driver_day(caller, driver, date).await?;
            write_jobs(out, json, &jobs)
        }
        Command::Month {
            driver,
            month,
            selected,
        } => {
            let view = service.driver_month(caller, driver, month, selected).await?;
            if json {
                return write_json(out, &view);
            }
            write_month(out, &view)
        }
        Command::Status {
            id,
            status,
            as_driver,
        } => {
            let job = find_job(service, caller, id).await?;
            let actor = as_driver.map_or(Actor::Staff, Actor::Driver);
            let stored = service.set_status(caller, &job, &status, actor).await?;
            write_jobs(out, json, std::slice::from_ref(&stored))
        }
        Command::Edit { id, fields } => {
            let job = find_job(service, caller, id).await?;
            let raw = fields.apply_to(RawJobInput::from(&job.details()));
            let stored = service.update_job(caller, id, &raw).await?;
            write_jobs(out, json, std::slice::from_ref(&stored))
        }
        Command::Delete { id } => {
            service.delete_job(caller, id).await?;
            if !json {
                writeln!(out, "deleted {id}")?;
            }
            Ok(())
        }
    }
}

async fn import_file(
    service: &Service,
    caller: &CallerIdentity,
    file: &Path,
    strict: bool,
    json: bool,
    out: &mut impl Write,
) -> eyre::Result<()> {
    let text = std::fs::read_to_string(file)
        .wrap_err_with(|| format!("failed to read {}", file.display()))?;
    let policy = if strict {
        BulkSubmitPolicy::RejectOnErrors
    } else {
        BulkSubmitPolicy::ValidOnly
    };
    let outcome = match service.import_bulk(caller, &text, policy).await {
        Ok(outcome) => outcome,
        Err(JobServiceError::BulkRejected {
            source,
            line_errors,
            submitted_lines,
        }) => {
            for line_error in &line_errors {
                writeln!(out, "  {line_error}")?;
            }
            return Err(eyre!(
                "store rejected lines {submitted_lines:?}; nothing was imported: {source}"
            ));
        }
        Err(other) => return Err(other.into()),
    };
    let errors: Vec<String> = outcome
        .line_errors()
        .iter()
        .map(ToString::to_string)
        .collect();

    if json {
        let value = serde_json::json!({
            "created": outcome.created(),
            "submitted_lines": outcome.submitted_lines(),
            "line_errors": errors,
        });
        return write_json(out, &value);
    }
    writeln!(
        out,
        "{} created, {} rejected",
        outcome.created().len(),
        errors.len()
    )?;
    for error in errors {
        writeln!(out, "  {error}")?;
    }
    Ok(())
}

fn write_month(out: &mut impl Write, view: &DriverMonthView) -> eyre::Result<()> {
    writeln!(out, "{}, {}", view.driver(), view.grid().year_month())?;
    writeln!(out, "Su  Mo  Tu  We  Th  Fr  Sa")?;
    for week in view.grid().weeks() {
        let row: Vec<String> = week.iter().map(format_cell).collect();
        writeln!(out, "{}", row.join(" ").trim_end())?;
    }
    writeln!(out, "Jobs on {}:", view.selected())?;
    for job in view.selected_jobs() {
        write_job_line(out, job)?;
    }
    Ok(())
}

async fn find_job(service: &Service, caller: &CallerIdentity, id: JobId) -> eyre::Result<Job> {
    service
        .find_job(caller, id)
        .await?
        .ok_or_else(|| eyre!("job not found: {id}"))
}

/// Renders a grid cell as three characters: the day number followed by `*`
/// for the selected day or `.` for today.
fn format_cell(cell: &DayCell) -> String {
    match *cell {
        DayCell::Blank => "   ".to_owned(),
        DayCell::Day {
            date,
            is_today,
            is_selected,
        } => {
            let marker = if is_selected {
                '*'
            } else if is_today {
                '.'
            } else {
                ' '
            };
            format!("{:>2}{marker}", date.day())
        }
    }
}

fn write_job_line(out: &mut impl Write, job: &Job) -> io::Result<()> {
    writeln!(
        out,
        "{}  {}  {:<9}  {}  {}  {}  {}  {}",
        job.id(),
        job.date(),
        job.driver(),
        job.job_type(),
        job.postcode().unwrap_or("-"),
        job.price().map_or_else(|| "-".to_owned(), |price| price.to_string()),
        job.status(),
        job.notes(),
    )
}

fn write_jobs(out: &mut impl Write, json: bool, jobs: &[Job]) -> eyre::Result<()> {
    if json {
        return write_json(out, &jobs);
    }
    for job in jobs {
        write_job_line(out, job)?;
    }
    Ok(())
}

fn write_json(out: &mut impl Write, value: &impl serde::Serialize) -> eyre::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
