//! Runtime configuration and log subscriber set-up.

use clap::Args;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Default number of pooled database connections.
pub const DEFAULT_POOL_SIZE: u32 = 4;

/// Default log filter directive.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Settings shared by every command, read from flags or the environment.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// `PostgreSQL` connection URL
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,

    /// Maximum number of pooled database connections
    #[arg(long, env = "DRIVER_JOBS_POOL_SIZE", default_value_t = DEFAULT_POOL_SIZE)]
    pub pool_size: u32,

    /// Log filter, in `tracing_subscriber::EnvFilter` syntax
    #[arg(long = "log", env = "DRIVER_JOBS_LOG", default_value = DEFAULT_LOG_FILTER)]
    pub log_filter: String,
}

/// Errors raised while installing the log subscriber.
#[derive(Debug, Error)]
pub enum TracingInitError {
    /// The filter directive could not be parsed.
    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),
    /// A global subscriber is already installed.
    #[error("failed to install log subscriber: {0}")]
    Install(#[from] tracing_subscriber::util::TryInitError),
}

/// Builds the log filter for `directives`.
///
/// # Errors
///
/// Returns [`TracingInitError::Filter`] when a directive is malformed.
pub fn log_filter(directives: &str) -> Result<EnvFilter, TracingInitError> {
    Ok(EnvFilter::try_new(directives)?)
}

/// Installs a formatted subscriber writing to standard error, so that
/// standard output stays free for command results.
///
/// # Errors
///
/// Returns [`TracingInitError`] when the filter is malformed or a subscriber
/// is already installed.
pub fn init_tracing(config: &AppConfig) -> Result<(), TracingInitError> {
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&config.log_filter)?)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .finish()
        .try_init()?;
    Ok(())
}
