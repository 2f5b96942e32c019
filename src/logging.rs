use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::error::{AppError, AppResult};

const LOG_ENV_VAR: &str = "SNOWCR_LOG";

/// Installs the process-wide subscriber. Output goes to stderr so command
/// results on stdout stay machine readable.
pub fn init(verbose: bool) -> AppResult<()> {
    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };

    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .with_env_var(LOG_ENV_VAR)
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| AppError::Configuration(format!("failed to initialize logging: {err}")))
}
