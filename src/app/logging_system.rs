// Diagnostics for rask-logger itself (not the records it emits).
use crate::domain::Severity;
use std::sync::OnceLock;
use thiserror::Error;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding `EnvFilter` directives that override the
/// configured diagnostics level.
pub const DIAGNOSTICS_ENV: &str = "RASK_LOGGER_LOG";

#[derive(Error, Debug)]
pub enum LoggingInitError {
    #[error("Logging system initialization failed: {details}")]
    LoggingInitFailed {
        details: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("Logging system was already initialized unsuccessfully")]
    PreviouslyFailed,
}

/// Builds the diagnostics filter: `default_level` unless `RASK_LOGGER_LOG`
/// supplies directives.
pub fn build_env_filter(default_level: Severity) -> EnvFilter {
    let level: tracing::Level = default_level.into();
    EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .with_env_var(DIAGNOSTICS_ENV)
        .from_env_lossy()
}

fn initialize_tracing(default_level: Severity) -> Result<(), LoggingInitError> {
    let subscriber = tracing_subscriber::registry()
        .with(build_env_filter(default_level))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true)
                .with_ansi(false)
                .compact(),
        );

    tracing::subscriber::set_global_default(subscriber).map_err(|e| {
        LoggingInitError::LoggingInitFailed {
            details: "Failed to set global tracing subscriber".to_string(),
            source: Box::new(e),
        }
    })
}

/// Installs the diagnostics subscriber once per process. The call that
/// attempts the install returns its real error; later calls after a failure
/// return `PreviouslyFailed`.
pub fn setup_logging_safe(default_level: Severity) -> Result<(), LoggingInitError> {
    static INIT_SUCCESS: OnceLock<bool> = OnceLock::new();

    let mut first_error = None;
    let succeeded = *INIT_SUCCESS.get_or_init(|| match initialize_tracing(default_level) {
        Ok(()) => true,
        Err(e) => {
            first_error = Some(e);
            false
        }
    });

    match (succeeded, first_error) {
        (true, _) => Ok(()),
        (false, Some(e)) => Err(e),
        (false, None) => Err(LoggingInitError::PreviouslyFailed),
    }
}
