use thiserror::Error;

/// Top-level error type for the logger.
///
/// Filtering never produces an error and serialization cannot fail, so the
/// only variants are a bad construction parameter and a failing sink.
#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Sink error: {0}")]
    Sink(#[from] std::io::Error),
}
