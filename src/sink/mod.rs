pub mod console;

pub use console::{Channel, ConsoleSink, MemoryChannels, OutputChannels, StdStreams};

use crate::domain::{LogRecord, LoggerError};
#[cfg(test)]
use mockall::automock;

/// Destination for resolved records.
///
/// The logger calls `write` at most once per log call, synchronously, after
/// filtering and id resolution. Any error is returned to the caller as-is.
#[cfg_attr(test, automock)]
pub trait LogSink: Send + Sync {
    fn write(&self, record: &LogRecord) -> Result<(), LoggerError>;
}

impl<S: LogSink + ?Sized> LogSink for Box<S> {
    fn write(&self, record: &LogRecord) -> Result<(), LoggerError> {
        (**self).write(record)
    }
}

impl<S: LogSink + ?Sized> LogSink for std::sync::Arc<S> {
    fn write(&self, record: &LogRecord) -> Result<(), LoggerError> {
        (**self).write(record)
    }
}
