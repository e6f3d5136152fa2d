//! Level filtering and record building.

use crate::domain::{LogEntry, LogInput, LogRecord, LoggerError, Severity, generate_id};
use crate::serializer::Indent;
use crate::sink::{ConsoleSink, LogSink, StdStreams};
use tracing::trace;

/// Leveled logger over a [`LogSink`].
///
/// The threshold is fixed at construction. A call at `level` reaches the sink
/// iff `threshold.rank() >= level.rank()`; otherwise it returns `Ok(())`
/// without side effects.
#[derive(Debug)]
pub struct Logger<S> {
    threshold: Severity,
    sink: S,
}

/// Logger writing JSON lines to the console.
pub type ConsoleLogger<C = StdStreams> = Logger<ConsoleSink<C>>;

impl ConsoleLogger {
    pub fn console(threshold: Severity, indent: Indent) -> Self {
        Logger::new(threshold, ConsoleSink::new(indent))
    }
}

impl<S: LogSink> Logger<S> {
    pub fn new(threshold: Severity, sink: S) -> Self {
        Self { threshold, sink }
    }

    /// Parses the threshold by name, failing on anything but
    /// `error`, `warn`, `info` or `debug`.
    pub fn from_level_name(threshold: &str, sink: S) -> Result<Self, LoggerError> {
        Ok(Self::new(threshold.parse()?, sink))
    }

    pub fn threshold(&self) -> Severity {
        self.threshold
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn is_enabled(&self, level: Severity) -> bool {
        self.threshold.admits(level)
    }

    pub fn error(&self, input: impl Into<LogInput>) -> Result<(), LoggerError> {
        self.log(Severity::Error, input)
    }

    pub fn warn(&self, input: impl Into<LogInput>) -> Result<(), LoggerError> {
        self.log(Severity::Warn, input)
    }

    pub fn info(&self, input: impl Into<LogInput>) -> Result<(), LoggerError> {
        self.log(Severity::Info, input)
    }

    pub fn debug(&self, input: impl Into<LogInput>) -> Result<(), LoggerError> {
        self.log(Severity::Debug, input)
    }

    /// Logs at `level`. A bare message is first rewritten into an entry
    /// carrying only that message.
    pub fn log(&self, level: Severity, input: impl Into<LogInput>) -> Result<(), LoggerError> {
        let entry = match input.into() {
            LogInput::Text(message) => return self.log(level, LogEntry::message(message)),
            LogInput::Structured(entry) => entry,
        };

        if !self.is_enabled(level) {
            trace!(%level, threshold = %self.threshold, "record below threshold");
            return Ok(());
        }

        let record = build_record(level, entry);
        self.sink.write(&record)
    }
}

/// Resolves the id and stamps the level. The level argument always wins;
/// a caller-supplied id is kept as-is.
fn build_record(level: Severity, mut entry: LogEntry) -> LogRecord {
    let id = entry.id.take().unwrap_or_else(generate_id);
    LogRecord::new(level, id, entry)
}
