use super::LogSink;
use crate::domain::{LogRecord, LoggerError, Severity};
use crate::serializer::{Indent, stringify};
use parking_lot::Mutex;
use std::io::{self, Write};

/// Console output stream a record is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Stdout,
    Stderr,
}

impl Channel {
    /// `error` and `warn` go to stderr; `info` and `debug` to stdout.
    pub fn for_severity(level: Severity) -> Self {
        match level {
            Severity::Error | Severity::Warn => Channel::Stderr,
            Severity::Info | Severity::Debug => Channel::Stdout,
        }
    }
}

/// A pair of line-oriented output streams.
pub trait OutputChannels: Send + Sync {
    /// Writes `line` plus a newline to `channel` as one unit.
    fn write_line(&self, channel: Channel, line: &str) -> io::Result<()>;
}

/// The process's real stdout and stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdStreams;

impl OutputChannels for StdStreams {
    fn write_line(&self, channel: Channel, line: &str) -> io::Result<()> {
        match channel {
            Channel::Stdout => {
                let mut out = io::stdout().lock();
                writeln!(out, "{line}")?;
                out.flush()
            }
            Channel::Stderr => {
                let mut err = io::stderr().lock();
                writeln!(err, "{line}")?;
                err.flush()
            }
        }
    }
}

/// In-memory channels, for embedding and tests.
#[derive(Debug, Default)]
pub struct MemoryChannels {
    stdout: Mutex<Vec<String>>,
    stderr: Mutex<Vec<String>>,
}

impl MemoryChannels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self, channel: Channel) -> Vec<String> {
        match channel {
            Channel::Stdout => self.stdout.lock().clone(),
            Channel::Stderr => self.stderr.lock().clone(),
        }
    }

    pub fn stdout_lines(&self) -> Vec<String> {
        self.lines(Channel::Stdout)
    }

    pub fn stderr_lines(&self) -> Vec<String> {
        self.lines(Channel::Stderr)
    }

    pub fn total_lines(&self) -> usize {
        self.stdout.lock().len() + self.stderr.lock().len()
    }
}

impl OutputChannels for MemoryChannels {
    fn write_line(&self, channel: Channel, line: &str) -> io::Result<()> {
        match channel {
            Channel::Stdout => self.stdout.lock().push(line.to_string()),
            Channel::Stderr => self.stderr.lock().push(line.to_string()),
        }
        Ok(())
    }
}

/// Writes each record as JSON text to the channel its severity selects.
#[derive(Debug, Default)]
pub struct ConsoleSink<C = StdStreams> {
    channels: C,
    indent: Indent,
}

impl ConsoleSink<StdStreams> {
    pub fn new(indent: Indent) -> Self {
        Self::with_channels(StdStreams, indent)
    }
}

impl<C: OutputChannels> ConsoleSink<C> {
    pub fn with_channels(channels: C, indent: Indent) -> Self {
        Self { channels, indent }
    }

    pub fn channels(&self) -> &C {
        &self.channels
    }

    pub fn indent(&self) -> &Indent {
        &self.indent
    }
}

impl<C: OutputChannels> LogSink for ConsoleSink<C> {
    fn write(&self, record: &LogRecord) -> Result<(), LoggerError> {
        let text = stringify(record, &self.indent);
        self.channels
            .write_line(Channel::for_severity(record.level), &text)?;
        Ok(())
    }
}
