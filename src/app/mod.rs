pub mod config;
pub mod logging_system;

pub use config::{ConfigError, LoggerConfig};
pub use logging_system::{LoggingInitError, setup_logging_safe};

use crate::domain::{LogEntry, LogInput, Payload, Severity};
use crate::logger::ConsoleLogger;
use crate::sink::{OutputChannels, StdStreams};
use anyhow::Context;
use clap::Parser;
use std::str::FromStr;
use tracing::debug;

/// Emit one log record from the command line.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub config: LoggerConfig,

    /// Severity of the record to emit
    #[arg(long, default_value = "info", value_parser = Severity::from_str)]
    pub level: Severity,

    /// Correlation id (generated when omitted)
    #[arg(long)]
    pub id: Option<String>,

    /// Free-form type tag
    #[arg(long = "type")]
    pub kind: Option<String>,

    /// Id of a related record
    #[arg(long)]
    pub reference_id: Option<String>,

    /// JSON document attached as `meta`
    #[arg(long)]
    pub meta: Option<String>,

    /// Message text
    pub message: Vec<String>,
}

impl Cli {
    /// The input to log: a bare message when no structured field was given.
    pub fn input(&self) -> anyhow::Result<LogInput> {
        let message = self.message.join(" ");
        let structured = self.id.is_some()
            || self.kind.is_some()
            || self.reference_id.is_some()
            || self.meta.is_some();
        if !structured {
            return Ok(LogInput::Text(message));
        }

        let mut entry = LogEntry::new();
        if !message.is_empty() {
            entry.message = Some(message);
        }
        entry.id = self.id.clone();
        entry.kind = self.kind.clone();
        entry.reference_id = self.reference_id.clone();
        if let Some(meta) = &self.meta {
            let value: serde_json::Value =
                serde_json::from_str(meta).context("--meta must be valid JSON")?;
            entry.meta = Some(Payload::from(value));
        }
        Ok(LogInput::Structured(entry))
    }
}

pub fn run<I, T>(args: I) -> anyhow::Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    run_with_channels(args, StdStreams)?;
    Ok(())
}

/// Parses `args`, emits one record through `channels` and returns the
/// logger that wrote it.
pub fn run_with_channels<I, T, C>(args: I, channels: C) -> anyhow::Result<ConsoleLogger<C>>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    C: OutputChannels,
{
    let cli = Cli::parse_from(args);
    cli.config.validate()?;
    let config = cli.config.clone().resolve_file()?;

    // Diagnostics are best-effort; a failed subscriber must not block output.
    if let Err(e) = setup_logging_safe(config.diagnostics) {
        eprintln!("Warning: {e}, continuing without diagnostics");
    }
    debug!(threshold = %config.threshold, indent = ?config.indent_spec(), "logger configured");

    let logger = config.build_console_logger_with(channels);
    logger.log(cli.level, cli.input()?)?;
    Ok(logger)
}

pub fn main() -> anyhow::Result<()> {
    run(std::env::args_os())
}
