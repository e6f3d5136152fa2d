//! Domain layer for rask-logger.
//!
//! Contains the canonical types shared across all modules:
//! - `Severity`: error/warn/info/debug with a fixed rank table
//! - `LogEntry` / `LogInput`: what callers hand to the logger
//! - `LogRecord`: the resolved record handed to sinks
//! - `Payload` / `ErrorValue`: the `meta` graph and captured errors
//! - `LoggerError`: Top-level error type

pub mod error;
pub mod error_value;
pub mod log_entry;
pub mod log_id;
pub mod log_level;
pub mod payload;

pub use error::LoggerError;
pub use error_value::ErrorValue;
pub use log_entry::{LogEntry, LogInput, LogRecord};
pub use log_id::generate_id;
pub use log_level::Severity;
pub use payload::Payload;
