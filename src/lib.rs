#![deny(warnings, rust_2024_compatibility)]
// Specific pedantic lints enforced (not blanket allow):
#![deny(
    clippy::explicit_iter_loop,
    clippy::manual_let_else,
    clippy::semicolon_if_nothing_returned,
    clippy::inconsistent_struct_constructor
)]
#![allow(
    clippy::missing_errors_doc,      // Internal API
    clippy::module_name_repetitions, // e.g. LoggerError in logger module
    clippy::must_use_candidate,      // Annotated selectively on critical APIs
    clippy::doc_markdown             // Internal API
)]

pub mod app;
pub mod domain;
pub mod logger;
pub mod serializer;
pub mod sink;

// Re-export main types for easy access
pub use domain::{ErrorValue, LogEntry, LogInput, LogRecord, LoggerError, Payload, Severity};
pub use logger::{ConsoleLogger, Logger};
pub use serializer::{Indent, stringify};
pub use sink::{ConsoleSink, LogSink, MemoryChannels, OutputChannels, StdStreams};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
