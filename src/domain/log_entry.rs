use super::log_level::Severity;
use super::payload::Payload;

/// A structured log call as supplied by the caller. Every field is optional.
#[derive(Debug, Clone, Default)]
pub struct LogEntry {
    /// Correlation id; generated when absent.
    pub id: Option<String>,
    pub message: Option<String>,
    /// Free-form tag, serialized as `type`.
    pub kind: Option<String>,
    pub meta: Option<Payload>,
    /// Id of a related record this one refers back to.
    pub reference_id: Option<String>,
}

impl LogEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_meta(mut self, meta: impl Into<Payload>) -> Self {
        self.meta = Some(meta.into());
        self
    }

    pub fn with_reference_id(mut self, reference_id: impl Into<String>) -> Self {
        self.reference_id = Some(reference_id.into());
        self
    }
}

/// Input accepted by the logger: a bare message or a full entry.
#[derive(Debug, Clone)]
pub enum LogInput {
    Text(String),
    Structured(LogEntry),
}

impl From<&str> for LogInput {
    fn from(message: &str) -> Self {
        LogInput::Text(message.to_string())
    }
}

impl From<String> for LogInput {
    fn from(message: String) -> Self {
        LogInput::Text(message)
    }
}

impl From<LogEntry> for LogInput {
    fn from(entry: LogEntry) -> Self {
        LogInput::Structured(entry)
    }
}

/// The emitted form of a log call: level and id are always resolved.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub level: Severity,
    pub id: String,
    pub message: Option<String>,
    pub kind: Option<String>,
    pub meta: Option<Payload>,
    pub reference_id: Option<String>,
}

impl LogRecord {
    /// Merges a level and a resolved id into `entry`. The caller's own id,
    /// if any, has already been folded into `id`.
    pub fn new(level: Severity, id: String, entry: LogEntry) -> Self {
        Self {
            level,
            id,
            message: entry.message,
            kind: entry.kind,
            meta: entry.meta,
            reference_id: entry.reference_id,
        }
    }
}
