//! Safe record serialization.
//!
//! `stringify` never fails: cycles in `meta` are cut with a sentinel string
//! and error values are flattened to plain objects before formatting.

pub mod graph;

pub use graph::{error_to_value, payload_to_value};

use crate::domain::LogRecord;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::convert::Infallible;
use std::str::FromStr;

/// Widest indentation honoured, in spaces or characters.
pub const MAX_INDENT: usize = 10;

/// Indentation used when formatting a record.
///
/// A negative width means compact output, wherever it comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(untagged, from = "IndentRepr")]
pub enum Indent {
    /// Compact, single-line output.
    #[default]
    None,
    /// This many spaces per level, capped at [`MAX_INDENT`].
    Spaces(usize),
    /// This literal string per level, truncated to [`MAX_INDENT`] characters.
    Literal(String),
}

impl Indent {
    /// The per-level indentation unit, or `None` for compact output.
    pub fn unit(&self) -> Option<String> {
        let unit = match self {
            Indent::None => return None,
            Indent::Spaces(count) => " ".repeat((*count).min(MAX_INDENT)),
            Indent::Literal(literal) => literal.chars().take(MAX_INDENT).collect(),
        };
        (!unit.is_empty()).then_some(unit)
    }
}

impl Indent {
    fn from_width(width: i64) -> Self {
        usize::try_from(width).map_or(Indent::None, Indent::Spaces)
    }
}

/// Wire shape of an indent in config files: a signed width or a string.
#[derive(Deserialize)]
#[serde(untagged)]
enum IndentRepr {
    Width(i64),
    Text(String),
}

impl From<IndentRepr> for Indent {
    fn from(repr: IndentRepr) -> Self {
        match repr {
            IndentRepr::Width(width) => Indent::from_width(width),
            IndentRepr::Text(text) if text.is_empty() => Indent::None,
            IndentRepr::Text(text) => Indent::Literal(text),
        }
    }
}

impl FromStr for Indent {
    type Err = Infallible;

    /// Empty → `None`, a negative number → `None`, a number → `Spaces`,
    /// anything else → `Literal`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Indent::None);
        }
        Ok(s.parse::<i64>()
            .map_or_else(|_| Indent::Literal(s.to_string()), Indent::from_width))
    }
}

/// Converts a record into its JSON tree, keys in emission order.
pub fn record_to_value(record: &LogRecord) -> Value {
    let mut object = Map::new();
    object.insert(
        "level".to_string(),
        Value::String(record.level.as_str().to_string()),
    );
    object.insert("id".to_string(), Value::String(record.id.clone()));
    if let Some(message) = &record.message {
        object.insert("message".to_string(), Value::String(message.clone()));
    }
    if let Some(kind) = &record.kind {
        object.insert("type".to_string(), Value::String(kind.clone()));
    }
    if let Some(meta) = &record.meta {
        object.insert("meta".to_string(), graph::payload_to_value_at(meta, "meta"));
    }
    if let Some(reference_id) = &record.reference_id {
        object.insert(
            "reference_id".to_string(),
            Value::String(reference_id.clone()),
        );
    }
    Value::Object(object)
}

/// Renders a record as JSON text using `indent`.
pub fn stringify(record: &LogRecord, indent: &Indent) -> String {
    format_value(&record_to_value(record), indent)
}

/// Renders any JSON tree using `indent`.
pub fn format_value(value: &Value, indent: &Indent) -> String {
    let Some(unit) = indent.unit() else {
        return value.to_string();
    };

    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(unit.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    match value.serialize(&mut serializer) {
        Ok(()) => String::from_utf8_lossy(&buffer).into_owned(),
        // Writing a `Value` into memory does not fail; fall back to compact.
        Err(_) => value.to_string(),
    }
}
