use super::error_value::ErrorValue;
use parking_lot::RwLock;
use serde_json::{Number, Value};
use std::fmt;
use std::sync::Arc;

pub type SharedArray = Arc<RwLock<Vec<Payload>>>;
/// Object entries in insertion order; keys are unique.
pub type SharedObject = Arc<RwLock<Vec<(String, Payload)>>>;

/// Caller-supplied `meta` payload.
///
/// Containers are shared handles, so a payload is a graph rather than a tree:
/// the same array or object may appear in several places, including inside
/// itself. Cloning a container clones the handle, not the contents. A cycle
/// keeps its nodes alive until one of its edges is removed.
///
/// Object keys serialize in insertion order. Re-inserting an existing key
/// replaces its value in place.
#[derive(Clone, Default)]
pub enum Payload {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(SharedArray),
    Object(SharedObject),
    Error(Box<ErrorValue>),
}

impl Payload {
    pub fn object() -> Self {
        Payload::Object(Arc::new(RwLock::new(Vec::new())))
    }

    pub fn array() -> Self {
        Payload::Array(Arc::new(RwLock::new(Vec::new())))
    }

    /// Inserts into an object node. Returns `false` if `self` is not an object.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<Payload>) -> bool {
        match self {
            Payload::Object(map) => {
                let (key, value) = (key.into(), value.into());
                let mut entries = map.write();
                match entries.iter_mut().find(|(existing, _)| *existing == key) {
                    Some((_, slot)) => *slot = value,
                    None => entries.push((key, value)),
                }
                true
            }
            _ => false,
        }
    }

    /// Appends to an array node. Returns `false` if `self` is not an array.
    pub fn push(&self, value: impl Into<Payload>) -> bool {
        match self {
            Payload::Array(items) => {
                items.write().push(value.into());
                true
            }
            _ => false,
        }
    }

    /// Builder form of [`Payload::insert`].
    pub fn with(self, key: impl Into<String>, value: impl Into<Payload>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<Payload> {
        match self {
            Payload::Object(map) => map
                .read()
                .iter()
                .find(|(existing, _)| existing == key)
                .map(|(_, value)| value.clone()),
            _ => None,
        }
    }

    pub fn remove(&self, key: &str) -> Option<Payload> {
        match self {
            Payload::Object(map) => {
                let mut entries = map.write();
                let index = entries.iter().position(|(existing, _)| existing == key)?;
                Some(entries.remove(index).1)
            }
            _ => None,
        }
    }

    /// Identity of a container node; scalars have none.
    pub fn node_id(&self) -> Option<usize> {
        match self {
            Payload::Array(items) => Some(Arc::as_ptr(items) as *const () as usize),
            Payload::Object(map) => Some(Arc::as_ptr(map) as *const () as usize),
            _ => None,
        }
    }

    pub fn is_same_node(&self, other: &Payload) -> bool {
        matches!((self.node_id(), other.node_id()), (Some(a), Some(b)) if a == b)
    }
}

// Shallow on purpose: a derived impl would recurse forever on a cycle.
impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Null => f.write_str("Null"),
            Payload::Bool(b) => write!(f, "Bool({b})"),
            Payload::Number(n) => write!(f, "Number({n})"),
            Payload::String(s) => write!(f, "String({s:?})"),
            Payload::Array(items) => write!(f, "Array(len={})", items.read().len()),
            Payload::Object(map) => {
                let map = map.read();
                f.debug_tuple("Object")
                    .field(&map.iter().map(|(key, _)| key).collect::<Vec<_>>())
                    .finish()
            }
            Payload::Error(err) => write!(f, "Error({}: {})", err.name, err.message),
        }
    }
}

impl From<bool> for Payload {
    fn from(value: bool) -> Self {
        Payload::Bool(value)
    }
}

impl From<i64> for Payload {
    fn from(value: i64) -> Self {
        Payload::Number(value.into())
    }
}

impl From<i32> for Payload {
    fn from(value: i32) -> Self {
        Payload::Number(value.into())
    }
}

impl From<u64> for Payload {
    fn from(value: u64) -> Self {
        Payload::Number(value.into())
    }
}

impl From<f64> for Payload {
    /// Non-finite numbers become `Null`, as JSON has no representation for them.
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(Payload::Null, Payload::Number)
    }
}

impl From<&str> for Payload {
    fn from(value: &str) -> Self {
        Payload::String(value.to_string())
    }
}

impl From<String> for Payload {
    fn from(value: String) -> Self {
        Payload::String(value)
    }
}

impl From<ErrorValue> for Payload {
    fn from(value: ErrorValue) -> Self {
        Payload::Error(Box::new(value))
    }
}

impl From<Vec<Payload>> for Payload {
    fn from(items: Vec<Payload>) -> Self {
        Payload::Array(Arc::new(RwLock::new(items)))
    }
}

impl<T: Into<Payload>> From<Option<T>> for Payload {
    fn from(value: Option<T>) -> Self {
        value.map_or(Payload::Null, Into::into)
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Payload::Null,
            Value::Bool(b) => Payload::Bool(b),
            Value::Number(n) => Payload::Number(n),
            Value::String(s) => Payload::String(s),
            Value::Array(items) => items
                .into_iter()
                .map(Payload::from)
                .collect::<Vec<_>>()
                .into(),
            Value::Object(map) => {
                let object = Payload::object();
                for (key, value) in map {
                    object.insert(key, Payload::from(value));
                }
                object
            }
        }
    }
}
