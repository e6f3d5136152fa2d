use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error as StdError;

/// Plain-data capture of an error, so it serializes as
/// `{name, message, stack, ...}` rather than an opaque value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorValue {
    pub name: String,
    pub message: String,
    pub stack: String,
    pub code: Option<String>,
    pub cause: Option<Box<ErrorValue>>,
}

impl ErrorValue {
    /// Builds an error value with a backtrace captured at the call site.
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        let name = name.into();
        let message = message.into();
        let stack = render_stack(&name, &message, &Backtrace::force_capture());
        Self {
            name,
            message,
            stack,
            code: None,
            cause: None,
        }
    }

    /// Captures `err`, naming it after its concrete type and walking its
    /// `source()` chain into nested causes.
    pub fn from_error<E>(err: &E) -> Self
    where
        E: StdError + 'static,
    {
        let mut value = Self::new(short_type_name::<E>(), err.to_string());
        value.cause = err.source().map(|source| Box::new(Self::from_source(source)));
        value
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_cause(mut self, cause: ErrorValue) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    // Sources are type-erased, so they get the generic name and no backtrace.
    fn from_source(err: &(dyn StdError + 'static)) -> Self {
        let name = "Error".to_string();
        let message = err.to_string();
        Self {
            stack: format!("{name}: {message}"),
            name,
            message,
            code: None,
            cause: err.source().map(|source| Box::new(Self::from_source(source))),
        }
    }
}

impl From<&anyhow::Error> for ErrorValue {
    fn from(err: &anyhow::Error) -> Self {
        let name = "Error".to_string();
        let message = err.to_string();
        let captured = err.backtrace();
        let stack = if captured.status() == BacktraceStatus::Captured {
            render_stack(&name, &message, captured)
        } else {
            render_stack(&name, &message, &Backtrace::force_capture())
        };

        Self {
            name,
            message,
            stack,
            code: None,
            cause: err
                .chain()
                .nth(1)
                .map(|source| Box::new(Self::from_source(source))),
        }
    }
}

impl From<anyhow::Error> for ErrorValue {
    fn from(err: anyhow::Error) -> Self {
        Self::from(&err)
    }
}

impl From<std::io::Error> for ErrorValue {
    fn from(err: std::io::Error) -> Self {
        let code = format!("{:?}", err.kind());
        Self::from_error(&err).with_code(code)
    }
}

fn render_stack(name: &str, message: &str, backtrace: &Backtrace) -> String {
    format!("{name}: {message}\n{backtrace}")
}

fn short_type_name<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}
