//! Error types raised by the runtime core and the builtins
//!
//! Builtins never return error codes; a failing step yields a `JsError`
//! which propagates with `?` up to whoever invoked the builtin.

use crate::value::Value;
use thiserror::Error;

/// A JavaScript exception in flight
#[derive(Debug, Clone, Error)]
pub enum JsError {
    /// Operating on the wrong kind of value
    #[error("TypeError: {0}")]
    TypeError(String),

    /// Numeric argument outside the accepted range (array lengths)
    #[error("RangeError: {0}")]
    RangeError(String),

    /// Reserved for the runtime core; the builtins never raise it
    #[error("SyntaxError: {0}")]
    SyntaxError(String),

    /// Runtime limits (call depth)
    #[error("InternalError: {0}")]
    InternalError(String),

    /// An arbitrary value thrown by a called function
    #[error("Uncaught exception: {0}")]
    Exception(Value),
}

impl JsError {
    /// Create a type error
    pub fn type_error(msg: impl Into<String>) -> Self {
        Self::TypeError(msg.into())
    }

    /// Create a range error
    pub fn range_error(msg: impl Into<String>) -> Self {
        Self::RangeError(msg.into())
    }

    /// Create a syntax error
    pub fn syntax_error(msg: impl Into<String>) -> Self {
        Self::SyntaxError(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::InternalError(msg.into())
    }

    /// Wrap a thrown value
    pub fn exception(value: Value) -> Self {
        Self::Exception(value)
    }

    /// Error kind used when materializing this error as a JS object.
    ///
    /// Returns `None` for thrown values, which are already JS values.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::TypeError(_) => Some(ErrorKind::TypeError),
            Self::RangeError(_) => Some(ErrorKind::RangeError),
            Self::SyntaxError(_) => Some(ErrorKind::SyntaxError),
            Self::InternalError(_) => Some(ErrorKind::InternalError),
            Self::Exception(_) => None,
        }
    }

    /// The message part, without the error name prefix
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::TypeError(msg)
            | Self::RangeError(msg)
            | Self::SyntaxError(msg)
            | Self::InternalError(msg) => Some(msg),
            Self::Exception(_) => None,
        }
    }
}

/// Members of the Error constructor family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Error,
    TypeError,
    RangeError,
    SyntaxError,
    InternalError,
}

impl ErrorKind {
    /// Value of `name` on the matching prototype
    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::Error => "Error",
            ErrorKind::TypeError => "TypeError",
            ErrorKind::RangeError => "RangeError",
            ErrorKind::SyntaxError => "SyntaxError",
            ErrorKind::InternalError => "InternalError",
        }
    }
}

/// Result type for builtins and runtime primitives
pub type JsResult<T> = std::result::Result<T, JsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            JsError::type_error("not an object").to_string(),
            "TypeError: not an object"
        );
        assert_eq!(
            JsError::range_error("invalid array length").to_string(),
            "RangeError: invalid array length"
        );
    }

    #[test]
    fn test_kind_and_message() {
        let err = JsError::internal("maximum call stack size exceeded");
        assert_eq!(err.kind(), Some(ErrorKind::InternalError));
        assert_eq!(err.message(), Some("maximum call stack size exceeded"));

        let thrown = JsError::exception(Value::int(3));
        assert_eq!(thrown.kind(), None);
        assert_eq!(thrown.message(), None);
    }
}
