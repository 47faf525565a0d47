//! JavaScript value representation
//!
//! `Value` is a tagged variant over the six kinds the standard library
//! sees: undefined, null, boolean, number, string and object reference.
//! Primitive payloads are stored inline; objects are referenced by an
//! `ObjectId` handle into the context heap, so copying a value never
//! copies an object.

use crate::runtime::conversion::number_to_string;
use crate::runtime::string::JSString;
use std::fmt;

/// Handle to an object stored in the context heap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub(crate) u32);

impl ObjectId {
    /// Slot index in the heap
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// High-level JavaScript value type
///
/// Equality is strict equality (`===`): numbers compare as doubles (so
/// `NaN != NaN`), strings by content and objects by identity.
#[derive(Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(JSString),
    Object(ObjectId),
}

impl Value {
    // Constructors for primitive values

    /// Create an undefined value
    #[inline]
    pub const fn undefined() -> Self {
        Value::Undefined
    }

    /// Create a null value
    #[inline]
    pub const fn null() -> Self {
        Value::Null
    }

    /// Create a boolean value
    #[inline]
    pub const fn bool(b: bool) -> Self {
        Value::Bool(b)
    }

    /// Create a number value
    #[inline]
    pub const fn number(n: f64) -> Self {
        Value::Number(n)
    }

    /// Create a number value from an integer
    #[inline]
    pub const fn int(val: i32) -> Self {
        Value::Number(val as f64)
    }

    /// Create a string value
    #[inline]
    pub fn string(s: impl Into<JSString>) -> Self {
        Value::String(s.into())
    }

    /// Create an object reference
    #[inline]
    pub const fn object(id: ObjectId) -> Self {
        Value::Object(id)
    }

    // Type checking

    /// Check if this is undefined
    #[inline]
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Check if this is null
    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if this is nullish (null or undefined)
    #[inline]
    pub const fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    /// Check if this is a boolean
    #[inline]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Check if this is a number
    #[inline]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Check if this is a string
    #[inline]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Check if this is an object reference
    #[inline]
    pub const fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    // Value extraction

    /// Get boolean value, returns None if not a boolean
    #[inline]
    pub const fn to_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get number value, returns None if not a number
    #[inline]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get integer value, returns None unless this is an integral number in i32 range
    #[inline]
    pub fn to_i32(&self) -> Option<i32> {
        match self {
            Value::Number(n) if n.fract() == 0.0 && *n >= i32::MIN as f64 && *n <= i32::MAX as f64 => {
                Some(*n as i32)
            }
            _ => None,
        }
    }

    /// Get object handle, returns None if not an object
    #[inline]
    pub const fn as_object(&self) -> Option<ObjectId> {
        match self {
            Value::Object(id) => Some(*id),
            _ => None,
        }
    }

    /// ToBoolean: the truthiness of the value
    pub fn to_boolean(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::Object(_) => true,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::int(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<JSString> for Value {
    fn from(s: JSString) -> Self {
        Value::String(s)
    }
}

impl From<ObjectId> for Value {
    fn from(id: ObjectId) -> Self {
        Value::Object(id)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "Undefined"),
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({})", b),
            Value::Number(n) => write!(f, "Number({})", number_to_string(*n)),
            Value::String(s) => write!(f, "String({:?})", s.as_str()),
            Value::Object(id) => write!(f, "Object(#{})", id.0),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", number_to_string(*n)),
            Value::String(s) => write!(f, "{}", s.as_str()),
            Value::Object(_) => write!(f, "[object]"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null() {
        let v = Value::null();
        assert!(v.is_null());
        assert!(!v.is_undefined());
        assert!(!v.is_bool());
        assert!(v.is_nullish());
    }

    #[test]
    fn test_undefined() {
        let v = Value::default();
        assert!(!v.is_null());
        assert!(v.is_undefined());
        assert!(v.is_nullish());
    }

    #[test]
    fn test_bool() {
        assert_eq!(Value::bool(true).to_bool(), Some(true));
        assert_eq!(Value::bool(false).to_bool(), Some(false));
        assert_eq!(Value::int(1).to_bool(), None);
    }

    #[test]
    fn test_int() {
        assert_eq!(Value::int(42).to_i32(), Some(42));
        assert_eq!(Value::int(-100).to_i32(), Some(-100));
        assert_eq!(Value::number(1.5).to_i32(), None);
        assert_eq!(Value::number(4294967295.0).to_i32(), None);
    }

    #[test]
    fn test_strict_equality() {
        assert_eq!(Value::string("ab"), Value::string("ab"));
        assert_ne!(Value::number(f64::NAN), Value::number(f64::NAN));
        assert_ne!(Value::int(1), Value::string("1"));
        assert_eq!(Value::object(ObjectId(3)), Value::object(ObjectId(3)));
    }

    #[test]
    fn test_to_boolean() {
        assert!(!Value::undefined().to_boolean());
        assert!(!Value::int(0).to_boolean());
        assert!(!Value::number(f64::NAN).to_boolean());
        assert!(!Value::string("").to_boolean());
        assert!(Value::string("0").to_boolean());
        assert!(Value::object(ObjectId(0)).to_boolean());
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::int(42).to_string(), "42");
        assert_eq!(Value::number(0.5).to_string(), "0.5");
        assert_eq!(Value::string("hi").to_string(), "hi");
        assert_eq!(Value::undefined().to_string(), "undefined");
        assert_eq!(format!("{:?}", Value::null()), "Null");
    }
}
