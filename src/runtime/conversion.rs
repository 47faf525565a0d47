//! Type conversions
//!
//! ToPrimitive, ToString, ToNumber, ToUint32 and ToObject as used by the
//! builtins. Wrapper objects (Boolean, Number, String) convert straight
//! to the primitive they hold.

use crate::context::Context;
use crate::error::{JsError, JsResult};
use crate::runtime::object::{InternalClass, ObjectData};
use crate::runtime::string::JSString;
use crate::util::dtoa::f64_to_string;
use crate::util::f64_to_uint32;
use crate::util::unicode::trim_js;
use crate::value::{ObjectId, Value};

/// Preferred result type of ToPrimitive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferredType {
    Number,
    String,
}

/// Number::toString(10)
#[inline]
pub fn number_to_string(n: f64) -> String {
    f64_to_string(n)
}

/// StringToNumber: decimal, Infinity and 0x/0o/0b literals
pub fn string_to_number(s: &str) -> f64 {
    let s = trim_js(s);
    if s.is_empty() {
        return 0.0;
    }

    let radix = match s.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &s[2..];
        if digits.is_empty() {
            return f64::NAN;
        }
        let mut n = 0.0;
        for c in digits.chars() {
            match c.to_digit(radix) {
                Some(d) => n = n * radix as f64 + d as f64,
                None => return f64::NAN,
            }
        }
        return n;
    }

    let (sign, body) = match s.as_bytes()[0] {
        b'-' => (-1.0, &s[1..]),
        b'+' => (1.0, &s[1..]),
        _ => (1.0, s),
    };
    if body == "Infinity" {
        return sign * f64::INFINITY;
    }
    // Rust's parser also takes "inf", "nan" and friends
    if body.is_empty()
        || body.starts_with(['+', '-'])
        || !body
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
    {
        return f64::NAN;
    }
    body.parse::<f64>().map_or(f64::NAN, |n| sign * n)
}

impl Context {
    /// ToPrimitive
    pub fn to_primitive(&mut self, value: &Value, hint: PreferredType) -> JsResult<Value> {
        let id = match value {
            Value::Object(id) => *id,
            _ => return Ok(value.clone()),
        };
        if let Some(prim) = self.object(id)?.primitive() {
            return Ok(prim.clone());
        }

        let order = match hint {
            PreferredType::String => ["toString", "valueOf"],
            PreferredType::Number => ["valueOf", "toString"],
        };
        for name in order {
            let method = self.get(id, name)?;
            if self.is_callable(&method) {
                let result = self.call(&method, value.clone(), &[])?;
                if !result.is_object() {
                    return Ok(result);
                }
            }
        }
        Err(JsError::type_error("cannot convert object to primitive value"))
    }

    /// ToString
    pub fn to_string(&mut self, value: &Value) -> JsResult<JSString> {
        Ok(match value {
            Value::Undefined => JSString::new("undefined"),
            Value::Null => JSString::new("null"),
            Value::Bool(true) => JSString::new("true"),
            Value::Bool(false) => JSString::new("false"),
            Value::Number(n) => JSString::from(number_to_string(*n)),
            Value::String(s) => s.clone(),
            Value::Object(_) => {
                let prim = self.to_primitive(value, PreferredType::String)?;
                return self.to_string(&prim);
            }
        })
    }

    /// ToNumber
    pub fn to_number(&mut self, value: &Value) -> JsResult<f64> {
        Ok(match value {
            Value::Undefined => f64::NAN,
            Value::Null => 0.0,
            Value::Bool(b) => *b as u8 as f64,
            Value::Number(n) => *n,
            Value::String(s) => string_to_number(s.as_str()),
            Value::Object(_) => {
                let prim = self.to_primitive(value, PreferredType::Number)?;
                return self.to_number(&prim);
            }
        })
    }

    /// ToUint32
    pub fn to_uint32(&mut self, value: &Value) -> JsResult<u32> {
        Ok(f64_to_uint32(self.to_number(value)?))
    }

    /// ToPropertyKey
    pub fn to_property_key(&mut self, value: &Value) -> JsResult<JSString> {
        let prim = self.to_primitive(value, PreferredType::String)?;
        self.to_string(&prim)
    }

    /// ToObject: TypeError for null and undefined, primitives get a wrapper
    pub fn to_object(&mut self, value: &Value) -> JsResult<ObjectId> {
        let (class, proto) = match value {
            Value::Object(id) => return Ok(*id),
            Value::Undefined | Value::Null => {
                return Err(JsError::type_error(format!("cannot convert {value} to object")));
            }
            Value::Bool(_) => (InternalClass::Boolean, self.intrinsics.boolean_prototype),
            Value::Number(_) => (InternalClass::Number, self.intrinsics.number_prototype),
            Value::String(_) => (InternalClass::String, self.intrinsics.string_prototype),
        };
        Ok(self.alloc_object(class, Some(proto), ObjectData::Primitive(value.clone())))
    }

    /// `Object(value)`: like ToObject, but null and undefined give a fresh object
    pub fn coerce_object(&mut self, value: &Value) -> JsResult<ObjectId> {
        if value.is_nullish() {
            return Ok(self.new_plain_object());
        }
        self.to_object(value)
    }
}
