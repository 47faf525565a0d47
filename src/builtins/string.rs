//! String conversion function and String.prototype

use crate::context::Context;
use crate::error::{JsError, JsResult};
use crate::util::f64_to_uint32;
use crate::value::Value;

use super::install_method;

/// String(value)
pub fn js_string_constructor(ctx: &mut Context, _this: Value, args: &[Value]) -> JsResult<Value> {
    match args.first() {
        None => Ok(Value::string("")),
        Some(value) => Ok(Value::String(ctx.to_string(value)?)),
    }
}

/// String.prototype.indexOf(searchString, position)
///
/// Positions count UTF-16 code units while the search itself runs over
/// the UTF-8 bytes.
pub fn js_string_index_of(ctx: &mut Context, this: Value, args: &[Value]) -> JsResult<Value> {
    if this.is_nullish() {
        return Err(JsError::type_error("'this' is not coercible to String"));
    }
    let s = ctx.to_string(&this)?;
    let needle = ctx.to_string(&args.first().cloned().unwrap_or_default())?;
    let num_pos = ctx.to_number(&args.get(1).cloned().unwrap_or_default())?;

    let start = if num_pos < 0.0 {
        0
    } else if num_pos >= s.utf16_len() as f64 {
        return Ok(Value::int(-1));
    } else {
        f64_to_uint32(num_pos)
    };

    let (mut from, second_surrogate) = s.char_pos(start);
    if second_surrogate {
        // A match cannot begin inside a surrogate pair
        if needle.is_empty() {
            return Ok(Value::number(start as f64));
        }
        from += s.as_str()[from..].chars().next().map_or(0, char::len_utf8);
    }

    Ok(match s.find_bytes(from, &needle) {
        Some(pos) => Value::number(s.byte_offset_to_utf16_index(pos) as f64),
        None => Value::int(-1),
    })
}

pub(crate) fn init(ctx: &mut Context) -> JsResult<()> {
    let proto = ctx.intrinsics().string_prototype;
    install_method(ctx, proto, "indexOf", js_string_index_of, 1)
}
