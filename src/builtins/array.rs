//! Array constructor and Array.prototype
//!
//! The methods are generic: the receiver goes through `Object(this)` and
//! is only read and written with `get`/`put`, so they work on anything
//! with a `length`. Array-to-array copies take a block-copy fast path.

use crate::context::Context;
use crate::error::JsResult;
use crate::runtime::conversion::number_to_string;
use crate::runtime::object::InternalClass;
use crate::runtime::string::JSString;
use crate::util::dtoa::u32_to_string;
use crate::util::f64_to_uint32;
use crate::value::{ObjectId, Value};
use tracing::trace;

use super::object::js_object_to_string;
use super::{arg, install_method};

/// Array or Arguments object
pub fn is_array_base(ctx: &Context, value: &Value) -> bool {
    ctx.internal_class(value).is_array_base()
}

/// Array or Arguments object holding at least `length` elements
pub fn is_array_base_of_length(ctx: &Context, value: &Value, length: u32) -> bool {
    value
        .as_object()
        .filter(|_| is_array_base(ctx, value))
        .and_then(|id| ctx.array_length(id).ok())
        .is_some_and(|len| len >= length)
}

/// Array object (Arguments objects are excluded)
pub fn is_array(ctx: &Context, value: &Value) -> bool {
    ctx.internal_class(value) == InternalClass::Array
}

/// Copy `src[from..to]` into `dest` starting at `dest_index`
///
/// Array sources long enough for the range are block-copied, holes
/// included. Anything else is copied one present index at a time, with
/// `dest_index` advancing over missing ones as well.
pub fn copy_to_array(
    ctx: &mut Context,
    dest: ObjectId,
    dest_index: u32,
    src: ObjectId,
    from: u32,
    to: u32,
) -> JsResult<()> {
    if is_array_base_of_length(ctx, &Value::object(src), to) {
        trace!(from, to, dest_index, "array copy: fast path");
        return ctx.array_copy(dest, dest_index, src, from, to);
    }

    trace!(from, to, dest_index, "array copy: slow path");
    let mut dest_index = dest_index as u64;
    for i in from..to {
        let key = u32_to_string(i);
        if ctx.has_property(src, &key)? {
            let value = ctx.get(src, &key)?;
            ctx.put(dest, &dest_index.to_string(), value)?;
        }
        dest_index += 1;
    }
    Ok(())
}

fn length_of(ctx: &mut Context, obj: ObjectId) -> JsResult<u32> {
    let len = ctx.get(obj, "length")?;
    ctx.to_uint32(&len)
}

/// Array.isArray(arg)
pub fn js_array_is_array(ctx: &mut Context, _this: Value, args: &[Value]) -> JsResult<Value> {
    Ok(Value::bool(is_array(ctx, &arg(args, 0))))
}

/// Array(...items) / Array(length)
pub fn js_array_constructor(ctx: &mut Context, _this: Value, args: &[Value]) -> JsResult<Value> {
    let id = match args {
        [len @ Value::Number(_)] => {
            let len = ctx.array_length_from(len)?;
            ctx.new_array(len)
        }
        _ => ctx.new_array_from(args.to_vec()),
    };
    Ok(Value::object(id))
}

/// Array.prototype.push(...items)
pub fn js_array_push(ctx: &mut Context, this: Value, args: &[Value]) -> JsResult<Value> {
    let obj = ctx.coerce_object(&this)?;
    let mut n = length_of(ctx, obj)? as f64;

    // Resize once up front
    ctx.put(obj, "length", Value::number(n + args.len() as f64))?;
    for item in args {
        ctx.put(obj, &number_to_string(n), item.clone())?;
        n += 1.0;
    }
    Ok(Value::number(n))
}

/// Array.prototype.pop()
pub fn js_array_pop(ctx: &mut Context, this: Value, _args: &[Value]) -> JsResult<Value> {
    let obj = ctx.coerce_object(&this)?;
    let len = length_of(ctx, obj)?;
    if len == 0 {
        ctx.put(obj, "length", Value::int(0))?;
        return Ok(Value::undefined());
    }

    let last = len - 1;
    let key = u32_to_string(last);
    let element = ctx.get(obj, &key)?;
    ctx.delete_property(obj, &key)?;
    ctx.put(obj, "length", Value::number(last as f64))?;
    Ok(element)
}

/// Array.prototype.concat(...items)
///
/// Array arguments are spread one level; anything else is appended as is.
pub fn js_array_concat(ctx: &mut Context, this: Value, args: &[Value]) -> JsResult<Value> {
    let obj = Value::object(ctx.coerce_object(&this)?);
    let parts: Vec<Value> = std::iter::once(obj).chain(args.iter().cloned()).collect();

    // Size the result first
    let mut total = 0.0;
    for part in &parts {
        total += match part.as_object().filter(|_| is_array(ctx, part)) {
            Some(id) => ctx.array_length(id)? as f64,
            None => 1.0,
        };
    }

    let result = ctx.new_array(0);
    ctx.put(result, "length", Value::number(total))?;

    let mut n: u32 = 0;
    for part in parts {
        match part.as_object().filter(|_| is_array(ctx, &part)) {
            Some(id) => {
                let len = ctx.array_length(id)?;
                copy_to_array(ctx, result, n, id, 0, len)?;
                n += len;
            }
            None => {
                ctx.put(result, &u32_to_string(n), part)?;
                n += 1;
            }
        }
    }
    Ok(Value::object(result))
}

fn relative_index(pos: f64, len: u32) -> u32 {
    if pos.is_nan() {
        return 0;
    }
    let len = len as f64;
    let pos = if pos < 0.0 {
        (pos + len).max(0.0)
    } else {
        pos.min(len)
    };
    f64_to_uint32(pos)
}

/// Array.prototype.slice(start, end)
pub fn js_array_slice(ctx: &mut Context, this: Value, args: &[Value]) -> JsResult<Value> {
    let obj = ctx.coerce_object(&this)?;
    let len = length_of(ctx, obj)?;

    let start = ctx.to_number(&arg(args, 0))?;
    let k = relative_index(start, len);
    let end = arg(args, 1);
    let fin = if end.is_undefined() {
        len
    } else {
        let end = ctx.to_number(&end)?;
        relative_index(end, len)
    };

    let result = ctx.new_array(fin.saturating_sub(k));
    copy_to_array(ctx, result, 0, obj, k, fin)?;
    Ok(Value::object(result))
}

/// Array.prototype.join(separator)
pub fn js_array_join(ctx: &mut Context, this: Value, args: &[Value]) -> JsResult<Value> {
    let obj = ctx.coerce_object(&this)?;
    let len = length_of(ctx, obj)?;
    if len == 0 {
        return Ok(Value::string(""));
    }

    let sep = match arg(args, 0) {
        Value::Undefined => JSString::new(","),
        sep => ctx.to_string(&sep)?,
    };

    let mut out = String::new();
    for k in 0..len {
        if k > 0 {
            out.push_str(sep.as_str());
        }
        let elem = ctx.get(obj, &u32_to_string(k))?;
        if !elem.is_nullish() {
            out.push_str(ctx.to_string(&elem)?.as_str());
        }
    }
    Ok(Value::string(out))
}

/// Array.prototype.toString()
pub fn js_array_to_string(ctx: &mut Context, this: Value, _args: &[Value]) -> JsResult<Value> {
    let array = Value::object(ctx.coerce_object(&this)?);
    let join = ctx.get_value(&array, "join")?;
    if ctx.is_callable(&join) {
        ctx.call(&join, array, &[])
    } else {
        js_object_to_string(ctx, array, &[])
    }
}

pub(crate) fn init(ctx: &mut Context) -> JsResult<()> {
    let i = *ctx.intrinsics();
    install_method(ctx, i.array_ctor, "isArray", js_array_is_array, 1)?;

    let proto = i.array_prototype;
    install_method(ctx, proto, "push", js_array_push, 1)?;
    install_method(ctx, proto, "pop", js_array_pop, 0)?;
    install_method(ctx, proto, "concat", js_array_concat, 1)?;
    install_method(ctx, proto, "slice", js_array_slice, 2)?;
    install_method(ctx, proto, "join", js_array_join, 1)?;
    install_method(ctx, proto, "toString", js_array_to_string, 0)?;
    Ok(())
}
