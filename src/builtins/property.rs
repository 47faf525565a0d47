//! Property and attribute system
//!
//! `define_property` turns a descriptor object into an attribute bitmask
//! plus either a data value or a getter/setter pair, then installs it on
//! the target. Existing own properties are replaced wholesale; their old
//! attributes are not consulted.
//!
//! `hidden`, `getter` and `accessor` are the bootstrap helpers: every
//! builtin method in this crate is installed through `hidden`, so none of
//! them show up in `for..in`.

use crate::context::Context;
use crate::error::{JsError, JsResult};
use crate::runtime::object::{PropFlags, PropertyAccessor, PropertyValue};
use crate::value::{ObjectId, Value};
use std::rc::Rc;

use super::arg;

/// Require an object, naming the caller in the error
pub fn need_object(value: &Value, prefix: &str) -> JsResult<ObjectId> {
    value
        .as_object()
        .ok_or_else(|| JsError::type_error(format!("{prefix} with a non-object")))
}

/// `typeof x === "function"`
#[inline]
pub fn is_callable(ctx: &Context, value: &Value) -> bool {
    ctx.is_callable(value)
}

/// `name in descriptor ? descriptor[name] : absent`
fn descriptor_field(
    ctx: &mut Context,
    descriptor: Option<ObjectId>,
    name: &str,
) -> JsResult<Option<Value>> {
    let Some(desc) = descriptor else {
        return Ok(None);
    };
    if !ctx.has_property(desc, name)? {
        return Ok(None);
    }
    ctx.get(desc, name).map(Some)
}

/// `!!descriptor[name]`
fn descriptor_flag(ctx: &mut Context, descriptor: Option<ObjectId>, name: &str) -> JsResult<bool> {
    match descriptor {
        Some(desc) => Ok(ctx.get(desc, name)?.to_boolean()),
        None => Ok(false),
    }
}

/// Object.defineProperty(target, key, descriptor)
pub fn define_property(
    ctx: &mut Context,
    target: &Value,
    key: &Value,
    descriptor: &Value,
) -> JsResult<Value> {
    let id = need_object(target, "defineProperty()")?;
    let desc = match descriptor {
        Value::Undefined => None,
        Value::Object(d) => Some(*d),
        _ => return Err(JsError::type_error("property descriptor must be an object")),
    };

    let get = descriptor_field(ctx, desc, "get")?;
    if get.as_ref().is_some_and(|g| !ctx.is_callable(g)) {
        return Err(JsError::type_error("'get' is not a function"));
    }
    let set = descriptor_field(ctx, desc, "set")?;
    if set.as_ref().is_some_and(|s| !ctx.is_callable(s)) {
        return Err(JsError::type_error("'set' is not a function"));
    }

    let getset = get.as_ref().is_some_and(Value::to_boolean)
        || set.as_ref().is_some_and(Value::to_boolean);

    let value = if getset {
        let has_value = descriptor_field(ctx, desc, "value")?.is_some();
        if has_value || descriptor_field(ctx, desc, "writable")?.is_some() {
            return Err(JsError::type_error(
                "Cannot specify 'value' or 'writable' with get/set",
            ));
        }
        let getter = get.unwrap_or_default();
        let setter = set.unwrap_or_default();
        let has_getter = ctx.is_callable(&getter);
        let has_setter = ctx.is_callable(&setter);
        PropertyValue::Accessor(Rc::new(PropertyAccessor::new(
            getter, has_getter, setter, has_setter,
        )))
    } else {
        PropertyValue::Data(descriptor_field(ctx, desc, "value")?.unwrap_or_default())
    };

    let mut flags = PropFlags::NONE;
    if descriptor_flag(ctx, desc, "configurable")? {
        flags |= PropFlags::CONFIGURABLE;
    }
    if descriptor_flag(ctx, desc, "enumerable")? {
        flags |= PropFlags::ENUMERABLE;
    }
    if descriptor_flag(ctx, desc, "writable")? {
        flags |= PropFlags::WRITABLE;
    }
    if getset {
        flags |= PropFlags::GET_SET;
    }

    let key = ctx.to_property_key(key)?;
    ctx.define_own_property(id, key, flags, value)?;
    Ok(target.clone())
}

/// Object.defineProperties(target, props)
///
/// Walks `Object(props)` in `for..in` order, so inherited enumerable
/// descriptors are applied too.
pub fn define_properties(ctx: &mut Context, target: &Value, props: &Value) -> JsResult<Value> {
    need_object(target, "defineProperties()")?;
    let bag = ctx.coerce_object(props)?;

    for key in ctx.enumerable_keys(bag)? {
        let descriptor = ctx.get(bag, key.as_str())?;
        define_property(ctx, target, &Value::String(key), &descriptor)?;
    }
    Ok(target.clone())
}

/// Build a descriptor object from (name, value) pairs
fn descriptor(ctx: &mut Context, fields: &[(&str, Value)]) -> JsResult<Value> {
    let desc = ctx.new_plain_object();
    for (name, value) in fields {
        ctx.put(desc, name, value.clone())?;
    }
    Ok(Value::object(desc))
}

/// Install a writable, configurable, non-enumerable data property
pub fn hidden(ctx: &mut Context, obj: ObjectId, key: &str, value: Value) -> JsResult<()> {
    let desc = descriptor(
        ctx,
        &[
            ("writable", Value::bool(true)),
            ("configurable", Value::bool(true)),
            ("value", value),
        ],
    )?;
    define_property(ctx, &Value::object(obj), &Value::string(key), &desc)?;
    Ok(())
}

/// Install a configurable, non-enumerable getter
pub fn getter(ctx: &mut Context, obj: ObjectId, key: &str, func: Value) -> JsResult<()> {
    let desc = descriptor(ctx, &[("configurable", Value::bool(true)), ("get", func)])?;
    define_property(ctx, &Value::object(obj), &Value::string(key), &desc)?;
    Ok(())
}

/// Install a configurable, non-enumerable getter/setter pair
pub fn accessor(
    ctx: &mut Context,
    obj: ObjectId,
    key: &str,
    get: Value,
    set: Value,
) -> JsResult<()> {
    let desc = descriptor(
        ctx,
        &[
            ("configurable", Value::bool(true)),
            ("get", get),
            ("set", set),
        ],
    )?;
    define_property(ctx, &Value::object(obj), &Value::string(key), &desc)?;
    Ok(())
}

/// Accessor defined by an object literal (`{ get x() {}, set x(v) {} }`)
///
/// Enumerable and configurable. A half that is not callable is recorded
/// as absent rather than rejected.
pub fn define_literal_accessor(
    ctx: &mut Context,
    obj: ObjectId,
    key: &Value,
    get: Value,
    set: Value,
) -> JsResult<()> {
    let key = ctx.to_property_key(key)?;
    let has_getter = ctx.is_callable(&get);
    let has_setter = ctx.is_callable(&set);
    let accessor = PropertyAccessor::new(get, has_getter, set, has_setter);
    ctx.define_own_property(
        obj,
        key,
        PropFlags::CONFIGURABLE | PropFlags::ENUMERABLE | PropFlags::GET_SET,
        PropertyValue::Accessor(Rc::new(accessor)),
    )
}

pub fn js_object_define_property(
    ctx: &mut Context,
    _this: Value,
    args: &[Value],
) -> JsResult<Value> {
    define_property(ctx, &arg(args, 0), &arg(args, 1), &arg(args, 2))
}

pub fn js_object_define_properties(
    ctx: &mut Context,
    _this: Value,
    args: &[Value],
) -> JsResult<Value> {
    define_properties(ctx, &arg(args, 0), &arg(args, 1))
}
