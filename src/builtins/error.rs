//! Error constructors and prototypes

use crate::context::Context;
use crate::error::{ErrorKind, JsResult};
use crate::value::Value;

use super::property::hidden;
use super::{arg, install_method};

fn text_or_empty(ctx: &mut Context, value: &Value) -> JsResult<String> {
    if value.is_undefined() {
        return Ok(String::new());
    }
    Ok(ctx.to_string(value)?.as_str().to_owned())
}

/// Error.prototype.toString()
pub fn js_error_to_string(ctx: &mut Context, this: Value, _args: &[Value]) -> JsResult<Value> {
    let name = ctx.get_value(&this, "name")?;
    let name = text_or_empty(ctx, &name)?;
    let msg = ctx.get_value(&this, "message")?;
    let msg = text_or_empty(ctx, &msg)?;

    let s = match (name.is_empty(), msg.is_empty()) {
        (true, _) => msg,
        (false, true) => name,
        (false, false) => format!("{name}: {msg}"),
    };
    Ok(Value::string(s))
}

fn construct_error(ctx: &mut Context, kind: ErrorKind, args: &[Value]) -> JsResult<Value> {
    let message = match arg(args, 0) {
        Value::Undefined => None,
        msg => Some(ctx.to_string(&msg)?),
    };
    let id = ctx.new_error(kind, message.as_ref().map(|m| m.as_str()))?;
    Ok(Value::object(id))
}

/// Error(message)
pub fn js_error_constructor(ctx: &mut Context, _this: Value, args: &[Value]) -> JsResult<Value> {
    construct_error(ctx, ErrorKind::Error, args)
}

/// TypeError(message)
pub fn js_type_error_constructor(ctx: &mut Context, _this: Value, args: &[Value]) -> JsResult<Value> {
    construct_error(ctx, ErrorKind::TypeError, args)
}

/// SyntaxError(message)
pub fn js_syntax_error_constructor(
    ctx: &mut Context,
    _this: Value,
    args: &[Value],
) -> JsResult<Value> {
    construct_error(ctx, ErrorKind::SyntaxError, args)
}

/// InternalError(message)
pub fn js_internal_error_constructor(
    ctx: &mut Context,
    _this: Value,
    args: &[Value],
) -> JsResult<Value> {
    construct_error(ctx, ErrorKind::InternalError, args)
}

/// RangeError(message)
pub fn js_range_error_constructor(
    ctx: &mut Context,
    _this: Value,
    args: &[Value],
) -> JsResult<Value> {
    construct_error(ctx, ErrorKind::RangeError, args)
}

pub(crate) fn init(ctx: &mut Context) -> JsResult<()> {
    let i = *ctx.intrinsics();

    hidden(ctx, i.error_prototype, "name", Value::string("Error"))?;
    hidden(ctx, i.error_prototype, "message", Value::string(""))?;
    install_method(ctx, i.error_prototype, "toString", js_error_to_string, 0)?;

    hidden(ctx, i.type_error_prototype, "name", Value::string("TypeError"))?;

    // The remaining kinds get a fresh prototype inheriting from Error.prototype
    for kind in [
        ErrorKind::SyntaxError,
        ErrorKind::InternalError,
        ErrorKind::RangeError,
    ] {
        let ctor = ctx.error_constructor(kind);
        let proto = ctx.new_object(Some(i.error_prototype));
        ctx.link_constructor(ctor, proto)?;
        hidden(ctx, proto, "name", Value::string(kind.name()))?;
    }
    Ok(())
}
