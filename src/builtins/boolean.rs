//! Boolean conversion function and Boolean.prototype

use crate::context::Context;
use crate::error::{JsError, JsResult};
use crate::runtime::object::InternalClass;
use crate::value::Value;

use super::{arg, install_method};

/// Boolean(value)
pub fn js_boolean_constructor(_ctx: &mut Context, _this: Value, args: &[Value]) -> JsResult<Value> {
    Ok(Value::bool(arg(args, 0).to_boolean()))
}

/// Boolean.prototype.toString()
pub fn js_boolean_to_string(ctx: &mut Context, this: Value, _args: &[Value]) -> JsResult<Value> {
    let b = match &this {
        Value::Bool(b) => *b,
        Value::Object(id) if ctx.internal_class(&this) == InternalClass::Boolean => {
            match ctx.object(*id)?.primitive() {
                Some(Value::Bool(b)) => *b,
                _ => false,
            }
        }
        _ => {
            return Err(JsError::type_error(
                "Boolean.prototype.toString called with a non-boolean",
            ));
        }
    };
    Ok(Value::string(if b { "true" } else { "false" }))
}

pub(crate) fn init(ctx: &mut Context) -> JsResult<()> {
    let proto = ctx.intrinsics().boolean_prototype;
    install_method(ctx, proto, "toString", js_boolean_to_string, 0)
}
