//! Object constructor and Object.prototype

use crate::context::Context;
use crate::error::{JsError, JsResult};
use crate::runtime::object::InternalClass;
use crate::value::Value;

use super::property::{self, define_properties, need_object};
use super::{arg, install_method};

/// Label used by Object.prototype.toString for each internal class
pub fn class_label(class: InternalClass) -> &'static str {
    match class {
        InternalClass::Undefined => "Undefined",
        InternalClass::Null => "Null",
        InternalClass::Memory | InternalClass::Object => "Object",
        InternalClass::Arguments => "Arguments",
        InternalClass::Array => "Array",
        InternalClass::Function => "Function",
        InternalClass::Boolean => "Boolean",
        InternalClass::Number => "Number",
        InternalClass::StringPrim | InternalClass::String => "String",
        InternalClass::Error => "Error",
        InternalClass::RegExp => "RegExp",
        InternalClass::Date => "Date",
        InternalClass::Json => "JSON",
        InternalClass::Math => "Math",
    }
}

/// Object(value)
pub fn js_object_constructor(ctx: &mut Context, _this: Value, args: &[Value]) -> JsResult<Value> {
    let id = ctx.coerce_object(&arg(args, 0))?;
    Ok(Value::object(id))
}

/// get Object.prototype.__proto__
pub fn js_object_proto_getter(ctx: &mut Context, this: Value, _args: &[Value]) -> JsResult<Value> {
    if this.is_nullish() {
        return Err(JsError::type_error("not an object"));
    }
    let id = ctx.to_object(&this)?;
    Ok(ctx.get_parent(id)?.map_or(Value::null(), Value::object))
}

/// set Object.prototype.__proto__
pub fn js_object_proto_setter(_ctx: &mut Context, _this: Value, _args: &[Value]) -> JsResult<Value> {
    Err(JsError::type_error("setting of __proto__ is not supported"))
}

/// Object.getPrototypeOf(O)
pub fn js_object_get_prototype_of(
    ctx: &mut Context,
    _this: Value,
    args: &[Value],
) -> JsResult<Value> {
    let id = need_object(&arg(args, 0), "getPrototypeOf")?;
    Ok(ctx.get_parent(id)?.map_or(Value::null(), Value::object))
}

/// Object.create(proto, properties)
///
/// Any `proto` that is not an object yields an object with no parent.
pub fn js_object_create(ctx: &mut Context, _this: Value, args: &[Value]) -> JsResult<Value> {
    let obj = Value::object(ctx.new_object(arg(args, 0).as_object()));
    let properties = arg(args, 1);
    if !properties.is_undefined() {
        define_properties(ctx, &obj, &properties)?;
    }
    Ok(obj)
}

/// Object.prototype.toString()
pub fn js_object_to_string(ctx: &mut Context, this: Value, _args: &[Value]) -> JsResult<Value> {
    let label = class_label(ctx.internal_class(&this));
    Ok(Value::string(format!("[object {label}]")))
}

/// Object.prototype.toLocaleString()
pub fn js_object_to_locale_string(
    ctx: &mut Context,
    this: Value,
    _args: &[Value],
) -> JsResult<Value> {
    ctx.invoke(&this, "toString", &[])
}

pub(crate) fn init(ctx: &mut Context) -> JsResult<()> {
    let i = *ctx.intrinsics();

    let get = ctx.new_function("__proto__", js_object_proto_getter, 0);
    let set = ctx.new_function("__proto__", js_object_proto_setter, 1);
    property::accessor(ctx, i.object_prototype, "__proto__", get, set)?;

    install_method(ctx, i.object_ctor, "getPrototypeOf", js_object_get_prototype_of, 1)?;
    install_method(ctx, i.object_ctor, "defineProperty", property::js_object_define_property, 3)?;
    install_method(ctx, i.object_ctor, "defineProperties", property::js_object_define_properties, 2)?;
    install_method(ctx, i.object_ctor, "create", js_object_create, 2)?;

    install_method(ctx, i.object_prototype, "toString", js_object_to_string, 0)?;
    install_method(ctx, i.object_prototype, "toLocaleString", js_object_to_locale_string, 0)?;
    Ok(())
}
