//! Function constructor and Function.prototype

use crate::context::Context;
use crate::error::{JsError, JsResult};
use crate::value::Value;

use super::install_method;

/// Function.prototype.call(thisArg, ...args)
pub fn js_function_call(ctx: &mut Context, this: Value, args: &[Value]) -> JsResult<Value> {
    let (this_arg, rest) = match args.split_first() {
        Some((first, rest)) => (first.clone(), rest),
        None => (Value::undefined(), &[][..]),
    };
    ctx.call(&this, this_arg, rest)
}

/// Function.prototype itself is callable and returns undefined
pub fn js_function_prototype(_ctx: &mut Context, _this: Value, _args: &[Value]) -> JsResult<Value> {
    Ok(Value::undefined())
}

/// Function(...) needs a compiler, which this runtime does not have
pub fn js_function_constructor(_ctx: &mut Context, _this: Value, _args: &[Value]) -> JsResult<Value> {
    Err(JsError::type_error("Function constructor is not supported"))
}

pub(crate) fn init(ctx: &mut Context) -> JsResult<()> {
    let proto = ctx.intrinsics().function_prototype;
    install_method(ctx, proto, "call", js_function_call, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(ctx: &mut Context, this: Value, args: &[Value]) -> JsResult<Value> {
        let mut all = vec![this];
        all.extend_from_slice(args);
        Ok(Value::object(ctx.new_array_from(all)))
    }

    #[test]
    fn test_call_forwards_this_and_args() {
        let mut ctx = Context::new().unwrap();
        let f = ctx.new_function("collect", collect, 0);

        let result = ctx
            .invoke(&f, "call", &[Value::int(0), Value::int(1), Value::int(2)])
            .unwrap();
        let joined = ctx.invoke(&result, "join", &[]).unwrap();
        assert_eq!(joined, Value::string("0,1,2"));
    }

    #[test]
    fn test_call_with_only_this() {
        let mut ctx = Context::new().unwrap();
        let f = ctx.new_function("collect", collect, 0);

        let result = js_function_call(&mut ctx, f.clone(), &[Value::string("t")]).unwrap();
        let arr = result.as_object().unwrap();
        assert_eq!(ctx.array_length(arr).unwrap(), 1);
        assert_eq!(ctx.get(arr, "0").unwrap(), Value::string("t"));

        let result = js_function_call(&mut ctx, f, &[]).unwrap();
        let arr = result.as_object().unwrap();
        assert_eq!(ctx.get(arr, "0").unwrap(), Value::undefined());
    }

    #[test]
    fn test_call_on_non_function() {
        let mut ctx = Context::new().unwrap();
        let err = js_function_call(&mut ctx, Value::int(3), &[]).unwrap_err();
        assert_eq!(err.to_string(), "TypeError: not a function");
    }

    #[test]
    fn test_function_prototype() {
        let mut ctx = Context::new().unwrap();
        let proto = Value::object(ctx.intrinsics().function_prototype);
        assert!(ctx.is_callable(&proto));
        assert_eq!(
            ctx.call(&proto, Value::undefined(), &[]).unwrap(),
            Value::undefined()
        );
        let ctor = Value::object(ctx.intrinsics().function_ctor);
        assert!(ctx.call(&ctor, Value::undefined(), &[]).is_err());
    }
}
