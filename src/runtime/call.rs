//! Function call mechanics
//!
//! Every invocation goes through `Context::call`, which resolves the
//! native function record and enforces the recursion limit.

use crate::context::Context;
use crate::error::{JsError, JsResult};
use crate::value::Value;
use tracing::trace;

impl Context {
    /// Call `func` with an explicit `this` and argument list
    pub fn call(&mut self, func: &Value, this: Value, args: &[Value]) -> JsResult<Value> {
        let callee = func
            .as_object()
            .and_then(|id| self.heap.get(id))
            .and_then(|obj| obj.function().copied());
        let Some(callee) = callee else {
            return Err(JsError::type_error("not a function"));
        };

        if self.call_depth >= self.config.max_recursion {
            return Err(JsError::internal("maximum call stack size exceeded"));
        }

        self.call_depth += 1;
        trace!(
            name = callee.name,
            argc = args.len(),
            depth = self.call_depth,
            "call"
        );
        let result = (callee.func)(self, this, args);
        self.call_depth -= 1;
        result
    }

    /// Look up `method` on `target` and call it with `target` as `this`
    pub fn invoke(&mut self, target: &Value, method: &str, args: &[Value]) -> JsResult<Value> {
        let func = self.get_value(target, method)?;
        self.call(&func, target.clone(), args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ContextConfig;

    fn argc(_ctx: &mut Context, _this: Value, args: &[Value]) -> JsResult<Value> {
        Ok(Value::int(args.len() as i32))
    }

    fn recurse(ctx: &mut Context, this: Value, args: &[Value]) -> JsResult<Value> {
        let f = args.first().cloned().unwrap_or_default();
        ctx.call(&f, this, args)
    }

    #[test]
    fn test_call_native() {
        let mut ctx = Context::new().unwrap();
        let f = ctx.new_function("argc", argc, 0);
        let result = ctx
            .call(&f, Value::undefined(), &[Value::int(1), Value::int(2)])
            .unwrap();
        assert_eq!(result, Value::int(2));
    }

    #[test]
    fn test_call_non_function() {
        let mut ctx = Context::new().unwrap();
        let obj = ctx.new_plain_object();
        let err = ctx.call(&Value::object(obj), Value::undefined(), &[]).unwrap_err();
        assert_eq!(err.to_string(), "TypeError: not a function");
        assert!(ctx.call(&Value::int(1), Value::undefined(), &[]).is_err());
    }

    #[test]
    fn test_recursion_limit() {
        let config = ContextConfig::default().with_max_recursion(5);
        let mut ctx = Context::with_config(config).unwrap();
        let f = ctx.new_function("recurse", recurse, 1);

        let err = ctx.call(&f, Value::undefined(), &[f.clone()]).unwrap_err();
        assert_eq!(err.to_string(), "InternalError: maximum call stack size exceeded");
        // Depth unwinds even on failure
        assert_eq!(ctx.call_depth, 0);
    }

    #[test]
    fn test_invoke() {
        let mut ctx = Context::new().unwrap();
        let arr = ctx.new_array_from(vec![Value::int(1), Value::int(2)]);
        let joined = ctx
            .invoke(&Value::object(arr), "join", &[Value::string("-")])
            .unwrap();
        assert_eq!(joined, Value::string("1-2"));
    }
}
