//! Native function representation
//!
//! Every builtin is a plain Rust function pointer. The receiver and the
//! positional arguments are handed over directly, so the argument count
//! of a call is simply `args.len()`.

use crate::context::Context;
use crate::error::JsResult;
use crate::value::Value;

/// Native function signature
pub type NativeFn = fn(ctx: &mut Context, this: Value, args: &[Value]) -> JsResult<Value>;

/// Native function record stored in a function object
#[derive(Clone, Copy)]
pub struct CFunction {
    /// Function name, for diagnostics
    pub name: &'static str,
    /// Implementation
    pub func: NativeFn,
    /// Declared parameter count
    pub arity: u8,
}

impl CFunction {
    pub fn new(name: &'static str, func: NativeFn, arity: u8) -> Self {
        CFunction { name, func, arity }
    }
}

impl std::fmt::Debug for CFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CFunction")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish()
    }
}
