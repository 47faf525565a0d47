//! JavaScript built-in objects
//!
//! This module contains the standard library proper: the property and
//! attribute helpers every other builtin is installed through, and the
//! Object, Function, Error, Array, Boolean and String methods.
//!
//! `init` wires everything onto the intrinsics once, in a fixed order,
//! while the context is being created.

pub mod array;
pub mod boolean;
pub mod error;
pub mod function;
pub mod object;
pub mod property;
pub mod string;

use crate::context::Context;
use crate::error::JsResult;
use crate::runtime::function::NativeFn;
use crate::value::{ObjectId, Value};
use tracing::debug;

/// Positional argument `n`, undefined when not supplied
#[inline]
pub(crate) fn arg(args: &[Value], n: usize) -> Value {
    args.get(n).cloned().unwrap_or_default()
}

/// Install a native method as a hidden property
pub(crate) fn install_method(
    ctx: &mut Context,
    target: ObjectId,
    name: &'static str,
    func: NativeFn,
    arity: u8,
) -> JsResult<()> {
    let f = ctx.new_function(name, func, arity);
    property::hidden(ctx, target, name, f)
}

/// Install every builtin
pub(crate) fn init(ctx: &mut Context) -> JsResult<()> {
    init_globals(ctx)?;
    object::init(ctx)?;
    debug!("installed Object builtins");
    function::init(ctx)?;
    debug!("installed Function builtins");
    error::init(ctx)?;
    debug!("installed Error builtins");
    array::init(ctx)?;
    debug!("installed Array builtins");
    boolean::init(ctx)?;
    debug!("installed Boolean builtins");
    string::init(ctx)?;
    debug!("installed String builtins");
    Ok(())
}

fn init_globals(ctx: &mut Context) -> JsResult<()> {
    let i = *ctx.intrinsics();
    let global = ctx.global_object();
    let bindings = [
        ("Object", i.object_ctor),
        ("Function", i.function_ctor),
        ("Array", i.array_ctor),
        ("Boolean", i.boolean_ctor),
        ("String", i.string_ctor),
        ("Error", i.error_ctor),
        ("TypeError", i.type_error_ctor),
        ("SyntaxError", i.syntax_error_ctor),
        ("InternalError", i.internal_error_ctor),
        ("RangeError", i.range_error_ctor),
    ];
    for (name, ctor) in bindings {
        property::hidden(ctx, global, name, Value::object(ctor))?;
    }
    debug!(count = bindings.len(), "installed global bindings");
    Ok(())
}
