//! jscore - the JavaScript standard library layer of a small embedded engine
//!
//! The crate pairs a minimal runtime core (tagged values, an object arena,
//! property tables, array element storage, UTF-8 strings with UTF-16
//! indexing) with the builtins written on top of it: Object, Function,
//! Error, Array, Boolean and String.
//!
//! # Features
//! - Property attributes and accessors with `Object.defineProperty`
//! - Generic Array methods with a block-copy fast path for real arrays
//! - `String.prototype.indexOf` over UTF-8 storage with UTF-16 positions
//! - A recursion limit on native calls
//!
//! # Example
//! ```
//! use jscore::{Context, Value};
//!
//! let mut ctx = Context::new().unwrap();
//! let arr = ctx.new_array_from(vec![Value::int(1), Value::int(2)]);
//! let joined = ctx.invoke(&Value::object(arr), "join", &[Value::string("-")]).unwrap();
//! assert_eq!(joined, Value::string("1-2"));
//! ```

// Core modules
pub mod value;
pub mod error;
pub mod context;

// Object storage
pub mod gc;

// Built-in objects
pub mod builtins;

// Runtime support
pub mod runtime;

// Utilities
pub mod util;

// Re-export main types
pub use context::{Context, ContextConfig, Intrinsics};
pub use error::{ErrorKind, JsError, JsResult};
pub use value::{ObjectId, Value};
