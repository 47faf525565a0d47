//! Runtime support
//!
//! This module contains the core runtime types the builtins work on:
//! - Object representation (JSObject, internal classes, property records)
//! - Property tables
//! - String handling (JSString, UTF-16 index translation)
//! - Array element storage (JSArray)
//! - Native functions and call mechanics
//! - Type conversions

pub mod array;
pub mod call;
pub mod conversion;
pub mod function;
pub mod object;
pub mod property;
pub mod string;

pub use array::{JSArray, MAX_ARRAY_LENGTH};
pub use conversion::PreferredType;
pub use function::{CFunction, NativeFn};
pub use object::{
    InternalClass, JSObject, ObjectData, PropFlags, Property, PropertyAccessor, PropertyValue,
};
pub use property::PropertyTable;
pub use string::JSString;
