//! Object storage
//!
//! The runtime core keeps every object in a single arena owned by the
//! context. Collection is not performed; objects are released together
//! when the context drops.

mod allocator;

pub use allocator::{Heap, MemoryStats};
