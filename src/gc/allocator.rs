//! Object arena
//!
//! Objects are allocated into a growable vector and referenced by index.
//! Nothing is ever freed before the heap itself drops, so an `ObjectId`
//! handed out by `alloc` stays valid for the life of the context.

use crate::runtime::object::JSObject;
use crate::value::ObjectId;

/// The JavaScript heap
#[derive(Debug, Default)]
pub struct Heap {
    objects: Vec<JSObject>,
}

/// Heap usage statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryStats {
    /// Number of live objects
    pub object_count: usize,
    /// Own properties across all objects (excluding array elements)
    pub property_count: usize,
    /// Stored array elements across all array-base objects (holes excluded)
    pub element_count: usize,
}

impl Heap {
    /// Create an empty heap
    pub fn new() -> Self {
        Heap {
            objects: Vec::new(),
        }
    }

    /// Create a heap with room for `capacity` objects
    pub fn with_capacity(capacity: usize) -> Self {
        Heap {
            objects: Vec::with_capacity(capacity),
        }
    }

    /// Move an object into the heap
    pub fn alloc(&mut self, obj: JSObject) -> ObjectId {
        let id = ObjectId(self.objects.len() as u32);
        self.objects.push(obj);
        id
    }

    #[inline]
    pub fn get(&self, id: ObjectId) -> Option<&JSObject> {
        self.objects.get(id.index())
    }

    #[inline]
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut JSObject> {
        self.objects.get_mut(id.index())
    }

    /// Number of allocated objects
    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Collect usage statistics
    pub fn stats(&self) -> MemoryStats {
        let mut stats = MemoryStats {
            object_count: self.objects.len(),
            property_count: 0,
            element_count: 0,
        };
        for obj in &self.objects {
            stats.property_count += obj.props.len();
            if let Some(arr) = obj.array() {
                stats.element_count += arr.element_count();
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::array::JSArray;
    use crate::runtime::object::{InternalClass, ObjectData};
    use crate::value::Value;

    #[test]
    fn test_alloc() {
        let mut heap = Heap::new();
        assert!(heap.is_empty());

        let a = heap.alloc(JSObject::new(InternalClass::Object, None, ObjectData::Ordinary));
        let b = heap.alloc(JSObject::new(InternalClass::Object, Some(a), ObjectData::Ordinary));

        assert_ne!(a, b);
        assert_eq!(heap.len(), 2);
        assert_eq!(heap.get(b).and_then(|o| o.proto), Some(a));
        assert!(heap.get(ObjectId(99)).is_none());
    }

    #[test]
    fn test_stats() {
        let mut heap = Heap::with_capacity(4);
        let arr = JSArray::from_values(vec![Value::int(1), Value::int(2)]);
        heap.alloc(JSObject::new(InternalClass::Array, None, ObjectData::Array(arr)));
        heap.alloc(JSObject::new(InternalClass::Object, None, ObjectData::Ordinary));

        let stats = heap.stats();
        assert_eq!(stats.object_count, 2);
        assert_eq!(stats.element_count, 2);
        assert_eq!(stats.property_count, 0);
    }
}
