//! Element storage for Array and Arguments objects
//!
//! Storage may have holes: an index below `length` with no element is
//! distinct from one holding `undefined`. Elements live in a dense vector
//! that only reaches as far as the highest index written near it; writes
//! far past its end go to a sparse map instead, so `Array(n)` and writes
//! near 2^32 cost only the elements actually stored.

use crate::value::Value;
use std::collections::BTreeMap;

/// Maximum array length (2^32 - 1)
pub const MAX_ARRAY_LENGTH: u32 = u32::MAX;

/// Largest run of holes the dense vector grows over for a single write
const MAX_DENSE_GAP: usize = 1024;

/// JavaScript Array storage
#[derive(Debug, Clone, Default)]
pub struct JSArray {
    /// Dense element storage, `None` = hole
    elements: Vec<Option<Value>>,
    /// Elements at or past `elements.len()`
    sparse: BTreeMap<u32, Value>,
    /// Logical length, never less than the highest stored index + 1
    len: u32,
}

impl JSArray {
    /// Create a new empty array
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an array of `length` holes
    pub fn with_length(length: u32) -> Self {
        JSArray {
            len: length,
            ..Self::default()
        }
    }

    /// Create a dense array from a vector of values
    pub fn from_values(values: Vec<Value>) -> Self {
        let len = values.len().min(MAX_ARRAY_LENGTH as usize) as u32;
        let mut elements: Vec<Option<Value>> = values.into_iter().map(Some).collect();
        elements.truncate(len as usize);
        JSArray {
            elements,
            sparse: BTreeMap::new(),
            len,
        }
    }

    /// Get the array length
    #[inline]
    pub fn len(&self) -> u32 {
        self.len
    }

    /// Check if the array is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the element at `index`, `None` for holes and out-of-range indices
    #[inline]
    pub fn get(&self, index: u32) -> Option<&Value> {
        match self.elements.get(index as usize) {
            Some(slot) => slot.as_ref(),
            None => self.sparse.get(&index),
        }
    }

    /// Check if `index` holds an element
    #[inline]
    pub fn has(&self, index: u32) -> bool {
        self.get(index).is_some()
    }

    /// Set an element at the specified index
    ///
    /// If index >= length, length grows to index + 1 and the gap stays
    /// holes. Returns false for index 2^32 - 1, which is not an index.
    pub fn set(&mut self, index: u32, value: Value) -> bool {
        if index >= MAX_ARRAY_LENGTH {
            return false;
        }

        let i = index as usize;
        let dense = self.elements.len();
        if i < dense {
            self.elements[i] = Some(value);
        } else if i - dense <= MAX_DENSE_GAP {
            self.elements.resize(i + 1, None);
            self.absorb_sparse();
            self.elements[i] = Some(value);
        } else {
            self.sparse.insert(index, value);
        }

        if index >= self.len {
            self.len = index + 1;
        }
        true
    }

    /// Turn `index` into a hole; length is unchanged
    ///
    /// Returns true if an element was removed.
    pub fn delete(&mut self, index: u32) -> bool {
        let removed = match self.elements.get_mut(index as usize) {
            Some(slot) => slot.take().is_some(),
            None => self.sparse.remove(&index).is_some(),
        };
        if removed {
            self.trim_tail();
        }
        removed
    }

    /// Set the length of the array
    ///
    /// Growing adds holes; shrinking deletes every element at or past
    /// the new length.
    pub fn set_length(&mut self, length: u32) {
        self.sparse.retain(|&i, _| i < length);
        if (length as usize) < self.elements.len() {
            self.elements.truncate(length as usize);
            self.trim_tail();
        }
        self.len = length;
    }

    /// Elements present in `[from, to)`, as offsets from `from`
    pub fn slots(&self, from: u32, to: u32) -> Vec<(u32, Value)> {
        if from >= to {
            return Vec::new();
        }
        let dense_end = (to as usize).min(self.elements.len());
        let dense = self
            .elements
            .get(from as usize..dense_end)
            .unwrap_or_default()
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.clone().map(|v| (i as u32, v)));
        let sparse = self
            .sparse
            .range(from..to)
            .map(|(&i, v)| (i - from, v.clone()));
        dense.chain(sparse).collect()
    }

    /// Overwrite the `span` slots starting at `dest`
    ///
    /// Slots not named in `slots` become holes. Length grows to cover the
    /// written range.
    pub fn write_slots(&mut self, dest: u32, span: u32, slots: Vec<(u32, Value)>) {
        if span == 0 {
            return;
        }
        let end = (dest as u64 + span as u64).min(MAX_ARRAY_LENGTH as u64) as u32;

        let dense_end = (end as usize).min(self.elements.len());
        for slot in self.elements.iter_mut().take(dense_end).skip(dest as usize) {
            *slot = None;
        }
        let stale: Vec<u32> = self.sparse.range(dest..end).map(|(&i, _)| i).collect();
        for i in stale {
            self.sparse.remove(&i);
        }

        for (offset, value) in slots {
            if let Some(index) = dest.checked_add(offset) {
                self.set(index, value);
            }
        }
        self.trim_tail();
        if end > self.len {
            self.len = end;
        }
    }

    /// Indices that hold an element, ascending
    pub fn indices(&self) -> impl Iterator<Item = u32> + '_ {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_some())
            .map(|(i, _)| i as u32)
            .chain(self.sparse.keys().copied())
    }

    /// Number of stored (non-hole) elements
    pub fn element_count(&self) -> usize {
        self.elements.iter().filter(|v| v.is_some()).count() + self.sparse.len()
    }

    /// Move sparse elements the dense vector now covers into it
    fn absorb_sparse(&mut self) {
        // Dense length never exceeds 2^32 - 1
        let dense = self.elements.len() as u32;
        let rest = self.sparse.split_off(&dense);
        for (i, value) in std::mem::replace(&mut self.sparse, rest) {
            self.elements[i as usize] = Some(value);
        }
    }

    /// Drop trailing holes from the dense vector
    fn trim_tail(&mut self) {
        while matches!(self.elements.last(), Some(None)) {
            self.elements.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(values: &[i32]) -> JSArray {
        JSArray::from_values(values.iter().map(|&n| Value::int(n)).collect())
    }

    #[test]
    fn test_new() {
        let arr = JSArray::new();
        assert!(arr.is_empty());
        assert_eq!(arr.len(), 0);
    }

    #[test]
    fn test_with_length() {
        let arr = JSArray::with_length(5);
        assert_eq!(arr.len(), 5);
        assert_eq!(arr.get(0), None);
        assert!(!arr.has(4));
        assert_eq!(arr.element_count(), 0);
    }

    #[test]
    fn test_get_set() {
        let mut arr = JSArray::new();

        arr.set(0, Value::int(10));
        arr.set(2, Value::int(30));

        assert_eq!(arr.len(), 3);
        assert_eq!(arr.get(0), Some(&Value::int(10)));
        assert!(!arr.has(1)); // hole, not undefined
        assert_eq!(arr.get(2), Some(&Value::int(30)));
        assert_eq!(arr.get(3), None);
    }

    #[test]
    fn test_set_max_index() {
        let mut arr = JSArray::new();
        assert!(!arr.set(u32::MAX, Value::int(1)));
        assert_eq!(arr.len(), 0);
    }

    #[test]
    fn test_far_index_is_sparse() {
        let mut arr = JSArray::with_length(4_000_000_000);
        assert!(arr.set(4_000_000_000, Value::int(1)));
        assert!(arr.set(u32::MAX - 1, Value::int(2)));

        assert_eq!(arr.len(), u32::MAX);
        assert_eq!(arr.get(4_000_000_000), Some(&Value::int(1)));
        assert_eq!(arr.get(u32::MAX - 1), Some(&Value::int(2)));
        assert!(!arr.has(0));
        assert_eq!(arr.element_count(), 2);
        assert_eq!(
            arr.indices().collect::<Vec<_>>(),
            vec![4_000_000_000, u32::MAX - 1]
        );

        assert!(arr.delete(4_000_000_000));
        assert!(!arr.has(4_000_000_000));
        arr.set_length(10);
        assert_eq!(arr.element_count(), 0);
    }

    #[test]
    fn test_dense_growth_absorbs_sparse() {
        let mut arr = JSArray::new();
        arr.set(5000, Value::int(5));
        arr.set(900, Value::int(9));
        arr.set(1900, Value::int(19));
        arr.set(2900, Value::int(29));
        arr.set(3900, Value::int(39));
        arr.set(4900, Value::int(49));
        assert_eq!(arr.get(5000), Some(&Value::int(5)));

        // Growing past 5000 pulls it into the dense vector
        arr.set(5800, Value::int(58));
        assert!(arr.sparse.is_empty());

        assert_eq!(arr.get(5000), Some(&Value::int(5)));
        assert_eq!(arr.get(4900), Some(&Value::int(49)));
        assert_eq!(
            arr.indices().collect::<Vec<_>>(),
            vec![900, 1900, 2900, 3900, 4900, 5000, 5800]
        );

        // Rewriting an index as it is absorbed keeps the newer value
        arr.set(6500, Value::int(65));
        arr.set(7600, Value::int(1));
        arr.set(7000, Value::int(70));
        assert_eq!(arr.sparse.len(), 1);
        arr.set(7600, Value::int(2));
        assert!(arr.sparse.is_empty());
        assert_eq!(arr.get(7600), Some(&Value::int(2)));
    }

    #[test]
    fn test_delete_keeps_length() {
        let mut arr = ints(&[1, 2, 3]);

        assert!(arr.delete(2));
        assert!(!arr.delete(2));
        assert_eq!(arr.len(), 3);
        assert!(!arr.has(2));
        assert!(arr.has(1));
    }

    #[test]
    fn test_set_length() {
        let mut arr = ints(&[1, 2, 3]);

        arr.set_length(5);
        assert_eq!(arr.len(), 5);
        assert!(!arr.has(3));

        arr.set_length(1);
        assert_eq!(arr.len(), 1);
        assert_eq!(arr.get(0), Some(&Value::int(1)));

        // Elements past a shrink do not come back when growing again
        arr.set_length(3);
        assert!(!arr.has(1));
        assert!(!arr.has(2));
    }

    #[test]
    fn test_slots() {
        let mut arr = ints(&[0, 1, 2]);
        arr.delete(1);
        arr.set(100_000, Value::int(7));

        assert_eq!(arr.slots(1, 5), vec![(1, Value::int(2))]);
        assert_eq!(
            arr.slots(0, 200_000),
            vec![(0, Value::int(0)), (2, Value::int(2)), (100_000, Value::int(7))]
        );
        assert_eq!(arr.slots(50, 100_001), vec![(99_950, Value::int(7))]);
        assert!(arr.slots(4, 2).is_empty());
    }

    #[test]
    fn test_write_slots() {
        let mut dest = ints(&[1, 2, 3, 4]);
        dest.write_slots(1, 3, vec![(0, Value::int(7)), (2, Value::int(9))]);

        assert_eq!(dest.len(), 4);
        assert_eq!(dest.get(0), Some(&Value::int(1)));
        assert_eq!(dest.get(1), Some(&Value::int(7)));
        assert!(!dest.has(2)); // overwritten by a hole
        assert_eq!(dest.get(3), Some(&Value::int(9)));

        let mut grow = JSArray::new();
        grow.write_slots(2, 1, vec![(0, Value::int(1))]);
        assert_eq!(grow.len(), 3);

        let mut far = JSArray::new();
        far.write_slots(4_000_000_000, 5, vec![(4, Value::int(1))]);
        assert_eq!(far.len(), 4_000_000_005);
        assert_eq!(far.get(4_000_000_004), Some(&Value::int(1)));
    }

    #[test]
    fn test_indices() {
        let mut arr = JSArray::new();
        arr.set(3, Value::int(3));
        arr.set(1, Value::int(1));
        assert_eq!(arr.indices().collect::<Vec<_>>(), vec![1, 3]);
    }
}
