//! Property table
//!
//! Own properties live in a hash table with chained buckets. Entries are
//! appended in insertion order and never reused, so iteration order is
//! the order in which keys were first defined. Deleting leaves a
//! tombstone that is squeezed out on the next rebuild.

use crate::runtime::object::{PropFlags, Property, PropertyValue};
use crate::runtime::string::{JSString, hash_string};

/// Property table structure
///
/// - `hash_table[hash & hash_mask]`: index + 1 of the first entry in the bucket (0 = empty)
/// - `properties[i].hash_next`: index + 1 of the next entry in the same bucket
#[derive(Debug, Clone)]
pub struct PropertyTable {
    /// Number of live properties
    prop_count: u32,
    /// Hash table mask (size - 1)
    hash_mask: u32,
    /// Entries in insertion order; `None` marks a deleted entry
    properties: Vec<Option<Property>>,
    /// Bucket heads
    hash_table: Vec<u32>,
}

impl PropertyTable {
    /// Minimum hash table size
    const MIN_HASH_SIZE: usize = 4;

    /// Maximum load factor before resize
    const MAX_LOAD_FACTOR: f64 = 0.75;

    /// Create a new empty property table
    pub fn new() -> Self {
        PropertyTable {
            prop_count: 0,
            hash_mask: (Self::MIN_HASH_SIZE - 1) as u32,
            properties: Vec::new(),
            hash_table: vec![0; Self::MIN_HASH_SIZE],
        }
    }

    /// Create a property table with specified capacity
    pub fn with_capacity(capacity: usize) -> Self {
        let hash_size = capacity.next_power_of_two().max(Self::MIN_HASH_SIZE);
        PropertyTable {
            prop_count: 0,
            hash_mask: (hash_size - 1) as u32,
            properties: Vec::with_capacity(capacity),
            hash_table: vec![0; hash_size],
        }
    }

    /// Get the number of properties
    #[inline]
    pub fn len(&self) -> usize {
        self.prop_count as usize
    }

    /// Check if the table is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.prop_count == 0
    }

    /// Find a property by key
    ///
    /// Returns the entry index if found.
    fn find(&self, key: &str) -> Option<usize> {
        if self.prop_count == 0 {
            return None;
        }

        let hash = hash_string(key);
        let mut idx = self.hash_table[(hash & self.hash_mask) as usize];

        while idx != 0 {
            let prop_idx = (idx - 1) as usize;
            let prop = self.properties[prop_idx].as_ref()?;
            if prop.key.as_str() == key {
                return Some(prop_idx);
            }
            idx = prop.hash_next;
        }

        None
    }

    /// Get a property by key
    pub fn get(&self, key: &str) -> Option<&Property> {
        self.find(key).and_then(|idx| self.properties[idx].as_ref())
    }

    /// Get a mutable property reference by key
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Property> {
        self.find(key).and_then(move |idx| self.properties[idx].as_mut())
    }

    /// Check if a property exists
    pub fn has(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Insert or overwrite a property
    ///
    /// An existing entry keeps its position but takes the new value and
    /// flags wholesale. Returns true if this was a new property.
    pub fn insert(&mut self, key: JSString, value: PropertyValue, flags: PropFlags) -> bool {
        if let Some(idx) = self.find(key.as_str()) {
            if let Some(prop) = self.properties[idx].as_mut() {
                let hash_next = prop.hash_next;
                *prop = Property::new(key, value, flags);
                prop.hash_next = hash_next;
            }
            return false;
        }

        let load = (self.prop_count + 1) as f64 / (self.hash_mask + 1) as f64;
        if load > Self::MAX_LOAD_FACTOR {
            self.rebuild(((self.hash_mask + 1) * 2) as usize);
        } else if self.properties.len() >= 2 * self.prop_count as usize + Self::MIN_HASH_SIZE {
            // Mostly tombstones
            self.rebuild((self.hash_mask + 1) as usize);
        }

        let bucket = (hash_string(key.as_str()) & self.hash_mask) as usize;
        let mut prop = Property::new(key, value, flags);
        prop.hash_next = self.hash_table[bucket];

        self.properties.push(Some(prop));
        self.hash_table[bucket] = self.properties.len() as u32;
        self.prop_count += 1;

        true
    }

    /// Delete a property by key
    ///
    /// Returns true if the property existed.
    pub fn delete(&mut self, key: &str) -> bool {
        if self.prop_count == 0 {
            return false;
        }

        let bucket = (hash_string(key) & self.hash_mask) as usize;

        let mut prev_idx: Option<usize> = None;
        let mut idx = self.hash_table[bucket];

        while idx != 0 {
            let prop_idx = (idx - 1) as usize;
            let Some(prop) = self.properties[prop_idx].as_ref() else {
                return false;
            };
            let next = prop.hash_next;

            if prop.key.as_str() == key {
                // Unlink from the chain
                match prev_idx.and_then(|prev| self.properties[prev].as_mut()) {
                    Some(prev) => prev.hash_next = next,
                    None => self.hash_table[bucket] = next,
                }
                self.properties[prop_idx] = None;
                self.prop_count -= 1;
                return true;
            }

            prev_idx = Some(prop_idx);
            idx = next;
        }

        false
    }

    /// Drop tombstones and rehash into a table of `hash_size` buckets
    fn rebuild(&mut self, hash_size: usize) {
        self.hash_mask = (hash_size - 1) as u32;
        self.hash_table = vec![0; hash_size];
        self.properties.retain(Option::is_some);

        for (i, slot) in self.properties.iter_mut().enumerate() {
            if let Some(prop) = slot {
                let bucket = (hash_string(prop.key.as_str()) & self.hash_mask) as usize;
                prop.hash_next = self.hash_table[bucket];
                self.hash_table[bucket] = (i + 1) as u32;
            }
        }
    }

    /// Iterate over all properties in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Property> {
        self.properties.iter().flatten()
    }

    /// Iterate over all property keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &JSString> + '_ {
        self.iter().map(|p| &p.key)
    }
}

impl Default for PropertyTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn data(n: i32) -> PropertyValue {
        PropertyValue::Data(Value::int(n))
    }

    fn value_of(table: &PropertyTable, key: &str) -> Option<Value> {
        match &table.get(key)?.value {
            PropertyValue::Data(v) => Some(v.clone()),
            PropertyValue::Accessor(_) => None,
        }
    }

    #[test]
    fn test_empty_table() {
        let table = PropertyTable::new();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert!(table.get("a").is_none());
    }

    #[test]
    fn test_insert_get() {
        let mut table = PropertyTable::new();

        assert!(table.insert(JSString::new("a"), data(100), PropFlags::DEFAULT));
        assert!(!table.is_empty());
        assert_eq!(table.len(), 1);
        assert_eq!(value_of(&table, "a"), Some(Value::int(100)));
        assert_eq!(table.get("a").map(|p| p.flags), Some(PropFlags::DEFAULT));
    }

    #[test]
    fn test_overwrite() {
        let mut table = PropertyTable::new();

        table.insert(JSString::new("k"), data(10), PropFlags::DEFAULT);
        assert!(!table.insert(JSString::new("k"), data(20), PropFlags::NONE));

        assert_eq!(table.len(), 1);
        assert_eq!(value_of(&table, "k"), Some(Value::int(20)));
        assert_eq!(table.get("k").map(|p| p.flags), Some(PropFlags::NONE));
    }

    #[test]
    fn test_delete() {
        let mut table = PropertyTable::new();

        table.insert(JSString::new("k"), data(10), PropFlags::DEFAULT);
        assert!(table.has("k"));

        assert!(table.delete("k"));
        assert!(!table.has("k"));
        assert!(table.is_empty());

        assert!(!table.delete("k")); // Already deleted
    }

    #[test]
    fn test_multiple_properties() {
        let mut table = PropertyTable::new();

        for i in 0..100 {
            table.insert(JSString::from(format!("p{i}")), data(i * 2), PropFlags::DEFAULT);
        }

        assert_eq!(table.len(), 100);

        for i in 0..100 {
            assert_eq!(value_of(&table, &format!("p{i}")), Some(Value::int(i * 2)));
        }
    }

    #[test]
    fn test_resize() {
        let mut table = PropertyTable::with_capacity(4);

        for i in 0..20 {
            table.insert(JSString::from(i.to_string()), data(i), PropFlags::DEFAULT);
        }

        for i in 0..20 {
            assert!(table.has(&i.to_string()));
        }
    }

    #[test]
    fn test_insertion_order_survives_delete() {
        let mut table = PropertyTable::new();

        table.insert(JSString::new("a"), data(1), PropFlags::DEFAULT);
        table.insert(JSString::new("b"), data(2), PropFlags::DEFAULT);
        table.insert(JSString::new("c"), data(3), PropFlags::DEFAULT);

        table.delete("b");
        assert_eq!(table.len(), 2);

        // New keys go to the end, never into the freed slot
        table.insert(JSString::new("d"), data(4), PropFlags::DEFAULT);
        table.insert(JSString::new("b"), data(5), PropFlags::DEFAULT);

        let keys: Vec<_> = table.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, ["a", "c", "d", "b"]);
    }

    #[test]
    fn test_churn_compacts() {
        let mut table = PropertyTable::new();
        table.insert(JSString::new("keep"), data(0), PropFlags::DEFAULT);

        for i in 0..200 {
            let key = format!("tmp{i}");
            table.insert(JSString::from(key.clone()), data(i), PropFlags::DEFAULT);
            assert!(table.delete(&key));
        }

        assert_eq!(table.len(), 1);
        assert!(table.properties.len() < 16);
        assert_eq!(value_of(&table, "keep"), Some(Value::int(0)));
    }
}
