use hashbrown::{HashMap, hash_map::Entry};

use crate::{
    record::{Record, entry_footprint},
    types::{IndexKind, Key},
};

use super::index::KeyedIndex;

/// Unordered index. Exact-key operations only; iteration order is unspecified.
#[derive(Debug, Clone, Default)]
pub struct HashIndex {
    map: HashMap<Key, Record>,
}

impl HashIndex {
    /// Empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored keys in unspecified order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }

    /// Stored entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Record)> {
        self.map.iter().map(|(k, r)| (k.as_str(), r))
    }
}

impl KeyedIndex for HashIndex {
    fn kind(&self) -> IndexKind {
        IndexKind::Hash
    }

    fn get(&self, key: &str) -> Option<&Record> {
        self.map.get(key)
    }

    fn insert(&mut self, key: Key, record: Record) -> bool {
        match self.map.entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(record);
                true
            }
        }
    }

    fn update(&mut self, key: &str, record: Record) -> bool {
        match self.map.get_mut(key) {
            Some(slot) => {
                *slot = record;
                true
            }
            None => false,
        }
    }

    fn remove(&mut self, key: &str) -> bool {
        self.map.remove(key).is_some()
    }

    fn upsert(&mut self, key: Key, record: Record) {
        self.map.insert(key, record);
    }

    fn len(&self) -> usize {
        self.map.len()
    }

    fn clear(&mut self) {
        self.map.clear();
    }

    fn estimated_bytes(&self) -> usize {
        self.map.iter().map(|(k, r)| entry_footprint(k, r)).sum()
    }
}
