use std::collections::{BTreeMap, btree_map::Entry};
use std::ops::Bound;

use crate::{
    record::{KeyedRecord, Record, entry_footprint},
    types::{IndexKind, Key},
};

use super::index::KeyedIndex;

/// Sorted index over byte-lexicographic key order.
///
/// Besides the shared CRUD contract it answers bound, nearest and prefix
/// queries, none of which have a hash-index counterpart.
#[derive(Debug, Clone, Default)]
pub struct OrderedIndex {
    map: BTreeMap<Key, Record>,
}

impl OrderedIndex {
    /// Empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }

    /// Stored entries in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Record)> {
        self.map.iter().map(|(k, r)| (k.as_str(), r))
    }

    /// First entry whose key is `>= key`.
    pub fn lower_bound(&self, key: &str) -> Option<(&str, &Record)> {
        self.map
            .range::<str, _>((Bound::Included(key), Bound::Unbounded))
            .next()
            .map(|(k, r)| (k.as_str(), r))
    }

    /// First entry whose key is `> key`.
    pub fn upper_bound(&self, key: &str) -> Option<(&str, &Record)> {
        self.map
            .range::<str, _>((Bound::Excluded(key), Bound::Unbounded))
            .next()
            .map(|(k, r)| (k.as_str(), r))
    }

    /// Lower bound of `key`, or the maximum entry when `key` sorts after every
    /// stored key. `None` only for an empty index.
    pub fn nearest(&self, key: &str) -> Option<(&str, &Record)> {
        self.lower_bound(key)
            .or_else(|| self.map.last_key_value().map(|(k, r)| (k.as_str(), r)))
    }

    /// Entries whose key starts with `prefix`, ascending.
    ///
    /// Starts at `lower_bound(prefix)` and stops at the first key that no longer
    /// carries the prefix; matching keys are contiguous in sorted order.
    pub fn prefix_iter<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = (&'a str, &'a Record)> {
        self.map
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .map(|(k, r)| (k.as_str(), r))
            .take_while(move |(k, _)| k.starts_with(prefix))
    }

    /// Owned copy of [`OrderedIndex::prefix_iter`].
    pub fn prefix_scan(&self, prefix: &str) -> Vec<KeyedRecord> {
        self.prefix_iter(prefix)
            .map(|(k, r)| KeyedRecord::from_entry(k, r))
            .collect()
    }
}

impl KeyedIndex for OrderedIndex {
    fn kind(&self) -> IndexKind {
        IndexKind::Ordered
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
