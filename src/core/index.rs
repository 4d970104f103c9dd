use crate::{record::Record, types::{IndexKind, Key}};

/// Exact-key CRUD contract both indexes satisfy identically.
///
/// `insert` never overwrites, `update` never inserts, and a missing key is a
/// `false`/`None` outcome rather than an error.
pub trait KeyedIndex {
    /// Which index this is.
    fn kind(&self) -> IndexKind;

    /// Borrows the record stored under `key`.
    fn get(&self, key: &str) -> Option<&Record>;

    /// Cloned lookup; mutating the result never touches stored state.
    fn find(&self, key: &str) -> Option<Record> {
        self.get(key).cloned()
    }

    /// Inserts when `key` is absent. Returns false and leaves the stored record
    /// untouched when it is already present.
    fn insert(&mut self, key: Key, record: Record) -> bool;

    /// Replaces the record of an existing key. Returns false when absent.
    fn update(&mut self, key: &str, record: Record) -> bool;

    /// Removes `key`. Returns false when absent.
    fn remove(&mut self, key: &str) -> bool;

    /// Insert-or-overwrite, used by bulk loading.
    fn upsert(&mut self, key: Key, record: Record);

    /// Number of stored keys.
    fn len(&self) -> usize;

    /// True when no keys are stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every entry.
    fn clear(&mut self);

    /// Approximate bytes held by the entries.
    fn estimated_bytes(&self) -> usize;
}
