//! Record payload and keyed record pairs.

use std::mem::size_of;

use serde::{Deserialize, Serialize};

use crate::types::Key;

/// Payload stored under a key. The store copies it but never inspects it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Record {
    /// Species the sequence was sampled from.
    pub species: String,
    /// Free-form mutation annotation.
    pub mutation: String,
}

impl Record {
    /// Builds a record from anything string-like.
    pub fn new(species: impl Into<String>, mutation: impl Into<String>) -> Self {
        Self {
            species: species.into(),
            mutation: mutation.into(),
        }
    }
}

/// A record together with the key it is stored under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyedRecord {
    /// Stored key.
    pub key: Key,
    /// Stored payload.
    pub record: Record,
}

impl KeyedRecord {
    /// Clones a borrowed index entry into an owned pair.
    pub fn from_entry(key: &str, record: &Record) -> Self {
        Self {
            key: key.to_owned(),
            record: record.clone(),
        }
    }
}

/// Rough per-entry footprint: inline key and record plus their string bytes.
pub(crate) fn entry_footprint(key: &str, record: &Record) -> usize {
    size_of::<Key>() + size_of::<Record>() + key.len() + record.species.len() + record.mutation.len()
}
