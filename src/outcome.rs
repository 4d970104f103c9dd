//! Per-index outcomes returned by the dual-index store.
//!
//! Every "failure" the store can report (missing key, duplicate key, no
//! fallback) is data in these types, never an error.

use std::time::Duration;

use serde::Serialize;

use crate::{
    record::{KeyedRecord, Record},
    timing::Timed,
};

/// The same logical request answered by both indexes, each timed on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DualOutcome<T> {
    /// Hash index result.
    pub hash: Timed<T>,
    /// Ordered index result.
    pub ordered: Timed<T>,
}

/// Result of create, update or delete: whether each index applied the change.
pub type MutationOutcome = DualOutcome<bool>;

/// Result of a plain read.
pub type ReadOutcome = DualOutcome<Option<Record>>;

impl MutationOutcome {
    /// Both indexes applied the change.
    pub fn all_applied(&self) -> bool {
        self.hash.value && self.ordered.value
    }

    /// Neither index applied the change.
    pub fn none_applied(&self) -> bool {
        !self.hash.value && !self.ordered.value
    }
}

/// Exact lookup on both indexes plus the ordered index's nearest entry when its
/// exact lookup missed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FallbackOutcome {
    /// Hash index exact lookup.
    pub hash: Timed<Option<Record>>,
    /// Ordered index exact lookup.
    pub ordered: Timed<Option<Record>>,
    /// Nearest ordered entry; only computed on an ordered miss against a
    /// non-empty index.
    pub fallback: Option<Timed<KeyedRecord>>,
}

/// Entries surrounding a key in the ordered index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Neighbors {
    /// First entry with key `>=` the query key.
    pub lower: Option<KeyedRecord>,
    /// First entry with key `>` the query key.
    pub upper: Option<KeyedRecord>,
}

/// Hash exact match against ordered prefix scan for the same query string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrefixOutcome {
    /// Hash index exact lookup of the query.
    pub hash: Timed<Option<Record>>,
    /// Ordered entries starting with the query, ascending.
    pub ordered: Timed<Vec<KeyedRecord>>,
}

/// Totals for a bulk load, one load timing per index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkLoadReport {
    /// Pairs consumed, duplicates included.
    pub records: usize,
    /// Distinct keys after the load.
    pub distinct_keys: usize,
    /// Time to load every pair into the hash index.
    pub hash_elapsed: Duration,
    /// Time to load every pair into the ordered index.
    pub ordered_elapsed: Duration,
}

/// Approximate memory held by each index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MemoryEstimate {
    /// Hash index bytes.
    pub hash_bytes: usize,
    /// Ordered index bytes.
    pub ordered_bytes: usize,
}
