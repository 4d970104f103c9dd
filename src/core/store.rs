use tracing::{debug, info};

use crate::{
    outcome::{
        BulkLoadReport, DualOutcome, FallbackOutcome, MemoryEstimate, MutationOutcome, Neighbors,
        PrefixOutcome, ReadOutcome,
    },
    record::{KeyedRecord, Record},
    timing::{Timed, measure, measure_timed},
    types::Key,
};

use super::{hash_index::HashIndex, index::KeyedIndex, ordered_index::OrderedIndex};

/// Owns a hash index and an ordered index over the same key space.
///
/// Every request goes to both indexes, each attempt timed on its own; one
/// index's miss never skips the other's attempt. After each mutating call the
/// two key sets are equal and shared keys hold identical records.
#[derive(Debug, Default)]
pub struct DualIndexStore {
    hash: HashIndex,
    ordered: OrderedIndex,
}

impl DualIndexStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every pair into both indexes. Later duplicates overwrite earlier
    /// ones, unlike [`DualIndexStore::create`].
    pub fn bulk_load(&mut self, records: &[(Key, Record)]) -> BulkLoadReport {
        let hash = &mut self.hash;
        let ((), hash_elapsed) = measure(|| {
            for (key, record) in records {
                hash.upsert(key.clone(), record.clone());
            }
        });

        let ordered = &mut self.ordered;
        let ((), ordered_elapsed) = measure(|| {
            for (key, record) in records {
                ordered.upsert(key.clone(), record.clone());
            }
        });

        let report = BulkLoadReport {
            records: records.len(),
            distinct_keys: self.ordered.len(),
            hash_elapsed,
            ordered_elapsed,
        };
        info!(
            records = report.records,
            distinct_keys = report.distinct_keys,
            hash_us = hash_elapsed.as_micros() as u64,
            ordered_us = ordered_elapsed.as_micros() as u64,
            "bulk load complete"
        );
        report
    }

    /// Inserts into each index independently; an index that already holds
    /// `key` reports false and keeps its record.
    pub fn create(&mut self, key: &str, record: Record) -> MutationOutcome {
        let (hash_key, hash_record) = (key.to_owned(), record.clone());
        let hash = &mut self.hash;
        let hash = measure_timed(|| hash.insert(hash_key, hash_record));

        let ordered_key = key.to_owned();
        let ordered = &mut self.ordered;
        let ordered = measure_timed(|| ordered.insert(ordered_key, record));

        let out = DualOutcome { hash, ordered };
        log_mutation("create", key, &out);
        out
    }

    /// Exact lookup on both indexes. Returned records are copies.
    pub fn read(&self, key: &str) -> ReadOutcome {
        let out = DualOutcome {
            hash: measure_timed(|| self.hash.get(key)).map(|r| r.cloned()),
            ordered: measure_timed(|| self.ordered.get(key)).map(|r| r.cloned()),
        };
        debug!(
            key,
            hash_hit = out.hash.value.is_some(),
            ordered_hit = out.ordered.value.is_some(),
            hash_ns = out.hash.elapsed.as_nanos() as u64,
            ordered_ns = out.ordered.elapsed.as_nanos() as u64,
            "read"
        );
        out
    }

    /// Replaces the record on each index that holds `key`. No insert on miss.
    pub fn update(&mut self, key: &str, record: Record) -> MutationOutcome {
        let hash_record = record.clone();
        let hash = &mut self.hash;
        let hash = measure_timed(|| hash.update(key, hash_record));

        let ordered = &mut self.ordered;
        let ordered = measure_timed(|| ordered.update(key, record));

        let out = DualOutcome { hash, ordered };
        log_mutation("update", key, &out);
        out
    }

    /// Removes `key` from each index.
    pub fn delete(&mut self, key: &str) -> MutationOutcome {
        let hash = &mut self.hash;
        let hash = measure_timed(|| hash.remove(key));

        let ordered = &mut self.ordered;
        let ordered = measure_timed(|| ordered.remove(key));

        let out = DualOutcome { hash, ordered };
        log_mutation("delete", key, &out);
        out
    }

    /// Exact lookup on both indexes; on an ordered miss also reports the
    /// ordered index's nearest entry.
    pub fn find_with_fallback(&self, key: &str) -> FallbackOutcome {
        let read = self.read(key);
        let fallback = if read.ordered.value.is_none() {
            measure_timed(|| self.ordered.nearest(key))
                .map(|entry| entry.map(|(k, r)| KeyedRecord::from_entry(k, r)))
                .transpose()
        } else {
            None
        };

        if let Some(near) = &fallback {
            debug!(key, nearest = %near.value.key, "ordered miss, nearest fallback");
        }

        FallbackOutcome {
            hash: read.hash,
            ordered: read.ordered,
            fallback,
        }
    }

    /// Lower and upper bound of `key` on the ordered index, timed together.
    pub fn neighbors(&self, key: &str) -> Timed<Neighbors> {
        measure_timed(|| (self.ordered.lower_bound(key), self.ordered.upper_bound(key))).map(
            |(lower, upper)| Neighbors {
                lower: lower.map(|(k, r)| KeyedRecord::from_entry(k, r)),
                upper: upper.map(|(k, r)| KeyedRecord::from_entry(k, r)),
            },
        )
    }

    /// Hash exact lookup of `prefix` next to an ordered prefix scan.
    pub fn prefix_lookup(&self, prefix: &str) -> PrefixOutcome {
        let hash = measure_timed(|| self.hash.get(prefix)).map(|r| r.cloned());
        let ordered = measure_timed(|| self.ordered.prefix_scan(prefix));
        debug!(
            prefix,
            hash_hit = hash.value.is_some(),
            ordered_hits = ordered.value.len(),
            "prefix lookup"
        );
        PrefixOutcome { hash, ordered }
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// True when the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Drops every entry from both indexes.
    pub fn clear(&mut self) {
        self.hash.clear();
        self.ordered.clear();
    }

    /// True when both indexes hold the same keys with identical records.
    pub fn is_consistent(&self) -> bool {
        self.hash.len() == self.ordered.len()
            && self
                .ordered
                .iter()
                .all(|(key, record)| self.hash.get(key) == Some(record))
    }

    /// Approximate memory held by each index.
    pub fn estimated_bytes(&self) -> MemoryEstimate {
        MemoryEstimate {
            hash_bytes: self.hash.estimated_bytes(),
            ordered_bytes: self.ordered.estimated_bytes(),
        }
    }

    /// Read access to the hash index.
    pub fn hash_index(&self) -> &HashIndex {
        &self.hash
    }

    /// Read access to the ordered index.
    pub fn ordered_index(&self) -> &OrderedIndex {
        &self.ordered
    }
}

fn log_mutation(op: &'static str, key: &str, out: &MutationOutcome) {
    debug!(
        op,
        key,
        hash_applied = out.hash.value,
        ordered_applied = out.ordered.value,
        hash_ns = out.hash.elapsed.as_nanos() as u64,
        ordered_ns = out.ordered.elapsed.as_nanos() as u64,
        "mutation"
    );
}
