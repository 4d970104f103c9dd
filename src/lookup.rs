//! One-shot report: hash exact match against ordered prefix scan.

use std::io::{self, Write};

use serde::Serialize;

use crate::{
    config::TimeUnit,
    core::store::DualIndexStore,
    outcome::{BulkLoadReport, MemoryEstimate, PrefixOutcome},
    record::Record,
    repl::render,
    types::Key,
};

/// Everything the lookup report prints.
#[derive(Debug, Clone, Serialize)]
pub struct LookupReport {
    /// Query string, used as exact key and as prefix.
    pub query: String,
    /// Initial load timings.
    pub load: BulkLoadReport,
    /// Search outcomes.
    pub search: PrefixOutcome,
    /// Approximate memory per index after the load.
    pub memory: MemoryEstimate,
}

/// Loads `records` into a fresh store and runs `query` against it.
pub fn run_lookup(records: &[(Key, Record)], query: &str) -> LookupReport {
    let mut store = DualIndexStore::new();
    let load = store.bulk_load(records);
    let search = store.prefix_lookup(query);
    LookupReport {
        query: query.to_string(),
        load,
        search,
        memory: store.estimated_bytes(),
    }
}

impl LookupReport {
    /// Text form. Load times in `load_unit`, search times in nanoseconds.
    pub fn render(&self, out: &mut impl Write, load_unit: TimeUnit) -> io::Result<()> {
        writeln!(out, "==== Data Size: {} ====", self.load.records)?;
        render::bulk_load_table(out, &self.load, load_unit)?;
        writeln!(out)?;

        writeln!(out, "Search Time (HashMap) : {}", TimeUnit::Nanos.format(self.search.hash.elapsed))?;
        writeln!(out, "Search Time (Ordered) : {}", TimeUnit::Nanos.format(self.search.ordered.elapsed))?;
        writeln!(out)?;

        writeln!(out, "Search Result for \"{}\":", self.query)?;
        render::prefix(out, &self.query, &self.search, TimeUnit::Nanos)?;
        writeln!(out)?;

        writeln!(out, "Estimated Memory Usage:")?;
        writeln!(out, "  - HashMap : ~{} bytes", self.memory.hash_bytes)?;
        writeln!(out, "  - Ordered : ~{} bytes", self.memory.ordered_bytes)
    }
}
