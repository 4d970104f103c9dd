//! Repeated-trial benchmark over whole datasets.
//!
//! The store only hands out raw samples; this module is the caller that sums
//! and averages them. Each index type is exercised on its own instance so one
//! index's allocations never land in the other's window.

use std::{
    hint::black_box,
    io::{self, Write},
    time::Duration,
};

use serde::Serialize;
use tracing::{debug, info};

use crate::{
    config::TrialConfig,
    core::{hash_index::HashIndex, index::KeyedIndex, ordered_index::OrderedIndex},
    record::Record,
    timing::measure,
    types::{IndexKind, Key},
};

/// Benchmarked operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrialOp {
    /// Insert every record into an empty index.
    Create,
    /// Look up every key.
    Find,
    /// Overwrite every record once.
    Update,
    /// Remove every key once.
    Delete,
}

impl TrialOp {
    /// Row label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Find => "Find",
            Self::Update => "Update",
            Self::Delete => "Delete",
        }
    }
}

/// Average nanoseconds per element for one operation on both indexes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialRow {
    /// Operation measured.
    pub op: TrialOp,
    /// Hash index ns per element.
    pub hash_ns_per_elem: f64,
    /// Ordered index ns per element.
    pub ordered_ns_per_elem: f64,
}

/// Full benchmark result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialReport {
    /// Records in the dataset, duplicates included.
    pub records: usize,
    /// Passes averaged for create and find.
    pub runs: usize,
    /// One row per [`TrialOp`], in declaration order.
    pub rows: Vec<TrialRow>,
}

#[derive(Debug, Clone, Copy, Default)]
struct IndexTotals {
    create: Duration,
    find: Duration,
    update: Duration,
    delete: Duration,
}

/// Benchmarks both index types over `records`.
pub fn run_trials(records: &[(Key, Record)], config: &TrialConfig) -> TrialReport {
    let runs = config.effective_runs();
    let hash = trial_index(HashIndex::new(), records, runs);
    let ordered = trial_index(OrderedIndex::new(), records, runs);

    let per_elem = |d: Duration| {
        if records.is_empty() {
            0.0
        } else {
            d.as_nanos() as f64 / records.len() as f64
        }
    };

    let rows = [
        (TrialOp::Create, hash.create, ordered.create),
        (TrialOp::Find, hash.find, ordered.find),
        (TrialOp::Update, hash.update, ordered.update),
        (TrialOp::Delete, hash.delete, ordered.delete),
    ]
    .into_iter()
    .map(|(op, h, o)| TrialRow {
        op,
        hash_ns_per_elem: per_elem(h),
        ordered_ns_per_elem: per_elem(o),
    })
    .collect();

    info!(records = records.len(), runs, "trials complete");
    TrialReport {
        records: records.len(),
        runs,
        rows,
    }
}

/// Create and find are averaged over `runs`; update and delete run once, as
/// each pass changes the index it measures.
fn trial_index<I: KeyedIndex>(mut index: I, records: &[(Key, Record)], runs: usize) -> IndexTotals {
    let kind = index.kind();
    let mut totals = IndexTotals::default();

    let mut total = Duration::ZERO;
    for _ in 0..runs {
        index.clear();
        let ((), elapsed) = measure(|| {
            for (key, record) in records {
                index.insert(key.clone(), record.clone());
            }
        });
        total += elapsed;
    }
    totals.create = per_run(total, runs);

    reload(&mut index, records);
    let mut total = Duration::ZERO;
    for _ in 0..runs {
        let (hits, elapsed) = measure(|| records.iter().filter(|(key, _)| index.get(key).is_some()).count());
        black_box(hits);
        total += elapsed;
    }
    totals.find = per_run(total, runs);

    let updated: Vec<Record> = records
        .iter()
        .map(|(_, r)| Record::new(format!("{}_upd", r.species), r.mutation.clone()))
        .collect();
    let ((), elapsed) = measure(|| {
        for ((key, _), record) in records.iter().zip(updated) {
            index.update(key, record);
        }
    });
    totals.update = elapsed;

    reload(&mut index, records);
    let ((), elapsed) = measure(|| {
        for (key, _) in records {
            index.remove(key);
        }
    });
    totals.delete = elapsed;

    debug!(index = kind.label(), ?totals, "index trial totals");
    totals
}

/// Mean of `total` over `runs`. Float division keeps run counts past
/// `u32::MAX` from truncating to a zero divisor.
fn per_run(total: Duration, runs: usize) -> Duration {
    total.div_f64(runs as f64)
}

fn reload<I: KeyedIndex>(index: &mut I, records: &[(Key, Record)]) {
    index.clear();
    for (key, record) in records {
        index.upsert(key.clone(), record.clone());
    }
}

impl TrialReport {
    /// Row for `op`.
    pub fn row(&self, op: TrialOp) -> Option<&TrialRow> {
        self.rows.iter().find(|r| r.op == op)
    }

    /// Text table of ns per element.
    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "=== Dataset Size: {}, Benchmark Runs: {} ===", self.records, self.runs)?;
        writeln!(out, "\n=== Full Dataset Benchmark Results ===")?;
        writeln!(out, "Avg. time per element (ns)")?;
        writeln!(
            out,
            "{:<15}| {:>18} | {:>18}",
            "Operation",
            format!("{} (ns)", IndexKind::Hash.label()),
            format!("{} (ns)", IndexKind::Ordered.label())
        )?;
        writeln!(out, "{}+--------------------+------------------", "-".repeat(15))?;
        for row in &self.rows {
            writeln!(
                out,
                "{:<15}| {:>18.2} | {:>18.2}",
                row.op.label(),
                row.hash_ns_per_elem,
                row.ordered_ns_per_elem
            )?;
        }
        writeln!(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(n: usize) -> Vec<(Key, Record)> {
        (0..n)
            .map(|i| (format!("K{i:05}"), Record::new("sp", "mut")))
            .collect()
    }

    #[test]
    fn report_has_one_row_per_op() {
        let report = run_trials(&dataset(64), &TrialConfig { runs: 3 });
        assert_eq!(report.records, 64);
        assert_eq!(report.runs, 3);
        let ops: Vec<TrialOp> = report.rows.iter().map(|r| r.op).collect();
        assert_eq!(ops, vec![TrialOp::Create, TrialOp::Find, TrialOp::Update, TrialOp::Delete]);
        assert!(report.rows.iter().all(|r| r.hash_ns_per_elem >= 0.0 && r.ordered_ns_per_elem >= 0.0));

        let delete = report.row(TrialOp::Delete).expect("delete row");
        assert_eq!(delete.op, TrialOp::Delete);
    }

    #[test]
    fn per_run_averages_total() {
        assert_eq!(per_run(Duration::from_secs(6), 3), Duration::from_secs(2));
        assert_eq!(per_run(Duration::ZERO, 5), Duration::ZERO);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn per_run_handles_counts_past_u32() {
        let runs = u32::MAX as usize + 1;
        let avg = per_run(Duration::from_secs(runs as u64), runs);
        assert_eq!(avg, Duration::from_secs(1));
    }

    #[test]
    fn empty_dataset_reports_zeroes() {
        let report = run_trials(&[], &TrialConfig { runs: 0 });
        assert_eq!(report.runs, 1);
        assert!(report.rows.iter().all(|r| r.hash_ns_per_elem == 0.0 && r.ordered_ns_per_elem == 0.0));

        let mut out = Vec::new();
        report.render(&mut out).expect("render");
        assert!(String::from_utf8(out).expect("utf8").contains("Delete"));
    }
}
