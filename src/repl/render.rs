//! Human-readable rendering of store outcomes.

use std::io::{self, Write};

use crate::{
    config::TimeUnit,
    outcome::{BulkLoadReport, FallbackOutcome, MutationOutcome, Neighbors, PrefixOutcome},
    record::{KeyedRecord, Record},
    types::IndexKind,
};

use super::command::USAGE;

const OK: &str = "✓";
const FAIL: &str = "✗";

/// Which mutation a [`MutationOutcome`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    /// `create`
    Create,
    /// `update`
    Update,
    /// `delete`
    Delete,
}

impl MutationKind {
    fn verb(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    fn done(self) -> &'static str {
        match self {
            Self::Create => "Created",
            Self::Update => "Updated",
            Self::Delete => "Deleted",
        }
    }

    fn miss(self) -> &'static str {
        match self {
            Self::Create => "already exists",
            Self::Update | Self::Delete => "not found",
        }
    }
}

/// Boxed table of the initial bulk-insert times.
pub fn bulk_load_table(out: &mut impl Write, report: &BulkLoadReport, unit: TimeUnit) -> io::Result<()> {
    let hash_head = format!("{} ({})", IndexKind::Hash.label(), unit.suffix());
    let ordered_head = format!("{} ({})", IndexKind::Ordered.label(), unit.suffix());
    let rule = format!("+{}+{}+{}+", "-".repeat(25), "-".repeat(14), "-".repeat(14));

    writeln!(out, "{rule}")?;
    writeln!(out, "| {:<23} | {:>12} | {:>12} |", "Operation", hash_head, ordered_head)?;
    writeln!(out, "{rule}")?;
    writeln!(
        out,
        "| {:<23} | {:>12} | {:>12} |",
        format!("Initial insert ({})", report.records),
        unit.count(report.hash_elapsed),
        unit.count(report.ordered_elapsed)
    )?;
    writeln!(out, "{rule}")
}

/// Exact-lookup result for both indexes, plus the ordered fallback on a miss.
pub fn find(
    out: &mut impl Write,
    key: &str,
    outcome: &FallbackOutcome,
    neighbors: Option<&Neighbors>,
    unit: TimeUnit,
) -> io::Result<()> {
    let hash_time = unit.format(outcome.hash.elapsed);
    match &outcome.hash.value {
        Some(rec) => writeln!(
            out,
            "{:<10} {OK} Found \"{key}\" ({hash_time}) -> {}",
            label(IndexKind::Hash),
            payload(rec)
        )?,
        None => writeln!(
            out,
            "{:<10} {FAIL} \"{key}\" not found ({hash_time})",
            label(IndexKind::Hash)
        )?,
    }

    let ordered_time = unit.format(outcome.ordered.elapsed);
    match &outcome.ordered.value {
        Some(rec) => writeln!(
            out,
            "{:<10} {OK} Found \"{key}\" ({ordered_time}) -> {}",
            label(IndexKind::Ordered),
            payload(rec)
        )?,
        None => {
            let nearest = outcome
                .fallback
                .as_ref()
                .map(|near| entry(&near.value))
                .unwrap_or_else(|| "none (index is empty)".to_string());
            writeln!(
                out,
                "{:<10} {FAIL} \"{key}\" not found ({ordered_time})  Nearest: {nearest}",
                label(IndexKind::Ordered)
            )?;
            if let Some(nb) = neighbors {
                let lower = nb
                    .lower
                    .as_ref()
                    .map(entry)
                    .unwrap_or_else(|| "none (key is > all elements)".to_string());
                let upper = nb
                    .upper
                    .as_ref()
                    .map(entry)
                    .unwrap_or_else(|| "none (key is >= all elements)".to_string());
                writeln!(out, "{:<10} Lower bound: {lower}", "")?;
                writeln!(out, "{:<10} Upper bound: {upper}", "")?;
            }
        }
    }
    Ok(())
}

/// Create/update/delete result. Success only when both indexes applied it.
pub fn mutation(
    out: &mut impl Write,
    kind: MutationKind,
    key: &str,
    outcome: &MutationOutcome,
    unit: TimeUnit,
) -> io::Result<()> {
    let hash_time = unit.format(outcome.hash.elapsed);
    let ordered_time = unit.format(outcome.ordered.elapsed);

    if outcome.all_applied() {
        return writeln!(
            out,
            "{} \"{key}\" in {}({hash_time}) & {}({ordered_time})",
            kind.done(),
            IndexKind::Hash.label(),
            IndexKind::Ordered.label()
        );
    }
    if outcome.none_applied() {
        return writeln!(out, "{FAIL} \"{key}\" {}, {} failed", kind.miss(), kind.verb());
    }

    for (idx, applied, time) in [
        (IndexKind::Hash, outcome.hash.value, hash_time),
        (IndexKind::Ordered, outcome.ordered.value, ordered_time),
    ] {
        let (glyph, text) = if applied {
            (OK, "applied".to_string())
        } else {
            (FAIL, kind.miss().to_string())
        };
        writeln!(out, "{:<10} {glyph} {} \"{key}\" {text} ({time})", label(idx), kind.verb())?;
    }
    Ok(())
}

/// Hash exact match next to the ordered prefix scan.
pub fn prefix(out: &mut impl Write, query: &str, outcome: &PrefixOutcome, unit: TimeUnit) -> io::Result<()> {
    let hash_time = unit.format(outcome.hash.elapsed);
    match &outcome.hash.value {
        Some(rec) => writeln!(
            out,
            "{:<10} {OK} 1 record found ({hash_time}) -> {query}: {}",
            label(IndexKind::Hash),
            payload(rec)
        )?,
        None => writeln!(
            out,
            "{:<10} {FAIL} 0 records found ({hash_time})",
            label(IndexKind::Hash)
        )?,
    }

    let ordered_time = unit.format(outcome.ordered.elapsed);
    let hits = &outcome.ordered.value;
    if hits.is_empty() {
        writeln!(
            out,
            "{:<10} {FAIL} 0 records found ({ordered_time})",
            label(IndexKind::Ordered)
        )?;
    } else {
        writeln!(
            out,
            "{:<10} {OK} {} record(s) found ({ordered_time}):",
            label(IndexKind::Ordered),
            hits.len()
        )?;
        for hit in hits {
            writeln!(out, "    • {}: {}", hit.key, payload(&hit.record))?;
        }
    }
    Ok(())
}

/// Command list.
pub fn help(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Commands:")?;
    for usage in USAGE {
        writeln!(out, "  {usage}")?;
    }
    Ok(())
}

fn label(kind: IndexKind) -> String {
    format!("{}:", kind.label())
}

fn payload(rec: &Record) -> String {
    format!("{}, {}", rec.species, rec.mutation)
}

fn entry(e: &KeyedRecord) -> String {
    format!("[{}] -> {}", e.key, payload(&e.record))
}
