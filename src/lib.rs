//! Keyed records held under a hash index and an ordered index at once, with
//! every operation timed per index so the two can be compared live.
//!
//! # Examples
//!
//! ```
//! use dualindex::{core::store::DualIndexStore, record::Record};
//!
//! let mut store = DualIndexStore::new();
//! store.bulk_load(&[
//!     ("AAC".to_string(), Record::new("human", "none")),
//!     ("AGT".to_string(), Record::new("mouse", "snp")),
//!     ("TTG".to_string(), Record::new("fly", "del")),
//! ]);
//!
//! let created = store.create("GGA", Record::new("yeast", "ins"));
//! assert!(created.all_applied());
//!
//! let miss = store.find_with_fallback("CCC");
//! assert!(miss.hash.value.is_none());
//! assert_eq!(miss.fallback.expect("nearest").value.key, "GGA");
//!
//! let hits = store.prefix_lookup("A").ordered.value;
//! assert_eq!(hits.len(), 2);
//! ```
#![warn(missing_docs)]

/// Runtime knobs and time units.
pub mod config;
/// Hash index, ordered index and the dual-index store.
pub mod core;
/// CSV record loader.
pub mod loader;
/// One-shot prefix lookup report.
pub mod lookup;
/// Per-index outcome types.
pub mod outcome;
/// Record payload.
pub mod record;
/// Interactive command loop.
pub mod repl;
/// Wall-clock measurement helpers.
pub mod timing;
/// Repeated-trial benchmark.
pub mod trials;
/// Shared key alias and index identifiers.
pub mod types;
