//! In-memory indexes and the dual-index store that keeps them in step.

/// Unordered hash index.
pub mod hash_index;
/// CRUD contract shared by both indexes.
pub mod index;
/// Sorted index with bound, nearest and prefix queries.
pub mod ordered_index;
/// Dual-index store and its per-index outcomes.
pub mod store;
