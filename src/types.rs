//! Shared key alias and index identifiers.

use serde::{Deserialize, Serialize};

/// Record key. Opaque to the store: only hashed and compared byte-wise.
pub type Key = String;

/// Which of the two indexes an outcome or timing belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndexKind {
    /// Unordered hash index.
    Hash,
    /// Sorted index.
    Ordered,
}

impl IndexKind {
    /// Column label used by the text renderers.
    pub fn label(self) -> &'static str {
        match self {
            Self::Hash => "HashMap",
            Self::Ordered => "Ordered",
        }
    }
}
