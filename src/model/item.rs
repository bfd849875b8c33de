//! Items (cards) and their dense vertex indices.

use serde::{Deserialize, Serialize};

/// Opaque card identifier. Ordered lexicographically; the order breaks ties
/// when the registry sorts items.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self { Self(s.to_owned()) }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self { Self(s) }
}

/// Dense vertex index in `0..M`, fixed by the registry sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VertexId(pub usize);

impl VertexId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for VertexId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An item and the collections it appears in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: ItemId,
    /// Positions in the flattened collection sequence. Sorted ascending, no duplicates.
    pub collections: Vec<usize>,
}

impl ItemRecord {
    /// Number of collections containing this item.
    pub fn collection_count(&self) -> usize {
        self.collections.len()
    }

    /// Size of the intersection of both collection index sets.
    ///
    /// Both lists are sorted, so this is a single linear merge.
    pub fn shared_collections(&self, other: &ItemRecord) -> usize {
        let (a, b) = (&self.collections, &other.collections);
        let (mut i, mut j, mut shared) = (0, 0, 0);
        while i < a.len() && j < b.len() {
            match a[i].cmp(&b[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    shared += 1;
                    i += 1;
                    j += 1;
                }
            }
        }
        shared
    }
}
