//! Cluster (archetype) identifiers and per-vertex membership sets.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Dense cluster identifier in `0..K`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterId(pub u32);

impl ClusterId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for ClusterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sorted, duplicate-free set of cluster ids held by one vertex.
///
/// Most vertices end up in one or two clusters, so the ids live inline.
/// The set only supports growth; nothing in the crate removes a membership.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterSet {
    ids: SmallVec<[ClusterId; 4]>,
}

impl ClusterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn singleton(id: ClusterId) -> Self {
        let mut ids = SmallVec::new();
        ids.push(id);
        Self { ids }
    }

    /// Add `id`. Returns true if it was not already present.
    pub fn insert(&mut self, id: ClusterId) -> bool {
        match self.ids.binary_search(&id) {
            Ok(_) => false,
            Err(pos) => {
                self.ids.insert(pos, id);
                true
            }
        }
    }

    pub fn contains(&self, id: ClusterId) -> bool {
        self.ids.binary_search(&id).is_ok()
    }

    /// True if the two sets share at least one cluster.
    pub fn intersects(&self, other: &ClusterSet) -> bool {
        let (a, b) = (&self.ids, &other.ids);
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            match a[i].cmp(&b[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => return true,
            }
        }
        false
    }

    pub fn is_subset(&self, other: &ClusterSet) -> bool {
        self.ids.iter().all(|id| other.contains(*id))
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ClusterId> + '_ {
        self.ids.iter().copied()
    }

    pub fn as_slice(&self) -> &[ClusterId] {
        &self.ids
    }
}

impl FromIterator<ClusterId> for ClusterSet {
    fn from_iter<I: IntoIterator<Item = ClusterId>>(iter: I) -> Self {
        let mut set = ClusterSet::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

impl std::fmt::Display for ClusterSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, id) in self.ids.iter().enumerate() {
            if i > 0 { write!(f, ",")?; }
            write!(f, "{id}")?;
        }
        Ok(())
    }
}
