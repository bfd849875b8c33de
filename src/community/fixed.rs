//! Pre-computed partition supplied by the caller.

use crate::graph::CooccurrenceGraph;
use crate::model::*;
use crate::registry::ItemRegistry;
use crate::{Error, Result};
use super::CommunityDetector;

/// Returns a partition fixed at construction time, ignoring the resolution.
///
/// This is the hook for partitions produced by an external optimizer.
/// Validation against the graph happens in [`super::SeedPartition::from_sets`].
#[derive(Debug, Clone, Default)]
pub struct FixedPartition {
    sets: Vec<Vec<VertexId>>,
}

impl FixedPartition {
    pub fn new(sets: Vec<Vec<VertexId>>) -> Self {
        Self { sets }
    }

    /// Partition given as groups of item names.
    pub fn by_item(registry: &ItemRegistry, groups: &[Vec<ItemId>]) -> Result<Self> {
        let sets = groups
            .iter()
            .map(|group| {
                group
                    .iter()
                    .map(|item| {
                        registry.position(item).ok_or_else(|| {
                            Error::InvalidPartition(format!("unknown item '{item}'"))
                        })
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { sets })
    }
}

impl CommunityDetector for FixedPartition {
    fn name(&self) -> &str {
        "fixed"
    }

    fn partition(&self, _graph: &CooccurrenceGraph, _resolution: f64) -> Result<Vec<Vec<VertexId>>> {
        Ok(self.sets.clone())
    }
}
