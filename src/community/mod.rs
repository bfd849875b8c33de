//! # Community Detection
//!
//! Seed partitions come from a [`CommunityDetector`]. The refinement engine
//! does not care how the partition was found, only that it is disjoint and
//! covers every vertex, which [`SeedPartition::from_sets`] checks.
//!
//! ## Implementations
//!
//! | Detector | Module | Description |
//! |----------|--------|-------------|
//! | `FixedPartition` | `fixed` | Partition computed elsewhere and passed in |
//! | `CpmLocalMoving` | `cpm` | Greedy Constant Potts Model local moving |

pub mod cpm;
pub mod fixed;

use serde::Serialize;

use crate::graph::CooccurrenceGraph;
use crate::model::*;
use crate::{Error, Result};

pub use cpm::CpmLocalMoving;
pub use fixed::FixedPartition;

// ============================================================================
// CommunityDetector Trait
// ============================================================================

/// Produces a disjoint partition of the graph's vertices.
///
/// Set `k` of the returned sequence becomes cluster id `k`. Edge weights are
/// read from the graph itself.
pub trait CommunityDetector {
    /// Short name used in logs.
    fn name(&self) -> &str;

    fn partition(&self, graph: &CooccurrenceGraph, resolution: f64) -> Result<Vec<Vec<VertexId>>>;
}

// ============================================================================
// SeedPartition
// ============================================================================

/// A validated disjoint partition: every vertex in exactly one cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedPartition {
    /// vertex → its cluster
    assignment: Vec<ClusterId>,
    cluster_count: usize,
}

impl SeedPartition {
    /// Validate raw detector output against a graph of `vertex_count` vertices.
    pub fn from_sets(sets: &[Vec<VertexId>], vertex_count: usize) -> Result<Self> {
        let mut assignment: Vec<Option<ClusterId>> = vec![None; vertex_count];

        for (k, members) in sets.iter().enumerate() {
            if members.is_empty() {
                return Err(Error::InvalidPartition(format!("cluster {k} is empty")));
            }
            let cluster = u32::try_from(k)
                .map(ClusterId)
                .map_err(|_| Error::InvalidPartition(format!("too many clusters: {}", sets.len())))?;
            for &v in members {
                let slot = assignment.get_mut(v.index()).ok_or_else(|| {
                    Error::InvalidPartition(format!(
                        "vertex {v} in cluster {k} is out of range (graph has {vertex_count} vertices)"
                    ))
                })?;
                if let Some(previous) = slot.replace(cluster) {
                    return Err(Error::InvalidPartition(format!(
                        "vertex {v} assigned to both cluster {previous} and cluster {k}"
                    )));
                }
            }
        }

        let assignment = assignment
            .into_iter()
            .enumerate()
            .map(|(v, c)| {
                c.ok_or_else(|| Error::InvalidPartition(format!("vertex {v} is not in any cluster")))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { assignment, cluster_count: sets.len() })
    }

    /// Build from a per-vertex label vector, renumbering labels densely in
    /// order of first appearance.
    pub fn from_labels(labels: &[usize]) -> Result<Self> {
        let mut dense: hashbrown::HashMap<usize, usize> = hashbrown::HashMap::new();
        let mut sets: Vec<Vec<VertexId>> = Vec::new();
        for (v, &label) in labels.iter().enumerate() {
            let k = *dense.entry(label).or_insert_with(|| {
                sets.push(Vec::new());
                sets.len() - 1
            });
            sets[k].push(VertexId(v));
        }
        Self::from_sets(&sets, labels.len())
    }

    /// K, the number of clusters.
    pub fn cluster_count(&self) -> usize {
        self.cluster_count
    }

    pub fn vertex_count(&self) -> usize {
        self.assignment.len()
    }

    pub fn cluster_of(&self, v: VertexId) -> Option<ClusterId> {
        self.assignment.get(v.index()).copied()
    }

    /// Members of each cluster, in cluster order.
    pub fn clusters(&self) -> Vec<Vec<VertexId>> {
        let mut sets = vec![Vec::new(); self.cluster_count];
        for (v, c) in self.assignment.iter().enumerate() {
            sets[c.index()].push(VertexId(v));
        }
        sets
    }

    /// One singleton membership set per vertex, the refinement starting state.
    pub fn initial_memberships(&self) -> Vec<ClusterSet> {
        self.assignment.iter().map(|&c| ClusterSet::singleton(c)).collect()
    }
}

/// Run `detector` on `graph` and validate its output.
pub fn seed_partition(
    detector: &dyn CommunityDetector,
    graph: &CooccurrenceGraph,
    resolution: f64,
) -> Result<SeedPartition> {
    let sets = detector.partition(graph, resolution)?;
    let seed = SeedPartition::from_sets(&sets, graph.vertex_count())?;
    tracing::info!(
        detector = detector.name(),
        clusters = seed.cluster_count(),
        vertices = seed.vertex_count(),
        "seed partition accepted"
    );
    Ok(seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(v: &[usize]) -> Vec<VertexId> {
        v.iter().map(|&i| VertexId(i)).collect()
    }

    #[test]
    fn test_valid_partition() {
        let seed = SeedPartition::from_sets(&[ids(&[0, 2]), ids(&[1])], 3).unwrap();
        assert_eq!(seed.cluster_count(), 2);
        assert_eq!(seed.cluster_of(VertexId(2)), Some(ClusterId(0)));
        assert_eq!(seed.cluster_of(VertexId(1)), Some(ClusterId(1)));
        assert_eq!(seed.clusters(), vec![ids(&[0, 2]), ids(&[1])]);
    }

    #[test]
    fn test_initial_memberships_are_singletons() {
        let seed = SeedPartition::from_sets(&[ids(&[1]), ids(&[0, 2])], 3).unwrap();
        let memberships = seed.initial_memberships();
        assert!(memberships.iter().all(|m| m.len() == 1));
        assert!(memberships[0].contains(ClusterId(1)));
        assert!(memberships[1].contains(ClusterId(0)));
    }

    #[test]
    fn test_missing_vertex_rejected() {
        let err = SeedPartition::from_sets(&[ids(&[0])], 2).unwrap_err();
        assert!(matches!(err, Error::InvalidPartition(_)));
    }

    #[test]
    fn test_duplicate_vertex_rejected() {
        let err = SeedPartition::from_sets(&[ids(&[0, 1]), ids(&[1])], 2).unwrap_err();
        assert!(matches!(err, Error::InvalidPartition(_)));
    }

    #[test]
    fn test_out_of_range_vertex_rejected() {
        let err = SeedPartition::from_sets(&[ids(&[0, 5])], 1).unwrap_err();
        assert!(matches!(err, Error::InvalidPartition(_)));
    }

    #[test]
    fn test_empty_cluster_rejected() {
        let err = SeedPartition::from_sets(&[ids(&[0]), Vec::new()], 1).unwrap_err();
        assert!(matches!(err, Error::InvalidPartition(_)));
    }

    #[test]
    fn test_empty_graph_empty_partition() {
        let seed = SeedPartition::from_sets(&[], 0).unwrap();
        assert_eq!(seed.cluster_count(), 0);
        assert!(seed.initial_memberships().is_empty());
    }

    #[test]
    fn test_from_labels_renumbers() {
        let seed = SeedPartition::from_labels(&[7, 3, 7, 9]).unwrap();
        assert_eq!(seed.cluster_count(), 3);
        assert_eq!(seed.cluster_of(VertexId(0)), Some(ClusterId(0)));
        assert_eq!(seed.cluster_of(VertexId(1)), Some(ClusterId(1)));
        assert_eq!(seed.cluster_of(VertexId(2)), Some(ClusterId(0)));
        assert_eq!(seed.cluster_of(VertexId(3)), Some(ClusterId(2)));
    }
}
