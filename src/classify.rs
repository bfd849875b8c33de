//! Edge classification over converged memberships.
//!
//! An edge is interior when its endpoints share at least one cluster and
//! exterior otherwise. Reads the memberships, never changes them.

use tracing::info;

use crate::graph::{AnnotatedEdge, AnnotatedGraph, AnnotatedVertex, CooccurrenceGraph};
use crate::model::*;
use crate::registry::ItemRegistry;
use crate::{Error, Result};

/// Classify every edge of `graph`, in edge-id order.
pub fn classify_edges(graph: &CooccurrenceGraph, memberships: &[ClusterSet]) -> Result<Vec<EdgeClass>> {
    if memberships.len() != graph.vertex_count() {
        return Err(Error::MembershipMismatch {
            expected: graph.vertex_count(),
            got: memberships.len(),
        });
    }

    Ok(graph
        .edges()
        .iter()
        .map(|edge| {
            let (a, b) = edge.endpoints();
            if memberships[a.index()].intersects(&memberships[b.index()]) {
                EdgeClass::Interior
            } else {
                EdgeClass::Exterior
            }
        })
        .collect())
}

/// Join registry data, graph structure and final memberships into one
/// [`AnnotatedGraph`].
pub fn annotate(
    registry: &ItemRegistry,
    graph: &CooccurrenceGraph,
    memberships: Vec<ClusterSet>,
    cluster_count: usize,
) -> Result<AnnotatedGraph> {
    if registry.len() != graph.vertex_count() {
        return Err(Error::MembershipMismatch {
            expected: graph.vertex_count(),
            got: registry.len(),
        });
    }
    let classes = classify_edges(graph, &memberships)?;

    let vertices = memberships
        .into_iter()
        .zip(registry.records())
        .enumerate()
        .map(|(i, (clusters, record))| AnnotatedVertex {
            id: VertexId(i),
            label: record.id.clone(),
            collection_count: record.collection_count(),
            clusters,
        })
        .collect();

    let edges = graph
        .edges()
        .iter()
        .zip(classes)
        .map(|(edge, class)| AnnotatedEdge {
            id: edge.id,
            src: edge.src,
            dst: edge.dst,
            weight: edge.weight,
            class,
        })
        .collect();

    let annotated = AnnotatedGraph { vertices, edges, cluster_count };
    info!(
        interior = annotated.interior_edge_count(),
        exterior = annotated.exterior_edge_count(),
        "edges classified"
    );
    Ok(annotated)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_of(decks: &[&[&str]]) -> (ItemRegistry, CooccurrenceGraph) {
        let collections: Vec<Collection> =
            decks.iter().map(|d| d.iter().copied().collect()).collect();
        let registry = ItemRegistry::from_collections(&collections);
        let graph = CooccurrenceGraph::build(&registry);
        (registry, graph)
    }

    fn set(ids: &[u32]) -> ClusterSet {
        ids.iter().map(|&i| ClusterId(i)).collect()
    }

    #[test]
    fn test_shared_cluster_is_interior() {
        // Vertex order: B, A, C. Edges: (B, A), (B, C).
        let (_, graph) = graph_of(&[&["A", "B"], &["B", "C"]]);
        let memberships = vec![set(&[0, 1]), set(&[0]), set(&[2])];
        let classes = classify_edges(&graph, &memberships).unwrap();
        assert_eq!(classes, vec![EdgeClass::Interior, EdgeClass::Exterior]);
    }

    #[test]
    fn test_mismatched_memberships_rejected() {
        let (_, graph) = graph_of(&[&["A", "B"]]);
        let err = classify_edges(&graph, &[set(&[0])]).unwrap_err();
        assert!(matches!(err, Error::MembershipMismatch { .. }));
    }

    #[test]
    fn test_annotate_rejects_foreign_registry() {
        let (_, graph) = graph_of(&[&["A", "B"], &["B", "C"]]);
        let (other, _) = graph_of(&[&["A", "B"]]);
        let memberships = vec![set(&[0]), set(&[0]), set(&[1])];
        let err = annotate(&other, &graph, memberships, 2).unwrap_err();
        assert!(matches!(err, Error::MembershipMismatch { expected: 3, got: 2 }), "got {err:?}");
    }

    #[test]
    fn test_annotate_carries_labels_and_weights() {
        let (registry, graph) = graph_of(&[&["A", "B"], &["A", "B"], &["B", "C"]]);
        let memberships = vec![set(&[0]), set(&[0]), set(&[1])];
        let annotated = annotate(&registry, &graph, memberships, 2).unwrap();

        assert_eq!(annotated.vertices.len(), 3);
        assert_eq!(annotated.vertices[0].label.as_str(), "B");
        assert_eq!(annotated.vertices[0].collection_count, 3);
        assert_eq!(annotated.edges.len(), 2);
        assert_eq!(annotated.edges[0].weight, 2);
        assert!(annotated.edges[0].is_interior());
        assert!(!annotated.edges[1].is_interior());
        assert_eq!(annotated.cluster_count, 2);
    }
}
