//! Annotated graph — the converged result handed to the exporters.

use serde::{Deserialize, Serialize};

use crate::model::*;

/// A vertex with its final cluster memberships.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedVertex {
    pub id: VertexId,
    pub label: ItemId,
    /// Number of collections the item appears in.
    pub collection_count: usize,
    pub clusters: ClusterSet,
}

/// An edge with its weight and interior/exterior classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedEdge {
    pub id: EdgeId,
    pub src: VertexId,
    pub dst: VertexId,
    pub weight: u32,
    pub class: EdgeClass,
}

impl AnnotatedEdge {
    pub fn is_interior(&self) -> bool {
        self.class.is_interior()
    }
}

/// Co-occurrence graph with per-vertex `clusters` and per-edge `interior`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedGraph {
    pub vertices: Vec<AnnotatedVertex>,
    pub edges: Vec<AnnotatedEdge>,
    /// K, the number of cluster ids in use.
    pub cluster_count: usize,
}

impl AnnotatedGraph {
    pub fn vertex(&self, v: VertexId) -> Option<&AnnotatedVertex> {
        self.vertices.get(v.index())
    }

    pub fn interior_edge_count(&self) -> usize {
        self.edges.iter().filter(|e| e.is_interior()).count()
    }

    pub fn exterior_edge_count(&self) -> usize {
        self.edges.len() - self.interior_edge_count()
    }

    /// Vertices holding `cluster`, in vertex order.
    pub fn cluster_members(&self, cluster: ClusterId) -> Vec<VertexId> {
        self.vertices
            .iter()
            .filter(|v| v.clusters.contains(cluster))
            .map(|v| v.id)
            .collect()
    }

    /// Vertices holding more than one cluster.
    pub fn overlapping_vertices(&self) -> Vec<VertexId> {
        self.vertices
            .iter()
            .filter(|v| v.clusters.len() > 1)
            .map(|v| v.id)
            .collect()
    }

    /// Attribute view of a vertex as written by the exporters.
    pub fn vertex_properties(&self, vertex: &AnnotatedVertex) -> PropertyMap {
        let mut props = PropertyMap::new();
        props.insert("label".into(), Value::from(vertex.label.as_str()));
        props.insert("decks".into(), Value::from(vertex.collection_count));
        props.insert(
            "clusters".into(),
            Value::from(vertex.clusters.iter().map(|c| c.0).collect::<Vec<_>>()),
        );
        props
    }

    /// Attribute view of an edge as written by the exporters.
    pub fn edge_properties(&self, edge: &AnnotatedEdge) -> PropertyMap {
        let mut props = PropertyMap::new();
        props.insert("weight".into(), Value::from(edge.weight));
        props.insert("interior".into(), Value::from(edge.class.as_flag()));
        props
    }
}
