//! Weighted co-occurrence graph over registry items.
//!
//! ## Structure
//!
//! - vertices: one per registry item, addressed by [`VertexId`]
//! - edges: one per unordered pair sharing at least one collection,
//!   weight = number of shared collections
//! - adjacency: vertex → incident [`EdgeId`]s, in edge-id order
//!
//! Construction compares every pair, so it is quadratic in the number of
//! distinct items.

use serde::Serialize;
use smallvec::SmallVec;
use tracing::info;

use crate::model::*;
use crate::registry::ItemRegistry;

/// Undirected, weighted, self-loop free co-occurrence graph.
#[derive(Debug, Clone, Serialize)]
pub struct CooccurrenceGraph {
    labels: Vec<ItemId>,
    edges: Vec<Edge>,
    /// vertex → incident edge ids
    adjacency: Vec<SmallVec<[EdgeId; 8]>>,
}

impl CooccurrenceGraph {
    /// Build the graph from the registry's item table.
    pub fn build(registry: &ItemRegistry) -> Self {
        let records = registry.records();
        let mut graph = Self::with_labels(registry.ids().cloned().collect());

        for i in 0..records.len() {
            for j in (i + 1)..records.len() {
                let shared = records[i].shared_collections(&records[j]);
                if shared > 0 {
                    let weight = u32::try_from(shared).unwrap_or(u32::MAX);
                    graph.add_edge(VertexId(i), VertexId(j), weight);
                }
            }
        }

        info!(
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            total_weight = graph.total_weight(),
            "co-occurrence graph built"
        );
        graph
    }

    /// Graph with the given vertex labels and no edges.
    fn with_labels(labels: Vec<ItemId>) -> Self {
        let adjacency = vec![SmallVec::new(); labels.len()];
        Self { labels, edges: Vec::new(), adjacency }
    }

    /// Append an edge. Callers uphold `a != b`, both in range, `weight > 0`.
    fn add_edge(&mut self, a: VertexId, b: VertexId, weight: u32) -> EdgeId {
        let id = EdgeId(self.edges.len());
        self.edges.push(Edge::new(id, a, b, weight));
        self.adjacency[a.index()].push(id);
        self.adjacency[b.index()].push(id);
        id
    }

    pub fn vertex_count(&self) -> usize {
        self.labels.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn label(&self, v: VertexId) -> Option<&ItemId> {
        self.labels.get(v.index())
    }

    pub fn labels(&self) -> &[ItemId] {
        &self.labels
    }

    pub fn edge(&self, e: EdgeId) -> Option<&Edge> {
        self.edges.get(e.index())
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Structural neighbors of `v`, one per incident edge.
    pub fn neighbors(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.incident(v)
            .iter()
            .filter_map(move |e| self.edges[e.index()].other_node(v))
    }

    /// Incident edges of `v`. Empty for an unknown vertex.
    pub fn incident(&self, v: VertexId) -> &[EdgeId] {
        self.adjacency.get(v.index()).map(|adj| adj.as_slice()).unwrap_or(&[])
    }

    pub fn degree(&self, v: VertexId) -> usize {
        self.incident(v).len()
    }

    /// Weight of the edge joining `a` and `b`, or 0 if they are not adjacent.
    pub fn weight_between(&self, a: VertexId, b: VertexId) -> u32 {
        self.incident(a)
            .iter()
            .map(|e| &self.edges[e.index()])
            .find(|edge| edge.other_node(a) == Some(b))
            .map_or(0, |edge| edge.weight)
    }

    /// Sum of all edge weights.
    pub fn total_weight(&self) -> u64 {
        self.edges.iter().map(|e| u64::from(e.weight)).sum()
    }
}
