//! Co-occurrence edge between two items.

use serde::{Deserialize, Serialize};
use super::VertexId;

/// Opaque edge identifier, dense in `0..E`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(pub usize);

impl EdgeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An undirected weighted edge. `src < dst` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub src: VertexId,
    pub dst: VertexId,
    /// Number of collections containing both endpoints. Always > 0.
    pub weight: u32,
}

impl Edge {
    pub fn new(id: EdgeId, a: VertexId, b: VertexId, weight: u32) -> Self {
        let (src, dst) = if a <= b { (a, b) } else { (b, a) };
        Self { id, src, dst, weight }
    }

    /// The "other" end of the edge from the given vertex.
    pub fn other_node(&self, from: VertexId) -> Option<VertexId> {
        if from == self.src { Some(self.dst) }
        else if from == self.dst { Some(self.src) }
        else { None }
    }

    pub fn endpoints(&self) -> (VertexId, VertexId) {
        (self.src, self.dst)
    }
}

/// Where an edge lies relative to the converged clusters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeClass {
    /// Endpoints share at least one cluster.
    Interior,
    /// Endpoints share no cluster.
    Exterior,
}

impl EdgeClass {
    pub fn is_interior(self) -> bool {
        matches!(self, EdgeClass::Interior)
    }

    /// 0/1 encoding used by the exporters.
    pub fn as_flag(self) -> u8 {
        u8::from(self.is_interior())
    }
}
