// src/graph_lib/graph_types.rs
use std::fmt;
use glam::DVec2;

/// Stable vertex identifier. Assigned once by the model and never handed out again,
/// not even after the graph is re-seeded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(pub u32);

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub type ColorIndex = u8;

#[derive(Clone, Debug, PartialEq)]
pub struct Vertex {
    pub id: VertexId,
    /// 1-based creation ordinal within the current graph; what the labels show.
    pub index: usize,
    pub position: DVec2,
    pub color: ColorIndex,
    pub radius: f64,
}

/// Undirected edge, always stored as (smaller id, larger id).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge(VertexId, VertexId);

impl Edge {
    pub fn new(a: VertexId, b: VertexId) -> Self {
        if a <= b { Edge(a, b) } else { Edge(b, a) }
    }

    pub fn first(&self) -> VertexId { self.0 }
    pub fn second(&self) -> VertexId { self.1 }

    pub fn touches(&self, v: VertexId) -> bool {
        self.0 == v || self.1 == v
    }

    pub fn shares_endpoint(&self, other: &Edge) -> bool {
        self.touches(other.0) || self.touches(other.1)
    }
}

/// Bounded triangular face, corners in positive orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Face(pub [VertexId; 3]);

impl Face {
    pub fn edges(&self) -> [Edge; 3] {
        let [a, b, c] = self.0;
        [Edge::new(a, b), Edge::new(b, c), Edge::new(c, a)]
    }
}
