// src/graph_lib/error.rs
use thiserror::Error;
use crate::graph_lib::graph_types::{Edge, VertexId};

/// Why a requested mutation of the triangulation was refused.
/// A refused call never leaves a partial mutation behind.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GraphError {
    #[error("the graph has not been seeded with a triangle")]
    InvalidState,

    #[error("invalid selection: {0}")]
    InvalidSelection(#[from] SelectionError),

    #[error("no periphery location admits a planar attachment")]
    NoAttachmentSite,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SelectionError {
    #[error("vertex {0} was picked twice")]
    SameVertex(VertexId),

    #[error("vertex {0} is not on the periphery")]
    NotOnPeriphery(VertexId),

    #[error("no planar position for a vertex between {0} and {1}")]
    NoPlanarPosition(VertexId, VertexId),
}

/// Reported by `Triangulation::validate` when the graph breaks one of its invariants.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InvariantViolation {
    #[error("expected {expected} bounded faces, found {found}")]
    FaceCount { expected: usize, found: usize },

    #[error("face side {0:?} is not an edge")]
    MissingFaceEdge(Edge),

    #[error("face {0:?} is degenerate or wrongly oriented")]
    BadFace([VertexId; 3]),

    #[error("edges {0:?} and {1:?} cross")]
    Crossing(Edge, Edge),

    #[error("periphery is not a simple cycle: {0}")]
    Periphery(String),

    #[error("vertex ids are not strictly increasing at {0}")]
    IdOrder(VertexId),

    #[error("edge {0:?} references an unknown vertex")]
    DanglingEdge(Edge),
}

pub type Result<T> = std::result::Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_error_converts_into_graph_error() {
        let err: GraphError = SelectionError::SameVertex(VertexId(3)).into();
        assert_eq!(err, GraphError::InvalidSelection(SelectionError::SameVertex(VertexId(3))));
        assert_eq!(err.to_string(), "invalid selection: vertex #3 was picked twice");
    }
}
