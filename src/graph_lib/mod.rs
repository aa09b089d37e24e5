// src/graph_lib/mod.rs
pub mod graph_types;
pub mod geometry;
pub mod error;
pub mod triangulation;
mod placement;

pub use graph_types::{ColorIndex, Edge, Face, Vertex, VertexId};
pub use error::{GraphError, InvariantViolation, SelectionError};
pub use triangulation::{Triangulation, TriangulationConfig};
