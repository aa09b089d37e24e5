// src/lib.rs

pub mod app;
pub mod config;
pub mod graph_lib;
pub mod rendering_lib;
pub mod ui;
pub mod view_lib;

pub use graph_lib::{GraphError, Triangulation, TriangulationConfig, Vertex, VertexId};
