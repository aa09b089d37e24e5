// src/rendering_lib/mod.rs

pub mod frame;
pub mod mesh;
pub mod renderer;
pub mod shader;
pub mod vertex;

pub use frame::{RenderFrame, VertexSprite};
pub use mesh::MeshBuilder;
pub use renderer::Renderer;
pub use shader::GRAPH_SHADER_SOURCE;
pub use vertex::ColorVertex;
