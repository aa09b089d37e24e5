// src/rendering_lib/frame.rs
//
// What one frame shows, in physical screen pixels. Built from the session
// every frame; the renderer and the label painter both read it.

use std::collections::HashMap;
use glam::Vec2;
use crate::graph_lib::VertexId;
use crate::view_lib::{DisplayMode, Selection, Session};

pub const BACKGROUND_COLOR: [f32; 4] = [0.941, 0.941, 0.941, 1.0];
pub const EDGE_COLOR: [f32; 4] = [0.196, 0.196, 0.196, 1.0];
pub const VERTEX_BORDER_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
pub const INDEX_MODE_FILL: [f32; 4] = [0.353, 0.353, 0.431, 1.0];
pub const SELECTED_RING_COLOR: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
pub const PERIPHERY_FILL_COLOR: [f32; 4] = [0.784, 0.784, 1.0, 0.392];
pub const PERIPHERY_OUTLINE_COLOR: [f32; 4] = [0.392, 0.392, 0.784, 1.0];
pub const LABEL_COLOR: [u8; 3] = [255, 255, 255];

pub const VERTEX_PALETTE: [[f32; 4]; 4] = [
    [0.784, 0.196, 0.196, 1.0],
    [0.196, 0.784, 0.196, 1.0],
    [0.196, 0.196, 0.784, 1.0],
    [0.784, 0.784, 0.196, 1.0],
];

#[derive(Clone, Debug, PartialEq)]
pub struct VertexSprite {
    pub id: VertexId,
    pub center: Vec2,
    pub radius: f32,
    pub fill: [f32; 4],
    /// Only set in index mode.
    pub label: Option<String>,
    pub selected: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderFrame {
    pub vertices: Vec<VertexSprite>,
    pub edges: Vec<[Vec2; 2]>,
    pub faces: Vec<[Vec2; 3]>,
    pub periphery: Vec<Vec2>,
}

impl RenderFrame {
    pub fn build(session: &Session) -> Self {
        let graph = session.graph();
        let view = session.view();
        let selected = match session.selection() {
            Selection::AwaitingSecond(id) => Some(id),
            _ => None,
        };

        let mut screen: HashMap<VertexId, Vec2> = HashMap::with_capacity(graph.vertices().len());
        let mut vertices = Vec::with_capacity(graph.vertices().len());
        for v in graph.vertices().iter().filter(|v| session.is_visible(v)) {
            let center = view.world_to_screen(v.position);
            screen.insert(v.id, center);
            let (fill, label) = match session.display_mode() {
                DisplayMode::Index => (INDEX_MODE_FILL, Some(v.index.to_string())),
                DisplayMode::Color => (VERTEX_PALETTE[v.color as usize % VERTEX_PALETTE.len()], None),
            };
            vertices.push(VertexSprite {
                id: v.id,
                center,
                radius: view.scale_length(v.radius),
                fill,
                label,
                selected: selected == Some(v.id),
            });
        }

        let edges = graph
            .edges()
            .iter()
            .filter_map(|e| Some([*screen.get(&e.first())?, *screen.get(&e.second())?]))
            .collect();
        let faces = graph
            .faces()
            .iter()
            .filter_map(|f| {
                let [a, b, c] = f.0;
                Some([*screen.get(&a)?, *screen.get(&b)?, *screen.get(&c)?])
            })
            .collect();
        let periphery = graph
            .current_periphery()
            .iter()
            .filter_map(|id| screen.get(id).copied())
            .collect();

        Self { vertices, edges, faces, periphery }
    }
}
