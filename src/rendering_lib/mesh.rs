// src/rendering_lib/mesh.rs

use glam::Vec2;
use super::frame::{
    RenderFrame, EDGE_COLOR, PERIPHERY_FILL_COLOR, PERIPHERY_OUTLINE_COLOR,
    SELECTED_RING_COLOR, VERTEX_BORDER_COLOR,
};
use super::vertex::ColorVertex;

const DISC_SEGMENTS: u32 = 24;
const EDGE_WIDTH: f32 = 2.0;
const PERIPHERY_WIDTH: f32 = 2.0;
const BORDER_WIDTH: f32 = 2.0;
const SELECTED_RING_GAP: f32 = 5.0;
const SELECTED_RING_WIDTH: f32 = 3.0;

/// Accumulates indexed triangles for one frame.
#[derive(Debug, Default)]
pub struct MeshBuilder {
    pub vertices: Vec<ColorVertex>,
    pub indices: Vec<u32>,
}

impl MeshBuilder {
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    fn push_vertex(&mut self, p: Vec2, color: [f32; 4]) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(ColorVertex::new(p.to_array(), color));
        index
    }

    pub fn push_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) {
        let i = self.push_vertex(a, color);
        self.push_vertex(b, color);
        self.push_vertex(c, color);
        self.indices.extend_from_slice(&[i, i + 1, i + 2]);
    }

    /// Thick line as a quad. Zero-length segments are skipped.
    pub fn push_segment(&mut self, a: Vec2, b: Vec2, width: f32, color: [f32; 4]) {
        let Some(dir) = (b - a).try_normalize() else { return };
        let offset = dir.perp() * (width / 2.0);
        let i = self.push_vertex(a + offset, color);
        self.push_vertex(b + offset, color);
        self.push_vertex(b - offset, color);
        self.push_vertex(a - offset, color);
        self.indices.extend_from_slice(&[i, i + 1, i + 2, i, i + 2, i + 3]);
    }

    pub fn push_disc(&mut self, center: Vec2, radius: f32, color: [f32; 4]) {
        if radius <= 0.0 {
            return;
        }
        let hub = self.push_vertex(center, color);
        for k in 0..DISC_SEGMENTS {
            self.push_vertex(center + ring_point(k, radius), color);
        }
        for k in 0..DISC_SEGMENTS {
            let next = (k + 1) % DISC_SEGMENTS;
            self.indices.extend_from_slice(&[hub, hub + 1 + k, hub + 1 + next]);
        }
    }

    pub fn push_ring(&mut self, center: Vec2, inner: f32, outer: f32, color: [f32; 4]) {
        if outer <= inner || outer <= 0.0 {
            return;
        }
        let inner = inner.max(0.0);
        let base = self.vertices.len() as u32;
        for k in 0..DISC_SEGMENTS {
            self.push_vertex(center + ring_point(k, inner), color);
            self.push_vertex(center + ring_point(k, outer), color);
        }
        for k in 0..DISC_SEGMENTS {
            let next = (k + 1) % DISC_SEGMENTS;
            let (i0, o0) = (base + 2 * k, base + 2 * k + 1);
            let (i1, o1) = (base + 2 * next, base + 2 * next + 1);
            self.indices.extend_from_slice(&[i0, o0, o1, i0, o1, i1]);
        }
    }

    /// Back to front: region fill, periphery outline, edges, vertices, highlights.
    pub fn build_frame(&mut self, frame: &RenderFrame) {
        self.clear();
        for [a, b, c] in &frame.faces {
            self.push_triangle(*a, *b, *c, PERIPHERY_FILL_COLOR);
        }
        let n = frame.periphery.len();
        if n > 2 {
            for i in 0..n {
                self.push_segment(frame.periphery[i], frame.periphery[(i + 1) % n], PERIPHERY_WIDTH, PERIPHERY_OUTLINE_COLOR);
            }
        }
        for [a, b] in &frame.edges {
            self.push_segment(*a, *b, EDGE_WIDTH, EDGE_COLOR);
        }
        for sprite in &frame.vertices {
            self.push_disc(sprite.center, sprite.radius, VERTEX_BORDER_COLOR);
            self.push_disc(sprite.center, sprite.radius - BORDER_WIDTH, sprite.fill);
            if sprite.selected {
                let inner = sprite.radius + SELECTED_RING_GAP - SELECTED_RING_WIDTH;
                self.push_ring(sprite.center, inner, sprite.radius + SELECTED_RING_GAP, SELECTED_RING_COLOR);
            }
        }
    }
}

fn ring_point(k: u32, radius: f32) -> Vec2 {
    let angle = k as f32 * std::f32::consts::TAU / DISC_SEGMENTS as f32;
    Vec2::new(angle.cos(), angle.sin()) * radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_is_two_triangles_of_given_width() {
        let mut mesh = MeshBuilder::default();
        mesh.push_segment(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), 2.0, EDGE_COLOR);
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices.len(), 6);
        let ys: Vec<f32> = mesh.vertices.iter().map(|v| v.position[1].abs()).collect();
        assert!(ys.iter().all(|y| (*y - 1.0).abs() < 1e-6));
    }

    #[test]
    fn degenerate_shapes_add_nothing() {
        let mut mesh = MeshBuilder::default();
        mesh.push_segment(Vec2::ONE, Vec2::ONE, 2.0, EDGE_COLOR);
        mesh.push_disc(Vec2::ZERO, 0.0, EDGE_COLOR);
        mesh.push_ring(Vec2::ZERO, 5.0, 4.0, EDGE_COLOR);
        assert!(mesh.is_empty());
    }

    #[test]
    fn indices_stay_in_range() {
        let mut mesh = MeshBuilder::default();
        mesh.push_disc(Vec2::new(5.0, 5.0), 3.0, EDGE_COLOR);
        mesh.push_ring(Vec2::new(5.0, 5.0), 3.0, 6.0, EDGE_COLOR);
        mesh.push_triangle(Vec2::ZERO, Vec2::X, Vec2::Y, EDGE_COLOR);
        let count = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|i| *i < count));
        assert_eq!(mesh.indices.len() % 3, 0);
    }
}
