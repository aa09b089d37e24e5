// src/graph_lib/triangulation.rs

use std::collections::{BTreeSet, HashSet};
use glam::DVec2;
use log::{debug, info, warn};
use rand::Rng;

use crate::graph_lib::error::{GraphError, InvariantViolation, Result, SelectionError};
use crate::graph_lib::geometry::{
    is_simple_polygon, orient, overlap_at_shared_endpoint, segments_intersect, signed_area,
};
use crate::graph_lib::graph_types::{ColorIndex, Edge, Face, Vertex, VertexId};
use crate::graph_lib::placement::find_position;

#[derive(Clone, Debug, PartialEq)]
pub struct TriangulationConfig {
    /// World point the seed triangle is laid out around.
    pub seed_center: DVec2,
    pub seed_half_width: f64,
    pub seed_rise: f64,
    pub seed_drop: f64,
    pub vertex_radius: f64,
    /// Radius grows by one unit per `vertices_per_radius_step` vertices, up to this cap.
    pub radius_growth_cap: f64,
    pub vertices_per_radius_step: usize,
    pub placement_offset: f64,
    /// Longest arc (in vertices) a random attachment may fan across.
    pub max_random_fan: usize,
    pub random_attempts: usize,
    pub palette_size: ColorIndex,
}

impl Default for TriangulationConfig {
    fn default() -> Self {
        Self {
            seed_center: DVec2::new(500.0, 350.0),
            seed_half_width: 100.0,
            seed_rise: 50.0,
            seed_drop: 100.0,
            vertex_radius: 20.0,
            radius_growth_cap: 10.0,
            vertices_per_radius_step: 100,
            placement_offset: 100.0,
            max_random_fan: 3,
            random_attempts: 16,
            palette_size: 4,
        }
    }
}

/// A planar triangulated graph grown one periphery attachment at a time.
///
/// Vertices are kept in creation order, so ids are strictly increasing along
/// `vertices` and lookups are binary searches.
#[derive(Clone, Debug, PartialEq)]
pub struct Triangulation {
    config: TriangulationConfig,
    vertices: Vec<Vertex>,
    edges: BTreeSet<Edge>,
    faces: Vec<Face>,
    periphery: Vec<VertexId>,
    next_id: u32,
}

impl Triangulation {
    pub fn new(config: TriangulationConfig) -> Self {
        Self {
            config,
            vertices: Vec::new(),
            edges: BTreeSet::new(),
            faces: Vec::new(),
            periphery: Vec::new(),
            next_id: 0,
        }
    }

    pub fn config(&self) -> &TriangulationConfig { &self.config }
    pub fn vertices(&self) -> &[Vertex] { &self.vertices }
    pub fn edges(&self) -> &BTreeSet<Edge> { &self.edges }
    pub fn faces(&self) -> &[Face] { &self.faces }
    pub fn current_periphery(&self) -> &[VertexId] { &self.periphery }

    pub fn is_seeded(&self) -> bool {
        self.periphery.len() >= 3
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices
            .binary_search_by_key(&id, |v| v.id)
            .ok()
            .map(|i| &self.vertices[i])
    }

    pub fn position(&self, id: VertexId) -> Option<DVec2> {
        self.vertex(id).map(|v| v.position)
    }

    pub fn is_on_periphery(&self, id: VertexId) -> bool {
        self.periphery.contains(&id)
    }

    pub fn periphery_points(&self) -> Vec<DVec2> {
        self.periphery.iter().filter_map(|id| self.position(*id)).collect()
    }

    /// Topmost vertex whose disc contains `point`, ignoring vertices with a
    /// display index above `max_index`.
    pub fn vertex_at(&self, point: DVec2, max_index: Option<usize>) -> Option<VertexId> {
        self.vertices
            .iter()
            .rev()
            .filter(|v| max_index.map_or(true, |m| v.index <= m))
            .find(|v| v.position.distance(point) <= v.radius)
            .map(|v| v.id)
    }

    /// Discards the current graph and lays out a fresh triangle.
    pub fn seed_triangle(&mut self) -> &Self {
        self.vertices.clear();
        self.edges.clear();
        self.faces.clear();
        self.periphery.clear();

        let c = self.config.seed_center;
        let corners = [
            c + DVec2::new(-self.config.seed_half_width, -self.config.seed_rise),
            c + DVec2::new(self.config.seed_half_width, -self.config.seed_rise),
            c + DVec2::new(0.0, self.config.seed_drop),
        ];
        let mut ids = [VertexId(0); 3];
        for (i, corner) in corners.into_iter().enumerate() {
            ids[i] = self.push_vertex(corner, i as ColorIndex);
        }
        self.edges.insert(Edge::new(ids[0], ids[1]));
        self.edges.insert(Edge::new(ids[1], ids[2]));
        self.edges.insert(Edge::new(ids[2], ids[0]));
        self.faces.push(self.oriented_face(ids[0], ids[1], ids[2]));
        self.periphery = ids.to_vec();
        if signed_area(&self.periphery_points()) < 0.0 {
            self.periphery.reverse();
        }

        info!("seeded triangle {} {} {}", ids[0], ids[1], ids[2]);
        self
    }

    /// Attaches a new vertex to every periphery vertex on one of the two arcs
    /// joining `vp` and `vq`. The shorter arc is tried first, so adjacent picks
    /// add a single triangle whatever their order. For non-adjacent picks the
    /// longer arc is the fallback.
    pub fn add_vertex_between(&mut self, vp: VertexId, vq: VertexId) -> Result<VertexId> {
        if !self.is_seeded() {
            return Err(GraphError::InvalidState);
        }
        let forward = self.arc_between(vp, vq)?;
        let backward = self.arc_between(vq, vp)?;
        let (shorter, longer) = if backward.len() < forward.len() { (backward, forward) } else { (forward, backward) };
        // Adjacent picks always mean the side between them.
        let fallback = (shorter.len() > 2).then_some(longer);
        for arc in std::iter::once(shorter).chain(fallback) {
            if let Some(position) = find_position(self, &arc, self.config.placement_offset) {
                let id = self.commit_attachment(&arc, position);
                info!("attached {} across {} periphery vertices from {} to {}", id, arc.len(), arc[0], arc[arc.len() - 1]);
                return Ok(id);
            }
        }
        Err(SelectionError::NoPlanarPosition(vp, vq).into())
    }

    /// Attaches a new vertex at a randomly chosen periphery arc.
    ///
    /// Random arcs are tried first; if none of them admits a planar position,
    /// every single periphery side is tried before giving up.
    pub fn add_random_vertex<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<VertexId> {
        if !self.is_seeded() {
            return Err(GraphError::InvalidState);
        }
        let n = self.periphery.len();
        let max_fan = self.config.max_random_fan.clamp(2, n);

        for attempt in 0..self.config.random_attempts {
            let start = rng.gen_range(0..n);
            let span = rng.gen_range(2..=max_fan);
            let arc: Vec<VertexId> = (0..span).map(|s| self.periphery[(start + s) % n]).collect();
            if let Some(position) = find_position(self, &arc, self.config.placement_offset) {
                let id = self.commit_attachment(&arc, position);
                info!("attached random vertex {} across {} periphery vertices", id, arc.len());
                return Ok(id);
            }
            debug!("random attempt {} at arc {:?} found no placement", attempt, arc);
        }

        let offset = rng.gen_range(0..n);
        for s in 0..n {
            let arc = [self.periphery[(offset + s) % n], self.periphery[(offset + s + 1) % n]];
            if let Some(position) = find_position(self, &arc, self.config.placement_offset) {
                let id = self.commit_attachment(&arc, position);
                info!("attached random vertex {} on side {}-{}", id, arc[0], arc[1]);
                return Ok(id);
            }
        }
        warn!("no attachment site among {} periphery sides", n);
        Err(GraphError::NoAttachmentSite)
    }

    /// The periphery run walked forward from `vp` to `vq`, both included.
    fn arc_between(&self, vp: VertexId, vq: VertexId) -> std::result::Result<Vec<VertexId>, SelectionError> {
        if vp == vq {
            return Err(SelectionError::SameVertex(vp));
        }
        let n = self.periphery.len();
        let i = self.periphery_index(vp).ok_or(SelectionError::NotOnPeriphery(vp))?;
        let j = self.periphery_index(vq).ok_or(SelectionError::NotOnPeriphery(vq))?;
        let span = (j + n - i) % n + 1;
        Ok((0..span).map(|s| self.periphery[(i + s) % n]).collect())
    }

    fn periphery_index(&self, id: VertexId) -> Option<usize> {
        self.periphery.iter().position(|p| *p == id)
    }

    fn push_vertex(&mut self, position: DVec2, color: ColorIndex) -> VertexId {
        let id = VertexId(self.next_id);
        self.next_id += 1;
        let step = self.config.vertices_per_radius_step.max(1);
        let growth = ((self.vertices.len() / step) as f64).min(self.config.radius_growth_cap);
        self.vertices.push(Vertex {
            id,
            index: self.vertices.len() + 1,
            position,
            color,
            radius: self.config.vertex_radius + growth,
        });
        id
    }

    /// Lowest palette entry not used by any arc vertex; the least used one if all are taken.
    fn pick_color(&self, arc: &[VertexId]) -> ColorIndex {
        let palette = self.config.palette_size.max(1);
        let mut uses = vec![0usize; palette as usize];
        for id in arc {
            if let Some(v) = self.vertex(*id) {
                uses[(v.color % palette) as usize] += 1;
            }
        }
        uses.iter()
            .enumerate()
            .min_by_key(|(_, count)| **count)
            .map(|(i, _)| i as ColorIndex)
            .unwrap_or(0)
    }

    fn oriented_face(&self, a: VertexId, b: VertexId, c: VertexId) -> Face {
        match (self.position(a), self.position(b), self.position(c)) {
            (Some(pa), Some(pb), Some(pc)) if orient(pa, pb, pc) < 0.0 => Face([a, c, b]),
            _ => Face([a, b, c]),
        }
    }

    /// Everything has been validated by the placement search; this only writes.
    fn commit_attachment(&mut self, arc: &[VertexId], position: DVec2) -> VertexId {
        let vp = arc[0];
        let n = self.periphery.len();
        let start = self.periphery_index(vp).unwrap_or(0);

        let color = self.pick_color(arc);
        let id = self.push_vertex(position, color);
        for &a in arc {
            self.edges.insert(Edge::new(id, a));
        }
        for w in arc.windows(2) {
            let face = self.oriented_face(w[1], w[0], id);
            self.faces.push(face);
        }

        let mut periphery = Vec::with_capacity(n + 3 - arc.len());
        periphery.push(vp);
        periphery.push(id);
        for step in (arc.len() - 1)..n {
            periphery.push(self.periphery[(start + step) % n]);
        }
        self.periphery = periphery;

        debug_assert!(self.validate().is_ok(), "attachment broke an invariant: {:?}", self.validate());
        id
    }

    /// Checks the four graph invariants: triangular bounded faces, no crossing
    /// edges, a simple periphery cycle, and increasing vertex ids.
    pub fn validate(&self) -> std::result::Result<(), InvariantViolation> {
        for pair in self.vertices.windows(2) {
            if pair[1].id <= pair[0].id {
                return Err(InvariantViolation::IdOrder(pair[1].id));
            }
        }
        if self.vertices.is_empty() {
            return Ok(());
        }

        let mut segments = Vec::with_capacity(self.edges.len());
        for edge in &self.edges {
            match (self.position(edge.first()), self.position(edge.second())) {
                (Some(a), Some(b)) => segments.push((*edge, a, b)),
                _ => return Err(InvariantViolation::DanglingEdge(*edge)),
            }
        }

        let expected = (self.edges.len() + 1).saturating_sub(self.vertices.len());
        if self.faces.len() != expected {
            return Err(InvariantViolation::FaceCount { expected, found: self.faces.len() });
        }
        let mut seen_faces = HashSet::new();
        for face in &self.faces {
            for side in face.edges() {
                if !self.edges.contains(&side) {
                    return Err(InvariantViolation::MissingFaceEdge(side));
                }
            }
            let [a, b, c] = face.0;
            let mut key = face.0;
            key.sort();
            let positive = match (self.position(a), self.position(b), self.position(c)) {
                (Some(pa), Some(pb), Some(pc)) => orient(pa, pb, pc) > 0.0,
                _ => false,
            };
            if !positive || !seen_faces.insert(key) {
                return Err(InvariantViolation::BadFace(face.0));
            }
        }

        for (i, (e1, a0, a1)) in segments.iter().enumerate() {
            for (e2, b0, b1) in &segments[i + 1..] {
                let crossing = if e1.shares_endpoint(e2) {
                    let shared = if e2.touches(e1.first()) { e1.first() } else { e1.second() };
                    let (s, x) = if e1.first() == shared { (*a0, *a1) } else { (*a1, *a0) };
                    let y = if e2.first() == shared { *b1 } else { *b0 };
                    overlap_at_shared_endpoint(s, x, y)
                } else {
                    segments_intersect(*a0, *a1, *b0, *b1)
                };
                if crossing {
                    return Err(InvariantViolation::Crossing(*e1, *e2));
                }
            }
        }

        let n = self.periphery.len();
        let unique: HashSet<_> = self.periphery.iter().collect();
        if unique.len() != n {
            return Err(InvariantViolation::Periphery("repeated vertex".to_string()));
        }
        for i in 0..n {
            let side = Edge::new(self.periphery[i], self.periphery[(i + 1) % n]);
            if !self.edges.contains(&side) {
                return Err(InvariantViolation::Periphery(format!("side {:?} is not an edge", side)));
            }
        }
        let points = self.periphery_points();
        if !is_simple_polygon(&points) {
            return Err(InvariantViolation::Periphery("self-intersecting".to_string()));
        }
        if signed_area(&points) <= 0.0 {
            return Err(InvariantViolation::Periphery("wrong orientation".to_string()));
        }
        Ok(())
    }
}
