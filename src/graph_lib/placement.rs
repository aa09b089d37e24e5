// src/graph_lib/placement.rs
//
// Where a new vertex goes when it attaches to an arc of the periphery.
// The rule: anchor at the centroid of the arc, push out along the summed
// outward normals of the arc's sides, and take the first candidate distance
// that keeps the embedding planar.

use glam::DVec2;
use log::debug;
use crate::graph_lib::geometry::{
    orient, outward_normal, overlap_at_shared_endpoint, point_in_polygon,
    point_segment_distance, segments_intersect, LENGTH_EPSILON,
};
use crate::graph_lib::graph_types::VertexId;
use crate::graph_lib::triangulation::Triangulation;

/// Multiples of the configured offset, tried in order.
const OFFSET_FACTORS: [f64; 7] = [1.0, 1.5, 2.0, 3.0, 4.0, 0.5, 0.25];

/// Minimum distance between a new vertex and any existing edge or vertex.
const MIN_SEPARATION: f64 = 1e-6;

pub(crate) fn find_position(graph: &Triangulation, arc: &[VertexId], offset: f64) -> Option<DVec2> {
    if arc.len() < 2 {
        return None;
    }
    let arc_points: Vec<DVec2> = arc.iter().map(|id| graph.position(*id)).collect::<Option<_>>()?;
    let periphery_points = graph.periphery_points();

    let anchor = arc_points.iter().fold(DVec2::ZERO, |acc, p| acc + *p) / arc_points.len() as f64;
    let direction = outward_direction(&arc_points, anchor);

    for require_clearance in [true, false] {
        for factor in OFFSET_FACTORS {
            let candidate = anchor + direction * offset * factor;
            if is_planar_attachment(graph, arc, &arc_points, &periphery_points, candidate, require_clearance) {
                debug!(
                    "placed vertex for arc of {} at ({:.1}, {:.1}), factor {}, clearance {}",
                    arc.len(), candidate.x, candidate.y, factor, require_clearance
                );
                return Some(candidate);
            }
        }
    }
    debug!("no planar placement for arc {:?}", arc);
    None
}

fn outward_direction(arc_points: &[DVec2], anchor: DVec2) -> DVec2 {
    let summed = arc_points
        .windows(2)
        .fold(DVec2::ZERO, |acc, w| acc + outward_normal(w[0], w[1]) * w[0].distance(w[1]));
    if let Some(direction) = summed.try_normalize() {
        return direction;
    }
    let first = arc_points[0];
    let last = arc_points[arc_points.len() - 1];
    let midpoint = (first + last) / 2.0;
    (midpoint - anchor).try_normalize().unwrap_or(DVec2::Y)
}

fn is_planar_attachment(
    graph: &Triangulation,
    arc: &[VertexId],
    arc_points: &[DVec2],
    periphery_points: &[DVec2],
    candidate: DVec2,
    require_clearance: bool,
) -> bool {
    if point_in_polygon(candidate, periphery_points) {
        return false;
    }
    let n = periphery_points.len();
    for i in 0..n {
        if point_segment_distance(candidate, periphery_points[i], periphery_points[(i + 1) % n]) <= MIN_SEPARATION {
            return false;
        }
    }

    // Each fan triangle must sit on the outer side of the periphery side it covers.
    for w in arc_points.windows(2) {
        let len = w[0].distance(w[1]);
        if len <= LENGTH_EPSILON || orient(w[0], w[1], candidate) / len >= -LENGTH_EPSILON {
            return false;
        }
    }

    if require_clearance {
        let crowded = graph
            .vertices()
            .iter()
            .any(|v| v.position.distance(candidate) < 2.0 * v.radius);
        if crowded {
            return false;
        }
    }

    for (&anchor_id, &anchor_pos) in arc.iter().zip(arc_points) {
        for edge in graph.edges() {
            let (Some(u), Some(v)) = (graph.position(edge.first()), graph.position(edge.second())) else {
                return false;
            };
            if edge.touches(anchor_id) {
                let other = if edge.first() == anchor_id { v } else { u };
                if overlap_at_shared_endpoint(anchor_pos, candidate, other) {
                    return false;
                }
                continue;
            }
            if segments_intersect(candidate, anchor_pos, u, v) {
                return false;
            }
        }
        let blocked = graph
            .vertices()
            .iter()
            .filter(|w| w.id != anchor_id)
            .any(|w| point_segment_distance(w.position, candidate, anchor_pos) <= MIN_SEPARATION);
        if blocked {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph_lib::triangulation::TriangulationConfig;

    fn seeded() -> Triangulation {
        let mut graph = Triangulation::new(TriangulationConfig::default());
        graph.seed_triangle();
        graph
    }

    #[test]
    fn single_side_placement_lands_outside() {
        let graph = seeded();
        let arc = &graph.current_periphery()[0..2];
        let p = find_position(&graph, arc, 100.0).unwrap();
        assert!(!point_in_polygon(p, &graph.periphery_points()));
        // Top side of the seed triangle faces up on screen (negative y).
        let a = graph.position(arc[0]).unwrap();
        assert!(p.y < a.y);
    }

    #[test]
    fn short_arc_is_rejected() {
        let graph = seeded();
        let arc = &graph.current_periphery()[0..1];
        assert!(find_position(&graph, arc, 100.0).is_none());
    }

    #[test]
    fn direction_follows_summed_normals() {
        let points = [DVec2::new(0.0, 0.0), DVec2::new(10.0, 0.0)];
        let d = outward_direction(&points, DVec2::new(5.0, 0.0));
        assert!((d - DVec2::new(0.0, -1.0)).length() < 1e-12);
    }
}
