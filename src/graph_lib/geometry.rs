// src/graph_lib/geometry.rs
//
// Planar predicates over world-space points. Tolerances are lengths, so every
// orientation test is normalized by the length of the reference segment.

use glam::DVec2;

pub const LENGTH_EPSILON: f64 = 1e-7;

/// Twice the signed area of triangle (a, b, c). Positive when c is left of a->b
/// in a y-up frame.
#[inline(always)]
pub fn orient(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    (b - a).perp_dot(c - a)
}

/// Signed distance of `p` from the infinite line through a and b.
#[inline(always)]
fn side(a: DVec2, b: DVec2, p: DVec2) -> f64 {
    let len = a.distance(b);
    if len < LENGTH_EPSILON {
        return p.distance(a);
    }
    orient(a, b, p) / len
}

pub fn signed_area(points: &[DVec2]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    for i in 0..points.len() {
        let j = (i + 1) % points.len();
        area += points[i].perp_dot(points[j]);
    }
    area / 2.0
}

pub fn point_segment_distance(p: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq < LENGTH_EPSILON * LENGTH_EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Closed-segment intersection test: touching endpoints and collinear overlap count.
pub fn segments_intersect(a0: DVec2, a1: DVec2, b0: DVec2, b1: DVec2) -> bool {
    let d1 = side(b0, b1, a0);
    let d2 = side(b0, b1, a1);
    let d3 = side(a0, a1, b0);
    let d4 = side(a0, a1, b1);

    let straddles = |x: f64, y: f64| (x > LENGTH_EPSILON && y < -LENGTH_EPSILON)
        || (x < -LENGTH_EPSILON && y > LENGTH_EPSILON);
    if straddles(d1, d2) && straddles(d3, d4) {
        return true;
    }

    point_segment_distance(a0, b0, b1) <= LENGTH_EPSILON
        || point_segment_distance(a1, b0, b1) <= LENGTH_EPSILON
        || point_segment_distance(b0, a0, a1) <= LENGTH_EPSILON
        || point_segment_distance(b1, a0, a1) <= LENGTH_EPSILON
}

/// Two segments sharing the endpoint `shared` overlap when they leave it in
/// the same direction.
pub fn overlap_at_shared_endpoint(shared: DVec2, a: DVec2, b: DVec2) -> bool {
    let da = a - shared;
    let db = b - shared;
    side(shared, a, b).abs() <= LENGTH_EPSILON && da.dot(db) > 0.0
}

/// Strict interior test by crossing number. Points on the boundary are not inside.
pub fn point_in_polygon(p: DVec2, polygon: &[DVec2]) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    for i in 0..polygon.len() {
        let j = (i + 1) % polygon.len();
        if point_segment_distance(p, polygon[i], polygon[j]) <= LENGTH_EPSILON {
            return false;
        }
    }
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (pi, pj) = (polygon[i], polygon[j]);
        if (pi.y > p.y) != (pj.y > p.y) {
            let x_cross = pj.x + (p.y - pj.y) * (pi.x - pj.x) / (pi.y - pj.y);
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

pub fn is_simple_polygon(polygon: &[DVec2]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    for i in 0..n {
        let (a0, a1) = (polygon[i], polygon[(i + 1) % n]);
        if a0.distance(a1) <= LENGTH_EPSILON {
            return false;
        }
        // Consecutive sides may only meet at their shared corner.
        let a2 = polygon[(i + 2) % n];
        if overlap_at_shared_endpoint(a1, a0, a2) {
            return false;
        }
        for j in (i + 2)..n {
            if i == 0 && j == n - 1 {
                continue;
            }
            let (b0, b1) = (polygon[j], polygon[(j + 1) % n]);
            if segments_intersect(a0, a1, b0, b1) {
                return false;
            }
        }
    }
    true
}

/// Unit normal pointing out of a positively oriented polygon along side a->b.
pub fn outward_normal(a: DVec2, b: DVec2) -> DVec2 {
    let d = b - a;
    DVec2::new(d.y, -d.x).normalize_or_zero()
}
