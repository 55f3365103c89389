//! Geometry kernel.
//!
//! Segment intersection, point-to-segment distance and the full-graph
//! crossing count used as the fitness function by every solver.
//!
//! Segments are treated parametrically: `P(t) = A + t(B - A)` and
//! `Q(u) = C + u(D - C)`. Two segments cross only when both parameters lie
//! strictly inside `(EPSILON, 1 - EPSILON)`, so touching endpoints and shared
//! vertices never count as a tangle.

mod point;


pub use point::Point;

use crate::graph::{Edge, Node};

/// Tolerance for parallel detection and endpoint exclusion.
pub const EPSILON: f32 = 1e-5;

/// Returns true if segments AB and CD cross strictly in their interiors.
///
/// Parallel and collinear segments never cross.
///
/// # Example
///
/// ```
/// use untangle_core::{check_intersection, Point};
///
/// let a = Point::new(0.0, 0.0);
/// let b = Point::new(10.0, 10.0);
/// let c = Point::new(0.0, 10.0);
/// let d = Point::new(10.0, 0.0);
/// assert!(check_intersection(a, b, c, d));
///
/// // Touching at an endpoint is not a crossing.
/// assert!(!check_intersection(a, b, b, d));
/// ```
#[inline]
pub fn check_intersection(a: Point, b: Point, c: Point, d: Point) -> bool {
    let ab = b - a;
    let cd = d - c;
    let ac = c - a;

    let denom = ab.cross(cd);
    if denom.abs() < EPSILON {
        return false;
    }

    let t = ac.cross(cd) / denom;
    let u = ac.cross(ab) / denom;

    (t > EPSILON && t < 1.0 - EPSILON) && (u > EPSILON && u < 1.0 - EPSILON)
}

/// Distance from `point` to the closest point of segment AB.
///
/// The projection parameter is clamped to `[0, 1]`; a degenerate segment
/// measures the distance to `seg_a`.
pub fn point_to_segment_distance(point: Point, seg_a: Point, seg_b: Point) -> f32 {
    let ab = seg_b - seg_a;
    let ap = point - seg_a;

    let ab_len_sq = ab.magnitude_squared();
    if ab_len_sq < EPSILON {
        return ap.magnitude();
    }

    let t = (ap.dot(ab) / ab_len_sq).clamp(0.0, 1.0);
    let projection = seg_a + ab * t;
    (point - projection).magnitude()
}

/// Counts crossing pairs among all unordered pairs of non-adjacent edges.
///
/// Edge endpoints index directly into `nodes`; callers validate the graph
/// first (see [`crate::validate_graph`]). Runs in O(E²) without allocating.
pub fn count_intersections(nodes: &[Node], edges: &[Edge]) -> usize {
    let mut count = 0;

    for (i, e1) in edges.iter().enumerate() {
        let a = nodes[e1.u].position;
        let b = nodes[e1.v].position;

        for e2 in &edges[i + 1..] {
            if e1.shares_vertex(e2) {
                continue;
            }

            let c = nodes[e2.u].position;
            let d = nodes[e2.v].position;
            if check_intersection(a, b, c, d) {
                count += 1;
            }
        }
    }

    count
}
