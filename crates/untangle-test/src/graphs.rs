//! Small graphs with known crossing counts.
//!
//! Coordinates sit on the [`small_board`](crate::small_board) grid where
//! that matters, so expected moves can be worked out by hand.

use untangle_core::{Graph, Point};

/// Builds a graph from positions and edge pairs.
///
/// # Panics
///
/// Panics if an edge is invalid; fixtures are expected to be well formed.
pub fn graph_from(points: &[(f32, f32)], edges: &[(usize, usize)]) -> Graph {
    let mut graph = Graph::new();
    for &(x, y) in points {
        graph.add_node(Point::new(x, y));
    }
    for &(u, v) in edges {
        graph
            .add_edge(u, v)
            .unwrap_or_else(|e| panic!("fixture edge ({u}, {v}): {e}"));
    }
    graph
}

/// Unit square with both diagonals: exactly one crossing.
pub fn square_with_diagonals() -> Graph {
    graph_from(
        &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)],
        &[(0, 1), (1, 2), (2, 3), (3, 0), (0, 2), (1, 3)],
    )
}

/// A triangle; never crosses.
pub fn triangle() -> Graph {
    graph_from(&[(50.0, 50.0), (250.0, 50.0), (150.0, 250.0)], &[(0, 1), (1, 2), (2, 0)])
}

/// Two disjoint edges crossing at the board center.
///
/// Node 0 (50,50) - node 1 (250,250) and node 2 (50,250) - node 3 (250,50).
pub fn crossing_pair() -> Graph {
    graph_from(
        &[(50.0, 50.0), (250.0, 250.0), (50.0, 250.0), (250.0, 50.0)],
        &[(0, 1), (2, 3)],
    )
}

/// Three-edge path along the board edge; no crossings.
pub fn planar_path() -> Graph {
    graph_from(
        &[(50.0, 50.0), (150.0, 50.0), (250.0, 50.0), (250.0, 150.0)],
        &[(0, 1), (1, 2), (2, 3)],
    )
}

/// A 5-cycle drawn as a star: five crossings.
pub fn pentagram() -> Graph {
    let center = Point::new(150.0, 150.0);
    let radius = 90.0_f32;
    let points: Vec<(f32, f32)> = (0..5)
        .map(|i| {
            let angle = std::f32::consts::TAU * i as f32 / 5.0 - std::f32::consts::FRAC_PI_2;
            (center.x + radius * angle.cos(), center.y + radius * angle.sin())
        })
        .collect();
    graph_from(&points, &[(0, 2), (2, 4), (4, 1), (1, 3), (3, 0)])
}

/// Complete graph on five nodes drawn with a single crossing.
///
/// K5 is not planar, so no relocation can reach zero; off-grid coordinates
/// keep every [`small_board`](crate::small_board) candidate clear of
/// touching placements.
pub fn k5_one_crossing() -> Graph {
    let mut edges = Vec::new();
    for u in 0..5 {
        for v in u + 1..5 {
            edges.push((u, v));
        }
    }
    graph_from(
        &[(105.5, 170.5), (200.5, 160.5), (235.5, 200.5), (175.5, 165.5), (155.5, 55.5)],
        &edges,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_counts() {
        assert_eq!(square_with_diagonals().intersection_count(), 1);
        assert_eq!(triangle().intersection_count(), 0);
        assert_eq!(crossing_pair().intersection_count(), 1);
        assert_eq!(planar_path().intersection_count(), 0);
        assert_eq!(pentagram().intersection_count(), 5);
        assert_eq!(k5_one_crossing().intersection_count(), 1);
        assert_eq!(k5_one_crossing().edge_count(), 10);
    }
}
