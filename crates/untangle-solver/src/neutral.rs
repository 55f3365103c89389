//! Zero-reduction fallback shared by the greedy and backtracking solvers.

use tracing::trace;
use untangle_core::{count_intersections, CpuMove, Edge, Node, Point};

use crate::candidate::CandidateGenerator;

/// Finds the zero-reduction move whose target lies farthest from its
/// nearest other node.
///
/// Scans every node and candidate in order; the first strictly larger
/// minimum distance wins. Node positions are restored before returning.
/// Returns `CpuMove::none(current)` when no candidate keeps the count at
/// `current`.
pub(crate) fn find_neutral_move(
    nodes: &mut [Node],
    edges: &[Edge],
    generator: &CandidateGenerator,
    current: usize,
    evaluated: &mut usize,
) -> CpuMove {
    let mut best = CpuMove::none(current);
    let mut best_spread = 0.0_f32;
    let mut candidates = Vec::new();

    for index in 0..nodes.len() {
        let original = nodes[index].position;
        generator.fill(nodes, index, &mut candidates);

        for &candidate in &candidates {
            *evaluated += 1;

            nodes[index].position = candidate;
            let after = count_intersections(nodes, edges);
            nodes[index].position = original;

            if after != current {
                continue;
            }

            let spread = min_distance_to_others(nodes, index, candidate);
            if spread > best_spread {
                trace!(
                    event = "neutral_candidate",
                    node_id = index,
                    spread = spread as f64,
                );
                best_spread = spread;
                best = CpuMove::relocate(index, original, candidate, current, after);
            }
        }
    }

    best
}

/// Distance from `at` to the closest node other than `index`.
///
/// `f32::MAX` if there are no other nodes.
pub(crate) fn min_distance_to_others(nodes: &[Node], index: usize, at: Point) -> f32 {
    nodes
        .iter()
        .enumerate()
        .filter(|(other, _)| *other != index)
        .map(|(_, n)| at.distance(n.position))
        .fold(f32::MAX, f32::min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_distance_ignores_self() {
        let nodes = vec![
            Node::new(0, Point::new(0.0, 0.0)),
            Node::new(1, Point::new(3.0, 4.0)),
            Node::new(2, Point::new(10.0, 0.0)),
        ];
        assert_eq!(min_distance_to_others(&nodes, 0, Point::new(0.0, 0.0)), 5.0);
        assert_eq!(
            min_distance_to_others(&nodes[..1], 0, Point::ORIGIN),
            f32::MAX
        );
    }
}
