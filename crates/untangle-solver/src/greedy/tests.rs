//! Tests for the greedy solver.

use super::*;
use crate::neutral::min_distance_to_others;
use untangle_core::{MoveStatus, Point, UntangleError};
use untangle_test::{crossing_pair, k5_one_crossing, pentagram, planar_path, small_board};

fn solve(graph: &untangle_core::Graph) -> (CpuMove, usize) {
    let mut solver = GreedySolver::new();
    let mv = solver
        .find_best_move(graph.nodes().to_vec(), graph.edges(), &small_board())
        .unwrap();
    (mv, solver.last_candidates_evaluated())
}

#[test]
fn test_solved_graph_returns_no_move() {
    let (mv, evaluated) = solve(&planar_path());
    assert_eq!(mv.node_id, None);
    assert_eq!(mv.wire_node_id(), -1);
    assert_eq!(mv.intersections_before, 0);
    assert_eq!(evaluated, 0);
}

#[test]
fn test_first_found_improving_move_wins() {
    // Node 0's candidates start (50,50), (50,150), (50,250). Only the third
    // removes the crossing: 0-1 then meets 2-3 at node 2's position.
    let (mv, _) = solve(&crossing_pair());
    assert_eq!(mv.node_id, Some(0));
    assert_eq!(mv.from_position, Point::new(50.0, 50.0));
    assert_eq!(mv.to_position, Point::new(50.0, 250.0));
    assert_eq!(mv.intersections_before, 1);
    assert_eq!(mv.intersections_after, 0);
    assert_eq!(mv.intersection_reduction, 1);
}

#[test]
fn test_counts_every_candidate() {
    let graph = crossing_pair();
    let (_, evaluated) = solve(&graph);
    // Each node: 9 grid + 8 ring + 1 centroid.
    assert_eq!(evaluated, 4 * 18);
}

#[test]
fn test_move_never_increases_crossings() {
    let graph = pentagram();
    let (mv, _) = solve(&graph);
    assert!(mv.is_valid());
    assert!(mv.intersections_after <= mv.intersections_before);
    assert_eq!(mv.intersections_before, 5);

    let mut applied = graph.clone();
    applied.apply_move(&mv).unwrap();
    assert_eq!(applied.intersection_count(), mv.intersections_after);
}

#[test]
fn test_neutral_fallback_maximizes_spread() {
    let graph = k5_one_crossing();
    let (mv, evaluated) = solve(&graph);

    assert_eq!(mv.status(), MoveStatus::Neutral);
    assert_eq!(mv.intersections_before, 1);
    assert_eq!(mv.intersections_after, 1);
    assert_eq!(mv.intersection_reduction, 0);
    // Both passes see 5 nodes x (9 grid + 4 x 8 ring + 1 centroid).
    assert_eq!(evaluated, 2 * 5 * 42);

    let generator = CandidateGenerator::new(small_board());
    let mut nodes = graph.nodes().to_vec();
    let mut widest = 0.0_f32;
    for index in 0..nodes.len() {
        let original = nodes[index].position;
        for at in generator.generate(&nodes, index) {
            nodes[index].position = at;
            let after = count_intersections(&nodes, graph.edges());
            nodes[index].position = original;

            assert!(after >= 1);
            if after == 1 {
                widest = widest.max(min_distance_to_others(&nodes, index, at));
            }
        }
    }

    let node = mv.node_id.unwrap();
    assert_eq!(min_distance_to_others(graph.nodes(), node, mv.to_position), widest);
    assert_eq!(node, 0);
    assert_eq!(mv.from_position, Point::new(105.5, 170.5));
    assert_eq!(mv.to_position, Point::new(50.0, 250.0));
}

#[test]
fn test_search_restores_positions() {
    let graph = pentagram();
    let mut nodes = graph.nodes().to_vec();
    let mut evaluated = 0;
    GreedySolver::search(
        &mut nodes,
        graph.edges(),
        &CandidateGenerator::new(small_board()),
        &mut evaluated,
    );
    assert_eq!(nodes, graph.nodes());
}

#[test]
fn test_invalid_graph_is_an_error() {
    let graph = crossing_pair();
    let mut edges = graph.edges().to_vec();
    edges.push(Edge::new(0, 17));

    let err = GreedySolver::new()
        .find_best_move(graph.nodes().to_vec(), &edges, &small_board())
        .unwrap_err();
    assert!(matches!(err, UntangleError::InvalidGraph(_)));
}

#[test]
fn test_counter_resets_between_calls() {
    let mut solver = GreedySolver::new();
    let tangled = crossing_pair();
    solver
        .find_best_move(tangled.nodes().to_vec(), tangled.edges(), &small_board())
        .unwrap();
    assert!(solver.last_candidates_evaluated() > 0);

    let solved = planar_path();
    solver
        .find_best_move(solved.nodes().to_vec(), solved.edges(), &small_board())
        .unwrap();
    assert_eq!(solver.last_candidates_evaluated(), 0);
}
