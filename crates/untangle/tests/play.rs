use untangle::prelude::*;
use untangle::{GraphSnapshot, UntangleError};
use untangle_test::{crossing_pair, pentagram, small_config};

#[test]
fn test_find_move_leaves_graph_untouched() {
    let graph = crossing_pair();
    let before = graph.positions();

    let mv = find_move(&graph, &small_config()).unwrap();

    assert!(mv.is_improving());
    assert_eq!(graph.positions(), before);
}

#[test]
fn test_find_move_rejects_bad_config() {
    let config = small_config().with_grid_spacing(0.0);
    assert!(matches!(
        find_move(&crossing_pair(), &config),
        Err(UntangleError::Config(_))
    ));
}

#[test]
fn test_play_match_replay_matches_final_graph() {
    for mode in [SolverMode::Greedy, SolverMode::DivideAndConquerDp, SolverMode::Backtracking] {
        let config = small_config().with_strategy(mode).with_max_moves(30);
        let report = play_match(pentagram(), &config).unwrap();

        assert_ne!(report.summary.status, SessionStatus::Running);
        let replayed = report.replay.positions_at(report.replay.total_moves()).unwrap();
        assert_eq!(replayed, report.graph.positions(), "{mode}");
        assert_eq!(
            report.graph.intersection_count(),
            report.summary.final_intersections
        );
    }
}

#[test]
fn test_generated_puzzle_round_trips_through_snapshot_file() {
    let config = small_config().with_puzzle(6, Difficulty::Easy).with_random_seed(11);
    let puzzle = generate_puzzle(&config);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("puzzle.json");
    let json = GraphSnapshot::from_graph(&puzzle.graph).to_json_pretty().unwrap();
    std::fs::write(&path, json).unwrap();

    let graph = GraphSnapshot::from_json_file(&path).unwrap().into_graph().unwrap();
    assert_eq!(graph.node_count(), puzzle.graph.node_count());
    assert_eq!(graph.intersection_count(), puzzle.graph.intersection_count());

    let report = play_match(graph, &config.with_max_moves(40)).unwrap();
    assert!(report.summary.final_intersections <= report.summary.initial_intersections);
}
