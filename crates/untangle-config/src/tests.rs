//! Tests for engine configuration.

use std::io::Write;

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        [board]
        width = 1280
        height = 720
        margin = 40
        grid_spacing = 64

        [search]
        strategy = "divide_and_conquer_dp"
        base_case_threshold = 4

        [puzzle]
        node_count = 12
        difficulty = "hard"
        random_seed = 42

        [session]
        max_moves = 100
    "#;

    let config = UntangleConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.board.width, 1280.0);
    assert_eq!(config.board.grid_spacing, 64.0);
    assert_eq!(config.search.strategy, SolverMode::DivideAndConquerDp);
    assert_eq!(config.search.base_case_threshold, 4);
    // Unspecified fields keep their defaults.
    assert_eq!(config.search.max_depth, 3);
    assert_eq!(config.puzzle.difficulty, Difficulty::Hard);
    assert_eq!(config.puzzle.random_seed, Some(42));
    assert_eq!(config.session.max_moves, 100);
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        board:
          width: 640
          height: 480
        search:
          strategy: backtracking
          max_depth: 2
        puzzle:
          difficulty: easy
    "#;

    let config = UntangleConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.board.height, 480.0);
    assert_eq!(config.board.margin, 60.0);
    assert_eq!(config.search.strategy, SolverMode::Backtracking);
    assert_eq!(config.search.max_depth, 2);
    assert_eq!(config.puzzle.difficulty, Difficulty::Easy);
}

#[test]
fn test_defaults_match_reference_board() {
    let config = UntangleConfig::default();
    assert_eq!(config.board.width, 1024.0);
    assert_eq!(config.board.height, 768.0);
    assert_eq!(config.board.margin, 60.0);
    assert_eq!(config.board.grid_spacing, 80.0);
    assert_eq!(config.search.neighbor_radius, 40.0);
    assert_eq!(config.search.neighbor_samples, 8);
    assert_eq!(config.search.base_case_threshold, 3);
    assert!(config.validate().is_ok());
}

#[test]
fn test_builder() {
    let config = UntangleConfig::new()
        .with_strategy(SolverMode::Backtracking)
        .with_board_size(400.0, 300.0)
        .with_grid_spacing(50.0)
        .with_random_seed(7)
        .with_puzzle(6, Difficulty::Easy)
        .with_max_moves(20);

    let engine = config.engine();
    assert_eq!(engine.search.strategy, SolverMode::Backtracking);
    assert_eq!(engine.board.width, 400.0);
    assert_eq!(engine.board.grid_spacing, 50.0);
    assert_eq!(config.puzzle.random_seed, Some(7));
    assert_eq!(config.puzzle.node_count, 6);
    assert_eq!(config.session.max_moves, 20);
}

#[test]
fn test_validate_rejects_bad_boards() {
    let zero_spacing = UntangleConfig::new().with_grid_spacing(0.0);
    assert!(matches!(zero_spacing.validate(), Err(ConfigError::Invalid(_))));

    let no_room = UntangleConfig::new().with_board_size(100.0, 100.0);
    assert!(matches!(no_room.validate(), Err(ConfigError::Invalid(_))));

    let tiny_spacing = UntangleConfig::new().with_grid_spacing(1e-6);
    assert!(matches!(tiny_spacing.validate(), Err(ConfigError::Invalid(_))));

    let mut tiny_dp_step = UntangleConfig::new();
    tiny_dp_step.search.dp_min_step = 1e-6;
    assert!(tiny_dp_step.validate().is_err());

    let nan_spacing = UntangleConfig::new().with_grid_spacing(f32::NAN);
    assert!(nan_spacing.validate().is_err());

    let mut no_depth = UntangleConfig::new();
    no_depth.search.max_depth = 0;
    assert!(no_depth.validate().is_err());
}

#[test]
fn test_strategy_from_str() {
    assert_eq!("greedy".parse::<SolverMode>().unwrap(), SolverMode::Greedy);
    assert_eq!(
        "divide-and-conquer-dp".parse::<SolverMode>().unwrap(),
        SolverMode::DivideAndConquerDp
    );
    assert_eq!("Backtracking".parse::<SolverMode>().unwrap(), SolverMode::Backtracking);
    assert!("annealing".parse::<SolverMode>().is_err());
    assert_eq!(SolverMode::DivideAndConquerDp.to_string(), "divide_and_conquer_dp");
}

#[test]
fn test_from_file_picks_format_by_extension() {
    let mut yaml = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(yaml, "search:\n  strategy: greedy\n  max_depth: 5").unwrap();
    let config = UntangleConfig::from_file(yaml.path()).unwrap();
    assert_eq!(config.search.max_depth, 5);

    let mut toml = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(toml, "[session]\nmax_moves = 9").unwrap();
    let config = UntangleConfig::from_file(toml.path()).unwrap();
    assert_eq!(config.session.max_moves, 9);
}

#[test]
fn test_missing_file_is_io_error() {
    let err = UntangleConfig::load("/definitely/not/here/untangle.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}
