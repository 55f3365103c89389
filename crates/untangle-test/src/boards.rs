//! Engine configurations for tests.
//!
//! The default 1024x768 board yields 108 grid candidates per node, which
//! makes depth-bounded searches slow in debug builds. Tests use a 300x300
//! board with a 3x3 grid instead.

use untangle_config::{BoardConfig, EngineConfig, SearchConfig, UntangleConfig};

/// 300x300 board, margin 50, grid spacing 100: grid points at 50, 150, 250.
pub fn small_board() -> EngineConfig {
    EngineConfig::new(
        BoardConfig {
            width: 300.0,
            height: 300.0,
            margin: 50.0,
            grid_spacing: 100.0,
            node_radius: 15.0,
        },
        SearchConfig::default(),
    )
}

/// Full configuration wrapping [`small_board`].
pub fn small_config() -> UntangleConfig {
    let engine = small_board();
    let mut config = UntangleConfig::default();
    config.board = engine.board;
    config.search = engine.search;
    config
}

/// The reference 1024x768 board.
pub fn default_engine() -> EngineConfig {
    EngineConfig::default()
}
