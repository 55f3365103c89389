//! Configuration system for Untangle.
//!
//! Load engine configuration from TOML or YAML files to control the board
//! bounds, candidate sampling, search depth and puzzle generation without
//! code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use untangle_config::{SolverMode, UntangleConfig};
//!
//! let config = UntangleConfig::from_toml_str(r#"
//!     [board]
//!     width = 800
//!     height = 600
//!     grid_spacing = 40
//!
//!     [search]
//!     strategy = "backtracking"
//!     max_depth = 2
//! "#).unwrap();
//!
//! assert_eq!(config.board.width, 800.0);
//! assert_eq!(config.board.margin, 60.0);
//! assert_eq!(config.search.strategy, SolverMode::Backtracking);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use untangle_config::UntangleConfig;
//!
//! let config = UntangleConfig::load("untangle.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(test)]
mod tests;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct UntangleConfig {
    /// Playable area and grid sampling.
    #[serde(default)]
    pub board: BoardConfig,

    /// Strategy selection and search tuning.
    #[serde(default)]
    pub search: SearchConfig,

    /// Puzzle generation.
    #[serde(default)]
    pub puzzle: PuzzleConfig,

    /// Match session limits.
    #[serde(default)]
    pub session: SessionConfig,
}

impl UntangleConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a file, picking YAML for `.yaml`/`.yml`
    /// extensions and TOML otherwise.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the search strategy.
    pub fn with_strategy(mut self, strategy: SolverMode) -> Self {
        self.search.strategy = strategy;
        self
    }

    /// Sets the board dimensions.
    pub fn with_board_size(mut self, width: f32, height: f32) -> Self {
        self.board.width = width;
        self.board.height = height;
        self
    }

    /// Sets the grid spacing used for candidate sampling.
    pub fn with_grid_spacing(mut self, spacing: f32) -> Self {
        self.board.grid_spacing = spacing;
        self
    }

    /// Sets the random seed for puzzle generation.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.puzzle.random_seed = Some(seed);
        self
    }

    /// Sets the puzzle node count and difficulty.
    pub fn with_puzzle(mut self, node_count: usize, difficulty: Difficulty) -> Self {
        self.puzzle.node_count = node_count;
        self.puzzle.difficulty = difficulty;
        self
    }

    /// Sets the maximum number of moves in a match session.
    pub fn with_max_moves(mut self, max_moves: usize) -> Self {
        self.session.max_moves = max_moves;
        self
    }

    /// Returns the value passed into every solver call.
    pub fn engine(&self) -> EngineConfig {
        EngineConfig {
            board: self.board,
            search: self.search,
        }
    }

    /// Checks that the configuration describes a usable board and search.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine().validate()
    }
}

/// Board bounds and grid sampling.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct BoardConfig {
    /// Board width in pixels.
    pub width: f32,

    /// Board height in pixels.
    pub height: f32,

    /// Border kept free on every side.
    pub margin: f32,

    /// Distance between grid candidate samples.
    pub grid_spacing: f32,

    /// Hit radius assigned to generated nodes.
    pub node_radius: f32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: 1024.0,
            height: 768.0,
            margin: 60.0,
            grid_spacing: 80.0,
            node_radius: 15.0,
        }
    }
}

impl BoardConfig {
    pub fn min_x(&self) -> f32 {
        self.margin
    }

    pub fn max_x(&self) -> f32 {
        self.width - self.margin
    }

    pub fn min_y(&self) -> f32 {
        self.margin
    }

    pub fn max_y(&self) -> f32 {
        self.height - self.margin
    }

    pub fn center(&self) -> (f32, f32) {
        (self.width / 2.0, self.height / 2.0)
    }
}

/// Search strategy selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverMode {
    /// Single-level exhaustive search over every node and candidate.
    #[default]
    Greedy,

    /// Spatial split plus per-partition dynamic program.
    DivideAndConquerDp,

    /// Depth-bounded depth-first search over improving moves.
    Backtracking,
}

impl SolverMode {
    pub const ALL: [SolverMode; 3] = [
        SolverMode::Greedy,
        SolverMode::DivideAndConquerDp,
        SolverMode::Backtracking,
    ];
}

impl fmt::Display for SolverMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverMode::Greedy => write!(f, "greedy"),
            SolverMode::DivideAndConquerDp => write!(f, "divide_and_conquer_dp"),
            SolverMode::Backtracking => write!(f, "backtracking"),
        }
    }
}

impl std::str::FromStr for SolverMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "greedy" => Ok(SolverMode::Greedy),
            "divide_and_conquer_dp" | "dnc" | "dncdp" | "dp" => Ok(SolverMode::DivideAndConquerDp),
            "backtracking" => Ok(SolverMode::Backtracking),
            other => Err(ConfigError::Invalid(format!("unknown strategy: {other}"))),
        }
    }
}

/// Search tuning shared by all strategies.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SearchConfig {
    /// Strategy built by the solver factory.
    pub strategy: SolverMode,

    /// Radius of the ring sampled around each neighbor.
    pub neighbor_radius: f32,

    /// Number of evenly spaced samples on that ring.
    pub neighbor_samples: usize,

    /// Recursion limit for backtracking.
    pub max_depth: usize,

    /// Partitions at or below this size are brute-forced.
    pub base_case_threshold: usize,

    /// Lower bound on the base-case grid step.
    pub base_case_min_step: f32,

    /// Expansion of a partition's bounding box for DP candidates.
    pub dp_margin: f32,

    /// Lower bound on the DP candidate step.
    pub dp_min_step: f32,

    /// Distance from a split line within which boundary refinement applies.
    pub boundary_margin: f32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            strategy: SolverMode::Greedy,
            neighbor_radius: 40.0,
            neighbor_samples: 8,
            max_depth: 3,
            base_case_threshold: 3,
            base_case_min_step: 20.0,
            dp_margin: 50.0,
            dp_min_step: 40.0,
            boundary_margin: 100.0,
        }
    }
}

/// Puzzle difficulty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Cycle with a few non-crossing chords.
    Easy,

    /// Grid mesh with holes.
    #[default]
    Medium,

    /// Maximal planar triangulation.
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(ConfigError::Invalid(format!("unknown difficulty: {other}"))),
        }
    }
}

/// Puzzle generation configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct PuzzleConfig {
    /// Number of nodes to generate (clamped to 3..=200).
    pub node_count: usize,

    /// Graph family.
    pub difficulty: Difficulty,

    /// Random seed for reproducible puzzles.
    pub random_seed: Option<u64>,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            node_count: 10,
            difficulty: Difficulty::Medium,
            random_seed: None,
        }
    }
}

/// Match session configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SessionConfig {
    /// Maximum moves before a session gives up.
    pub max_moves: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { max_moves: 500 }
    }
}

/// Smallest accepted sampling step, in pixels.
pub const MIN_STEP: f32 = 1.0;

/// The configuration value passed into every solver call.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EngineConfig {
    pub board: BoardConfig,
    pub search: SearchConfig,
}

impl EngineConfig {
    pub fn new(board: BoardConfig, search: SearchConfig) -> Self {
        Self { board, search }
    }

    /// Checks that sampling loops terminate and the playable area is non-empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let b = &self.board;
        let s = &self.search;

        if !(b.grid_spacing >= MIN_STEP) {
            return Err(ConfigError::Invalid(format!(
                "grid_spacing must be at least {MIN_STEP}, got {}",
                b.grid_spacing
            )));
        }
        if b.margin < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "margin must not be negative, got {}",
                b.margin
            )));
        }
        if b.width <= 2.0 * b.margin || b.height <= 2.0 * b.margin {
            return Err(ConfigError::Invalid(format!(
                "board {}x{} leaves no playable area inside margin {}",
                b.width, b.height, b.margin
            )));
        }
        if s.max_depth == 0 {
            return Err(ConfigError::Invalid("max_depth must be at least 1".into()));
        }
        if s.neighbor_samples == 0 {
            return Err(ConfigError::Invalid(
                "neighbor_samples must be at least 1".into(),
            ));
        }
        if !(s.base_case_min_step >= MIN_STEP) || !(s.dp_min_step >= MIN_STEP) {
            return Err(ConfigError::Invalid(format!(
                "base_case_min_step and dp_min_step must be at least {MIN_STEP}"
            )));
        }
        Ok(())
    }
}
