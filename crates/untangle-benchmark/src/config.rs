//! Benchmark configuration.

use untangle_config::{Difficulty, SolverMode};

/// Configuration for a benchmark.
///
/// Controls which strategies run, how many puzzles they face and where
/// reports are written.
///
/// # Example
///
/// ```
/// use untangle_benchmark::BenchmarkConfig;
/// use untangle_config::Difficulty;
///
/// let config = BenchmarkConfig::new("Hard boards")
///     .with_difficulty(Difficulty::Hard)
///     .with_node_count(30)
///     .with_base_seed(7);
///
/// assert_eq!(config.difficulty(), Difficulty::Hard);
/// assert_eq!(config.node_count(), 30);
/// assert_eq!(config.base_seed(), 7);
/// ```
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    name: String,
    strategies: Vec<SolverMode>,
    warmup_count: usize,
    puzzle_count: usize,
    node_count: usize,
    difficulty: Difficulty,
    base_seed: u64,
    csv_output_path: Option<String>,
    markdown_output_path: Option<String>,
}

impl BenchmarkConfig {
    /// Creates a benchmark configuration with the given name.
    ///
    /// Defaults:
    /// - strategies: all three
    /// - warmup_count: 1
    /// - puzzle_count: 3
    /// - node_count: 10, medium difficulty
    /// - base_seed: 42
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            strategies: SolverMode::ALL.to_vec(),
            warmup_count: 1,
            puzzle_count: 3,
            node_count: 10,
            difficulty: Difficulty::Medium,
            base_seed: 42,
            csv_output_path: None,
            markdown_output_path: None,
        }
    }

    pub fn with_strategies(mut self, strategies: Vec<SolverMode>) -> Self {
        self.strategies = strategies;
        self
    }

    /// Sets the number of unmeasured sessions run before measurement.
    pub fn with_warmup_count(mut self, count: usize) -> Self {
        self.warmup_count = count;
        self
    }

    /// Sets how many puzzles every strategy is measured on.
    pub fn with_puzzle_count(mut self, count: usize) -> Self {
        self.puzzle_count = count;
        self
    }

    pub fn with_node_count(mut self, count: usize) -> Self {
        self.node_count = count;
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Puzzle `i` is generated from seed `base_seed + i`.
    pub fn with_base_seed(mut self, seed: u64) -> Self {
        self.base_seed = seed;
        self
    }

    pub fn with_csv_output(mut self, path: impl Into<String>) -> Self {
        self.csv_output_path = Some(path.into());
        self
    }

    pub fn with_markdown_output(mut self, path: impl Into<String>) -> Self {
        self.markdown_output_path = Some(path.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn strategies(&self) -> &[SolverMode] {
        &self.strategies
    }

    pub fn warmup_count(&self) -> usize {
        self.warmup_count
    }

    pub fn puzzle_count(&self) -> usize {
        self.puzzle_count
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn base_seed(&self) -> u64 {
        self.base_seed
    }

    /// Returns the CSV output path, if set.
    pub fn csv_output_path(&self) -> Option<&str> {
        self.csv_output_path.as_deref()
    }

    /// Returns the Markdown output path, if set.
    pub fn markdown_output_path(&self) -> Option<&str> {
        self.markdown_output_path.as_deref()
    }
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self::new("Benchmark")
    }
}
