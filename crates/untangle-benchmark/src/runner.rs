//! Benchmark runner.

use std::time::Instant;

use tracing::info;
use untangle_config::{SolverMode, UntangleConfig};
use untangle_core::{Graph, Result, UntangleError};
use untangle_solver::{create_solver, solver_name, MatchSession, PuzzleGenerator, SessionSummary};

use crate::config::BenchmarkConfig;
use crate::report::{CsvExporter, MarkdownReport};
use crate::result::{BenchmarkResult, BenchmarkRun};

/// Runs every configured strategy through a match session on the same
/// seeded puzzles.
///
/// Board, search tuning and `max_moves` come from the base
/// [`UntangleConfig`]; the puzzle family and seeds come from the
/// [`BenchmarkConfig`].
///
/// # Example
///
/// ```
/// use untangle_benchmark::{Benchmark, BenchmarkConfig};
/// use untangle_config::{SolverMode, UntangleConfig};
///
/// let config = BenchmarkConfig::new("Smoke")
///     .with_strategies(vec![SolverMode::Greedy])
///     .with_warmup_count(0)
///     .with_puzzle_count(2)
///     .with_node_count(6);
///
/// let results = Benchmark::new(config, UntangleConfig::default().with_max_moves(20))
///     .run()
///     .unwrap();
///
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].solver_name, "Greedy");
/// assert_eq!(results[0].run_count(), 2);
/// ```
pub struct Benchmark {
    config: BenchmarkConfig,
    base: UntangleConfig,
}

impl Benchmark {
    pub fn new(config: BenchmarkConfig, base: UntangleConfig) -> Self {
        Self { config, base }
    }

    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    /// Generates the puzzles once, then measures each strategy on all of them.
    ///
    /// # Errors
    ///
    /// Returns [`UntangleError::Config`] if the base configuration is
    /// invalid, or any error raised by a session.
    pub fn run(&self) -> Result<Vec<BenchmarkResult>> {
        self.base
            .validate()
            .map_err(|e| UntangleError::Config(e.to_string()))?;

        let start = Instant::now();
        let puzzles = self.puzzles();
        let problem_name = format!("{}/{}", self.config.difficulty(), self.config.node_count());

        info!(
            event = "bench_start",
            puzzle = puzzles.len(),
            nodes = self.config.node_count(),
        );

        let mut results = Vec::with_capacity(self.config.strategies().len());
        let mut runs = 0usize;

        for &mode in self.config.strategies() {
            let strategy = solver_name(mode);

            if let Some((_, graph)) = puzzles.first() {
                for _ in 0..self.config.warmup_count() {
                    self.session(mode, graph.clone())?;
                }
            }

            let mut result = BenchmarkResult::new(self.config.name(), strategy, &problem_name);
            for (index, (seed, graph)) in puzzles.iter().enumerate() {
                let summary = self.session(mode, graph.clone())?;
                let run = BenchmarkRun::from_summary(index, *seed, &summary);

                info!(
                    event = "bench_run",
                    strategy = strategy,
                    puzzle = index,
                    status = %run.status,
                    initial = run.initial_intersections,
                    remaining = run.final_intersections,
                    moves = run.moves,
                    duration_ms = run.solve_time.as_millis() as u64,
                );
                result.add_run(run);
                runs += 1;
            }
            results.push(result);
        }

        info!(
            event = "bench_end",
            runs = runs,
            duration_ms = start.elapsed().as_millis() as u64,
        );

        Ok(results)
    }

    /// Runs and writes the configured CSV and Markdown outputs.
    pub fn run_and_export(&self) -> Result<Vec<BenchmarkResult>> {
        let results = self.run()?;
        self.export(&results)?;
        Ok(results)
    }

    /// Writes the configured outputs; does nothing when no path is set.
    pub fn export(&self, results: &[BenchmarkResult]) -> Result<()> {
        if let Some(path) = self.config.csv_output_path() {
            CsvExporter::to_file(results, path)?;
        }
        if let Some(path) = self.config.markdown_output_path() {
            MarkdownReport::to_file(results, path)?;
        }
        Ok(())
    }

    /// `(seed, graph)` for each puzzle.
    fn puzzles(&self) -> Vec<(u64, Graph)> {
        (0..self.config.puzzle_count())
            .map(|i| {
                let seed = self.config.base_seed().wrapping_add(i as u64);
                let mut generator = PuzzleGenerator::new(self.base.board, Some(seed));
                let puzzle = generator.generate(self.config.difficulty(), self.config.node_count());
                (seed, puzzle.graph)
            })
            .collect()
    }

    fn session(&self, mode: SolverMode, graph: Graph) -> Result<SessionSummary> {
        let mut session = MatchSession::with_solver(
            graph,
            create_solver(mode),
            self.base.engine(),
            self.base.session.max_moves,
        );
        session.run()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use untangle_config::Difficulty;
    use untangle_test::small_config;

    fn quick(strategies: Vec<SolverMode>) -> BenchmarkConfig {
        BenchmarkConfig::new("Quick")
            .with_strategies(strategies)
            .with_warmup_count(0)
            .with_puzzle_count(2)
            .with_node_count(5)
            .with_difficulty(Difficulty::Easy)
    }

    #[test]
    fn test_one_result_per_strategy() {
        let bench = Benchmark::new(quick(SolverMode::ALL.to_vec()), small_config().with_max_moves(10));
        let results = bench.run().unwrap();

        let names: Vec<&str> = results.iter().map(|r| r.solver_name.as_str()).collect();
        assert_eq!(names, ["Greedy", "D&C + DP", "Backtracking"]);
        for result in &results {
            assert_eq!(result.problem_name, "easy/5");
            assert_eq!(result.run_count(), 2);
            for run in &result.runs {
                assert!(run.final_intersections <= run.initial_intersections);
                assert!(run.moves <= 10);
            }
        }
    }

    #[test]
    fn test_strategies_face_same_puzzles() {
        let bench = Benchmark::new(
            quick(vec![SolverMode::Greedy, SolverMode::Backtracking]),
            small_config(),
        );
        let results = bench.run().unwrap();

        let initial = |r: &BenchmarkResult| -> Vec<(u64, usize)> {
            r.runs.iter().map(|run| (run.seed, run.initial_intersections)).collect()
        };
        assert_eq!(initial(&results[0]), initial(&results[1]));
        assert_eq!(results[0].runs[1].seed, 43);
    }

    #[test]
    fn test_invalid_base_config() {
        let bench = Benchmark::new(quick(vec![SolverMode::Greedy]), small_config().with_grid_spacing(-1.0));
        assert!(matches!(bench.run(), Err(UntangleError::Config(_))));
    }

    #[test]
    fn test_export_writes_configured_paths() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("out.csv");
        let md = dir.path().join("out.md");
        let config = quick(vec![SolverMode::Greedy])
            .with_csv_output(csv.to_string_lossy())
            .with_markdown_output(md.to_string_lossy());

        let results = Benchmark::new(config, small_config()).run_and_export().unwrap();

        assert_eq!(results.len(), 1);
        let csv_text = std::fs::read_to_string(&csv).unwrap();
        assert_eq!(csv_text.lines().count(), 3);
        assert!(std::fs::read_to_string(&md).unwrap().contains("| Greedy | easy/5 |"));
    }
}
