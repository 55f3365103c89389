//! Benchmark result types.

use std::time::Duration;

use untangle_solver::{SessionStatus, SessionSummary};

/// Result of one strategy on one puzzle.
#[derive(Debug, Clone)]
pub struct BenchmarkRun {
    /// Puzzle index (0-based).
    pub run_index: usize,
    /// Seed the puzzle was generated from.
    pub seed: u64,
    /// How the session ended.
    pub status: SessionStatus,
    pub initial_intersections: usize,
    pub final_intersections: usize,
    /// Moves applied.
    pub moves: usize,
    /// Candidates evaluated across all searches.
    pub candidates_evaluated: u64,
    /// Wall-clock session time.
    pub solve_time: Duration,
}

impl BenchmarkRun {
    /// Builds a run from a finished session.
    ///
    /// # Example
    ///
    /// ```
    /// use untangle_benchmark::BenchmarkRun;
    /// use untangle_config::UntangleConfig;
    /// use untangle_core::{Graph, Point};
    /// use untangle_solver::MatchSession;
    ///
    /// let mut graph = Graph::new();
    /// for (x, y) in [(100.0, 100.0), (300.0, 300.0), (100.0, 300.0), (300.0, 100.0)] {
    ///     graph.add_node(Point::new(x, y));
    /// }
    /// graph.add_edge(0, 1).unwrap();
    /// graph.add_edge(2, 3).unwrap();
    ///
    /// let summary = MatchSession::new(graph, &UntangleConfig::default())
    ///     .unwrap()
    ///     .run()
    ///     .unwrap();
    /// let run = BenchmarkRun::from_summary(0, 42, &summary);
    /// assert!(run.is_solved());
    /// assert_eq!(run.crossings_removed(), 1);
    /// ```
    pub fn from_summary(run_index: usize, seed: u64, summary: &SessionSummary) -> Self {
        Self {
            run_index,
            seed,
            status: summary.status,
            initial_intersections: summary.initial_intersections,
            final_intersections: summary.final_intersections,
            moves: summary.moves,
            candidates_evaluated: summary.stats.candidates_evaluated,
            solve_time: summary.elapsed,
        }
    }

    pub fn is_solved(&self) -> bool {
        self.final_intersections == 0
    }

    pub fn crossings_removed(&self) -> usize {
        self.initial_intersections
            .saturating_sub(self.final_intersections)
    }

    /// Candidates evaluated per second of wall-clock time.
    pub fn candidates_per_second(&self) -> f64 {
        if self.solve_time.is_zero() {
            0.0
        } else {
            self.candidates_evaluated as f64 / self.solve_time.as_secs_f64()
        }
    }
}

/// All runs of one strategy.
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    /// Benchmark name.
    pub name: String,
    /// Strategy display name.
    pub solver_name: String,
    /// Puzzle family, e.g. `"medium/10"`.
    pub problem_name: String,
    pub runs: Vec<BenchmarkRun>,
}

impl BenchmarkResult {
    pub fn new(
        name: impl Into<String>,
        solver_name: impl Into<String>,
        problem_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            solver_name: solver_name.into(),
            problem_name: problem_name.into(),
            runs: Vec::new(),
        }
    }

    pub fn add_run(&mut self, run: BenchmarkRun) {
        self.runs.push(run);
    }

    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    pub fn solved_count(&self) -> usize {
        self.runs.iter().filter(|r| r.is_solved()).count()
    }

    /// Fraction of puzzles solved, 0.0 with no runs.
    pub fn solve_rate(&self) -> f64 {
        if self.runs.is_empty() {
            0.0
        } else {
            self.solved_count() as f64 / self.runs.len() as f64
        }
    }

    /// Fewest crossings left on any puzzle.
    pub fn best_final_intersections(&self) -> Option<usize> {
        self.runs.iter().map(|r| r.final_intersections).min()
    }

    pub fn worst_final_intersections(&self) -> Option<usize> {
        self.runs.iter().map(|r| r.final_intersections).max()
    }

    pub fn avg_final_intersections(&self) -> f64 {
        self.average(|r| r.final_intersections as f64)
    }

    pub fn avg_moves(&self) -> f64 {
        self.average(|r| r.moves as f64)
    }

    pub fn avg_candidates_per_second(&self) -> f64 {
        self.average(BenchmarkRun::candidates_per_second)
    }

    /// Returns the average solve time.
    ///
    /// # Example
    ///
    /// ```
    /// use untangle_benchmark::{BenchmarkResult, BenchmarkRun};
    /// use untangle_solver::SessionStatus;
    /// use std::time::Duration;
    ///
    /// let run = |i: usize, ms: u64| BenchmarkRun {
    ///     run_index: i,
    ///     seed: i as u64,
    ///     status: SessionStatus::Solved,
    ///     initial_intersections: 4,
    ///     final_intersections: 0,
    ///     moves: 3,
    ///     candidates_evaluated: 300,
    ///     solve_time: Duration::from_millis(ms),
    /// };
    ///
    /// let mut result = BenchmarkResult::new("Test", "Greedy", "medium/10");
    /// result.add_run(run(0, 100));
    /// result.add_run(run(1, 200));
    ///
    /// assert_eq!(result.avg_solve_time(), Duration::from_millis(150));
    /// assert_eq!(result.solved_count(), 2);
    /// ```
    pub fn avg_solve_time(&self) -> Duration {
        if self.runs.is_empty() {
            return Duration::ZERO;
        }
        let total: Duration = self.runs.iter().map(|r| r.solve_time).sum();
        total / self.runs.len() as u32
    }

    pub fn min_solve_time(&self) -> Duration {
        self.runs
            .iter()
            .map(|r| r.solve_time)
            .min()
            .unwrap_or(Duration::ZERO)
    }

    pub fn max_solve_time(&self) -> Duration {
        self.runs
            .iter()
            .map(|r| r.solve_time)
            .max()
            .unwrap_or(Duration::ZERO)
    }

    fn average(&self, f: impl Fn(&BenchmarkRun) -> f64) -> f64 {
        if self.runs.is_empty() {
            return 0.0;
        }
        self.runs.iter().map(f).sum::<f64>() / self.runs.len() as f64
    }
}
