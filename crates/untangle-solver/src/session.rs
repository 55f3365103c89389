//! A CPU player's match: repeated searches against its own copy of the graph.

use std::fmt;
use std::time::Duration;

use tracing::{debug, info, warn};
use untangle_config::{EngineConfig, UntangleConfig};
use untangle_core::{CpuMove, Graph, Result, UntangleError};

use crate::replay::ReplayLogger;
use crate::solver::{create_solver, CpuSolver};
use crate::stats::SearchStats;

/// Where a session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Running,
    /// No crossings remain.
    Solved,
    /// The solver found no improving or neutral move.
    Stuck,
    /// `max_moves` moves were applied without solving.
    MoveLimit,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionStatus::Running => write!(f, "running"),
            SessionStatus::Solved => write!(f, "solved"),
            SessionStatus::Stuck => write!(f, "stuck"),
            SessionStatus::MoveLimit => write!(f, "move_limit"),
        }
    }
}

/// Result of a finished (or interrupted) session.
#[derive(Debug, Clone)]
pub struct SessionSummary {
    pub strategy: &'static str,
    pub status: SessionStatus,
    pub initial_intersections: usize,
    pub final_intersections: usize,
    pub moves: usize,
    pub stats: SearchStats,
    pub elapsed: Duration,
}

/// Drives one solver until the graph is solved, the solver is stuck, or the
/// move limit is reached. Every applied move is recorded in a replay.
///
/// # Example
///
/// ```
/// use untangle_config::UntangleConfig;
/// use untangle_core::{Graph, Point};
/// use untangle_solver::{MatchSession, SessionStatus};
///
/// let mut graph = Graph::new();
/// for (x, y) in [(100.0, 100.0), (300.0, 300.0), (100.0, 300.0), (300.0, 100.0)] {
///     graph.add_node(Point::new(x, y));
/// }
/// graph.add_edge(0, 1).unwrap();
/// graph.add_edge(2, 3).unwrap();
///
/// let mut session = MatchSession::new(graph, &UntangleConfig::default()).unwrap();
/// let summary = session.run().unwrap();
///
/// assert_eq!(summary.status, SessionStatus::Solved);
/// assert_eq!(summary.moves, 1);
/// assert!(session.replay().is_solved());
/// ```
pub struct MatchSession {
    graph: Graph,
    solver: Box<dyn CpuSolver>,
    engine: EngineConfig,
    max_moves: usize,
    replay: ReplayLogger,
    stats: SearchStats,
    status: SessionStatus,
}

impl MatchSession {
    /// Builds the configured strategy and starts the replay.
    ///
    /// # Errors
    ///
    /// Returns [`UntangleError::Config`] if the configuration is invalid.
    pub fn new(graph: Graph, config: &UntangleConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| UntangleError::Config(e.to_string()))?;
        Ok(Self::with_solver(
            graph,
            create_solver(config.search.strategy),
            config.engine(),
            config.session.max_moves,
        ))
    }

    pub fn with_solver(
        graph: Graph,
        solver: Box<dyn CpuSolver>,
        engine: EngineConfig,
        max_moves: usize,
    ) -> Self {
        let mut replay = ReplayLogger::new();
        replay.start_match(graph.nodes(), graph.edges());
        let mut stats = SearchStats::default();
        stats.start();

        let status = if graph.intersection_count() == 0 {
            SessionStatus::Solved
        } else {
            SessionStatus::Running
        };

        Self {
            graph,
            solver,
            engine,
            max_moves,
            replay,
            stats,
            status,
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn replay(&self) -> &ReplayLogger {
        &self.replay
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn strategy(&self) -> &'static str {
        self.solver.name()
    }

    /// Runs one search and applies its move.
    ///
    /// Returns the solver's move; once the session has finished, returns
    /// `CpuMove::none` without searching.
    pub fn step(&mut self) -> Result<CpuMove> {
        let before = self.graph.intersection_count();
        if self.status != SessionStatus::Running {
            return Ok(CpuMove::none(before));
        }
        if self.replay.total_moves() >= self.max_moves {
            self.status = SessionStatus::MoveLimit;
            return Ok(CpuMove::none(before));
        }

        let strategy = self.solver.name();
        info!(
            event = "search_start",
            strategy = strategy,
            step = self.replay.total_moves() + 1,
            intersections = before,
        );

        let mv = self
            .solver
            .find_best_move(self.graph.nodes().to_vec(), self.graph.edges(), &self.engine)?;
        let candidates = self.solver.last_candidates_evaluated();
        self.stats.record_search(candidates, &mv);

        info!(
            event = "search_end",
            strategy = strategy,
            node_id = mv.wire_node_id(),
            reduction = mv.intersection_reduction,
            candidates = candidates,
            duration_ms = mv.computation_time_ms,
        );

        if !mv.is_valid() {
            warn!(event = "stuck", strategy = strategy, intersections = before);
            self.status = SessionStatus::Stuck;
            return Ok(mv);
        }

        self.graph.apply_move(&mv)?;
        self.replay.record_move(mv);
        debug!(
            event = "move_applied",
            node_id = mv.wire_node_id(),
            x = mv.to_position.x as f64,
            y = mv.to_position.y as f64,
            intersections = mv.intersections_after,
        );

        if mv.intersections_after == 0 {
            self.status = SessionStatus::Solved;
        } else if self.replay.total_moves() >= self.max_moves {
            self.status = SessionStatus::MoveLimit;
        }
        Ok(mv)
    }

    /// Steps until the session finishes.
    pub fn run(&mut self) -> Result<SessionSummary> {
        while self.status == SessionStatus::Running {
            self.step()?;
        }
        let summary = self.summary();
        info!(
            event = "session_end",
            strategy = summary.strategy,
            status = %summary.status,
            moves = summary.moves,
            initial = summary.initial_intersections,
            remaining = summary.final_intersections,
            duration_ms = summary.elapsed.as_millis() as u64,
        );
        Ok(summary)
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            strategy: self.solver.name(),
            status: self.status,
            initial_intersections: self.replay.initial_intersections(),
            final_intersections: self.graph.intersection_count(),
            moves: self.replay.total_moves(),
            stats: self.stats.clone(),
            elapsed: self.stats.elapsed(),
        }
    }

    pub fn into_parts(self) -> (Graph, ReplayLogger) {
        (self.graph, self.replay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use untangle_config::SolverMode;
    use untangle_test::{crossing_pair, pentagram, planar_path, small_board, small_config};

    #[test]
    fn test_already_solved_session() {
        let mut session = MatchSession::new(planar_path(), &small_config()).unwrap();
        assert_eq!(session.status(), SessionStatus::Solved);

        let summary = session.run().unwrap();
        assert_eq!(summary.moves, 0);
        assert_eq!(summary.stats.searches, 0);
        assert!(session.replay().is_solved());
    }

    #[test]
    fn test_each_strategy_solves_pentagram() {
        for mode in SolverMode::ALL {
            let config = small_config().with_strategy(mode).with_max_moves(50);
            let mut session = MatchSession::new(pentagram(), &config).unwrap();
            let summary = session.run().unwrap();

            assert_ne!(summary.status, SessionStatus::Running);
            assert_eq!(summary.initial_intersections, 5);
            assert!(summary.final_intersections < 5, "{mode}: {summary:?}");
            assert_eq!(summary.moves, session.replay().total_moves());
            assert_eq!(
                session.replay().final_intersections(),
                summary.final_intersections
            );
        }
    }

    #[test]
    fn test_step_records_and_applies() {
        let mut session = MatchSession::with_solver(
            crossing_pair(),
            create_solver(SolverMode::Greedy),
            small_board(),
            10,
        );
        let mv = session.step().unwrap();

        assert!(mv.is_improving());
        assert_eq!(session.status(), SessionStatus::Solved);
        assert_eq!(session.replay().move_at(1), Some(&mv));
        assert_eq!(
            session.graph().position(mv.node_id.unwrap()),
            Some(mv.to_position)
        );

        // Finished sessions do not search again.
        let again = session.step().unwrap();
        assert!(!again.is_valid());
        assert_eq!(session.stats().searches, 1);
    }

    #[test]
    fn test_move_limit() {
        let mut session = MatchSession::with_solver(
            pentagram(),
            create_solver(SolverMode::Greedy),
            small_board(),
            1,
        );
        let summary = session.run().unwrap();
        if summary.status != SessionStatus::Solved {
            assert_eq!(summary.status, SessionStatus::MoveLimit);
        }
        assert_eq!(summary.moves, 1);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = small_config().with_grid_spacing(0.0);
        let err = MatchSession::new(crossing_pair(), &config).err().unwrap();
        assert!(matches!(err, UntangleError::Config(_)));
    }
}
