//! One-call entry points that hide solver and session wiring.

use untangle_config::UntangleConfig;
use untangle_core::{CpuMove, Graph, Result, UntangleError};
use untangle_solver::{create_solver, MatchSession, Puzzle, PuzzleGenerator, ReplayLogger, SessionSummary};

/// Outcome of [`play_match`].
#[derive(Debug, Clone)]
pub struct MatchReport {
    pub summary: SessionSummary,
    /// The graph after the last applied move.
    pub graph: Graph,
    pub replay: ReplayLogger,
}

fn checked(config: &UntangleConfig) -> Result<()> {
    config
        .validate()
        .map_err(|e| UntangleError::Config(e.to_string()))
}

/// Runs one search with the configured strategy. The graph is not modified.
pub fn find_move(graph: &Graph, config: &UntangleConfig) -> Result<CpuMove> {
    checked(config)?;
    let mut solver = create_solver(config.search.strategy);
    solver.find_best_move(graph.nodes().to_vec(), graph.edges(), &config.engine())
}

/// Generates a puzzle from the `[puzzle]` section and the board.
pub fn generate_puzzle(config: &UntangleConfig) -> Puzzle {
    PuzzleGenerator::from_config(config).generate_from(config)
}

/// Plays a full match with the configured strategy.
///
/// With the `console` feature the console output is initialized first.
pub fn play_match(graph: Graph, config: &UntangleConfig) -> Result<MatchReport> {
    #[cfg(feature = "console")]
    untangle_console::init();

    let mut session = MatchSession::new(graph, config)?;
    let summary = session.run()?;
    let (graph, replay) = session.into_parts();
    Ok(MatchReport {
        summary,
        graph,
        replay,
    })
}
