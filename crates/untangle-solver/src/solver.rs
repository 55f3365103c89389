//! The capability set shared by every search strategy, and the factory that
//! builds one from a [`SolverMode`].

use untangle_config::{EngineConfig, SolverMode};
use untangle_core::{validate_graph, CpuMove, Edge, Node, Result, UntangleError};

use crate::backtracking::BacktrackingSolver;
use crate::dncdp::DncDpSolver;
use crate::greedy::GreedySolver;

/// A move-search strategy.
///
/// `find_best_move` takes a private copy of the nodes, which the solver may
/// mutate freely while evaluating candidates, and a read-only edge list.
/// Calls on one instance must be serialized: the evaluated-candidate counter
/// is instance state and is reset at the start of every call.
pub trait CpuSolver: Send {
    /// Searches for one move.
    ///
    /// Returns `CpuMove::none` when no move is found; that is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`UntangleError::InvalidGraph`] if the nodes or edges break
    /// the dense-id contract, and [`UntangleError::Config`] if `config`
    /// fails [`EngineConfig::validate`].
    fn find_best_move(
        &mut self,
        nodes: Vec<Node>,
        edges: &[Edge],
        config: &EngineConfig,
    ) -> Result<CpuMove>;

    /// Display name of the strategy.
    fn name(&self) -> &'static str;

    /// Candidates evaluated by the most recent `find_best_move`.
    fn last_candidates_evaluated(&self) -> usize;
}

impl<S: CpuSolver + ?Sized> CpuSolver for Box<S> {
    fn find_best_move(
        &mut self,
        nodes: Vec<Node>,
        edges: &[Edge],
        config: &EngineConfig,
    ) -> Result<CpuMove> {
        (**self).find_best_move(nodes, edges, config)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn last_candidates_evaluated(&self) -> usize {
        (**self).last_candidates_evaluated()
    }
}

/// Builds the solver for a strategy.
///
/// # Example
///
/// ```
/// use untangle_config::SolverMode;
/// use untangle_solver::create_solver;
///
/// let solver = create_solver(SolverMode::DivideAndConquerDp);
/// assert_eq!(solver.name(), "D&C + DP");
/// assert_eq!(solver.last_candidates_evaluated(), 0);
/// ```
pub fn create_solver(mode: SolverMode) -> Box<dyn CpuSolver> {
    match mode {
        SolverMode::Greedy => Box::new(GreedySolver::new()),
        SolverMode::DivideAndConquerDp => Box::new(DncDpSolver::new()),
        SolverMode::Backtracking => Box::new(BacktrackingSolver::new()),
    }
}

/// Display name for a strategy without building it.
pub fn solver_name(mode: SolverMode) -> &'static str {
    match mode {
        SolverMode::Greedy => GreedySolver::NAME,
        SolverMode::DivideAndConquerDp => DncDpSolver::NAME,
        SolverMode::Backtracking => BacktrackingSolver::NAME,
    }
}

/// Checks the graph contract and the engine configuration before a search.
pub(crate) fn check_inputs(nodes: &[Node], edges: &[Edge], config: &EngineConfig) -> Result<()> {
    validate_graph(nodes, edges)?;
    config
        .validate()
        .map_err(|e| UntangleError::Config(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_strategy_rejects_bad_config() {
        let graph = untangle_test::crossing_pair();
        let mut config = untangle_test::small_board();
        config.board.grid_spacing = 1e-6;
        for mode in SolverMode::ALL {
            let err = create_solver(mode)
                .find_best_move(graph.nodes().to_vec(), graph.edges(), &config)
                .unwrap_err();
            assert!(matches!(err, UntangleError::Config(_)), "{mode}");
        }
    }

    #[test]
    fn test_factory_names() {
        assert_eq!(create_solver(SolverMode::Greedy).name(), "Greedy");
        assert_eq!(create_solver(SolverMode::DivideAndConquerDp).name(), "D&C + DP");
        assert_eq!(create_solver(SolverMode::Backtracking).name(), "Backtracking");
        for mode in SolverMode::ALL {
            assert_eq!(create_solver(mode).name(), solver_name(mode));
        }
    }
}
