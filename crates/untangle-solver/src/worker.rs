//! Background search worker.
//!
//! Runs one solver on its own thread so an interactive host stays
//! responsive. Each dispatch moves a private copy of the nodes into the
//! thread; results come back over a oneshot channel and are picked up with
//! a non-blocking [`SearchWorker::poll`]. There is no cancellation.

use std::thread;

use tokio::sync::oneshot::{self, error::TryRecvError};
use tracing::debug;
use untangle_config::{EngineConfig, SolverMode};
use untangle_core::{CpuMove, Edge, Node, Result, UntangleError};

use crate::solver::{create_solver, CpuSolver};

/// A finished search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOutcome {
    pub mv: CpuMove,
    pub candidates_evaluated: usize,
}

type Reply = (Box<dyn CpuSolver>, Result<CpuMove>);

/// Single-flight owner of one solver instance.
///
/// # Example
///
/// ```
/// use untangle_config::{EngineConfig, SolverMode};
/// use untangle_core::{Graph, Point};
/// use untangle_solver::SearchWorker;
///
/// let mut graph = Graph::new();
/// for (x, y) in [(100.0, 100.0), (300.0, 300.0), (100.0, 300.0), (300.0, 100.0)] {
///     graph.add_node(Point::new(x, y));
/// }
/// graph.add_edge(0, 1).unwrap();
/// graph.add_edge(2, 3).unwrap();
///
/// let mut worker = SearchWorker::with_mode(SolverMode::Greedy, EngineConfig::default());
/// worker.dispatch(graph.nodes().to_vec(), graph.edges().to_vec()).unwrap();
///
/// let outcome = worker.wait().unwrap().unwrap();
/// assert!(outcome.mv.is_improving());
/// assert!(!worker.is_busy());
/// ```
pub struct SearchWorker {
    solver: Option<Box<dyn CpuSolver>>,
    pending: Option<oneshot::Receiver<Reply>>,
    config: EngineConfig,
    name: &'static str,
}

impl SearchWorker {
    pub fn new(solver: Box<dyn CpuSolver>, config: EngineConfig) -> Self {
        let name = solver.name();
        Self {
            solver: Some(solver),
            pending: None,
            config,
            name,
        }
    }

    pub fn with_mode(mode: SolverMode, config: EngineConfig) -> Self {
        Self::new(create_solver(mode), config)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// True while a dispatched search has not been collected.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Starts a search on a background thread.
    ///
    /// # Errors
    ///
    /// - [`UntangleError::SolverBusy`] if a search is still outstanding
    /// - [`UntangleError::WorkerLost`] if an earlier search thread died and
    ///   took the solver with it
    /// - [`UntangleError::Io`] if the thread could not be spawned
    pub fn dispatch(&mut self, nodes: Vec<Node>, edges: Vec<Edge>) -> Result<()> {
        if self.pending.is_some() {
            return Err(UntangleError::SolverBusy);
        }
        let mut solver = self.solver.take().ok_or(UntangleError::WorkerLost)?;
        let config = self.config;
        let (tx, rx) = oneshot::channel();

        debug!(event = "dispatch", strategy = self.name, nodes = nodes.len(), edges = edges.len());
        thread::Builder::new()
            .name("untangle-search".into())
            .spawn(move || {
                let result = solver.find_best_move(nodes, &edges, &config);
                // The receiver may have been dropped with the worker.
                let _ = tx.send((solver, result));
            })?;

        self.pending = Some(rx);
        Ok(())
    }

    /// Collects a finished search without blocking.
    ///
    /// Returns `Ok(None)` when nothing is outstanding or the search is still
    /// running.
    pub fn poll(&mut self) -> Result<Option<SearchOutcome>> {
        let Some(rx) = self.pending.as_mut() else {
            return Ok(None);
        };
        match rx.try_recv() {
            Ok(reply) => {
                self.pending = None;
                self.finish(reply).map(Some)
            }
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Closed) => {
                self.pending = None;
                Err(UntangleError::WorkerLost)
            }
        }
    }

    /// Blocks until the outstanding search finishes.
    ///
    /// Must not be called from inside an async runtime.
    pub fn wait(&mut self) -> Result<Option<SearchOutcome>> {
        let Some(rx) = self.pending.take() else {
            return Ok(None);
        };
        match rx.blocking_recv() {
            Ok(reply) => self.finish(reply).map(Some),
            Err(_) => Err(UntangleError::WorkerLost),
        }
    }

    fn finish(&mut self, (solver, result): Reply) -> Result<SearchOutcome> {
        let candidates_evaluated = solver.last_candidates_evaluated();
        self.solver = Some(solver);
        let mv = result?;
        debug!(
            event = "complete",
            strategy = self.name,
            node_id = mv.wire_node_id(),
            candidates = candidates_evaluated,
        );
        Ok(SearchOutcome {
            mv,
            candidates_evaluated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use untangle_test::{crossing_pair, small_board};

    struct Panicking;

    impl CpuSolver for Panicking {
        fn find_best_move(&mut self, _: Vec<Node>, _: &[Edge], _: &EngineConfig) -> Result<CpuMove> {
            panic!("search failed");
        }
        fn name(&self) -> &'static str {
            "Panicking"
        }
        fn last_candidates_evaluated(&self) -> usize {
            0
        }
    }

    #[test]
    fn test_poll_until_done() {
        let graph = crossing_pair();
        let mut worker = SearchWorker::with_mode(SolverMode::Greedy, small_board());
        assert!(worker.poll().unwrap().is_none());

        worker.dispatch(graph.nodes().to_vec(), graph.edges().to_vec()).unwrap();
        let outcome = loop {
            if let Some(outcome) = worker.poll().unwrap() {
                break outcome;
            }
            thread::yield_now();
        };

        assert_eq!(outcome.mv.intersections_after, 0);
        assert_eq!(outcome.candidates_evaluated, 72);
        assert!(!worker.is_busy());
    }

    #[test]
    fn test_single_flight() {
        let graph = crossing_pair();
        let mut worker = SearchWorker::with_mode(SolverMode::Backtracking, small_board());
        worker.dispatch(graph.nodes().to_vec(), graph.edges().to_vec()).unwrap();

        let err = worker
            .dispatch(graph.nodes().to_vec(), graph.edges().to_vec())
            .unwrap_err();
        assert!(matches!(err, UntangleError::SolverBusy));

        worker.wait().unwrap();
        // The solver is back, so a new search may start.
        worker.dispatch(graph.nodes().to_vec(), graph.edges().to_vec()).unwrap();
        assert!(worker.wait().unwrap().is_some());
    }

    #[test]
    fn test_invalid_graph_reported_and_solver_kept() {
        let graph = crossing_pair();
        let mut worker = SearchWorker::with_mode(SolverMode::Greedy, small_board());
        worker.dispatch(graph.nodes().to_vec(), vec![Edge::new(0, 9)]).unwrap();
        assert!(matches!(worker.wait(), Err(UntangleError::InvalidGraph(_))));

        worker.dispatch(graph.nodes().to_vec(), graph.edges().to_vec()).unwrap();
        assert!(worker.wait().is_ok());
    }

    #[test]
    fn test_panicking_search_loses_worker() {
        let graph = crossing_pair();
        let mut worker = SearchWorker::new(Box::new(Panicking), small_board());
        worker.dispatch(graph.nodes().to_vec(), graph.edges().to_vec()).unwrap();

        assert!(matches!(worker.wait(), Err(UntangleError::WorkerLost)));
        assert!(matches!(
            worker.dispatch(graph.nodes().to_vec(), graph.edges().to_vec()),
            Err(UntangleError::WorkerLost)
        ));
    }
}
