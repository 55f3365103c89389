//! Depth-bounded backtracking search.
//!
//! Explores sequences of strictly improving moves up to `max_depth` plies,
//! mutating and restoring node positions in place. Only the first ply is
//! ever returned: the recorded move changes only when a new global best
//! count is reached directly by a depth-0 move, so a deep branch that ends
//! lower than anything else still credits whatever depth-0 move last set
//! the record.

use std::time::Instant;

use tracing::{debug, trace};
use untangle_config::EngineConfig;
use untangle_core::{count_intersections, CpuMove, Edge, Node, Point, Result};

use crate::candidate::CandidateGenerator;
use crate::neutral::find_neutral_move;
use crate::solver::{check_inputs, CpuSolver};
use crate::stats::elapsed_ms;


/// Mutable state threaded through the recursion.
struct SearchState {
    max_depth: usize,
    best_intersections: usize,
    best_first: Option<(usize, Point, usize)>,
    evaluated: usize,
    deepest: usize,
}

/// Myopic depth-first search over improving moves.
///
/// # Example
///
/// ```
/// use untangle_config::EngineConfig;
/// use untangle_core::{Graph, Point};
/// use untangle_solver::{BacktrackingSolver, CpuSolver};
///
/// let mut graph = Graph::new();
/// for (x, y) in [(100.0, 100.0), (300.0, 300.0), (100.0, 300.0), (300.0, 100.0)] {
///     graph.add_node(Point::new(x, y));
/// }
/// graph.add_edge(0, 1).unwrap();
/// graph.add_edge(2, 3).unwrap();
///
/// let mut solver = BacktrackingSolver::new();
/// let mv = solver
///     .find_best_move(graph.nodes().to_vec(), graph.edges(), &EngineConfig::default())
///     .unwrap();
///
/// assert!(mv.is_improving());
/// assert!(solver.last_depth_reached() <= 3);
/// ```
#[derive(Debug, Default)]
pub struct BacktrackingSolver {
    last_candidates_evaluated: usize,
    last_depth_reached: usize,
}

impl BacktrackingSolver {
    pub const NAME: &'static str = "Backtracking";

    pub fn new() -> Self {
        Self::default()
    }

    /// Number of plies the most recent search evaluated candidates at.
    pub fn last_depth_reached(&self) -> usize {
        self.last_depth_reached
    }

    fn backtrack(
        nodes: &mut [Node],
        edges: &[Edge],
        generator: &CandidateGenerator,
        depth: usize,
        current: usize,
        state: &mut SearchState,
    ) {
        if current == 0 || depth >= state.max_depth {
            return;
        }
        state.deepest = state.deepest.max(depth + 1);

        for index in 0..nodes.len() {
            let original = nodes[index].position;
            let candidates = generator.generate(nodes, index);

            for candidate in candidates {
                state.evaluated += 1;

                nodes[index].position = candidate;
                let after = count_intersections(nodes, edges);

                if after < current {
                    if after < state.best_intersections {
                        state.best_intersections = after;
                        if depth == 0 {
                            trace!(event = "new_best", node_id = index, intersections = after);
                            state.best_first = Some((index, candidate, after));
                        }
                    }
                    Self::backtrack(nodes, edges, generator, depth + 1, after, state);
                }

                nodes[index].position = original;
            }
        }
    }
}

impl CpuSolver for BacktrackingSolver {
    fn find_best_move(
        &mut self,
        mut nodes: Vec<Node>,
        edges: &[Edge],
        config: &EngineConfig,
    ) -> Result<CpuMove> {
        check_inputs(&nodes, edges, config)?;
        let start = Instant::now();
        self.last_candidates_evaluated = 0;
        self.last_depth_reached = 0;

        let current = count_intersections(&nodes, edges);
        if current == 0 {
            return Ok(CpuMove::none(0));
        }

        let generator = CandidateGenerator::new(*config);
        let mut state = SearchState {
            max_depth: config.search.max_depth,
            best_intersections: current,
            best_first: None,
            evaluated: 0,
            deepest: 0,
        };
        Self::backtrack(&mut nodes, edges, &generator, 0, current, &mut state);

        debug!(
            event = "backtrack_done",
            best_intersections = state.best_intersections,
            depth = state.deepest,
            candidates = state.evaluated,
        );

        let mut mv = match state.best_first {
            Some((index, to, after)) => {
                CpuMove::relocate(index, nodes[index].position, to, current, after)
            }
            None => CpuMove::none(current),
        };

        if !mv.is_improving() {
            debug!(event = "neutral_fallback", strategy = Self::NAME, intersections = current);
            mv = find_neutral_move(&mut nodes, edges, &generator, current, &mut state.evaluated);
        }

        self.last_candidates_evaluated = state.evaluated;
        self.last_depth_reached = state.deepest;
        mv.computation_time_ms = elapsed_ms(start);
        Ok(mv)
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn last_candidates_evaluated(&self) -> usize {
        self.last_candidates_evaluated
    }
}
