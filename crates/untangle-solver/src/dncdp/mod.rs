//! Divide-and-conquer search with a per-partition placement table.
//!
//! One level of splitting only: the whole node set is split at the median
//! x-coordinate and each half goes straight to the table stage. Small
//! node sets are brute-forced instead. If the partitioned search finds no
//! improving move, a greedy pass over the whole graph gets one chance.

mod dp;
mod partition;
mod refinement;


pub use dp::{dp_candidates, order_by_degree};
pub use partition::{split_line, Partition};

use std::time::Instant;

use tracing::debug;
use untangle_config::EngineConfig;
use untangle_core::{count_intersections, CpuMove, Edge, Node, Result};

use crate::candidate::CandidateGenerator;
use crate::greedy::GreedySolver;
use crate::solver::{check_inputs, CpuSolver};
use crate::stats::elapsed_ms;
use dp::PartitionSearch;

/// Divide-and-conquer + table strategy.
///
/// # Example
///
/// ```
/// use untangle_config::EngineConfig;
/// use untangle_core::{Graph, Point};
/// use untangle_solver::{CpuSolver, DncDpSolver};
///
/// let mut graph = Graph::new();
/// for (x, y) in [(100.0, 100.0), (300.0, 300.0), (100.0, 300.0), (300.0, 100.0)] {
///     graph.add_node(Point::new(x, y));
/// }
/// graph.add_edge(0, 1).unwrap();
/// graph.add_edge(2, 3).unwrap();
///
/// let mut solver = DncDpSolver::new();
/// let mv = solver
///     .find_best_move(graph.nodes().to_vec(), graph.edges(), &EngineConfig::default())
///     .unwrap();
///
/// assert_eq!(mv.intersections_after, 0);
/// ```
#[derive(Debug, Default)]
pub struct DncDpSolver {
    last_candidates_evaluated: usize,
}

impl DncDpSolver {
    pub const NAME: &'static str = "D&C + DP";

    pub fn new() -> Self {
        Self::default()
    }

    /// Re-optimizes nodes near the vertical line `split_x` in place.
    ///
    /// Not part of [`find_best_move`](CpuSolver::find_best_move); callers
    /// opt in explicitly. Returns the applied moves in order and sets the
    /// evaluation counter for this pass.
    ///
    /// # Errors
    ///
    /// Returns `InvalidGraph` for malformed input and `Config` for an
    /// unusable `config`.
    pub fn refine_boundary(
        &mut self,
        nodes: &mut [Node],
        edges: &[Edge],
        config: &EngineConfig,
        split_x: f32,
    ) -> Result<Vec<CpuMove>> {
        check_inputs(nodes, edges, config)?;
        let mut search = PartitionSearch::new(edges, config);
        let moves = search.refine_boundary(nodes, split_x);
        self.last_candidates_evaluated = search.evaluated;
        Ok(moves)
    }
}

impl PartitionSearch<'_> {
    /// Base case for small partitions, otherwise one median split with
    /// each half solved by the table. Falls back to the table over the
    /// whole partition when neither half finds a move; ties go left.
    fn solve_partition(&mut self, nodes: &mut [Node], partition: &Partition) -> CpuMove {
        if partition.len() <= self.config.search.base_case_threshold {
            return self.solve_base_case(nodes, partition);
        }

        let (left, right) = partition.split(nodes);
        if left.is_empty() {
            return self.solve_dp(nodes, &right);
        }
        if right.is_empty() {
            return self.solve_dp(nodes, &left);
        }

        let left_move = self.solve_dp(nodes, &left);
        let right_move = self.solve_dp(nodes, &right);

        match (left_move.is_valid(), right_move.is_valid()) {
            (false, false) => self.solve_dp(nodes, partition),
            (true, false) => left_move,
            (false, true) => right_move,
            (true, true) => {
                if left_move.intersection_reduction >= right_move.intersection_reduction {
                    left_move
                } else {
                    right_move
                }
            }
        }
    }
}

impl CpuSolver for DncDpSolver {
    fn find_best_move(
        &mut self,
        mut nodes: Vec<Node>,
        edges: &[Edge],
        config: &EngineConfig,
    ) -> Result<CpuMove> {
        check_inputs(&nodes, edges, config)?;
        let start = Instant::now();
        self.last_candidates_evaluated = 0;

        let current = count_intersections(&nodes, edges);
        if current == 0 {
            return Ok(CpuMove::none(0));
        }

        let mut search = PartitionSearch::new(edges, config);
        let whole = Partition::all(&nodes);
        let mut mv = search.solve_partition(&mut nodes, &whole);

        if !mv.is_improving() {
            debug!(event = "greedy_fallback", strategy = Self::NAME, intersections = current);
            let generator = CandidateGenerator::new(*config);
            let fallback = GreedySolver::search(&mut nodes, edges, &generator, &mut search.evaluated);
            if fallback.is_improving() {
                mv = fallback;
            }
        }

        self.last_candidates_evaluated = search.evaluated;
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
