//! Single-level exhaustive search.

use std::time::Instant;

use tracing::{debug, trace};
use untangle_config::EngineConfig;
use untangle_core::{count_intersections, CpuMove, Edge, Node, Result};

use crate::candidate::CandidateGenerator;
use crate::neutral::find_neutral_move;
use crate::solver::{check_inputs, CpuSolver};
use crate::stats::elapsed_ms;

#[cfg(test)]
mod tests;

/// Tries every candidate for every node and keeps the first move with the
/// largest strict reduction.
///
/// Ties keep the earlier move in node-then-candidate order. If nothing
/// improves, falls back to the spread-maximizing neutral move.
///
/// # Example
///
/// ```
/// use untangle_config::EngineConfig;
/// use untangle_core::{Graph, Point};
/// use untangle_solver::{CpuSolver, GreedySolver};
///
/// let mut graph = Graph::new();
/// for (x, y) in [(100.0, 100.0), (300.0, 300.0), (100.0, 300.0), (300.0, 100.0)] {
///     graph.add_node(Point::new(x, y));
/// }
/// graph.add_edge(0, 1).unwrap();
/// graph.add_edge(2, 3).unwrap();
///
/// let mut solver = GreedySolver::new();
/// let mv = solver
///     .find_best_move(graph.nodes().to_vec(), graph.edges(), &EngineConfig::default())
///     .unwrap();
///
/// assert_eq!(mv.intersections_before, 1);
/// assert_eq!(mv.intersections_after, 0);
/// assert!(solver.last_candidates_evaluated() > 0);
/// ```
#[derive(Debug, Default)]
pub struct GreedySolver {
    last_candidates_evaluated: usize,
}

impl GreedySolver {
    pub const NAME: &'static str = "Greedy";

    pub fn new() -> Self {
        Self::default()
    }

    /// Searches `nodes` in place. Positions are restored before returning.
    ///
    /// Adds to `evaluated` rather than resetting it, so callers can
    /// accumulate across several passes.
    pub(crate) fn search(
        nodes: &mut [Node],
        edges: &[Edge],
        generator: &CandidateGenerator,
        evaluated: &mut usize,
    ) -> CpuMove {
        let current = count_intersections(nodes, edges);
        if current == 0 {
            return CpuMove::none(0);
        }

        let mut best = CpuMove::none(current);
        let mut best_reduction = 0_i64;
        let mut candidates = Vec::new();

        for index in 0..nodes.len() {
            let original = nodes[index].position;
            generator.fill(nodes, index, &mut candidates);

            for &candidate in &candidates {
                *evaluated += 1;

                nodes[index].position = candidate;
                let after = count_intersections(nodes, edges);
                let reduction = current as i64 - after as i64;

                if reduction > best_reduction {
                    trace!(
                        event = "improving_candidate",
                        node_id = index,
                        reduction = reduction,
                    );
                    best_reduction = reduction;
                    best = CpuMove::relocate(index, original, candidate, current, after);
                }
            }

            nodes[index].position = original;
        }

        if !best.is_valid() {
            debug!(event = "neutral_fallback", strategy = Self::NAME, intersections = current);
            best = find_neutral_move(nodes, edges, generator, current, evaluated);
        }

        best
    }
}

impl CpuSolver for GreedySolver {
    fn find_best_move(
        &mut self,
        mut nodes: Vec<Node>,
        edges: &[Edge],
        config: &EngineConfig,
    ) -> Result<CpuMove> {
        check_inputs(&nodes, edges, config)?;
        let start = Instant::now();
        self.last_candidates_evaluated = 0;

        let generator = CandidateGenerator::new(*config);
        let mut mv = Self::search(
            &mut nodes,
            edges,
            &generator,
            &mut self.last_candidates_evaluated,
        );
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

