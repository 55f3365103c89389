//! Per-partition search: brute-force base case and the chained placement
//! table.

use tracing::trace;
use untangle_config::EngineConfig;
use untangle_core::{count_intersections, CpuMove, Edge, Node, NodeId, Point};

use super::partition::Partition;
use crate::candidate::push_lattice;

/// Candidate positions for the placement table.
///
/// The partition's box grown by `dp_margin` and clipped to the playable
/// rectangle, sampled at `max(dp_min_step, min(span_x, span_y) / 8)`,
/// followed by the clipped box's center.
pub fn dp_candidates(partition: &Partition, config: &EngineConfig) -> Vec<Point> {
    let board = &config.board;
    let search = &config.search;

    let x0 = board.min_x().max(partition.x_min - search.dp_margin);
    let x1 = board.max_x().min(partition.x_max + search.dp_margin);
    let y0 = board.min_y().max(partition.y_min - search.dp_margin);
    let y1 = board.max_y().min(partition.y_max + search.dp_margin);

    let step = search.dp_min_step.max((x1 - x0).min(y1 - y0) / 8.0);

    let mut out = Vec::new();
    push_lattice(&mut out, (x0, x1), (y0, y1), (step, step));
    out.push(Point::new((x0 + x1) / 2.0, (y0 + y1) / 2.0));
    out
}

/// Partition members by descending degree; equal degrees keep their order.
pub fn order_by_degree(partition: &Partition, nodes: &[Node]) -> Vec<NodeId> {
    let mut ordered = partition.node_indices.clone();
    ordered.sort_by(|&a, &b| nodes[b].degree().cmp(&nodes[a].degree()));
    ordered
}

/// Index of the first minimum.
fn first_min(row: &[usize]) -> usize {
    let mut best = 0;
    for (j, &value) in row.iter().enumerate().skip(1) {
        if value < row[best] {
            best = j;
        }
    }
    best
}

/// Search over one partition with a shared evaluation counter.
pub(crate) struct PartitionSearch<'a> {
    pub edges: &'a [Edge],
    pub config: &'a EngineConfig,
    pub evaluated: usize,
}

impl<'a> PartitionSearch<'a> {
    pub fn new(edges: &'a [Edge], config: &'a EngineConfig) -> Self {
        Self {
            edges,
            config,
            evaluated: 0,
        }
    }

    /// Crossing count with `index` at `at`; the node is restored.
    fn evaluate_placement(&self, nodes: &mut [Node], index: NodeId, at: Point) -> usize {
        let original = nodes[index].position;
        nodes[index].position = at;
        let count = count_intersections(nodes, self.edges);
        nodes[index].position = original;
        count
    }

    /// Tries every member on a grid over the whole playable area.
    ///
    /// The grid step is a sixth of the partition's span on each axis, but
    /// never below `base_case_min_step`. Keeps the first strictly best
    /// improving move.
    pub fn solve_base_case(&mut self, nodes: &mut [Node], partition: &Partition) -> CpuMove {
        let board = &self.config.board;
        let min_step = self.config.search.base_case_min_step;
        let current = count_intersections(nodes, self.edges);

        let step_x = (partition.width() / 6.0).max(min_step);
        let step_y = (partition.height() / 6.0).max(min_step);
        let mut grid = Vec::new();
        push_lattice(
            &mut grid,
            (board.min_x(), board.max_x()),
            (board.min_y(), board.max_y()),
            (step_x, step_y),
        );

        let mut best = CpuMove::none(current);
        let mut best_reduction = 0_i64;

        for &index in &partition.node_indices {
            let original = nodes[index].position;
            for &at in &grid {
                self.evaluated += 1;
                nodes[index].position = at;
                let after = count_intersections(nodes, self.edges);
                let reduction = current as i64 - after as i64;
                if reduction > best_reduction {
                    best_reduction = reduction;
                    best = CpuMove::relocate(index, original, at, current, after);
                }
            }
            nodes[index].position = original;
        }

        best
    }

    /// Chained placement table over the partition's members.
    ///
    /// Row `i` scores every candidate for the `i`-th member (by descending
    /// degree) while member `i - 1` sits at the first minimum of row
    /// `i - 1`; all other nodes stay where they are. The traced column for
    /// every row is therefore that row's first minimum. Of the members on
    /// the traced path, the single relocation with the largest strict
    /// reduction against the current total is returned.
    pub fn solve_dp(&mut self, nodes: &mut [Node], partition: &Partition) -> CpuMove {
        let current = count_intersections(nodes, self.edges);
        let ordered = order_by_degree(partition, nodes);
        let candidates = dp_candidates(partition, self.config);
        if ordered.is_empty() || candidates.is_empty() {
            return CpuMove::none(current);
        }

        let rows = ordered.len();
        let cols = candidates.len();
        let mut table = vec![vec![usize::MAX; cols]; rows];
        // Column the previous member was pinned to while row i was scored.
        let mut pinned = vec![0usize; rows];

        for (j, &at) in candidates.iter().enumerate() {
            self.evaluated += 1;
            table[0][j] = self.evaluate_placement(nodes, ordered[0], at);
        }

        for i in 1..rows {
            let prev_best = first_min(&table[i - 1]);
            let prev_node = ordered[i - 1];
            let saved = nodes[prev_node].position;
            nodes[prev_node].position = candidates[prev_best];

            for (j, &at) in candidates.iter().enumerate() {
                self.evaluated += 1;
                table[i][j] = self.evaluate_placement(nodes, ordered[i], at);
            }
            pinned[i] = prev_best;

            nodes[prev_node].position = saved;
        }

        let mut path = vec![0usize; rows];
        path[rows - 1] = first_min(&table[rows - 1]);
        for i in (0..rows - 1).rev() {
            path[i] = pinned[i + 1];
        }

        let mut best = CpuMove::none(current);
        let mut best_reduction = 0_i64;
        for (i, &index) in ordered.iter().enumerate() {
            let to = candidates[path[i]];
            let after = self.evaluate_placement(nodes, index, to);
            let reduction = current as i64 - after as i64;
            if reduction > best_reduction {
                trace!(event = "dp_path_move", node_id = index, reduction = reduction);
                best_reduction = reduction;
                best = CpuMove::relocate(index, nodes[index].position, to, current, after);
            }
        }

        best
    }
}
