//! Local re-optimization near a split line.

use tracing::debug;
use untangle_core::{count_intersections, CpuMove, Node};

use super::dp::PartitionSearch;
use crate::candidate::push_lattice;

impl PartitionSearch<'_> {
    /// Moves nodes within `boundary_margin` of `split_x` to the best point
    /// of a fine local grid, one node at a time in id order.
    ///
    /// The grid spans `boundary_margin` around the node, clipped to the
    /// playable rectangle, at a quarter of the board grid spacing. Each
    /// strictly improving relocation is applied to `nodes` immediately and
    /// returned in order.
    pub fn refine_boundary(&mut self, nodes: &mut [Node], split_x: f32) -> Vec<CpuMove> {
        let board = self.config.board;
        let reach = self.config.search.boundary_margin;
        let step = board.grid_spacing / 4.0;
        let mut applied = Vec::new();
        let mut grid = Vec::new();

        for index in 0..nodes.len() {
            let original = nodes[index].position;
            if (original.x - split_x).abs() > reach {
                continue;
            }

            let current = count_intersections(nodes, self.edges);
            if current == 0 {
                break;
            }

            grid.clear();
            push_lattice(
                &mut grid,
                (
                    board.min_x().max(original.x - reach),
                    board.max_x().min(original.x + reach),
                ),
                (
                    board.min_y().max(original.y - reach),
                    board.max_y().min(original.y + reach),
                ),
                (step, step),
            );

            let mut best = CpuMove::none(current);
            let mut best_reduction = 0_i64;
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

            nodes[index].position = if best.is_valid() {
                debug!(
                    event = "boundary_move",
                    node_id = index,
                    reduction = best.intersection_reduction,
                );
                applied.push(best);
                best.to_position
            } else {
                original
            };
        }

        applied
    }
}
