//! Candidate positions for a node under consideration.

use std::f32::consts::TAU;

use untangle_config::EngineConfig;
use untangle_core::{Node, NodeId, Point};

/// Produces proposal positions for one node.
///
/// The set is, in order:
/// 1. a regular grid over the playable rectangle (x outer, y inner)
/// 2. `neighbor_samples` points on a ring of `neighbor_radius` around each
///    neighbor, clamped into the playable rectangle
/// 3. the centroid of the neighbors, if there are any
///
/// Duplicates are kept; every entry counts as one evaluation.
///
/// # Example
///
/// ```
/// use untangle_config::EngineConfig;
/// use untangle_core::{Node, Point};
/// use untangle_solver::CandidateGenerator;
///
/// let config = EngineConfig::default();
/// let nodes = vec![Node::new(0, Point::new(100.0, 100.0))];
///
/// let candidates = CandidateGenerator::new(config).generate(&nodes, 0);
/// // 12 columns x 9 rows on the default 1024x768 board, no neighbors.
/// assert_eq!(candidates.len(), 108);
/// assert_eq!(candidates[0], Point::new(60.0, 60.0));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CandidateGenerator {
    config: EngineConfig,
}

impl CandidateGenerator {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the candidates for `node_id` as a new vector.
    pub fn generate(&self, nodes: &[Node], node_id: NodeId) -> Vec<Point> {
        let mut out = Vec::new();
        self.fill(nodes, node_id, &mut out);
        out
    }

    /// Clears `out` and writes the candidates for `node_id` into it.
    pub fn fill(&self, nodes: &[Node], node_id: NodeId, out: &mut Vec<Point>) {
        out.clear();
        self.push_grid(out);

        let Some(target) = nodes.get(node_id) else {
            return;
        };

        let board = &self.config.board;
        let search = &self.config.search;
        let samples = search.neighbor_samples;

        for &neighbor in &target.adjacency {
            let Some(center) = nodes.get(neighbor).map(|n| n.position) else {
                continue;
            };
            for i in 0..samples {
                let angle = TAU * i as f32 / samples as f32;
                let offset = Point::new(angle.cos(), angle.sin()) * search.neighbor_radius;
                out.push((center + offset).clamp(
                    board.min_x(),
                    board.max_x(),
                    board.min_y(),
                    board.max_y(),
                ));
            }
        }

        if !target.adjacency.is_empty() {
            let mut sum = Point::ORIGIN;
            for &neighbor in &target.adjacency {
                if let Some(n) = nodes.get(neighbor) {
                    sum += n.position;
                }
            }
            out.push(sum * (1.0 / target.adjacency.len() as f32));
        }
    }

    /// Grid samples only.
    pub fn grid(&self) -> Vec<Point> {
        let mut out = Vec::new();
        self.push_grid(&mut out);
        out
    }

    fn push_grid(&self, out: &mut Vec<Point>) {
        let board = &self.config.board;
        push_lattice(
            out,
            (board.min_x(), board.max_x()),
            (board.min_y(), board.max_y()),
            (board.grid_spacing, board.grid_spacing),
        );
    }
}

/// Pushes `(x0 + i * sx, y0 + j * sy)` for every column `i` and row `j`
/// that stays inside the ranges, columns outer.
///
/// Non-positive steps push nothing.
pub(crate) fn push_lattice(
    out: &mut Vec<Point>,
    (x0, x1): (f32, f32),
    (y0, y1): (f32, f32),
    (sx, sy): (f32, f32),
) {
    let cols = lattice_len(x0, x1, sx);
    let rows = lattice_len(y0, y1, sy);
    out.reserve(cols * rows);
    for i in 0..cols {
        let x = x0 + i as f32 * sx;
        for j in 0..rows {
            out.push(Point::new(x, y0 + j as f32 * sy));
        }
    }
}

/// Samples from `start` to `end` inclusive at `step`; zero for an empty
/// range or a non-positive step.
fn lattice_len(start: f32, end: f32, step: f32) -> usize {
    if !(step > 0.0) || !(end >= start) {
        return 0;
    }
    // Absorbs rounding when the span is a whole number of steps.
    ((end - start) / step + 1e-4).floor() as usize + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use untangle_config::{BoardConfig, SearchConfig};

    fn small_board() -> EngineConfig {
        EngineConfig::new(
            BoardConfig {
                width: 300.0,
                height: 300.0,
                margin: 50.0,
                grid_spacing: 100.0,
                node_radius: 15.0,
            },
            SearchConfig::default(),
        )
    }

    fn linked_pair() -> Vec<Node> {
        let mut a = Node::new(0, Point::new(50.0, 50.0));
        let mut b = Node::new(1, Point::new(150.0, 150.0));
        a.adjacency.push(1);
        b.adjacency.push(0);
        vec![a, b]
    }

    #[test]
    fn test_grid_order_is_x_outer() {
        let grid = CandidateGenerator::new(small_board()).grid();
        assert_eq!(grid.len(), 9);
        assert_eq!(grid[0], Point::new(50.0, 50.0));
        assert_eq!(grid[1], Point::new(50.0, 150.0));
        assert_eq!(grid[3], Point::new(150.0, 50.0));
        assert_eq!(grid[8], Point::new(250.0, 250.0));
    }

    #[test]
    fn test_neighbor_ring_and_centroid() {
        let generator = CandidateGenerator::new(small_board());
        let candidates = generator.generate(&linked_pair(), 0);

        // 9 grid + 8 ring + 1 centroid
        assert_eq!(candidates.len(), 18);
        let first_ring = candidates[9];
        assert!((first_ring.x - 190.0).abs() < 1e-3);
        assert!((first_ring.y - 150.0).abs() < 1e-3);
        assert_eq!(candidates[17], Point::new(150.0, 150.0));
    }

    #[test]
    fn test_ring_clamped_into_board() {
        let generator = CandidateGenerator::new(small_board());
        // Node 1's only neighbor sits on the corner; half the ring falls outside.
        for p in &generator.generate(&linked_pair(), 1)[9..17] {
            assert!(p.x >= 50.0 && p.x <= 250.0);
            assert!(p.y >= 50.0 && p.y <= 250.0);
        }
    }

    #[test]
    fn test_isolated_node_gets_grid_only() {
        let generator = CandidateGenerator::new(small_board());
        let nodes = vec![Node::new(0, Point::new(100.0, 100.0))];
        assert_eq!(generator.generate(&nodes, 0), generator.grid());
    }

    #[test]
    fn test_lattice_counts_whole_steps() {
        let mut out = Vec::new();
        push_lattice(&mut out, (50.0, 250.0), (50.0, 100.0), (100.0, 40.0));
        // x in {50, 150, 250}, y in {50, 90}
        assert_eq!(out.len(), 6);
        assert_eq!(out[5], Point::new(250.0, 90.0));

        out.clear();
        push_lattice(&mut out, (0.0, 1.0), (0.0, 1.0), (0.1, 0.5));
        assert_eq!(out.len(), 11 * 3);
    }

    #[test]
    fn test_lattice_empty_for_bad_input() {
        let mut out = Vec::new();
        push_lattice(&mut out, (50.0, 250.0), (50.0, 250.0), (0.0, 10.0));
        push_lattice(&mut out, (50.0, 250.0), (50.0, 250.0), (f32::NAN, 10.0));
        push_lattice(&mut out, (250.0, 50.0), (50.0, 250.0), (10.0, 10.0));
        assert!(out.is_empty());
    }

    #[test]
    fn test_fill_reuses_buffer() {
        let generator = CandidateGenerator::new(small_board());
        let mut buf = vec![Point::ORIGIN; 50];
        generator.fill(&linked_pair(), 0, &mut buf);
        assert_eq!(buf.len(), 18);
    }
}
