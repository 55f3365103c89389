//! Puzzle generation.
//!
//! Every family except the random graph is planar by construction: the
//! generator records a crossing-free layout, then scrambles the nodes onto
//! a circle in random order to produce the puzzle.

use std::f32::consts::{FRAC_PI_2, TAU};

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;
use untangle_config::{BoardConfig, Difficulty, UntangleConfig};
use untangle_core::{Graph, NodeId, Point};

/// Smallest and largest supported node counts.
pub const MIN_NODES: usize = 3;
pub const MAX_NODES: usize = 200;

/// A generated puzzle.
#[derive(Debug, Clone, PartialEq)]
pub struct Puzzle {
    /// The tangled graph handed to the players.
    pub graph: Graph,
    /// A crossing-free layout of the same graph, if one is known.
    pub planar_positions: Option<Vec<Point>>,
}

/// Seeded puzzle generator.
///
/// # Example
///
/// ```
/// use untangle_config::{BoardConfig, Difficulty};
/// use untangle_solver::PuzzleGenerator;
///
/// let mut generator = PuzzleGenerator::new(BoardConfig::default(), Some(7));
/// let puzzle = generator.generate(Difficulty::Easy, 12);
///
/// assert_eq!(puzzle.graph.node_count(), 12);
/// assert!(puzzle.planar_positions.is_some());
/// ```
#[derive(Debug, Clone)]
pub struct PuzzleGenerator {
    board: BoardConfig,
    rng: ChaCha8Rng,
}

impl PuzzleGenerator {
    /// Seeds from `seed`, or from the thread RNG when `None`.
    pub fn new(board: BoardConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };
        Self { board, rng }
    }

    pub fn from_config(config: &UntangleConfig) -> Self {
        Self::new(config.board, config.puzzle.random_seed)
    }

    /// Generates the configured difficulty and node count.
    pub fn generate_from(&mut self, config: &UntangleConfig) -> Puzzle {
        self.generate(config.puzzle.difficulty, config.puzzle.node_count)
    }

    /// Generates a puzzle of `difficulty`; `node_count` is clamped to
    /// `MIN_NODES..=MAX_NODES`.
    pub fn generate(&mut self, difficulty: Difficulty, node_count: usize) -> Puzzle {
        let n = node_count.clamp(MIN_NODES, MAX_NODES);
        let mut graph = match difficulty {
            Difficulty::Easy => self.easy(n),
            Difficulty::Medium => self.medium(n),
            Difficulty::Hard => self.hard(n),
        };
        let planar_positions = graph.positions();
        self.scramble(&mut graph);

        debug!(
            event = "puzzle_generated",
            difficulty = %difficulty,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            intersections = graph.intersection_count(),
        );

        Puzzle {
            graph,
            planar_positions: Some(planar_positions),
        }
    }

    /// Random positions, a Hamiltonian cycle and about `1.5 n` extra edges.
    ///
    /// Gives up on extra edges after `10x` as many attempts.
    pub fn random(&mut self, node_count: usize) -> Puzzle {
        let n = node_count.clamp(MIN_NODES, MAX_NODES);
        let b = self.board;
        let mut graph = Graph::new();
        for _ in 0..n {
            let x = self.rng.random_range(b.min_x()..=b.max_x());
            let y = self.rng.random_range(b.min_y()..=b.max_y());
            graph.add_node(Point::new(x, y));
        }
        add_cycle(&mut graph);

        let extra = n * 3 / 2;
        let mut added = 0;
        let mut attempts = 0;
        while added < extra && attempts < extra * 10 {
            attempts += 1;
            let u = self.rng.random_range(0..n);
            let v = self.rng.random_range(0..n);
            if u != v && matches!(graph.add_edge(u, v), Ok(true)) {
                added += 1;
            }
        }

        Puzzle {
            graph,
            planar_positions: None,
        }
    }

    /// Cycle plus two (three above ten nodes) non-crossing chords, laid out
    /// on a circle.
    fn easy(&mut self, n: usize) -> Graph {
        let mut graph = Graph::new();
        for _ in 0..n {
            graph.add_node(Point::ORIGIN);
        }
        add_cycle(&mut graph);

        let chords = if n > 10 { 3 } else { 2 };
        let mut added = 0;
        let mut attempts = 0;
        while added < chords && attempts < 200 {
            attempts += 1;
            let u = self.rng.random_range(0..n);
            let v = self.rng.random_range(0..n);
            if u == v {
                continue;
            }
            let gap = u.abs_diff(v);
            if gap == 1 || gap == n - 1 || graph.has_edge(u, v) {
                continue;
            }
            let crosses = graph
                .edges()
                .iter()
                .filter(|e| !is_cycle_edge(e.u, e.v, n))
                .any(|e| chords_cross(u, v, e.u, e.v));
            if !crosses && matches!(graph.add_edge(u, v), Ok(true)) {
                added += 1;
            }
        }

        let layout = circle_layout(&self.board, n);
        place(&mut graph, &layout);
        graph
    }

    /// Grid mesh with about 22% of edges removed, only where both
    /// endpoints keep degree above two.
    fn medium(&mut self, n: usize) -> Graph {
        let cols = (n as f32).sqrt().ceil() as usize;
        let rows = n.div_ceil(cols);
        let b = self.board;
        let (cx, cy) = b.center();
        let spacing = b.width.min(b.height) / (rows.max(cols) as f32 + 1.0);
        let start_x = cx - (cols - 1) as f32 * spacing / 2.0;
        let start_y = cy - (rows - 1) as f32 * spacing / 2.0;

        let mut graph = Graph::new();
        for i in 0..n {
            let (row, col) = (i / cols, i % cols);
            graph.add_node(Point::new(
                start_x + col as f32 * spacing,
                start_y + row as f32 * spacing,
            ));
        }
        for i in 0..n {
            let (row, col) = (i / cols, i % cols);
            if col + 1 < cols && i + 1 < n {
                link(&mut graph, i, i + 1);
            }
            if row + 1 < rows && i + cols < n {
                link(&mut graph, i, i + cols);
            }
        }

        let to_remove = (graph.edge_count() as f32 * 0.22) as usize;
        let mut candidates: Vec<(NodeId, NodeId)> = graph.edge_pairs();
        candidates.shuffle(&mut self.rng);

        let mut removed = 0;
        for (u, v) in candidates {
            if removed >= to_remove {
                break;
            }
            let nodes = graph.nodes();
            if nodes[u].degree() > 2 && nodes[v].degree() > 2 && graph.remove_edge(u, v) {
                removed += 1;
            }
        }
        graph
    }

    /// Maximal planar graph built by splitting a random triangular face at
    /// its jittered centroid.
    fn hard(&mut self, n: usize) -> Graph {
        let board = self.board;
        let (cx, cy) = board.center();
        let radius = board.width.min(board.height) / 2.8;

        let mut graph = Graph::new();
        graph.add_node(Point::new(cx, cy - radius));
        graph.add_node(Point::new(cx - radius * 0.866, cy + radius * 0.5));
        graph.add_node(Point::new(cx + radius * 0.866, cy + radius * 0.5));
        link(&mut graph, 0, 1);
        link(&mut graph, 1, 2);
        link(&mut graph, 2, 0);

        let mut faces: Vec<[NodeId; 3]> = vec![[0, 1, 2]];
        for _ in 3..n {
            let index = self.rng.random_range(0..faces.len());
            let [a, b, c] = faces.remove(index);

            let nodes = graph.nodes();
            let centroid = (nodes[a].position + nodes[b].position + nodes[c].position)
                * (1.0 / 3.0);
            let jitter = Point::new(
                self.rng.random_range(-0.1..0.1_f32) * 20.0,
                self.rng.random_range(-0.1..0.1_f32) * 20.0,
            );

            let new = graph.add_node(centroid + jitter);
            link(&mut graph, new, a);
            link(&mut graph, new, b);
            link(&mut graph, new, c);

            faces.push([a, b, new]);
            faces.push([b, c, new]);
            faces.push([c, a, new]);
        }
        graph
    }

    /// Places the nodes evenly on a circle in a random order.
    pub fn scramble(&mut self, graph: &mut Graph) {
        let n = graph.node_count();
        let mut order: Vec<NodeId> = (0..n).collect();
        order.shuffle(&mut self.rng);

        let slots = circle_layout(&self.board, n);
        let mut positions = vec![Point::ORIGIN; n];
        for (slot, &id) in order.iter().enumerate() {
            positions[id] = slots[slot];
        }
        place(graph, &positions);
    }
}

/// `n` evenly spaced points on a circle of radius `min(w, h) / 2.5` around
/// the board center, starting at the top.
pub fn circle_layout(board: &BoardConfig, n: usize) -> Vec<Point> {
    let (cx, cy) = board.center();
    let radius = board.width.min(board.height) / 2.5;
    (0..n)
        .map(|i| {
            let angle = TAU * i as f32 / n as f32 - FRAC_PI_2;
            Point::new(cx + radius * angle.cos(), cy + radius * angle.sin())
        })
        .collect()
}

/// Six nodes and nine edges with a few crossings, for manual testing.
pub fn test_graph(board: &BoardConfig) -> Graph {
    let (cx, cy) = board.center();
    let spread = 150.0;

    let mut graph = Graph::new();
    for (dx, dy) in [
        (-spread, -spread * 0.5),
        (spread, -spread * 0.5),
        (-spread, spread * 0.5),
        (spread, spread * 0.5),
        (0.0, -spread * 1.5),
        (0.0, spread * 1.5),
    ] {
        graph.add_node(Point::new(cx + dx, cy + dy));
    }
    for (u, v) in [(0, 3), (1, 2), (0, 1), (2, 3), (4, 5), (0, 5), (1, 5), (4, 2), (4, 3)] {
        link(&mut graph, u, v);
    }
    graph
}

fn add_cycle(graph: &mut Graph) {
    let n = graph.node_count();
    for i in 0..n {
        link(graph, i, (i + 1) % n);
    }
}

/// Adds an edge whose endpoints exist by construction.
fn link(graph: &mut Graph, u: NodeId, v: NodeId) {
    let added = graph.add_edge(u, v);
    debug_assert!(added.is_ok(), "generated edge ({u}, {v}) is out of range");
}

/// Moves every node; `positions` holds one entry per node by construction.
fn place(graph: &mut Graph, positions: &[Point]) {
    let placed = graph.set_positions(positions);
    debug_assert!(placed.is_ok(), "layout does not match the node count");
}

fn is_cycle_edge(u: NodeId, v: NodeId, n: usize) -> bool {
    u == (v + 1) % n || v == (u + 1) % n
}

/// Two chords of a circle with vertices in index order cross iff exactly
/// one endpoint of the second lies strictly between those of the first.
fn chords_cross(a: NodeId, b: NodeId, c: NodeId, d: NodeId) -> bool {
    let (a, b) = (a.min(b), a.max(b));
    let between = |x: NodeId| a < x && x < b;
    between(c) != between(d)
}
