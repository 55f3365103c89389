//! Untangle - move search for planar graph puzzles
//!
//! Give it a tangled graph and it finds the next node to move, or plays a
//! whole match and records the replay.
//!
//! # Example
//!
//! ```rust
//! use untangle::prelude::*;
//!
//! let mut graph = Graph::new();
//! for (x, y) in [(100.0, 100.0), (300.0, 300.0), (100.0, 300.0), (300.0, 100.0)] {
//!     graph.add_node(Point::new(x, y));
//! }
//! graph.add_edge(0, 1).unwrap();
//! graph.add_edge(2, 3).unwrap();
//!
//! let mv = untangle::find_move(&graph, &UntangleConfig::default()).unwrap();
//! assert_eq!(mv.intersections_after, 0);
//! ```

// Geometry and graph model
pub use untangle_core::{
    check_intersection, count_intersections, point_to_segment_distance, validate_graph, CpuMove,
    Edge, Graph, GraphSnapshot, MoveStatus, Node, NodeId, Point, Result, UntangleError, EPSILON,
};

// Configuration
pub use untangle_config::{
    BoardConfig, ConfigError, Difficulty, EngineConfig, PuzzleConfig, SearchConfig, SessionConfig,
    SolverMode, UntangleConfig,
};

// Strategies and sessions
pub use untangle_solver::{
    create_solver, solver_name, BacktrackingSolver, CandidateGenerator, CpuSolver, DncDpSolver,
    GreedySolver, MatchSession, MoveRecord, PositionRecord, Puzzle, PuzzleGenerator,
    ReplayDocument, ReplayLogger, SearchOutcome, SearchStats, SearchWorker, SessionStatus,
    SessionSummary, XY,
};

pub use untangle_benchmark as benchmark;

#[cfg(feature = "console")]
pub use untangle_console as console;

mod run;
pub use run::{find_move, generate_puzzle, play_match, MatchReport};

pub mod prelude {
    pub use super::{
        CpuMove, CpuSolver, Difficulty, Edge, Graph, GraphSnapshot, MatchSession, Node, Point,
        ReplayLogger, SessionStatus, SolverMode, UntangleConfig,
    };
    pub use super::{find_move, generate_puzzle, play_match};
}
