//! Untangle move-search engine.
//!
//! This crate provides:
//! - Candidate generation for node relocation
//! - Three search strategies (greedy, backtracking, divide-and-conquer + DP)
//!   behind the [`CpuSolver`] trait and [`create_solver`] factory
//! - Replay logging with JSON export
//! - A background [`SearchWorker`] and a [`MatchSession`] driver
//! - Puzzle generators and search statistics
//!
//! # Example
//!
//! ```
//! use untangle_config::{SolverMode, UntangleConfig};
//! use untangle_solver::{create_solver, PuzzleGenerator};
//!
//! let config = UntangleConfig::default().with_random_seed(3);
//! let puzzle = PuzzleGenerator::from_config(&config).generate_from(&config);
//! let graph = puzzle.graph;
//!
//! let mut solver = create_solver(SolverMode::Greedy);
//! let mv = solver
//!     .find_best_move(graph.nodes().to_vec(), graph.edges(), &config.engine())
//!     .unwrap();
//! assert!(mv.intersections_after <= mv.intersections_before);
//! ```

pub mod backtracking;
pub mod candidate;
pub mod dncdp;
pub mod generator;
pub mod greedy;
mod neutral;
pub mod replay;
pub mod session;
pub mod solver;
pub mod stats;
pub mod worker;

pub use backtracking::BacktrackingSolver;
pub use candidate::CandidateGenerator;
pub use dncdp::{DncDpSolver, Partition};
pub use generator::{circle_layout, test_graph, Puzzle, PuzzleGenerator};
pub use greedy::GreedySolver;
pub use replay::{MoveRecord, PositionRecord, ReplayDocument, ReplayLogger, XY};
pub use session::{MatchSession, SessionStatus, SessionSummary};
pub use solver::{create_solver, solver_name, CpuSolver};
pub use stats::SearchStats;
pub use worker::{SearchOutcome, SearchWorker};
