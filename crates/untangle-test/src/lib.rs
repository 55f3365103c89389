//! Shared test fixtures for untangle crates.
//!
//! This crate provides graphs and configurations for testing.
//! It does NOT depend on `untangle-solver` to avoid circular dependencies.
//!
//! - [`graphs`] - small embeddings with known crossing counts
//! - [`boards`] - coarse engine configurations that keep searches cheap
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! untangle-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```
//! use untangle_test::{crossing_pair, small_board};
//!
//! let graph = crossing_pair();
//! assert_eq!(graph.intersection_count(), 1);
//! assert_eq!(small_board().board.width, 300.0);
//! ```

pub mod boards;
pub mod graphs;

pub use boards::{default_engine, small_board, small_config};
pub use graphs::{
    crossing_pair, graph_from, k5_one_crossing, pentagram, planar_path, square_with_diagonals,
    triangle,
};
