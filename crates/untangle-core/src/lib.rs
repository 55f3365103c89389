//! Untangle Core - geometry and graph model for the move-search engine
//!
//! This crate provides the fundamental abstractions shared by every solver:
//! - `Point` arithmetic and the segment intersection kernel
//! - `Node`, `Edge` and `Graph` with id/index validation
//! - `CpuMove`, the single-move result every search produces
//! - Serializable graph snapshots for host interchange

pub mod error;
pub mod geometry;
pub mod graph;
pub mod moves;
pub mod snapshot;

pub use error::{Result, UntangleError};
pub use geometry::{
    check_intersection, count_intersections, point_to_segment_distance, Point, EPSILON,
};
pub use graph::{validate_graph, Edge, Graph, Node, NodeId, DEFAULT_NODE_RADIUS};
pub use moves::{CpuMove, MoveStatus};
pub use snapshot::{EdgeRecord, GraphSnapshot, NodeRecord};
