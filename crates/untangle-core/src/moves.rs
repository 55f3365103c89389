//! The single-node move produced by every search strategy.

use std::fmt;

use crate::geometry::Point;
use crate::graph::NodeId;

/// A proposed relocation of one node.
///
/// `node_id == None` means no move was found; both crossing counts then
/// report the count the search started from and the rest are defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CpuMove {
    pub node_id: Option<NodeId>,
    pub from_position: Point,
    pub to_position: Point,
    pub intersections_before: usize,
    pub intersections_after: usize,
    pub intersection_reduction: i64,
    pub computation_time_ms: u64,
}

impl CpuMove {
    /// A "no move found" result starting from `intersections_before`.
    pub fn none(intersections_before: usize) -> Self {
        Self {
            intersections_before,
            intersections_after: intersections_before,
            ..Self::default()
        }
    }

    /// A valid move of `node_id` from `from` to `to`.
    pub fn relocate(
        node_id: NodeId,
        from: Point,
        to: Point,
        intersections_before: usize,
        intersections_after: usize,
    ) -> Self {
        Self {
            node_id: Some(node_id),
            from_position: from,
            to_position: to,
            intersections_before,
            intersections_after,
            intersection_reduction: intersections_before as i64 - intersections_after as i64,
            computation_time_ms: 0,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.node_id.is_some()
    }

    /// True for a valid move that strictly lowers the crossing count.
    pub fn is_improving(&self) -> bool {
        self.is_valid() && self.intersection_reduction > 0
    }

    /// Node id in the wire format, where `-1` marks "no move".
    pub fn wire_node_id(&self) -> i64 {
        self.node_id.map_or(-1, |id| id as i64)
    }

    /// Classifies the result for a host.
    pub fn status(&self) -> MoveStatus {
        match self.node_id {
            None if self.intersections_before == 0 => MoveStatus::Solved,
            None => MoveStatus::Stuck,
            Some(_) if self.intersection_reduction > 0 => MoveStatus::Improving,
            Some(_) => MoveStatus::Neutral,
        }
    }
}

/// How a host should interpret a search result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveStatus {
    /// The graph had no crossings; nothing to do.
    Solved,
    /// A move that strictly reduces crossings.
    Improving,
    /// A zero-reduction move chosen to spread nodes apart.
    Neutral,
    /// No improving or neutral move exists in the candidate set.
    Stuck,
}

impl fmt::Display for MoveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveStatus::Solved => write!(f, "solved"),
            MoveStatus::Improving => write!(f, "improving"),
            MoveStatus::Neutral => write!(f, "neutral"),
            MoveStatus::Stuck => write!(f, "stuck"),
        }
    }
}
