//! Append-only move history for one match, exportable as JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};
use untangle_core::{count_intersections, CpuMove, Edge, Node, Point, Result};

/// Records a match so it can be exported and played back.
///
/// # Example
///
/// ```
/// use untangle_core::{Graph, Point};
/// use untangle_solver::ReplayLogger;
///
/// let mut graph = Graph::new();
/// graph.add_node(Point::new(0.0, 0.0));
/// graph.add_node(Point::new(10.0, 0.0));
/// graph.add_edge(0, 1).unwrap();
///
/// let mut replay = ReplayLogger::new();
/// replay.start_match(graph.nodes(), graph.edges());
///
/// assert!(replay.is_solved());
/// let json = replay.export_json().unwrap();
/// assert!(json.contains("\"moves\": []"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReplayLogger {
    initial_positions: Vec<Point>,
    edges: Vec<Edge>,
    initial_intersections: usize,
    moves: Vec<CpuMove>,
}

/// Exported replay document.
///
/// Field order is part of the format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayDocument {
    pub initial_intersections: usize,
    pub total_moves: usize,
    pub solved: bool,
    pub initial_positions: Vec<PositionRecord>,
    pub moves: Vec<MoveRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionRecord {
    pub id: usize,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XY {
    pub x: f32,
    pub y: f32,
}

impl From<Point> for XY {
    fn from(p: Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

/// One recorded move. `node_id` is `-1` for a recorded no-move.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub step: usize,
    pub node_id: i64,
    pub from: XY,
    pub to: XY,
    pub intersections_before: usize,
    pub intersections_after: usize,
    pub intersection_reduction: i64,
    pub computation_time_ms: u64,
}

impl ReplayLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new match, discarding any previous one.
    pub fn start_match(&mut self, nodes: &[Node], edges: &[Edge]) {
        self.initial_positions = nodes.iter().map(|n| n.position).collect();
        self.edges = edges.to_vec();
        self.initial_intersections = count_intersections(nodes, edges);
        self.moves.clear();
    }

    pub fn record_move(&mut self, mv: CpuMove) {
        self.moves.push(mv);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn total_moves(&self) -> usize {
        self.moves.len()
    }

    pub fn moves(&self) -> &[CpuMove] {
        &self.moves
    }

    pub fn initial_positions(&self) -> &[Point] {
        &self.initial_positions
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn initial_intersections(&self) -> usize {
        self.initial_intersections
    }

    /// The `step`-th recorded move, counting from 1.
    pub fn move_at(&self, step: usize) -> Option<&CpuMove> {
        step.checked_sub(1).and_then(|i| self.moves.get(i))
    }

    /// Crossings after the last move, or the initial count if none.
    pub fn final_intersections(&self) -> usize {
        self.moves
            .last()
            .map_or(self.initial_intersections, |m| m.intersections_after)
    }

    /// True if the last move left no crossings, or if there are no moves
    /// and the match started solved.
    pub fn is_solved(&self) -> bool {
        match self.moves.last() {
            Some(last) => last.intersections_after == 0,
            None => self.initial_intersections == 0,
        }
    }

    /// Node positions after the first `step` moves.
    ///
    /// Invalid moves are skipped. Returns `None` if `step` exceeds the
    /// number of recorded moves.
    pub fn positions_at(&self, step: usize) -> Option<Vec<Point>> {
        if step > self.moves.len() {
            return None;
        }
        let mut positions = self.initial_positions.clone();
        for mv in &self.moves[..step] {
            if let Some(slot) = mv.node_id.and_then(|id| positions.get_mut(id)) {
                *slot = mv.to_position;
            }
        }
        Some(positions)
    }

    pub fn to_document(&self) -> ReplayDocument {
        let initial_positions = self
            .initial_positions
            .iter()
            .enumerate()
            .map(|(id, p)| PositionRecord { id, x: p.x, y: p.y })
            .collect();

        let moves = self
            .moves
            .iter()
            .enumerate()
            .map(|(i, m)| MoveRecord {
                step: i + 1,
                node_id: m.wire_node_id(),
                from: m.from_position.into(),
                to: m.to_position.into(),
                intersections_before: m.intersections_before,
                intersections_after: m.intersections_after,
                intersection_reduction: m.intersection_reduction,
                computation_time_ms: m.computation_time_ms,
            })
            .collect();

        ReplayDocument {
            initial_intersections: self.initial_intersections,
            total_moves: self.moves.len(),
            solved: self.is_solved(),
            initial_positions,
            moves,
        }
    }

    /// Pretty-printed JSON of the session. Does not clear it.
    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_document())?)
    }

    pub fn export_json_file(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.export_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use untangle_test::crossing_pair;

    fn started() -> ReplayLogger {
        let graph = crossing_pair();
        let mut replay = ReplayLogger::new();
        replay.start_match(graph.nodes(), graph.edges());
        replay
    }

    fn first_move() -> CpuMove {
        let mut mv = CpuMove::relocate(0, Point::new(50.0, 50.0), Point::new(50.0, 250.0), 1, 0);
        mv.computation_time_ms = 3;
        mv
    }

    #[test]
    fn test_empty_solved_session_exports_no_moves() {
        let graph = untangle_test::triangle();
        let mut replay = ReplayLogger::new();
        replay.start_match(graph.nodes(), graph.edges());

        let doc: serde_json::Value = serde_json::from_str(&replay.export_json().unwrap()).unwrap();
        assert_eq!(doc["solved"], true);
        assert_eq!(doc["moves"], serde_json::json!([]));
        assert_eq!(doc["initial_intersections"], 0);
        assert_eq!(doc["total_moves"], 0);
    }

    #[test]
    fn test_unsolved_until_move_clears_crossings() {
        let mut replay = started();
        assert!(!replay.is_solved());
        assert_eq!(replay.final_intersections(), 1);

        replay.record_move(first_move());
        assert!(replay.is_solved());
        assert_eq!(replay.final_intersections(), 0);
    }

    #[test]
    fn test_export_field_order_and_values() {
        let mut replay = started();
        replay.record_move(first_move());

        let json = replay.export_json().unwrap();
        let keys = [
            "\"initial_intersections\"",
            "\"total_moves\"",
            "\"solved\"",
            "\"initial_positions\"",
            "\"moves\"",
            "\"step\"",
            "\"node_id\"",
            "\"from\"",
            "\"to\"",
            "\"intersections_before\"",
            "\"intersections_after\"",
            "\"intersection_reduction\"",
            "\"computation_time_ms\"",
        ];
        let offsets: Vec<usize> = keys.iter().map(|k| json.find(k).unwrap()).collect();
        assert!(offsets.windows(2).all(|w| w[0] < w[1]), "{json}");

        let doc: ReplayDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(doc.total_moves, 1);
        assert_eq!(doc.initial_positions[3], PositionRecord { id: 3, x: 250.0, y: 50.0 });
        assert_eq!(doc.moves[0].step, 1);
        assert_eq!(doc.moves[0].to, XY { x: 50.0, y: 250.0 });
        assert_eq!(doc.moves[0].computation_time_ms, 3);
    }

    #[test]
    fn test_no_move_exports_sentinel_id() {
        let mut replay = started();
        replay.record_move(CpuMove::none(1));
        assert_eq!(replay.to_document().moves[0].node_id, -1);
        assert!(!replay.is_solved());
        assert_eq!(replay.final_intersections(), 1);
        assert!(replay.export_json().unwrap().contains("\"solved\": false"));
    }

    #[test]
    fn test_move_at_is_one_indexed() {
        let mut replay = started();
        replay.record_move(first_move());
        assert!(replay.move_at(0).is_none());
        assert_eq!(replay.move_at(1), Some(&first_move()));
        assert!(replay.move_at(2).is_none());
    }

    #[test]
    fn test_positions_at_replays_moves() {
        let mut replay = started();
        replay.record_move(first_move());

        let before = replay.positions_at(0).unwrap();
        assert_eq!(before[0], Point::new(50.0, 50.0));
        let after = replay.positions_at(1).unwrap();
        assert_eq!(after[0], Point::new(50.0, 250.0));
        assert!(replay.positions_at(2).is_none());
    }

    #[test]
    fn test_start_match_and_clear_reset_history() {
        let mut replay = started();
        replay.record_move(first_move());

        let graph = crossing_pair();
        replay.start_match(graph.nodes(), graph.edges());
        assert_eq!(replay.total_moves(), 0);
        assert_eq!(replay.edges().len(), 2);

        replay.clear();
        assert!(replay.initial_positions().is_empty());
        assert!(replay.edges().is_empty());
        assert!(replay.is_solved());
    }

    #[test]
    fn test_export_to_file() {
        let mut replay = started();
        replay.record_move(first_move());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("replay.json");

        replay.export_json_file(&path).unwrap();
        let doc: ReplayDocument =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(doc.solved);
    }
}
