//! Graph model: nodes, undirected edges and the owning `Graph`.
//!
//! A node's `id` always equals its index in the node sequence. Solvers index
//! `nodes[edge.u]` directly, so every entry point validates that contract
//! with [`validate_graph`] before searching.

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{Result, UntangleError};
use crate::geometry::{check_intersection, count_intersections, point_to_segment_distance, Point};
use crate::moves::CpuMove;

/// Dense node identifier; equal to the node's index.
pub type NodeId = usize;

/// Hit-test radius used when a host does not specify one.
pub const DEFAULT_NODE_RADIUS: f32 = 15.0;

/// A vertex of the puzzle graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub position: Point,
    pub radius: f32,
    /// Ids of adjacent nodes. Symmetric across the graph.
    pub adjacency: SmallVec<[NodeId; 8]>,
}

impl Node {
    pub fn new(id: NodeId, position: Point) -> Self {
        Self {
            id,
            position,
            radius: DEFAULT_NODE_RADIUS,
            adjacency: SmallVec::new(),
        }
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    /// Number of neighbors.
    pub fn degree(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns true if `point` lies within this node's hit radius.
    pub fn contains_point(&self, point: Point) -> bool {
        (point - self.position).magnitude_squared() <= self.radius * self.radius
    }
}

/// An undirected edge between two distinct nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    #[serde(rename = "u_id")]
    pub u: NodeId,
    #[serde(rename = "v_id")]
    pub v: NodeId,
}

impl Edge {
    pub const fn new(u: NodeId, v: NodeId) -> Self {
        Self { u, v }
    }

    /// Returns true if the edges have any endpoint in common.
    #[inline]
    pub fn shares_vertex(&self, other: &Edge) -> bool {
        self.u == other.u || self.u == other.v || self.v == other.u || self.v == other.v
    }

    /// Returns true if this edge joins `a` and `b` in either direction.
    pub fn connects(&self, a: NodeId, b: NodeId) -> bool {
        (self.u == a && self.v == b) || (self.u == b && self.v == a)
    }

    pub fn touches(&self, node: NodeId) -> bool {
        self.u == node || self.v == node
    }
}

/// Checks the contract every solver relies on.
///
/// - `nodes[i].id == i` for every node
/// - edge endpoints are in range and distinct
/// - adjacency ids are in range and symmetric
///
/// # Errors
///
/// Returns [`UntangleError::InvalidGraph`] describing the first violation.
pub fn validate_graph(nodes: &[Node], edges: &[Edge]) -> Result<()> {
    let n = nodes.len();

    for (index, node) in nodes.iter().enumerate() {
        if node.id != index {
            return Err(UntangleError::InvalidGraph(format!(
                "node at index {} has id {}",
                index, node.id
            )));
        }
        for &neighbor in &node.adjacency {
            if neighbor >= n {
                return Err(UntangleError::InvalidGraph(format!(
                    "node {} lists neighbor {} but only {} nodes exist",
                    index, neighbor, n
                )));
            }
            if neighbor == index {
                return Err(UntangleError::InvalidGraph(format!(
                    "node {} lists itself as a neighbor",
                    index
                )));
            }
            if !nodes[neighbor].adjacency.contains(&index) {
                return Err(UntangleError::InvalidGraph(format!(
                    "adjacency is not symmetric: {} -> {} has no reverse entry",
                    index, neighbor
                )));
            }
        }
    }

    for (index, edge) in edges.iter().enumerate() {
        if edge.u >= n || edge.v >= n {
            return Err(UntangleError::InvalidGraph(format!(
                "edge {} ({}, {}) references a node outside 0..{}",
                index, edge.u, edge.v, n
            )));
        }
        if edge.u == edge.v {
            return Err(UntangleError::InvalidGraph(format!(
                "edge {} is a self-loop on node {}",
                index, edge.u
            )));
        }
    }

    Ok(())
}

/// An owned node/edge embedding.
///
/// # Example
///
/// ```
/// use untangle_core::{Graph, Point};
///
/// let mut graph = Graph::new();
/// let a = graph.add_node(Point::new(0.0, 0.0));
/// let b = graph.add_node(Point::new(10.0, 10.0));
/// let c = graph.add_node(Point::new(0.0, 10.0));
/// let d = graph.add_node(Point::new(10.0, 0.0));
/// graph.add_edge(a, b).unwrap();
/// graph.add_edge(c, d).unwrap();
///
/// assert_eq!(graph.intersection_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from existing parts after validating them.
    pub fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self> {
        validate_graph(&nodes, &edges)?;
        Ok(Self { nodes, edges })
    }

    /// Re-checks the id and adjacency invariants.
    pub fn validate(&self) -> Result<()> {
        validate_graph(&self.nodes, &self.edges)
    }

    pub fn into_parts(self) -> (Vec<Node>, Vec<Edge>) {
        (self.nodes, self.edges)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Appends a node and returns its id.
    pub fn add_node(&mut self, position: Point) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node::new(id, position));
        id
    }

    /// Connects `u` and `v`.
    ///
    /// Returns `Ok(false)` if the edge already exists.
    ///
    /// # Errors
    ///
    /// Returns [`UntangleError::InvalidGraph`] for self-loops or unknown ids.
    pub fn add_edge(&mut self, u: NodeId, v: NodeId) -> Result<bool> {
        let n = self.nodes.len();
        if u >= n || v >= n {
            return Err(UntangleError::InvalidGraph(format!(
                "cannot connect ({}, {}): only {} nodes exist",
                u, v, n
            )));
        }
        if u == v {
            return Err(UntangleError::InvalidGraph(format!(
                "cannot connect node {} to itself",
                u
            )));
        }
        if self.has_edge(u, v) {
            return Ok(false);
        }

        self.edges.push(Edge::new(u, v));
        self.nodes[u].adjacency.push(v);
        self.nodes[v].adjacency.push(u);
        Ok(true)
    }

    /// Removes the edge joining `u` and `v`, keeping adjacency in sync.
    ///
    /// Returns false if no such edge exists.
    pub fn remove_edge(&mut self, u: NodeId, v: NodeId) -> bool {
        let Some(index) = self.edges.iter().position(|e| e.connects(u, v)) else {
            return false;
        };
        self.edges.remove(index);
        self.nodes[u].adjacency.retain(|n| *n != v);
        self.nodes[v].adjacency.retain(|n| *n != u);
        true
    }

    pub fn has_edge(&self, u: NodeId, v: NodeId) -> bool {
        self.edges.iter().any(|e| e.connects(u, v))
    }

    pub fn position(&self, id: NodeId) -> Option<Point> {
        self.nodes.get(id).map(|n| n.position)
    }

    /// Moves a node. Returns false for an unknown id.
    pub fn set_position(&mut self, id: NodeId, position: Point) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) => {
                node.position = position;
                true
            }
            None => false,
        }
    }

    pub fn positions(&self) -> Vec<Point> {
        self.nodes.iter().map(|n| n.position).collect()
    }

    /// Replaces every node position. The slice must match the node count.
    pub fn set_positions(&mut self, positions: &[Point]) -> Result<()> {
        if positions.len() != self.nodes.len() {
            return Err(UntangleError::InvalidGraph(format!(
                "expected {} positions, got {}",
                self.nodes.len(),
                positions.len()
            )));
        }
        for (node, &position) in self.nodes.iter_mut().zip(positions) {
            node.position = position;
        }
        Ok(())
    }

    /// Edge endpoints as `(u, v)` pairs.
    pub fn edge_pairs(&self) -> Vec<(NodeId, NodeId)> {
        self.edges.iter().map(|e| (e.u, e.v)).collect()
    }

    pub fn intersection_count(&self) -> usize {
        count_intersections(&self.nodes, &self.edges)
    }

    /// Per-edge flag: true if the edge crosses any other edge.
    pub fn intersecting_edges(&self) -> Vec<bool> {
        let mut flags = vec![false; self.edges.len()];

        for i in 0..self.edges.len() {
            for j in (i + 1)..self.edges.len() {
                let (e1, e2) = (&self.edges[i], &self.edges[j]);
                if e1.shares_vertex(e2) {
                    continue;
                }
                if check_intersection(
                    self.nodes[e1.u].position,
                    self.nodes[e1.v].position,
                    self.nodes[e2.u].position,
                    self.nodes[e2.v].position,
                ) {
                    flags[i] = true;
                    flags[j] = true;
                }
            }
        }

        flags
    }

    /// True if no pair of edges is vertex-disjoint, so the count is always 0.
    pub fn is_degenerate(&self) -> bool {
        !self.edges.iter().enumerate().any(|(i, e1)| {
            self.edges[i + 1..]
                .iter()
                .any(|e2| !e1.shares_vertex(e2))
        })
    }

    /// Topmost node whose hit radius contains `point`.
    ///
    /// Later nodes are drawn above earlier ones, so the search runs backwards.
    pub fn node_at(&self, point: Point) -> Option<NodeId> {
        self.nodes
            .iter()
            .rev()
            .find(|n| n.contains_point(point))
            .map(|n| n.id)
    }

    /// Index of the edge closest to `point`, if within `max_distance`.
    pub fn nearest_edge(&self, point: Point, max_distance: f32) -> Option<usize> {
        self.edges
            .iter()
            .enumerate()
            .map(|(i, e)| {
                let d = point_to_segment_distance(
                    point,
                    self.nodes[e.u].position,
                    self.nodes[e.v].position,
                );
                (i, d)
            })
            .filter(|(_, d)| *d <= max_distance)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }

    /// Applies a solver move to this graph.
    ///
    /// Invalid (`none`) moves are ignored and return `Ok(false)`.
    pub fn apply_move(&mut self, mv: &CpuMove) -> Result<bool> {
        let Some(id) = mv.node_id else {
            return Ok(false);
        };
        if !self.set_position(id, mv.to_position) {
            return Err(UntangleError::InvalidGraph(format!(
                "move targets node {} but only {} nodes exist",
                id,
                self.nodes.len()
            )));
        }
        Ok(true)
    }
}
