//! Serializable graph snapshots.
//!
//! Hosts exchange graphs as `{"nodes": [{id, x, y, radius, adjacency}],
//! "edges": [{u_id, v_id}]}`. Converting a snapshot into a [`Graph`]
//! validates the dense-id contract.

use std::path::Path;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::Result;
use crate::geometry::Point;
use crate::graph::{Edge, Graph, Node, NodeId, DEFAULT_NODE_RADIUS};

/// A node in wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    pub x: f32,
    pub y: f32,
    #[serde(default = "default_radius")]
    pub radius: f32,
    #[serde(default)]
    pub adjacency: Vec<NodeId>,
}

fn default_radius() -> f32 {
    DEFAULT_NODE_RADIUS
}

/// An edge in wire format.
pub type EdgeRecord = Edge;

/// A complete graph in wire format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

impl GraphSnapshot {
    pub fn from_graph(graph: &Graph) -> Self {
        let nodes = graph
            .nodes()
            .iter()
            .map(|n| NodeRecord {
                id: n.id,
                x: n.position.x,
                y: n.position.y,
                radius: n.radius,
                adjacency: n.adjacency.to_vec(),
            })
            .collect();

        Self {
            nodes,
            edges: graph.edges().to_vec(),
        }
    }

    /// Validates and converts into a [`Graph`].
    ///
    /// Nodes whose adjacency list is empty get it rebuilt from the edge list,
    /// so hosts may send edges only.
    pub fn into_graph(self) -> Result<Graph> {
        let rebuild = self.nodes.iter().all(|n| n.adjacency.is_empty());

        let mut nodes: Vec<Node> = self
            .nodes
            .into_iter()
            .map(|r| Node {
                id: r.id,
                position: Point::new(r.x, r.y),
                radius: r.radius,
                adjacency: SmallVec::from_vec(r.adjacency),
            })
            .collect();

        if rebuild {
            let n = nodes.len();
            for edge in &self.edges {
                if edge.u < n && edge.v < n {
                    nodes[edge.u].adjacency.push(edge.v);
                    nodes[edge.v].adjacency.push(edge.u);
                }
            }
        }

        Graph::from_parts(nodes, self.edges)
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl From<&Graph> for GraphSnapshot {
    fn from(graph: &Graph) -> Self {
        Self::from_graph(graph)
    }
}

impl TryFrom<GraphSnapshot> for Graph {
    type Error = crate::error::UntangleError;

    fn try_from(snapshot: GraphSnapshot) -> Result<Self> {
        snapshot.into_graph()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UntangleError;

    #[test]
    fn test_parse_wire_format() {
        let json = r#"{
            "nodes": [
                {"id": 0, "x": 0.0, "y": 0.0, "radius": 15.0, "adjacency": [1]},
                {"id": 1, "x": 10.0, "y": 0.0, "radius": 15.0, "adjacency": [0]}
            ],
            "edges": [{"u_id": 0, "v_id": 1}]
        }"#;

        let graph = GraphSnapshot::from_json_str(json).unwrap().into_graph().unwrap();
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edges()[0], Edge::new(0, 1));
        assert_eq!(graph.nodes()[1].adjacency.as_slice(), &[0]);
    }

    #[test]
    fn test_adjacency_rebuilt_from_edges() {
        let json = r#"{
            "nodes": [{"id": 0, "x": 0, "y": 0}, {"id": 1, "x": 1, "y": 1}, {"id": 2, "x": 2, "y": 0}],
            "edges": [{"u_id": 0, "v_id": 1}, {"u_id": 1, "v_id": 2}]
        }"#;

        let graph = GraphSnapshot::from_json_str(json).unwrap().into_graph().unwrap();
        assert_eq!(graph.nodes()[1].degree(), 2);
        assert_eq!(graph.nodes()[0].radius, DEFAULT_NODE_RADIUS);
    }

    #[test]
    fn test_out_of_range_edge_is_invalid_graph() {
        let json = r#"{
            "nodes": [{"id": 0, "x": 0, "y": 0}],
            "edges": [{"u_id": 0, "v_id": 5}]
        }"#;

        let err = GraphSnapshot::from_json_str(json)
            .unwrap()
            .into_graph()
            .unwrap_err();
        assert!(matches!(err, UntangleError::InvalidGraph(_)));
    }

    #[test]
    fn test_snapshot_preserves_graph() {
        let mut graph = Graph::new();
        let a = graph.add_node(Point::new(1.0, 2.0));
        let b = graph.add_node(Point::new(3.0, 4.0));
        graph.add_edge(a, b).unwrap();

        let back = GraphSnapshot::from_graph(&graph).into_graph().unwrap();
        assert_eq!(back, graph);
    }
}
