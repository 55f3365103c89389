//! Spatial partitions of node ids.

use untangle_core::{Edge, Node, NodeId, Point};

/// A group of node ids and the axis-aligned box around their positions.
///
/// The box is computed at construction and never updated; rebuild the
/// partition after moving its nodes. An empty partition has an inverted
/// box (`x_min > x_max`).
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    pub node_indices: Vec<NodeId>,
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
}

impl Partition {
    /// Wraps `node_indices` and computes their bounding box.
    pub fn new(node_indices: Vec<NodeId>, nodes: &[Node]) -> Self {
        let mut partition = Self {
            node_indices,
            x_min: f32::MAX,
            x_max: f32::MIN,
            y_min: f32::MAX,
            y_max: f32::MIN,
        };
        for &index in &partition.node_indices {
            let p = nodes[index].position;
            partition.x_min = partition.x_min.min(p.x);
            partition.x_max = partition.x_max.max(p.x);
            partition.y_min = partition.y_min.min(p.y);
            partition.y_max = partition.y_max.max(p.y);
        }
        partition
    }

    /// Every node in `nodes`.
    pub fn all(nodes: &[Node]) -> Self {
        Self::new((0..nodes.len()).collect(), nodes)
    }

    pub fn len(&self) -> usize {
        self.node_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_indices.is_empty()
    }

    pub fn width(&self) -> f32 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f32 {
        self.y_max - self.y_min
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }

    /// Splits at the median x-coordinate.
    ///
    /// Members are sorted by `(x, id)`; the first `len / 2` go left and the
    /// rest go right, so an odd count puts the extra node on the right.
    pub fn split(&self, nodes: &[Node]) -> (Partition, Partition) {
        let mut by_x: Vec<(f32, NodeId)> = self
            .node_indices
            .iter()
            .map(|&i| (nodes[i].position.x, i))
            .collect();
        by_x.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        let midpoint = by_x.len() / 2;
        let left = by_x[..midpoint].iter().map(|&(_, i)| i).collect();
        let right = by_x[midpoint..].iter().map(|&(_, i)| i).collect();

        (Partition::new(left, nodes), Partition::new(right, nodes))
    }

    /// Edges with at least one endpoint in this partition.
    pub fn relevant_edges(&self, edges: &[Edge], node_count: usize) -> Vec<Edge> {
        let mut member = vec![false; node_count];
        for &index in &self.node_indices {
            if let Some(flag) = member.get_mut(index) {
                *flag = true;
            }
        }

        let inside = |id: NodeId| member.get(id).copied().unwrap_or(false);
        edges
            .iter()
            .filter(|e| inside(e.u) || inside(e.v))
            .copied()
            .collect()
    }
}

/// Vertical line halfway between two sides of a split.
pub fn split_line(left: &Partition, right: &Partition) -> f32 {
    (left.x_max + right.x_min) / 2.0
}
