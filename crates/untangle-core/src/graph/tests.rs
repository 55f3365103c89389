//! Tests for the graph model.

use super::*;
use crate::moves::CpuMove;

fn crossing_pair() -> Graph {
    let mut graph = Graph::new();
    for (x, y) in [(0.0, 0.0), (10.0, 10.0), (0.0, 10.0), (10.0, 0.0)] {
        graph.add_node(Point::new(x, y));
    }
    graph.add_edge(0, 1).unwrap();
    graph.add_edge(2, 3).unwrap();
    graph
}

#[test]
fn test_add_edge_keeps_adjacency_symmetric() {
    let graph = crossing_pair();
    assert_eq!(graph.nodes()[0].adjacency.as_slice(), &[1]);
    assert_eq!(graph.nodes()[1].adjacency.as_slice(), &[0]);
    assert!(graph.validate().is_ok());
}

#[test]
fn test_add_edge_rejects_duplicates_and_self_loops() {
    let mut graph = crossing_pair();
    assert!(!graph.add_edge(1, 0).unwrap());
    assert_eq!(graph.edge_count(), 2);
    assert!(matches!(graph.add_edge(2, 2), Err(UntangleError::InvalidGraph(_))));
    assert!(matches!(graph.add_edge(0, 9), Err(UntangleError::InvalidGraph(_))));
}

#[test]
fn test_remove_edge() {
    let mut graph = crossing_pair();
    assert!(graph.remove_edge(1, 0));
    assert!(!graph.remove_edge(1, 0));
    assert!(graph.nodes()[0].adjacency.is_empty());
    assert_eq!(graph.intersection_count(), 0);
}

#[test]
fn test_validate_rejects_non_dense_ids() {
    let nodes = vec![Node::new(0, Point::ORIGIN), Node::new(5, Point::ORIGIN)];
    let err = validate_graph(&nodes, &[]).unwrap_err();
    assert!(matches!(err, UntangleError::InvalidGraph(_)));
}

#[test]
fn test_validate_rejects_out_of_range_edges() {
    let nodes = vec![Node::new(0, Point::ORIGIN), Node::new(1, Point::ORIGIN)];
    assert!(validate_graph(&nodes, &[Edge::new(0, 2)]).is_err());
    assert!(validate_graph(&nodes, &[Edge::new(1, 1)]).is_err());
}

#[test]
fn test_validate_rejects_asymmetric_adjacency() {
    let mut nodes = vec![Node::new(0, Point::ORIGIN), Node::new(1, Point::ORIGIN)];
    nodes[0].adjacency.push(1);
    assert!(validate_graph(&nodes, &[Edge::new(0, 1)]).is_err());
}

#[test]
fn test_intersecting_edges_flags() {
    let mut graph = crossing_pair();
    let e = graph.add_node(Point::new(20.0, 20.0));
    graph.add_edge(1, e).unwrap();

    assert_eq!(graph.intersecting_edges(), vec![true, true, false]);
}

#[test]
fn test_is_degenerate() {
    let mut graph = Graph::new();
    for (x, y) in [(0.0, 0.0), (5.0, 0.0), (0.0, 5.0)] {
        graph.add_node(Point::new(x, y));
    }
    graph.add_edge(0, 1).unwrap();
    graph.add_edge(1, 2).unwrap();
    graph.add_edge(2, 0).unwrap();
    assert!(graph.is_degenerate());
    assert!(!crossing_pair().is_degenerate());
}

#[test]
fn test_node_at_prefers_topmost() {
    let mut graph = Graph::new();
    graph.add_node(Point::new(0.0, 0.0));
    graph.add_node(Point::new(5.0, 0.0));

    assert_eq!(graph.node_at(Point::new(3.0, 0.0)), Some(1));
    assert_eq!(graph.node_at(Point::new(-14.0, 0.0)), Some(0));
    assert_eq!(graph.node_at(Point::new(100.0, 100.0)), None);
}

#[test]
fn test_nearest_edge() {
    let graph = crossing_pair();
    // Point next to edge 2-3 (from (0,10) to (10,0)) near its top-left end.
    assert_eq!(graph.nearest_edge(Point::new(1.0, 10.0), 2.0), Some(1));
    assert_eq!(graph.nearest_edge(Point::new(50.0, 50.0), 2.0), None);
}

#[test]
fn test_apply_move() {
    let mut graph = crossing_pair();
    let mv = CpuMove::relocate(3, Point::new(10.0, 0.0), Point::new(20.0, 0.0), 1, 0);
    assert!(graph.apply_move(&mv).unwrap());
    assert_eq!(graph.position(3), Some(Point::new(20.0, 0.0)));
    assert!(!graph.apply_move(&CpuMove::none(0)).unwrap());

    let bad = CpuMove::relocate(42, Point::ORIGIN, Point::ORIGIN, 0, 0);
    assert!(graph.apply_move(&bad).is_err());
}

#[test]
fn test_set_positions_length_checked() {
    let mut graph = crossing_pair();
    assert!(graph.set_positions(&[Point::ORIGIN]).is_err());
    let positions = vec![Point::new(1.0, 1.0); 4];
    graph.set_positions(&positions).unwrap();
    assert_eq!(graph.positions(), positions);
}
