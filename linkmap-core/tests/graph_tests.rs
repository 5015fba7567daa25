use linkmap_core::{AnalysisError, Edge, LinkGraph};

fn graph_of(pairs: &[(&str, &str)]) -> LinkGraph {
    let edges: Vec<Edge> = pairs.iter().map(|&(a, b)| Edge::new(a, b)).collect();
    LinkGraph::from_edges(&edges).unwrap()
}

#[test]
fn test_empty_edge_list_is_an_error() {
    let err = LinkGraph::from_edges(&[]).unwrap_err();
    assert!(matches!(err, AnalysisError::EmptyGraph));
}

#[test]
fn test_vertices_inserted_once() {
    let graph = graph_of(&[("/a", "/b"), ("/b", "/c"), ("/a", "/c")]);
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 3);
}

#[test]
fn test_duplicate_pairs_collapse() {
    let graph = graph_of(&[("/a", "/b"), ("/a", "/b"), ("/a", "/b")]);
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn test_reversed_pair_is_a_distinct_edge() {
    let graph = graph_of(&[("/a", "/b"), ("/b", "/a")]);
    assert_eq!(graph.edge_count(), 2);
}

#[test]
fn test_giant_component_keeps_largest() {
    // {a, b, c} versus {d, e}.
    let graph = graph_of(&[("/a", "/b"), ("/b", "/c"), ("/d", "/e")]);
    let giant = graph.giant_component();
    assert_eq!(giant.node_count(), 3);
    assert_eq!(giant.edge_count(), 2);
    let labels = giant.labels();
    assert!(labels.contains(&"/a") && labels.contains(&"/b") && labels.contains(&"/c"));
}

#[test]
fn test_giant_component_ignores_direction() {
    // No directed path crosses b, but a-b-c is one weak component.
    let graph = graph_of(&[("/a", "/b"), ("/c", "/b"), ("/d", "/e")]);
    let giant = graph.giant_component();
    assert_eq!(giant.node_count(), 3);
}

#[test]
fn test_giant_component_of_connected_graph_is_identity() {
    let graph = graph_of(&[("/a", "/b"), ("/b", "/c")]);
    let giant = graph.giant_component();
    assert_eq!(giant.node_count(), graph.node_count());
    assert_eq!(giant.edge_count(), graph.edge_count());
}

#[test]
fn test_degrees_count_both_directions() {
    let graph = graph_of(&[("/a", "/b"), ("/c", "/b")]);
    let labels = graph.labels();
    let degrees = graph.degrees();
    let of = |name: &str| degrees[labels.iter().position(|&l| l == name).unwrap()];
    assert_eq!(of("/b"), 2);
    assert_eq!(of("/a"), 1);

    let out = graph.out_degrees();
    let out_of = |name: &str| out[labels.iter().position(|&l| l == name).unwrap()];
    assert_eq!(out_of("/b"), 0);
    assert_eq!(out_of("/a"), 1);
}
