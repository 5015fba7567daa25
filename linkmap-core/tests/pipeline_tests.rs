use linkmap_core::community::{self, CommunityAlgorithm};
use linkmap_core::explore::DEFAULT_SEED;
use linkmap_core::{Edge, LinkGraph, filter_edges};

#[test]
fn test_filter_graph_detect_pipeline() {
    let edges = vec![
        Edge::new("a/tax-info", "b/login"),
        Edge::new("a/tax-info", "c/tax-help"),
        Edge::new("d/unrelated", "e/other"),
    ];

    let filtered = filter_edges(&edges, "tax");
    assert_eq!(filtered.len(), 2);
    assert!(filtered.iter().all(|e| e.matches("tax")));

    let graph = LinkGraph::from_edges(&filtered).unwrap();
    assert_eq!(graph.node_count(), 3);

    let giant = graph.giant_component();
    assert_eq!(giant.node_count(), 3);

    let membership = community::detect(&giant, CommunityAlgorithm::LabelPropagation, DEFAULT_SEED);
    assert_eq!(membership.len(), 3);
    assert!(membership.community_count() <= 3);
    assert!(
        membership
            .assignments()
            .iter()
            .all(|&id| id < membership.community_count())
    );
}
