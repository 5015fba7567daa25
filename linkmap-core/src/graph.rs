use crate::edgelist::Edge;
use crate::error::{AnalysisError, Result};
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::unionfind::UnionFind;
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

/// Directed graph over page URLs, derived from a filtered edge table.
///
/// Vertices are keyed by URL and inserted once; parallel edges in the
/// input collapse to a single edge.
#[derive(Debug, Clone)]
pub struct LinkGraph {
    graph: DiGraph<String, ()>,
}

impl LinkGraph {
    /// Build a graph from an edge list.
    ///
    /// An empty edge list is an explicit error rather than an empty graph,
    /// so callers surface "no data matches" instead of an obscure failure
    /// further down the pipeline.
    pub fn from_edges(edges: &[Edge]) -> Result<Self> {
        if edges.is_empty() {
            return Err(AnalysisError::EmptyGraph);
        }

        let mut graph = DiGraph::new();
        let mut indices: HashMap<&str, NodeIndex> = HashMap::new();
        for edge in edges {
            let source = *indices
                .entry(edge.source.as_str())
                .or_insert_with(|| graph.add_node(edge.source.clone()));
            let sink = *indices
                .entry(edge.sink.as_str())
                .or_insert_with(|| graph.add_node(edge.sink.clone()));
            if graph.find_edge(source, sink).is_none() {
                graph.add_edge(source, sink, ());
            }
        }
        Ok(Self { graph })
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// URL labels in vertex-index order.
    pub fn labels(&self) -> Vec<&str> {
        self.graph
            .node_indices()
            .map(|idx| self.graph[idx].as_str())
            .collect()
    }

    /// Edges as index pairs into the label array.
    pub fn edge_endpoints(&self) -> Vec<(usize, usize)> {
        self.graph
            .edge_references()
            .map(|edge| (edge.source().index(), edge.target().index()))
            .collect()
    }

    /// Out-degree per vertex, in vertex-index order.
    pub fn out_degrees(&self) -> Vec<usize> {
        self.graph
            .node_indices()
            .map(|idx| {
                self.graph
                    .neighbors_directed(idx, Direction::Outgoing)
                    .count()
            })
            .collect()
    }

    /// Total degree (in + out) per vertex, in vertex-index order.
    pub fn degrees(&self) -> Vec<usize> {
        self.graph
            .node_indices()
            .map(|idx| {
                self.graph.edges_directed(idx, Direction::Outgoing).count()
                    + self.graph.edges_directed(idx, Direction::Incoming).count()
            })
            .collect()
    }

    /// Largest weakly-connected component as a new graph.
    ///
    /// All smaller components are discarded; ties break on whichever root
    /// the union-find settles on first.
    pub fn giant_component(&self) -> LinkGraph {
        let n = self.graph.node_count();
        let mut uf = UnionFind::new(n);
        for edge in self.graph.edge_references() {
            uf.union(edge.source().index(), edge.target().index());
        }

        let mut sizes: HashMap<usize, usize> = HashMap::new();
        for vertex in 0..n {
            *sizes.entry(uf.find(vertex)).or_default() += 1;
        }
        let giant_root = sizes
            .iter()
            .max_by_key(|&(_, &size)| size)
            .map(|(&root, _)| root)
            .unwrap_or(0);

        let kept = self.graph.filter_map(
            |idx, label| (uf.find(idx.index()) == giant_root).then(|| label.clone()),
            |_, _| Some(()),
        );
        Self { graph: kept }
    }

    /// Subgraph induced by the vertices flagged in `keep` (indexed by
    /// vertex index). Retained vertices keep their relative order.
    pub(crate) fn induced_subgraph(&self, keep: &[bool]) -> LinkGraph {
        let kept = self.graph.filter_map(
            |idx, label| keep[idx.index()].then(|| label.clone()),
            |_, _| Some(()),
        );
        Self { graph: kept }
    }

    /// Undirected adjacency lists, index-based. Used by the analysis
    /// passes, which all ignore edge direction.
    pub(crate) fn undirected_adjacency(&self) -> Vec<Vec<usize>> {
        let mut adjacency = vec![Vec::new(); self.graph.node_count()];
        for edge in self.graph.edge_references() {
            let (a, b) = (edge.source().index(), edge.target().index());
            adjacency[a].push(b);
            if a != b {
                adjacency[b].push(a);
            }
        }
        adjacency
    }

    /// Directed out-adjacency lists, index-based.
    pub(crate) fn out_adjacency(&self) -> Vec<Vec<usize>> {
        let mut adjacency = vec![Vec::new(); self.graph.node_count()];
        for edge in self.graph.edge_references() {
            adjacency[edge.source().index()].push(edge.target().index());
        }
        adjacency
    }
}
