use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// File name of the precomputed adjacency list inside the raw-data directory.
pub const DATASET_FILE: &str = "structural_network_adjacency_list_20190301.csv";

/// Hard cap on the number of edges kept after filtering.
pub const MAX_FILTERED_EDGES: usize = 1000;

/// One row of the edge list: a hyperlink from one page URL to another.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    #[serde(rename = "source_base_path")]
    pub source: String,
    #[serde(rename = "sink_base_path")]
    pub sink: String,
}

impl Edge {
    pub fn new(source: impl Into<String>, sink: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            sink: sink.into(),
        }
    }

    /// Whether either endpoint URL contains `term` as a case-sensitive substring.
    pub fn matches(&self, term: &str) -> bool {
        self.source.contains(term) || self.sink.contains(term)
    }
}

/// Resolve the dataset file inside a raw-data directory.
pub fn dataset_path(data_dir: &Path) -> PathBuf {
    data_dir.join(DATASET_FILE)
}

/// Load the edge list dataset, dropping exact duplicate rows.
///
/// Columns other than `source_base_path` and `sink_base_path` are ignored.
/// First-occurrence order is preserved.
pub fn load_edges(path: &Path) -> Result<Vec<Edge>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut seen = HashSet::new();
    let mut edges = Vec::new();
    for record in reader.deserialize() {
        let edge: Edge = record?;
        if seen.insert(edge.clone()) {
            edges.push(edge);
        }
    }
    Ok(edges)
}

/// Remove exact duplicate pairs, keeping first-occurrence order.
pub fn dedup_edges(edges: &[Edge]) -> Vec<Edge> {
    let mut seen = HashSet::new();
    edges
        .iter()
        .filter(|edge| seen.insert((*edge).clone()))
        .cloned()
        .collect()
}

/// Filter edges for pages whose URLs contain a substring.
///
/// Keeps only the first [`MAX_FILTERED_EDGES`] matches in original order.
/// The result is a prefix of the matching rows, not a ranked or random
/// subset. No matches yields an empty vector.
pub fn filter_edges(edges: &[Edge], term: &str) -> Vec<Edge> {
    edges
        .iter()
        .filter(|edge| edge.matches(term))
        .take(MAX_FILTERED_EDGES)
        .cloned()
        .collect()
}
