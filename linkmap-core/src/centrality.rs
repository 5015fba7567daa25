//! Centrality measures: ranking pages by structural importance.

use crate::error::AnalysisError;
use crate::graph::LinkGraph;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

/// Damping factor for pagerank (probability of following a link rather
/// than teleporting).
const PAGERANK_DAMPING: f64 = 0.85;
const PAGERANK_MAX_ITERATIONS: usize = 100;
const PAGERANK_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CentralityMeasure {
    Degree,
    Betweenness,
    Pagerank,
}

impl CentralityMeasure {
    pub const ALL: [CentralityMeasure; 3] = [
        CentralityMeasure::Degree,
        CentralityMeasure::Betweenness,
        CentralityMeasure::Pagerank,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CentralityMeasure::Degree => "degree",
            CentralityMeasure::Betweenness => "betweenness",
            CentralityMeasure::Pagerank => "pagerank",
        }
    }
}

impl fmt::Display for CentralityMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CentralityMeasure {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "degree" => Ok(CentralityMeasure::Degree),
            "betweenness" => Ok(CentralityMeasure::Betweenness),
            "pagerank" => Ok(CentralityMeasure::Pagerank),
            other => Err(AnalysisError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

/// One row of a centrality ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedNode {
    pub score: f64,
    pub url: String,
}

/// Score every vertex with the chosen measure, in vertex-index order.
pub fn scores(graph: &LinkGraph, measure: CentralityMeasure) -> Vec<f64> {
    match measure {
        CentralityMeasure::Degree => graph.degrees().iter().map(|&d| d as f64).collect(),
        CentralityMeasure::Betweenness => betweenness(graph),
        CentralityMeasure::Pagerank => pagerank(graph),
    }
}

/// Rank all vertices descending by score.
pub fn rank(graph: &LinkGraph, measure: CentralityMeasure) -> Vec<RankedNode> {
    let values = scores(graph, measure);
    let mut rows: Vec<RankedNode> = graph
        .labels()
        .iter()
        .zip(values)
        .map(|(&url, score)| RankedNode {
            score,
            url: url.to_string(),
        })
        .collect();
    rows.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    rows
}

/// Betweenness centrality via Brandes' algorithm (2001), directed and
/// unnormalised: how many shortest paths pass through each vertex.
fn betweenness(graph: &LinkGraph) -> Vec<f64> {
    let adjacency = graph.out_adjacency();
    let n = adjacency.len();
    let mut betweenness = vec![0.0_f64; n];
    if n < 3 {
        return betweenness;
    }

    for source in 0..n {
        // Forward pass: BFS tracking shortest-path counts and predecessors.
        let mut sigma = vec![0.0_f64; n];
        let mut dist = vec![-1_i64; n];
        let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut order = Vec::with_capacity(n);

        sigma[source] = 1.0;
        dist[source] = 0;
        let mut queue = VecDeque::new();
        queue.push_back(source);

        while let Some(v) = queue.pop_front() {
            order.push(v);
            for &w in &adjacency[v] {
                if dist[w] < 0 {
                    dist[w] = dist[v] + 1;
                    queue.push_back(w);
                }
                if dist[w] == dist[v] + 1 {
                    sigma[w] += sigma[v];
                    predecessors[w].push(v);
                }
            }
        }

        // Backward pass: accumulate dependencies, farthest vertices first.
        let mut delta = vec![0.0_f64; n];
        for &w in order.iter().rev() {
            for &v in &predecessors[w] {
                delta[v] += sigma[v] / sigma[w] * (1.0 + delta[w]);
            }
            if w != source {
                betweenness[w] += delta[w];
            }
        }
    }
    betweenness
}

/// Pagerank by power iteration, dangling mass spread uniformly.
/// Scores sum to 1.
fn pagerank(graph: &LinkGraph) -> Vec<f64> {
    let out = graph.out_adjacency();
    let n = out.len();
    if n == 0 {
        return Vec::new();
    }
    let n_f = n as f64;
    let mut scores = vec![1.0 / n_f; n];

    for _ in 0..PAGERANK_MAX_ITERATIONS {
        let mut next = vec![(1.0 - PAGERANK_DAMPING) / n_f; n];
        let mut dangling = 0.0;
        for v in 0..n {
            if out[v].is_empty() {
                dangling += scores[v];
                continue;
            }
            let share = PAGERANK_DAMPING * scores[v] / out[v].len() as f64;
            for &w in &out[v] {
                next[w] += share;
            }
        }
        let spread = PAGERANK_DAMPING * dangling / n_f;
        for score in &mut next {
            *score += spread;
        }

        let delta: f64 = next
            .iter()
            .zip(&scores)
            .map(|(a, b)| (a - b).abs())
            .sum();
        scores = next;
        if delta < PAGERANK_TOLERANCE {
            break;
        }
    }
    scores
}
