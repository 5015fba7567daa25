//! High-level exploration pipeline: from a raw edge table to a rendered
//! community figure or a centrality ranking.

use crate::centrality::{self, CentralityMeasure, RankedNode};
use crate::community::{self, CommunityAlgorithm};
use crate::edgelist::{Edge, filter_edges};
use crate::error::{AnalysisError, Result};
use crate::figure::{Figure, assemble_figure};
use crate::graph::LinkGraph;
use crate::layout::{self, fruchterman_reingold};
use crate::palette::cluster_palette;
use tracing::{debug, info};

/// Seed used when the caller has no preference, so repeat runs of the
/// same query produce the same picture.
pub const DEFAULT_SEED: u64 = 2000;

/// Everything that shapes a community figure.
#[derive(Debug, Clone)]
pub struct FigureOptions {
    pub search_term: String,
    pub algorithm: CommunityAlgorithm,
    /// Community to zoom into; negative keeps the whole component.
    pub community_filter: i64,
    pub display_centrality: bool,
    pub seed: u64,
    pub layout_iterations: usize,
}

impl Default for FigureOptions {
    fn default() -> Self {
        Self {
            search_term: "childcare".to_string(),
            algorithm: CommunityAlgorithm::LabelPropagation,
            community_filter: -1,
            display_centrality: false,
            seed: DEFAULT_SEED,
            layout_iterations: layout::DEFAULT_ITERATIONS,
        }
    }
}

/// A figure plus the headline numbers behind it.
#[derive(Debug, Clone)]
pub struct CommunityFigure {
    pub figure: Figure,
    pub vertex_count: usize,
    pub edge_count: usize,
    pub community_count: usize,
}

/// Build a community figure for the pages matching a search term.
///
/// The pipeline: filter the edge table, build the directed graph, keep
/// its giant weak component, detect communities, optionally zoom into
/// one of them, lay the result out, and assemble the traces. Marker
/// colours encode community membership on the full component; when a
/// single community is selected every marker renders in the default
/// colour instead.
pub fn community_figure(edges: &[Edge], options: &FigureOptions) -> Result<CommunityFigure> {
    let matched = filter_edges(edges, &options.search_term);
    if matched.is_empty() {
        return Err(AnalysisError::NoMatches(options.search_term.clone()));
    }
    debug!(
        term = %options.search_term,
        edges = matched.len(),
        "filtered edge table"
    );

    let graph = LinkGraph::from_edges(&matched)?.giant_component();
    let membership = community::detect(&graph, options.algorithm, options.seed);
    let (graph, membership) =
        community::filter_community(&graph, &membership, options.community_filter)?;
    info!(
        vertices = graph.node_count(),
        edges = graph.edge_count(),
        communities = membership.community_count(),
        "analysed giant component"
    );

    let points = fruchterman_reingold(&graph, options.seed, options.layout_iterations);

    let colors = (options.community_filter < 0).then(|| {
        let palette = cluster_palette(membership.community_count());
        membership
            .assignments()
            .iter()
            .map(|&c| palette[c].clone())
            .collect::<Vec<String>>()
    });
    let degrees = options.display_centrality.then(|| graph.out_degrees());

    let figure = assemble_figure(
        &graph.labels(),
        &graph.edge_endpoints(),
        &points,
        colors.as_deref(),
        degrees.as_deref(),
        options.display_centrality,
    );

    Ok(CommunityFigure {
        figure,
        vertex_count: graph.node_count(),
        edge_count: graph.edge_count(),
        community_count: membership.community_count(),
    })
}

/// Rank the giant component of the matching pages by a centrality
/// measure and return the top `limit` rows.
pub fn top_nodes(
    edges: &[Edge],
    search_term: &str,
    measure: CentralityMeasure,
    limit: usize,
) -> Result<Vec<RankedNode>> {
    let matched = filter_edges(edges, search_term);
    if matched.is_empty() {
        return Err(AnalysisError::NoMatches(search_term.to_string()));
    }

    let graph = LinkGraph::from_edges(&matched)?.giant_component();
    debug!(
        term = %search_term,
        measure = %measure,
        vertices = graph.node_count(),
        "ranking giant component"
    );
    let mut ranked = centrality::rank(&graph, measure);
    ranked.truncate(limit);
    Ok(ranked)
}
