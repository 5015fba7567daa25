pub mod centrality;
pub mod community;
pub mod edgelist;
pub mod error;
pub mod explore;
pub mod figure;
pub mod graph;
pub mod layout;
pub mod palette;

pub use centrality::{CentralityMeasure, RankedNode};
pub use community::{CommunityAlgorithm, Membership};
pub use edgelist::{Edge, filter_edges, load_edges};
pub use error::AnalysisError;
pub use explore::{CommunityFigure, FigureOptions, community_figure, top_nodes};
pub use figure::Figure;
pub use graph::LinkGraph;
