use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("failed to read edge list: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no edges match search term \"{0}\"")]
    NoMatches(String),

    #[error("graph has no vertices")]
    EmptyGraph,

    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("no vertices belong to community {0}")]
    EmptyCommunity(i64),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
