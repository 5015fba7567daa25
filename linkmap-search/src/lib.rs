//! Client for the GOV.UK Search API.

pub mod client;
pub mod error;

pub use client::{SEARCH_ENDPOINT, SearchClient, SearchHit, parse_results};
pub use error::SearchError;
