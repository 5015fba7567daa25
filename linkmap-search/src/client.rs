//! Thin client over the GOV.UK Search API.

use crate::error::{Result, SearchError};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Production search endpoint.
pub const SEARCH_ENDPOINT: &str = "https://www.gov.uk/api/search.json";

const USER_AGENT: &str = concat!("linkmap/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// One search result: a page and its relevance score.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub score: f64,
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<RawResult>,
}

#[derive(Debug, Deserialize)]
struct RawResult {
    #[serde(rename = "_id")]
    id: String,
    combined_score: f64,
}

/// Extract hits from a raw response body, preserving API order.
pub fn parse_results(body: &str) -> Result<Vec<SearchHit>> {
    let response: SearchResponse = serde_json::from_str(body)?;
    Ok(response
        .results
        .into_iter()
        .map(|result| SearchHit {
            score: result.combined_score,
            url: result.id,
        })
        .collect())
}

pub struct SearchClient {
    client: reqwest::Client,
    endpoint: String,
}

impl SearchClient {
    pub fn new() -> Self {
        Self::with_endpoint(SEARCH_ENDPOINT)
    }

    /// Point the client at a different endpoint, mainly for tests.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build http client");
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Search for pages matching `term`, asking for `count` results.
    ///
    /// Any non-200 answer becomes [`SearchError::Api`] carrying the status
    /// code; the body is not inspected in that case.
    pub async fn search(&self, term: &str, count: usize) -> Result<Vec<SearchHit>> {
        let count = count.to_string();
        let url = Url::parse_with_params(
            &self.endpoint,
            [
                ("q", term),
                ("count", count.as_str()),
                ("fields", "content_id"),
            ],
        )?;
        debug!(%url, "querying search API");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(SearchError::Api {
                status: status.as_u16(),
            });
        }
        let body = response.text().await?;
        parse_results(&body)
    }
}

impl Default for SearchClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_results_preserves_order() {
        let body = r#"{
            "results": [
                {"_id": "/childcare", "combined_score": 12.5, "content_id": "abc"},
                {"_id": "/childcare/costs", "combined_score": 3.25, "content_id": "def"}
            ],
            "total": 2
        }"#;
        let hits = parse_results(body).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].url, "/childcare");
        assert_eq!(hits[0].score, 12.5);
        assert_eq!(hits[1].url, "/childcare/costs");
    }

    #[test]
    fn test_parse_results_empty() {
        let hits = parse_results(r#"{"results": []}"#).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_parse_results_malformed_body() {
        let err = parse_results("not json").unwrap_err();
        assert!(matches!(err, SearchError::Parse(_)));
    }

    #[test]
    fn test_parse_results_missing_score_is_an_error() {
        let body = r#"{"results": [{"_id": "/childcare"}]}"#;
        assert!(matches!(
            parse_results(body).unwrap_err(),
            SearchError::Parse(_)
        ));
    }
}
