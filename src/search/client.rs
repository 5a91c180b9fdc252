//! HTTP client for the hosted search service.
//!
//! Speaks the Typesense-compatible `multi_search` endpoint: one POST
//! carries every group's query, and the response mirrors the request
//! order. Errors propagate to the caller unchanged; there are no retries.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::config::Config;

use super::types::{Hit, SearchRequest, SearchResponse};

/// Caller-side cap so a stuck backend surfaces as a failed cycle
/// instead of a hang.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

const API_KEY_HEADER: &str = "X-TYPESENSE-API-KEY";

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search backend request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("backend response is missing a result for group {0:?}")]
    MissingResult(String),
}

/// Client for the search backend. Cheap to clone is not needed; the app
/// holds it behind the adapter for the process lifetime.
pub struct SearchClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl SearchClient {
    pub fn new(config: &Config) -> Result<Self, SearchError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(SearchClient {
            http,
            base_url: config.base_url(),
            api_key: config.api_key.clone(),
        })
    }

    /// Issue one `multi_search` call covering every request, returning one
    /// response per request in the same order.
    pub async fn multi_search(
        &self,
        requests: &[SearchRequest],
    ) -> Result<Vec<SearchResponse>, SearchError> {
        let url = format!("{}/multi_search", self.base_url);
        let raw: RawMultiResponse = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&search_payload(requests))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        into_responses(raw, requests)
    }

    /// Fetch raw bytes from an arbitrary URL, for lazily loading result
    /// logos. Shares the client and its timeout.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, SearchError> {
        let bytes = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        Ok(bytes.to_vec())
    }
}

/// Build the `multi_search` body: one `searches` entry per request, in
/// request order, with the query text passed through unchanged.
fn search_payload(requests: &[SearchRequest]) -> Value {
    let searches: Vec<Value> = requests
        .iter()
        .map(|request| {
            json!({
                "collection": request.group,
                "q": request.query,
                "query_by": request.params.query_by,
                "num_typos": request.params.num_typos,
                "page": 1,
            })
        })
        .collect();
    json!({ "searches": searches })
}

fn into_responses(
    raw: RawMultiResponse,
    requests: &[SearchRequest],
) -> Result<Vec<SearchResponse>, SearchError> {
    if raw.results.len() != requests.len() {
        let missing = requests
            .get(raw.results.len())
            .map(|request| request.group.clone())
            .unwrap_or_default();
        return Err(SearchError::MissingResult(missing));
    }

    Ok(raw
        .results
        .into_iter()
        .zip(requests)
        .map(|(result, request)| SearchResponse {
            group: request.group.clone(),
            hits: result.hits.into_iter().map(RawHit::into_hit).collect(),
            hit_count: result.found,
            page: result.page,
            processing_time_ms: result.search_time_ms,
        })
        .collect())
}

// Wire shapes, private to the client.

#[derive(Debug, Deserialize)]
struct RawMultiResponse {
    #[serde(default)]
    results: Vec<RawResult>,
}

#[derive(Debug, Deserialize)]
struct RawResult {
    #[serde(default)]
    hits: Vec<RawHit>,
    #[serde(default)]
    found: usize,
    #[serde(default)]
    page: u32,
    #[serde(default)]
    search_time_ms: u64,
}

#[derive(Debug, Deserialize)]
struct RawHit {
    document: Hit,
    #[serde(default)]
    highlights: Vec<RawHighlight>,
}

impl RawHit {
    fn into_hit(self) -> Hit {
        let mut hit = self.document;
        hit.highlight_snippet = self
            .highlights
            .into_iter()
            .find(|highlight| highlight.field == "name")
            .and_then(|highlight| highlight.snippet);
        hit
    }
}

#[derive(Debug, Deserialize)]
struct RawHighlight {
    field: String,
    #[serde(default)]
    snippet: Option<String>,
}
