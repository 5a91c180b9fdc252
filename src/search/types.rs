//! Shared types for backend communication

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Parameters forwarded with every search, fixed at startup from config.
#[derive(Debug, Clone, Serialize)]
pub struct SearchParams {
    pub query_by: String,
    pub num_typos: u32,
}

/// One outgoing query for one result group. Built per keystroke per group.
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    pub group: String,
    pub query: String,
    pub params: SearchParams,
}

impl SearchRequest {
    /// Whether this request carries no usable query text.
    pub fn is_blank(&self) -> bool {
        self.query.trim().is_empty()
    }
}

/// One result item as returned by the backend. Fields beyond the ones the
/// UI renders are kept opaque in `extra`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Hit {
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Backend-provided highlight snippet for the name field, with
    /// `<mark>` tags around the matched substring.
    #[serde(skip)]
    pub highlight_snippet: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// The results for one group, immutable once constructed. A new response
/// replaces the previous one for the same group only.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResponse {
    pub group: String,
    pub hits: Vec<Hit>,
    pub hit_count: usize,
    pub page: u32,
    pub processing_time_ms: u64,
}

impl SearchResponse {
    /// A zero-count response, used for the blank-query short circuit and
    /// for recovering from a failed search cycle.
    pub fn empty(group: impl Into<String>) -> Self {
        SearchResponse {
            group: group.into(),
            hits: Vec::new(),
            hit_count: 0,
            page: 0,
            processing_time_ms: 0,
        }
    }
}
