//! Wrapper around the search client that owns the registered result
//! groups and short-circuits blank queries locally, so an empty input
//! never produces a network call.

use crate::config::Config;

use super::client::{SearchClient, SearchError};
use super::types::{SearchParams, SearchRequest, SearchResponse};

/// Result groups queried on every keystroke, in display order.
pub const GROUPS: [&str; 2] = ["apps", "DAOs"];

pub struct SearchAdapter {
    client: SearchClient,
    groups: Vec<String>,
    params: SearchParams,
}

impl SearchAdapter {
    pub fn new(config: &Config) -> Result<Self, SearchError> {
        Ok(SearchAdapter {
            client: SearchClient::new(config)?,
            groups: GROUPS.iter().map(|group| group.to_string()).collect(),
            params: SearchParams {
                query_by: config.query_by.clone(),
                num_typos: config.num_typos,
            },
        })
    }

    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    /// Build one request per registered group, all carrying the same text.
    pub fn requests_for(&self, query: &str) -> Vec<SearchRequest> {
        self.groups
            .iter()
            .map(|group| SearchRequest {
                group: group.clone(),
                query: query.to_string(),
                params: self.params.clone(),
            })
            .collect()
    }

    /// Zero-count responses mirroring the registered groups, used when a
    /// search cycle fails and the UI falls back to an empty state.
    pub fn empty_responses(&self) -> Vec<SearchResponse> {
        self.groups
            .iter()
            .map(|group| SearchResponse::empty(group.clone()))
            .collect()
    }

    /// Run one search cycle: if every request is blank, answer locally
    /// with empty responses in request order; otherwise delegate to the
    /// backend unchanged and propagate its errors.
    pub async fn search_all(
        &self,
        requests: Vec<SearchRequest>,
    ) -> Result<Vec<SearchResponse>, SearchError> {
        if requests.iter().all(SearchRequest::is_blank) {
            return Ok(requests
                .iter()
                .map(|request| SearchResponse::empty(request.group.clone()))
                .collect());
        }
        self.client.multi_search(&requests).await
    }

    pub async fn fetch_logo(&self, url: &str) -> Result<Vec<u8>, SearchError> {
        self.client.fetch_bytes(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Protocol;

    fn adapter() -> SearchAdapter {
        // Points at a closed port; the tests below never reach the network.
        let config = Config {
            api_key: "test-key".to_string(),
            host: "127.0.0.1".to_string(),
            port: 1,
            protocol: Protocol::Http,
            query_by: "name".to_string(),
            num_typos: 1,
        };
        SearchAdapter::new(&config).unwrap()
    }

    #[test]
    fn builds_one_request_per_group() {
        let adapter = adapter();
        let requests = adapter.requests_for("swap");
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].group, "apps");
        assert_eq!(requests[1].group, "DAOs");
        assert!(requests.iter().all(|request| request.query == "swap"));
    }

    #[tokio::test]
    async fn blank_query_never_reaches_the_network() {
        let adapter = adapter();
        let requests = adapter.requests_for("   ");
        let responses = adapter.search_all(requests).await.unwrap();
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0].group, "apps");
        assert_eq!(responses[1].group, "DAOs");
        assert!(responses
            .iter()
            .all(|response| response.hit_count == 0 && response.hits.is_empty()));
    }

    #[tokio::test]
    async fn empty_string_query_short_circuits_too() {
        let adapter = adapter();
        let responses = adapter.search_all(adapter.requests_for("")).await.unwrap();
        assert_eq!(responses.len(), 2);
    }

    #[test]
    fn empty_responses_mirror_registered_groups() {
        let adapter = adapter();
        let responses = adapter.empty_responses();
        let groups: Vec<&str> = responses
            .iter()
            .map(|response| response.group.as_str())
            .collect();
        assert_eq!(groups, vec!["apps", "DAOs"]);
    }
}
