use reqwest::Client;
use std::sync::Arc;

use crate::constants::SEARCH_MAX_RESULTS;
use crate::error::SearchError;
use crate::models::{SearchResult, TavilySearchRequest, TavilySearchResponse};

/// Thin client over the Tavily search API
#[derive(Debug, Clone)]
pub struct WebSearch {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
}

impl WebSearch {
    pub fn new(
        client: Arc<Client>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Returns at most three results for the query
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        tracing::info!("Searching the web for: {}", query);

        let url = format!("{}/search", self.base_url);
        let body = TavilySearchRequest {
            query,
            max_results: SEARCH_MAX_RESULTS,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json::<TavilySearchResponse>()
            .await?;

        let mut results = response.results;
        results.truncate(SEARCH_MAX_RESULTS);
        tracing::debug!("Search returned {} results", results.len());
        Ok(results)
    }
}
