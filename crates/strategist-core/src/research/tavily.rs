//! Tavily search client
//!
//! Thin wrapper over the Tavily `/search` endpoint. Relevance ordering and
//! deduplication are the provider's job; results pass through untouched.

use crate::config::SearchServiceConfig;
use crate::error::{Result, StrategistError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Options for a single search call
#[derive(Debug, Clone, Serialize)]
pub struct SearchOptions {
    /// Topic classifier understood by the provider
    pub topic: String,
    /// Search depth: "basic" or "advanced"
    pub search_depth: String,
    /// Ask the provider for a short synthesized answer
    pub include_answer: bool,
    /// Result cap
    pub max_results: usize,
    /// Optional time window (e.g. "month", "year")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_range: Option<String>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            topic: "general".to_string(),
            search_depth: "basic".to_string(),
            include_answer: true,
            max_results: 5,
            time_range: None,
        }
    }
}

/// One search hit as returned by the provider
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub score: f64,
}

/// Provider response for one query. Carries at least the query echo and the
/// result list; unknown provider fields are dropped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawResultSet {
    #[serde(default)]
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(default)]
    pub results: Vec<SearchHit>,
}

/// Web search client trait
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Issue one keyword query and return the provider's raw result set
    async fn search(&self, query: &str, options: &SearchOptions) -> Result<RawResultSet>;
}

/// Production search client over the Tavily HTTP API
pub struct TavilyClient {
    http_client: reqwest::Client,
    config: SearchServiceConfig,
}

impl TavilyClient {
    /// Create new client from configuration
    pub fn new(config: SearchServiceConfig) -> Result<Self> {
        if config.api_key.is_none() {
            return Err(StrategistError::Config(
                "TAVILY_API_KEY (or STRATEGIST_SEARCH_API_KEY) not set".to_string(),
            ));
        }

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(StrategistError::Http)?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(SearchServiceConfig::default())
    }
}

#[async_trait]
impl SearchClient for TavilyClient {
    async fn search(&self, query: &str, options: &SearchOptions) -> Result<RawResultSet> {
        if query.trim().is_empty() {
            return Err(StrategistError::InvalidInput(
                "Search query must not be empty".to_string(),
            ));
        }

        #[derive(Serialize)]
        struct SearchRequest<'a> {
            query: &'a str,
            topic: &'a str,
            search_depth: &'a str,
            include_answer: bool,
            max_results: usize,
            #[serde(skip_serializing_if = "Option::is_none")]
            time_range: Option<&'a str>,
        }

        let url = format!("{}/search", self.config.url);

        let mut req = self.http_client.post(&url).json(&SearchRequest {
            query,
            topic: &options.topic,
            search_depth: &options.search_depth,
            include_answer: options.include_answer,
            max_results: options.max_results,
            time_range: options.time_range.as_deref(),
        });

        if let Some(ref api_key) = self.config.api_key {
            req = req.header("Authorization", format!("Bearer {}", api_key));
        }

        let response = req.send().await.map_err(|e| {
            StrategistError::Upstream(format!("Search provider unreachable: {}", e))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StrategistError::Upstream(format!(
                "Search provider error (HTTP {}): {}",
                status, body
            )));
        }

        let result_set: RawResultSet = response.json().await.map_err(StrategistError::Http)?;

        tracing::debug!(
            "Search \"{}\" returned {} results",
            query,
            result_set.results.len()
        );

        Ok(result_set)
    }
}
