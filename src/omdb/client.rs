//! OMDb HTTP client

use reqwest::Client;
use serde::de::DeserializeOwned;

use super::types::{DetailResponse, MovieDetail, SearchPage, SearchResponse};
use crate::config::{require_api_key, AppConfig};
use crate::error::SearchError;

/// Client for the OMDb search and title endpoints
///
/// The API key is checked when a request is made, so a client built without
/// one is still usable by callers that may never reach the network.
#[derive(Debug, Clone)]
pub struct OmdbClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl OmdbClient {
    /// Create a client with a custom HTTP client and endpoint
    pub fn with_client(
        client: Client,
        base_url: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key,
        }
    }

    /// Build a client from loaded configuration
    pub fn from_config(config: &AppConfig) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("cinesearch/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_client(
            client,
            config.base_url.clone(),
            config.api_key.clone(),
        ))
    }

    /// Search titles by free text, one page at a time
    ///
    /// # Returns
    /// * `Ok(SearchPage)` - hits for the page plus the total across all pages
    /// * `Err(SearchError::MovieNotFound)` - the service found nothing
    /// * `Err(SearchError::Api)` - non-success status or a reported failure
    /// * `Err(SearchError::Network)` - the request never completed
    pub async fn search_movies(&self, query: &str, page: u32) -> Result<SearchPage, SearchError> {
        tracing::info!(query, page, "searching OMDb");

        let params = [("s", query.to_string()), ("page", page.to_string())];
        let response: SearchResponse = self.get_json(&params).await?;
        response.into_page(query)
    }

    /// Fetch the full record for an IMDb id, `None` if the service rejects it
    pub async fn movie_details(&self, imdb_id: &str) -> Result<Option<MovieDetail>, SearchError> {
        tracing::info!(imdb_id, "fetching OMDb title details");

        let params = [("i", imdb_id.to_string()), ("plot", "full".to_string())];
        let response: DetailResponse = self.get_json(&params).await?;
        response.into_detail()
    }

    async fn get_json<T: DeserializeOwned>(&self, params: &[(&str, String)]) -> Result<T, SearchError> {
        let api_key = require_api_key(self.api_key.as_deref())?;
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("apikey", api_key)])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(%status, "OMDb returned an error status");
            return Err(SearchError::Api(format!("HTTP {}", status)));
        }

        let text = response.text().await?;
        serde_json::from_str(&text)
            .map_err(|e| SearchError::Api(format!("unexpected response: {}", e)))
    }
}
