//! OMDb response types
//!
//! Field names follow the API's own casing so cached records round-trip in
//! the shape the service returned them.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// A search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(rename = "Poster", default)]
    pub poster: String,
}

/// One page of search hits plus the overall hit count
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchPage {
    pub results: Vec<Movie>,
    pub total_results: u64,
}

/// A third-party rating attached to a title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Value")]
    pub value: String,
}

/// Full record for a single title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MovieDetail {
    pub title: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub rated: String,
    #[serde(default)]
    pub released: String,
    #[serde(default)]
    pub runtime: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub writer: String,
    #[serde(default)]
    pub actors: String,
    #[serde(default)]
    pub plot: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub awards: String,
    #[serde(default)]
    pub poster: String,
    #[serde(default)]
    pub ratings: Vec<Rating>,
    #[serde(default)]
    pub metascore: String,
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: String,
    #[serde(rename = "imdbVotes", default)]
    pub imdb_votes: String,
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Type", default)]
    pub kind: String,
}

/// Raw `?s=` response envelope
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(rename = "Search", default)]
    search: Vec<Movie>,
    #[serde(rename = "totalResults", default)]
    total_results: Option<String>,
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error", default)]
    error: Option<String>,
}

impl SearchResponse {
    /// Converts the envelope into a page, or the error it reports
    pub(crate) fn into_page(self, query: &str) -> Result<SearchPage, SearchError> {
        if self.response != "True" {
            let message = self.error.unwrap_or_else(|| "Unknown API error".to_string());
            return Err(SearchError::from_api_message(query, &message));
        }

        let total_results = self
            .total_results
            .and_then(|t| t.trim().parse().ok())
            .unwrap_or(0);

        Ok(SearchPage {
            results: self.search,
            total_results,
        })
    }
}

/// Raw `?i=` response: a detail record when `Response` is `"True"`
#[derive(Debug, Deserialize)]
pub(crate) struct DetailResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(flatten)]
    detail: serde_json::Value,
}

impl DetailResponse {
    pub(crate) fn into_detail(self) -> Result<Option<MovieDetail>, SearchError> {
        if self.response != "True" {
            return Ok(None);
        }

        serde_json::from_value(self.detail)
            .map(Some)
            .map_err(|e| SearchError::Api(format!("unexpected detail response: {}", e)))
    }
}
