//! Semantic Scholar paper search client.
//!
//! Issues a single bounded-timeout GET against the paper search endpoint
//! and decodes the JSON body into [`PaperRecord`]s. The provider treats
//! year clauses in the query string as relevance hints only, so constraint
//! enforcement lives in [`crate::filter`], applied by [`search`] after the
//! response arrives.

use crate::config::SearchConfig;
use crate::error::{Result, ScoutError};
use crate::filter;
use crate::query::{SearchCriteria, YearCondition};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Author names retained per paper
const MAX_AUTHORS: usize = 3;

/// A paper as used throughout the crate. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperRecord {
    /// Provider paper id
    pub id: String,
    pub title: String,
    pub year: Option<i32>,
    pub citation_count: u32,
    /// First three author names, in provider order
    pub authors: Vec<String>,
    /// Publication venue, when the provider reports one
    pub venue: Option<String>,
}

/// Outcome of one search, consumed by the formatter and the evaluator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult {
    /// Papers that survived local filtering, in provider order
    Success {
        papers: Vec<PaperRecord>,
        count: usize,
    },
    /// Nothing matched; carries the topic message and the provider query
    /// string for diagnostics
    NoResults { message: String, query: String },
    /// The remote call failed; never raised, always returned as a value
    Error { message: String },
}

/// Paper search API client with a bounded request timeout.
pub struct SearchClient {
    client: Client,
    config: SearchConfig,
}

impl SearchClient {
    /// Create a client from the given settings.
    pub fn new(config: SearchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ScoutError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Maximum papers kept after local filtering.
    pub fn max_results(&self) -> usize {
        self.config.max_results
    }

    /// Provider query string: the topic plus an optional year clause.
    pub fn provider_query(criteria: &SearchCriteria) -> String {
        let mut parts = vec![criteria.topic.clone()];

        if let Some(year) = criteria.year {
            match criteria.year_condition {
                YearCondition::Exact => parts.push(format!("year:{}", year)),
                YearCondition::Before => parts.push(format!("year:<{}", year)),
                YearCondition::After => parts.push(format!("year:>{}", year)),
                YearCondition::Any => {}
            }
        }

        parts.join(" ")
    }

    /// Fetch the raw paper list for the criteria.
    ///
    /// Exactly one request; no retry, no local filtering, no truncation.
    /// Retries, if any, belong to a higher layer.
    pub async fn fetch(&self, criteria: &SearchCriteria) -> Result<Vec<PaperRecord>> {
        let query = Self::provider_query(criteria);
        let limit = self.config.results_limit.to_string();
        let fields = self.config.fields_param();

        debug!(query = %query, limit = %limit, "Sending search request");

        let mut request = self.client.get(&self.config.api_url).query(&[
            ("query", query.as_str()),
            ("limit", limit.as_str()),
            ("fields", fields.as_str()),
        ]);

        if let Some(ref key) = self.config.api_key {
            request = request.header("x-api-key", key);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), error = %error_text, "API error");
            return Err(ScoutError::Api {
                code: status.as_u16(),
                message: format!("Semantic Scholar API error: {} - {}", status, error_text),
            });
        }

        let body: ApiResponse = response.json().await.map_err(|e| {
            ScoutError::Parse(format!("Failed to parse Semantic Scholar response: {}", e))
        })?;

        Ok(body.data.into_iter().map(PaperRecord::from).collect())
    }
}

/// End-to-end search: fetch, re-apply constraints locally, truncate, wrap.
///
/// Remote failures become `Error` values. An empty filtered set is a
/// `NoResults` value carrying the topic and the provider query string,
/// never an error.
pub async fn search(client: &SearchClient, criteria: &SearchCriteria) -> SearchResult {
    let provider_query = SearchClient::provider_query(criteria);

    match client.fetch(criteria).await {
        Ok(papers) => {
            let fetched = papers.len();
            let kept = filter::apply(papers, criteria, client.max_results());

            if kept.is_empty() {
                info!(query = %provider_query, fetched = fetched, "No papers matched after filtering");
                SearchResult::NoResults {
                    message: format!("No papers found matching criteria: {}", criteria.topic),
                    query: provider_query,
                }
            } else {
                info!(count = kept.len(), fetched = fetched, "Search complete");
                SearchResult::Success {
                    count: kept.len(),
                    papers: kept,
                }
            }
        }
        Err(e) => SearchResult::Error {
            message: format!("Failed to search papers: {}", e),
        },
    }
}

// ===== Semantic Scholar API Types =====

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    data: Vec<ApiPaper>,
}

#[derive(Debug, Deserialize)]
struct ApiPaper {
    #[serde(rename = "paperId")]
    paper_id: Option<String>,
    title: Option<String>,
    year: Option<i32>,
    #[serde(rename = "citationCount")]
    citation_count: Option<i64>,
    #[serde(default)]
    authors: Vec<ApiAuthor>,
    venue: Option<String>,
    // Requested in the field list; not carried into PaperRecord
    #[serde(rename = "openAccessPdf")]
    #[allow(dead_code)]
    open_access_pdf: Option<ApiOpenAccessPdf>,
}

#[derive(Debug, Deserialize)]
struct ApiAuthor {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiOpenAccessPdf {
    #[allow(dead_code)]
    url: Option<String>,
}

impl From<ApiPaper> for PaperRecord {
    fn from(paper: ApiPaper) -> Self {
        let authors = paper
            .authors
            .into_iter()
            .take(MAX_AUTHORS)
            .map(|a| a.name.unwrap_or_else(|| "Unknown".to_string()))
            .collect();

        Self {
            id: paper.paper_id.unwrap_or_default(),
            title: paper.title.unwrap_or_default(),
            year: paper.year,
            citation_count: paper.citation_count.unwrap_or(0).max(0) as u32,
            authors,
            venue: paper.venue.filter(|v| !v.is_empty()),
        }
    }
}
