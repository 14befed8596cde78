//! Runtime configuration for paperscout.
//!
//! Configuration is assembled once at startup (CLI flags plus environment)
//! and handed to each component by value. Components never read ambient
//! state mid-request, which keeps them testable with injected fakes.

/// Semantic Scholar paper search endpoint
pub const SEMANTIC_SCHOLAR_API: &str = "https://api.semanticscholar.org/graph/v1/paper/search";

/// Fields requested from the paper search API
pub const DEFAULT_FIELDS: &[&str] = &[
    "paperId",
    "title",
    "year",
    "citationCount",
    "authors",
    "venue",
    "openAccessPdf",
];

/// Settings for the paper search client.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Search endpoint URL
    pub api_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Result-count limit sent to the provider
    pub results_limit: usize,
    /// Maximum papers kept after local filtering
    pub max_results: usize,
    /// Fields requested from the provider
    pub fields: Vec<String>,
    /// API key (optional, for higher rate limits)
    pub api_key: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_url: SEMANTIC_SCHOLAR_API.to_string(),
            timeout_secs: 10,
            results_limit: 10,
            max_results: 5,
            fields: DEFAULT_FIELDS.iter().map(|f| f.to_string()).collect(),
            api_key: std::env::var("SEMANTIC_SCHOLAR_API_KEY").ok(),
        }
    }
}

impl SearchConfig {
    /// Comma-joined field list for the `fields` query parameter
    pub fn fields_param(&self) -> String {
        self.fields.join(",")
    }
}

/// Settings for the LLM judge used by the evaluation harness.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// OpenAI-compatible API base URL (e.g. https://api.mistral.ai/v1)
    pub base_url: String,
    /// API key
    pub api_key: String,
    /// Model name
    pub model: String,
}
