//! LLM-judge evaluation harness.
//!
//! Scores end-to-end agent responses with an external language model and
//! aggregates the results across a batch of test queries. The batch runs
//! strictly in order with one remote call in flight at a time; a judge
//! reply that fails to parse is recorded with its raw text and the batch
//! continues.

use crate::config::LlmConfig;
use crate::display;
use crate::error::{Result, ScoutError};
use crate::prompts::judge::{build_paper_prompt, build_response_prompt};
use crate::query::{self, SearchCriteria, YearCondition};
use crate::semanticscholar::{self, PaperRecord, SearchClient};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Judge request timeout in seconds
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Overall score at or above which a query counts as passed
const PASS_THRESHOLD: u32 = 70;

/// Agent responses are truncated to this length in the report
const RESPONSE_PREVIEW_LEN: usize = 500;

/// Default report filename
pub const DEFAULT_REPORT_FILE: &str = "evaluation_results.json";

/// Scores returned by the judge for one agent response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JudgeVerdict {
    pub relevance_score: u32,
    pub clarity_score: u32,
    pub completeness_score: u32,
    pub accuracy_score: u32,
    pub overall_score: u32,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub feedback: String,
}

/// Judge result for a single paper checked against explicit criteria.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperMatchVerdict {
    pub match_score: u32,
    pub matches_topic: bool,
    pub matches_year: bool,
    pub matches_citations: bool,
    #[serde(default)]
    pub reasoning: String,
}

/// One test query with the criteria the parser is expected to extract.
#[derive(Debug, Clone)]
pub struct TestCase {
    pub query: String,
    pub expected: SearchCriteria,
}

/// Per-query entry in the evaluation report.
///
/// `evaluation` and `error` are mutually exclusive; malformed judge
/// replies keep their raw text in `raw_response` for inspection.
#[derive(Debug, Serialize)]
pub struct QueryEvaluation {
    pub query: String,
    pub agent_response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<JudgeVerdict>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

/// Statistics over the well-formed `overall_score` values of a batch.
#[derive(Debug, Serialize, PartialEq)]
pub struct EvaluationSummary {
    pub average_score: f64,
    pub max_score: u32,
    pub min_score: u32,
    pub passed_queries: usize,
    pub total_queries: usize,
}

/// Full batch report, persisted as one JSON document.
#[derive(Debug, Serialize)]
pub struct EvaluationReport {
    pub generated_at: String,
    pub total_queries: usize,
    pub evaluations: Vec<QueryEvaluation>,
    /// Absent when no judge reply parsed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<EvaluationSummary>,
}

/// LLM judge over an OpenAI-compatible chat-completion endpoint.
pub struct Judge {
    client: reqwest::Client,
    config: LlmConfig,
}

impl Judge {
    /// Create a judge from the given settings.
    pub fn new(config: LlmConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ScoutError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Score an agent response against its query.
    ///
    /// One synchronous call at temperature 0, no retry. When expected
    /// criteria are supplied they are rendered into the prompt so
    /// adherence has something to anchor on.
    pub async fn evaluate(
        &self,
        query: &str,
        response: &str,
        criteria: Option<&SearchCriteria>,
    ) -> Result<JudgeVerdict> {
        let criteria_section = criteria
            .map(|c| format!("\nExpected criteria: {}\n", describe_criteria(c)))
            .unwrap_or_default();

        let prompt = build_response_prompt(query, response, &criteria_section);
        let content = self.complete(&prompt).await?;
        parse_reply(&content)
    }

    /// Check a single paper against explicit criteria.
    pub async fn evaluate_paper(
        &self,
        paper: &PaperRecord,
        criteria: &SearchCriteria,
    ) -> Result<PaperMatchVerdict> {
        let paper_block = format!(
            "- Title: {}\n- Year: {}\n- Citations: {}\n- Venue: {}",
            paper.title,
            paper
                .year
                .map(|y| y.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
            paper.citation_count,
            paper.venue.as_deref().unwrap_or("unknown"),
        );

        let prompt = build_paper_prompt(&paper_block, &describe_criteria(criteria));
        let content = self.complete(&prompt).await?;
        parse_reply(&content)
    }

    /// Send a single user-role chat completion and return the reply text.
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request_body = serde_json::json!({
            "model": self.config.model,
            "messages": [
                {"role": "user", "content": prompt}
            ],
            "temperature": 0.0,
        });

        let api_url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );

        debug!(url = %api_url, model = %self.config.model, "Sending judge request");

        let response = self
            .client
            .post(&api_url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ScoutError::Api {
                code: status.as_u16(),
                message: format!("LLM API error: {} - {}", status, error_text),
            });
        }

        let api_response: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ScoutError::Parse(format!("Failed to parse LLM response: {}", e)))?;

        Ok(api_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .unwrap_or_default())
    }
}

/// Render criteria the way they are shown to the judge.
fn describe_criteria(criteria: &SearchCriteria) -> String {
    let mut parts = vec![format!("Topic: {}", criteria.topic)];

    if let Some(year) = criteria.year {
        parts.push(format!("Year {}: {}", criteria.year_condition, year));
    }
    if let Some(min) = criteria.min_citations {
        parts.push(format!("Min Citations: {}", min));
    }

    parts.join(", ")
}

/// Run the batch: for each case, produce the end-to-end agent response,
/// have the judge score it, and aggregate. Cases are processed strictly
/// in order.
pub async fn run_suite(
    judge: &Judge,
    search_client: &SearchClient,
    cases: &[TestCase],
) -> EvaluationReport {
    let mut evaluations = Vec::with_capacity(cases.len());
    let mut scores = Vec::new();

    for (i, case) in cases.iter().enumerate() {
        info!(
            index = i + 1,
            total = cases.len(),
            query = %case.query,
            "Evaluating query"
        );

        let response = agent_response(search_client, &case.query).await;
        let preview: String = response.chars().take(RESPONSE_PREVIEW_LEN).collect();

        let outcome = judge
            .evaluate(&case.query, &response, Some(&case.expected))
            .await;
        record_outcome(&mut evaluations, &mut scores, &case.query, preview, outcome);
    }

    EvaluationReport {
        generated_at: chrono::Local::now().to_rfc3339(),
        total_queries: cases.len(),
        summary: summarize(&scores),
        evaluations,
    }
}

/// End-to-end agent answer for a query, as the CLI would print it.
async fn agent_response(client: &SearchClient, text: &str) -> String {
    let criteria = query::parse(text);
    if !criteria.has_topic() {
        return display::NO_TOPIC_GUIDANCE.to_string();
    }

    let result = semanticscholar::search(client, &criteria).await;
    display::render(&result)
}

/// Fold one judge outcome into the report entries. Parse failures become
/// error entries carrying the raw reply; the batch never aborts.
fn record_outcome(
    evaluations: &mut Vec<QueryEvaluation>,
    scores: &mut Vec<u32>,
    query: &str,
    agent_response: String,
    outcome: Result<JudgeVerdict>,
) {
    match outcome {
        Ok(verdict) => {
            scores.push(verdict.overall_score);
            evaluations.push(QueryEvaluation {
                query: query.to_string(),
                agent_response,
                evaluation: Some(verdict),
                error: None,
                raw_response: None,
            });
        }
        Err(ScoutError::JudgeParse { message, raw }) => {
            warn!(error = %message, "Judge reply could not be parsed");
            evaluations.push(QueryEvaluation {
                query: query.to_string(),
                agent_response,
                evaluation: None,
                error: Some("Could not parse evaluation".to_string()),
                raw_response: Some(raw),
            });
        }
        Err(e) => {
            warn!(error = %e, "Judge call failed");
            evaluations.push(QueryEvaluation {
                query: query.to_string(),
                agent_response,
                evaluation: None,
                error: Some(e.to_string()),
                raw_response: None,
            });
        }
    }
}

/// Summary statistics over well-formed overall scores.
fn summarize(scores: &[u32]) -> Option<EvaluationSummary> {
    if scores.is_empty() {
        return None;
    }

    let total: u32 = scores.iter().sum();
    Some(EvaluationSummary {
        average_score: f64::from(total) / scores.len() as f64,
        max_score: *scores.iter().max()?,
        min_score: *scores.iter().min()?,
        passed_queries: scores.iter().filter(|&&s| s >= PASS_THRESHOLD).count(),
        total_queries: scores.len(),
    })
}

/// Write the report as one pretty-printed JSON document.
pub fn write_report(report: &EvaluationReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Built-in test suite.
pub fn default_suite() -> Vec<TestCase> {
    let case = |query: &str,
                topic: &str,
                year: Option<i32>,
                year_condition: YearCondition,
                min_citations: Option<u32>| TestCase {
        query: query.to_string(),
        expected: SearchCriteria {
            topic: topic.to_string(),
            year,
            year_condition,
            min_citations,
        },
    };

    vec![
        case(
            "Find a research paper on machine learning that was published after 2020 and has at least 50 citations.",
            "machine learning",
            Some(2020),
            YearCondition::After,
            Some(50),
        ),
        case(
            "Search for papers on neural networks published in 2023 with more than 10 citations.",
            "neural networks",
            Some(2023),
            YearCondition::Exact,
            Some(10),
        ),
        case(
            "Find a paper about transformers that was published before 2023.",
            "transformers",
            Some(2023),
            YearCondition::Before,
            None,
        ),
        case(
            "Look for research on deep learning from 2022 with at least 25 citations.",
            "deep learning",
            Some(2022),
            YearCondition::Exact,
            Some(25),
        ),
        case(
            "Find papers on computer vision published after 2019 with more than 100 citations.",
            "computer vision",
            Some(2019),
            YearCondition::After,
            Some(100),
        ),
    ]
}

/// Pull the JSON payload out of a judge reply, tolerating markdown code
/// fences and surrounding prose.
fn extract_json(content: &str) -> String {
    let trimmed = content.trim();

    if trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() >= 2 {
            let end = if lines.last().map(|l| l.trim()) == Some("```") {
                lines.len() - 1
            } else {
                lines.len()
            };
            return lines[1..end].join("\n");
        }
    }

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if start < end {
            return trimmed[start..=end].to_string();
        }
    }

    trimmed.to_string()
}

/// Decode a judge reply, keeping the raw text on failure.
fn parse_reply<T: serde::de::DeserializeOwned>(content: &str) -> Result<T> {
    let json_str = extract_json(content);
    serde_json::from_str(&json_str).map_err(|e| ScoutError::JudgeParse {
        message: e.to_string(),
        raw: content.to_string(),
    })
}

// ===== Chat Completion API Types =====

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}
