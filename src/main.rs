//! paperscout - natural-language research paper search
//!
//! Accepts free-text queries ("Find a paper on machine learning published
//! after 2020 with at least 50 citations"), extracts the criteria, runs a
//! Semantic Scholar search, and prints a readable report. A separate
//! subcommand scores the end-to-end behavior with an LLM judge.
//!
//! ## Usage
//!
//! ```bash
//! paperscout chat
//! paperscout search "Find papers on speed bumps published after 2003"
//! paperscout eval --llm-key sk-... --llm-model mistral-small-latest
//! ```

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use paperscout::config::{LlmConfig, SearchConfig};
use paperscout::display;
use paperscout::evaluation::{self, Judge};
use paperscout::history::QueryLog;
use paperscout::query;
use paperscout::semanticscholar::{self, SearchClient};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{warn, Level};
use tracing_subscriber::{fmt, EnvFilter};

// ============================================================================
// CLI Definition
// ============================================================================

/// Natural-language research paper search over Semantic Scholar
#[derive(Parser)]
#[command(name = "paperscout")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive prompt loop
    Chat {
        #[command(flatten)]
        search: SearchArgs,

        /// Append queries and result previews to a JSONL log
        #[arg(long)]
        log_queries: bool,

        /// Query log path (default: user config dir)
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// Run a single query and exit
    Search {
        /// Free-text query
        query: String,

        #[command(flatten)]
        search: SearchArgs,
    },

    /// Score the built-in test queries with an LLM judge
    Eval {
        #[command(flatten)]
        search: SearchArgs,

        /// LLM API base URL (OpenAI-compatible)
        #[arg(long, default_value = "https://api.mistral.ai/v1")]
        llm_base_url: String,

        /// LLM API key (falls back to LLM_API_KEY / MISTRAL_API_KEY)
        #[arg(long)]
        llm_key: Option<String>,

        /// LLM model name
        #[arg(long, default_value = "mistral-small-latest")]
        llm_model: String,

        /// Report output path
        #[arg(short, long, default_value = evaluation::DEFAULT_REPORT_FILE)]
        output: PathBuf,
    },
}

/// Paper search tunables shared by all subcommands.
#[derive(Args)]
struct SearchArgs {
    /// Search request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    /// Result-count limit requested from the provider
    #[arg(long, default_value_t = 10)]
    limit: usize,

    /// Maximum papers displayed after filtering
    #[arg(long, default_value_t = 5)]
    max_results: usize,

    /// Semantic Scholar API key (falls back to SEMANTIC_SCHOLAR_API_KEY)
    #[arg(long)]
    api_key: Option<String>,
}

impl SearchArgs {
    fn into_config(self) -> SearchConfig {
        let defaults = SearchConfig::default();
        SearchConfig {
            timeout_secs: self.timeout,
            results_limit: self.limit,
            max_results: self.max_results,
            api_key: self.api_key.or(defaults.api_key),
            api_url: defaults.api_url,
            fields: defaults.fields,
        }
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.debug { Level::DEBUG } else { Level::INFO };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .init();

    match cli.command {
        Commands::Chat {
            search,
            log_queries,
            log_file,
        } => run_chat(search.into_config(), log_queries, log_file).await,
        Commands::Search { query, search } => run_single(search.into_config(), &query).await,
        Commands::Eval {
            search,
            llm_base_url,
            llm_key,
            llm_model,
            output,
        } => run_eval(search.into_config(), llm_base_url, llm_key, llm_model, output).await,
    }
}

// ============================================================================
// Interactive Loop
// ============================================================================

async fn run_chat(config: SearchConfig, log_queries: bool, log_file: Option<PathBuf>) -> Result<()> {
    let client = SearchClient::new(config)?;
    let log = log_queries.then(|| match log_file {
        Some(path) => QueryLog::with_path(path),
        None => QueryLog::new(),
    });

    println!("{}\n", display::welcome_banner());

    let stdin = io::stdin();
    loop {
        print!("Your query: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            // EOF
            println!();
            break;
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if ["quit", "exit", "q"]
            .iter()
            .any(|t| input.eq_ignore_ascii_case(t))
        {
            println!("\nGoodbye!");
            break;
        }

        let rendered = answer_query(&client, input).await;
        println!("\n{}\n", rendered);

        if let Some(ref log) = log {
            if let Err(e) = log.append(input, &rendered) {
                warn!(error = %e, "Failed to log query");
            }
        }
    }

    Ok(())
}

async fn run_single(config: SearchConfig, text: &str) -> Result<()> {
    let client = SearchClient::new(config)?;
    let rendered = answer_query(&client, text).await;
    println!("{}", rendered);
    Ok(())
}

/// Parse, search, filter and render one query. Always returns printable
/// text; failures surface as rendered Error/NoResults lines, never as
/// exceptions.
async fn answer_query(client: &SearchClient, text: &str) -> String {
    let criteria = query::parse(text);
    if !criteria.has_topic() {
        return display::NO_TOPIC_GUIDANCE.to_string();
    }

    println!(
        "Searching for: {} (year: {} {}, min citations: {})...",
        criteria.topic,
        criteria.year_condition,
        criteria
            .year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "-".to_string()),
        criteria.min_citations.unwrap_or(0),
    );

    let result = semanticscholar::search(client, &criteria).await;
    display::render(&result)
}

// ============================================================================
// Evaluation Suite
// ============================================================================

async fn run_eval(
    config: SearchConfig,
    llm_base_url: String,
    llm_key: Option<String>,
    llm_model: String,
    output: PathBuf,
) -> Result<()> {
    let api_key = llm_key
        .or_else(|| std::env::var("LLM_API_KEY").ok())
        .or_else(|| std::env::var("MISTRAL_API_KEY").ok())
        .context("LLM API key not set. Pass --llm-key or set LLM_API_KEY.")?;

    let llm_config = LlmConfig {
        base_url: llm_base_url,
        api_key,
        model: llm_model,
    };

    let client = SearchClient::new(config)?;
    let judge = Judge::new(llm_config)?;

    let cases = evaluation::default_suite();
    println!("Running {} test queries...\n", cases.len());

    let report = evaluation::run_suite(&judge, &client, &cases).await;
    evaluation::write_report(&report, &output)?;

    match report.summary {
        Some(ref summary) => {
            println!("\nEvaluation Summary");
            println!("  Queries evaluated: {}", summary.total_queries);
            println!("  Average score:     {:.1}/100", summary.average_score);
            println!("  Best score:        {}/100", summary.max_score);
            println!("  Worst score:       {}/100", summary.min_score);
            println!(
                "  Passed (>= 70):    {}/{}",
                summary.passed_queries, summary.total_queries
            );
        }
        None => println!("\nNo well-formed judge verdicts; see the report for raw replies."),
    }

    println!("\nDetailed results saved to: {}", output.display());
    Ok(())
}
