//! # paperscout
//!
//! Natural-language research paper search over the Semantic Scholar API.
//!
//! ## Modules
//!
//! - [`query`] - Free-text criteria extraction
//! - [`semanticscholar`] - Paper search API client
//! - [`filter`] - Local constraint filtering
//! - [`display`] - Result rendering
//! - [`evaluation`] - LLM-judge evaluation harness
//! - [`history`] - Append-only query log
//! - [`error`] - Custom error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use paperscout::config::SearchConfig;
//! use paperscout::{display, query, semanticscholar};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = semanticscholar::SearchClient::new(SearchConfig::default())?;
//!     let criteria = query::parse("Find papers on machine learning published after 2020");
//!     let result = semanticscholar::search(&client, &criteria).await;
//!     println!("{}", display::render(&result));
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod display;
pub mod error;
pub mod evaluation;
pub mod filter;
pub mod history;
pub mod prompts;
pub mod query;
pub mod semanticscholar;

pub use error::{Result, ScoutError};
