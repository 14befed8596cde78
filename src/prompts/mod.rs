//! Prompt templates for LLM-based operations.

pub mod judge;

pub use judge::*;
