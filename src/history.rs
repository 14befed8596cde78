//! Append-only query logging.
//!
//! One JSONL line per query with a timestamp and a short result preview.
//! Logging is best-effort: callers report a failed write and keep going,
//! a lost log line never fails a search.

use crate::error::Result;
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Result preview length stored per entry
const PREVIEW_LEN: usize = 200;

#[derive(Debug, Serialize)]
struct LogEntry<'a> {
    timestamp: String,
    query: &'a str,
    result_preview: String,
}

/// Append-only JSONL log of queries and result previews.
#[derive(Debug, Clone)]
pub struct QueryLog {
    path: PathBuf,
}

impl QueryLog {
    /// Log file in the user config directory.
    pub fn new() -> Self {
        let dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("paperscout");
        Self {
            path: dir.join("query_log.jsonl"),
        }
    }

    /// Log file at an explicit path.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Log file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry, truncating the result to a short preview.
    pub fn append(&self, query: &str, result: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let entry = LogEntry {
            timestamp: chrono::Local::now().to_rfc3339(),
            query,
            result_preview: result.chars().take(PREVIEW_LEN).collect(),
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let json = serde_json::to_string(&entry)?;
        writeln!(file, "{}", json)?;
        Ok(())
    }
}

impl Default for QueryLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_is_additive() {
        let dir = tempfile::tempdir().unwrap();
        let log = QueryLog::with_path(dir.path().join("log.jsonl"));

        log.append("papers on speed bumps", "Found 2 matching papers:")
            .unwrap();
        log.append("papers on potholes", "No papers found matching: potholes")
            .unwrap();

        let contents = fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["query"], "papers on speed bumps");
        assert!(first["timestamp"].as_str().is_some());
    }

    #[test]
    fn test_preview_is_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let log = QueryLog::with_path(dir.path().join("log.jsonl"));

        let long_result = "x".repeat(1000);
        log.append("papers on long outputs", &long_result).unwrap();

        let contents = fs::read_to_string(log.path()).unwrap();
        let entry: serde_json::Value = serde_json::from_str(contents.trim()).unwrap();
        assert_eq!(
            entry["result_preview"].as_str().map(|s| s.len()),
            Some(PREVIEW_LEN)
        );
    }
}
