//! Free-text query parameter extraction.
//!
//! Turns a natural-language request ("Find a paper on machine learning
//! published after 2020 with at least 50 citations") into structured
//! [`SearchCriteria`]. Extraction is heuristic substring/regex matching,
//! not a grammar; the priority order of the patterns below is load-bearing
//! and intentionally stable.

use regex::Regex;

/// How the extracted year constrains matching papers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum YearCondition {
    /// No year constraint
    #[default]
    Any,
    /// Published exactly in the given year
    Exact,
    /// Published strictly before the given year
    Before,
    /// Published strictly after the given year
    After,
}

impl std::fmt::Display for YearCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            YearCondition::Any => "any",
            YearCondition::Exact => "exact",
            YearCondition::Before => "before",
            YearCondition::After => "after",
        };
        f.write_str(s)
    }
}

/// Structured search parameters extracted from free text.
///
/// `year_condition != Any` implies `year` is present; [`parse`] upholds
/// this by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    /// Research topic; empty when no connector word was found
    pub topic: String,
    /// Publication year constraint value
    pub year: Option<i32>,
    /// How `year` constrains results
    pub year_condition: YearCondition,
    /// Minimum citation count
    pub min_citations: Option<u32>,
}

impl SearchCriteria {
    /// Whether a usable topic was extracted. Callers must check this
    /// before searching; an empty topic means "could not parse", not an
    /// error.
    pub fn has_topic(&self) -> bool {
        !self.topic.is_empty()
    }
}

/// Extract search criteria from a free-text query.
///
/// Pure and deterministic: identical input always yields identical
/// criteria, with no side effects or remote calls.
pub fn parse(text: &str) -> SearchCriteria {
    let (year, year_condition) = extract_year(text);
    SearchCriteria {
        topic: extract_topic(text),
        year,
        year_condition,
        min_citations: extract_min_citations(text),
    }
}

/// Compile a hardcoded pattern.
fn pattern(re: &str) -> Regex {
    Regex::new(re).expect("hardcoded pattern is valid")
}

/// Topic is the text after the first connector word ("on", "about",
/// "regarding"), cut at the earliest terminator phrase.
fn extract_topic(text: &str) -> String {
    let connector = pattern(r"(?i)\b(?:on|about|regarding) ");
    let Some(m) = connector.find(text) else {
        return String::new();
    };
    let rest = &text[m.end()..];

    let terminator = pattern(r"(?i) that was| published| and has| with| containing");
    let end = terminator.find(rest).map(|t| t.start()).unwrap_or(rest.len());
    rest[..end].trim().to_string()
}

/// Year patterns in priority order; the first match fixes both the year
/// and the condition. "after 2020 published in 2020" therefore resolves
/// to After.
fn extract_year(text: &str) -> (Option<i32>, YearCondition) {
    let patterns = [
        (r"(?i)\bafter\s+(\d{4})\b", YearCondition::After),
        (r"(?i)\bbefore\s+(\d{4})\b", YearCondition::Before),
        (r"(?i)\bin\s+(\d{4})\b", YearCondition::Exact),
        (r"(?i)\bpublished\s+(\d{4})\b", YearCondition::Exact),
        (r"(?i)\bfrom\s+(\d{4})\b", YearCondition::Exact),
    ];

    for (re, condition) in patterns {
        if let Some(caps) = pattern(re).captures(text) {
            if let Ok(year) = caps[1].parse() {
                return (Some(year), condition);
            }
        }
    }

    (None, YearCondition::Any)
}

/// Citation patterns in priority order; first match wins. "more than N"
/// keeps the literal N as the minimum.
fn extract_min_citations(text: &str) -> Option<u32> {
    let patterns = [
        r"(?i)\bat least\s+(\d+)\s+citations?\b",
        r"(?i)\b(\d+)\+\s*citations?\b",
        r"(?i)\bmore than\s+(\d+)\s+citations?\b",
        r"(?i)\b(\d+)\s+citations?\b",
    ];

    for re in patterns {
        if let Some(caps) = pattern(re).captures(text) {
            if let Ok(count) = caps[1].parse() {
                return Some(count);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_query() {
        let criteria = parse(
            "Find a research paper on machine learning that was published after 2020 and has at least 50 citations.",
        );
        assert_eq!(criteria.topic, "machine learning");
        assert_eq!(criteria.year, Some(2020));
        assert_eq!(criteria.year_condition, YearCondition::After);
        assert_eq!(criteria.min_citations, Some(50));
    }

    #[test]
    fn test_year_priority_after_wins() {
        let criteria = parse("papers after 2020 published in 2020");
        assert_eq!(criteria.year, Some(2020));
        assert_eq!(criteria.year_condition, YearCondition::After);
    }

    #[test]
    fn test_exact_year() {
        let criteria = parse("Search for papers on neural networks published in 2023 with more than 10 citations.");
        assert_eq!(criteria.topic, "neural networks");
        assert_eq!(criteria.year, Some(2023));
        assert_eq!(criteria.year_condition, YearCondition::Exact);
        assert_eq!(criteria.min_citations, Some(10));
    }

    #[test]
    fn test_before_year() {
        let criteria = parse("Find a paper about transformers that was published before 2023.");
        assert_eq!(criteria.topic, "transformers");
        assert_eq!(criteria.year, Some(2023));
        assert_eq!(criteria.year_condition, YearCondition::Before);
        assert_eq!(criteria.min_citations, None);
    }

    #[test]
    fn test_plus_citations() {
        let criteria = parse("papers on large language models with 100+ citations");
        assert_eq!(criteria.topic, "large language models");
        assert_eq!(criteria.min_citations, Some(100));
    }

    #[test]
    fn test_no_connector_yields_empty_topic() {
        let criteria = parse("transformers before 2023");
        assert!(!criteria.has_topic());
        assert_eq!(criteria.year_condition, YearCondition::Before);
    }

    #[test]
    fn test_citation_count_that_looks_like_a_year() {
        // "2020 citations" is a citation count, not a year constraint
        let criteria = parse("papers on graph theory with 2020 citations");
        assert_eq!(criteria.min_citations, Some(2020));
        assert_eq!(criteria.year, None);
        assert_eq!(criteria.year_condition, YearCondition::Any);
    }

    #[test]
    fn test_connector_is_a_whole_word() {
        // "London" must not trigger the "on" connector
        let criteria = parse("Find papers regarding London air quality");
        assert_eq!(criteria.topic, "London air quality");
    }

    #[test]
    fn test_deterministic() {
        let text = "papers on quantum computing after 2021 with 30 citations";
        assert_eq!(parse(text), parse(text));
    }
}
