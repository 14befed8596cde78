//! Human-readable rendering of search results.

use crate::semanticscholar::SearchResult;

/// Guidance shown when no topic could be extracted from a query.
pub const NO_TOPIC_GUIDANCE: &str =
    "Could not extract a topic from the query. Try phrasing it like 'Find papers on <topic>'.";

/// Render a search result as display text.
///
/// Total: every variant renders to something printable, so the caller
/// always has a line to show for a query.
pub fn render(result: &SearchResult) -> String {
    match result {
        SearchResult::Error { message } => format!("Error: {}", message),
        SearchResult::NoResults { message, .. } => {
            format!("No papers found matching: {}", message)
        }
        SearchResult::Success { papers, count } => {
            let mut output = vec![format!("Found {} matching papers:\n", count)];

            for (i, paper) in papers.iter().enumerate() {
                output.push(format!("{}. {}", i + 1, paper.title));
                output.push(format!(
                    "   Year: {}",
                    paper
                        .year
                        .map(|y| y.to_string())
                        .unwrap_or_else(|| "N/A".to_string())
                ));
                output.push(format!("   Citations: {}", paper.citation_count));

                if !paper.authors.is_empty() {
                    output.push(format!("   Authors: {}", paper.authors.join(", ")));
                }
                if let Some(ref venue) = paper.venue {
                    output.push(format!("   Venue: {}", venue));
                }

                output.push(String::new());
            }

            output.join("\n")
        }
    }
}

/// Banner shown when the interactive prompt starts.
pub fn welcome_banner() -> String {
    let bar = "=".repeat(70);
    format!(
        "{bar}\n Research Paper Discovery\n{bar}\n\n\
         Find research papers by topic, year, and citation count.\n\
         Example: 'Find a paper on machine learning published after 2020'\n\
         Type 'quit' to exit."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semanticscholar::PaperRecord;

    #[test]
    fn test_render_error() {
        let result = SearchResult::Error {
            message: "x".to_string(),
        };
        assert_eq!(render(&result), "Error: x");
    }

    #[test]
    fn test_render_no_results_prefix() {
        let result = SearchResult::NoResults {
            message: "No papers found matching criteria: speed bumps".to_string(),
            query: "speed bumps year:>2003".to_string(),
        };
        assert!(render(&result).starts_with("No papers found matching:"));
    }

    #[test]
    fn test_render_success() {
        let papers = vec![
            PaperRecord {
                id: "a".to_string(),
                title: "First Paper".to_string(),
                year: Some(2021),
                citation_count: 42,
                authors: vec!["A. One".to_string(), "B. Two".to_string()],
                venue: Some("NeurIPS".to_string()),
            },
            PaperRecord {
                id: "b".to_string(),
                title: "Second Paper".to_string(),
                year: None,
                citation_count: 0,
                authors: vec![],
                venue: None,
            },
        ];
        let result = SearchResult::Success { count: 2, papers };
        let text = render(&result);

        assert!(text.starts_with("Found 2 matching papers:"));
        assert!(text.contains("1. First Paper"));
        assert!(text.contains("   Authors: A. One, B. Two"));
        assert!(text.contains("   Venue: NeurIPS"));
        assert!(text.contains("2. Second Paper"));
        // Entries are separated by a blank line
        assert!(text.contains("   Venue: NeurIPS\n\n2. Second Paper"));
        // Authors/Venue lines are omitted when absent
        let second = text.split("2. Second Paper").nth(1).unwrap();
        assert!(!second.contains("Authors:"));
        assert!(!second.contains("Venue:"));
    }
}
