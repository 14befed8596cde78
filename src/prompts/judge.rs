//! Judge prompts for scoring paper-search quality.
//!
//! Templates are plain strings with `{placeholder}` slots; callers render
//! the dynamic parts and substitute them here.

/// Response-quality evaluation prompt.
/// Placeholders: {query}, {response}, {criteria_section}
pub const RESPONSE_PROMPT_TEMPLATE: &str = r#"Evaluate this agent response to a research paper search query:

Query: {query}

Agent Response:
{response}
{criteria_section}
Provide a JSON evaluation with:
1. "relevance_score": 0-100 (are the papers on topic?)
2. "clarity_score": 0-100 (how clear is the response?)
3. "completeness_score": 0-100 (did it answer all parts?)
4. "accuracy_score": 0-100 (does it seem accurate?)
5. "overall_score": 0-100 (overall quality)
6. "strengths": list of 2-3 strengths
7. "weaknesses": list of 2-3 weaknesses
8. "feedback": brief constructive feedback

Respond only with valid JSON."#;

/// Per-paper criteria-match prompt.
/// Placeholders: {paper_block}, {criteria}
pub const PAPER_PROMPT_TEMPLATE: &str = r#"Evaluate if this paper matches the search criteria:

Paper:
{paper_block}

Criteria: {criteria}

Provide a JSON response with:
1. "match_score": 0-100 (how well does it match?)
2. "matches_topic": true/false
3. "matches_year": true/false
4. "matches_citations": true/false
5. "reasoning": brief explanation

Respond only with valid JSON."#;

/// Build the response-quality prompt. `criteria_section` is empty or a
/// pre-rendered "Expected criteria: ..." block.
pub fn build_response_prompt(query: &str, response: &str, criteria_section: &str) -> String {
    RESPONSE_PROMPT_TEMPLATE
        .replace("{query}", query)
        .replace("{response}", response)
        .replace("{criteria_section}", criteria_section)
}

/// Build the per-paper criteria-match prompt.
pub fn build_paper_prompt(paper_block: &str, criteria: &str) -> String {
    PAPER_PROMPT_TEMPLATE
        .replace("{paper_block}", paper_block)
        .replace("{criteria}", criteria)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_response_prompt() {
        let prompt = build_response_prompt(
            "Find papers on speed bumps",
            "Found 2 matching papers:",
            "\nExpected criteria: Topic: speed bumps\n",
        );
        assert!(prompt.contains("Query: Find papers on speed bumps"));
        assert!(prompt.contains("Found 2 matching papers:"));
        assert!(prompt.contains("Expected criteria: Topic: speed bumps"));
        assert!(!prompt.contains("{query}"));
    }

    #[test]
    fn test_build_paper_prompt() {
        let prompt = build_paper_prompt("- Title: Test Paper", "Topic: testing");
        assert!(prompt.contains("- Title: Test Paper"));
        assert!(prompt.contains("Criteria: Topic: testing"));
        assert!(!prompt.contains("{paper_block}"));
    }
}
