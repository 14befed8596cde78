//! Local re-application of search constraints.
//!
//! The year clause sent to the provider is a relevance hint, not a hard
//! filter, and responses routinely include papers outside the requested
//! bounds. Constraints are therefore enforced here, after the fetch.

use crate::query::{SearchCriteria, YearCondition};
use crate::semanticscholar::PaperRecord;

/// Keep papers matching the criteria, capped at `max_results`.
///
/// Provider order is preserved and truncation happens after filtering.
/// Applying the same criteria twice returns the same set unchanged.
pub fn apply(
    papers: Vec<PaperRecord>,
    criteria: &SearchCriteria,
    max_results: usize,
) -> Vec<PaperRecord> {
    let mut kept: Vec<PaperRecord> = papers
        .into_iter()
        .filter(|p| matches_year(p, criteria) && matches_citations(p, criteria))
        .collect();
    kept.truncate(max_results);
    kept
}

/// A paper with no year is rejected under Exact/Before/After and accepted
/// under Any.
fn matches_year(paper: &PaperRecord, criteria: &SearchCriteria) -> bool {
    let Some(target) = criteria.year else {
        return true;
    };

    match criteria.year_condition {
        YearCondition::Any => true,
        YearCondition::Exact => paper.year == Some(target),
        YearCondition::Before => paper.year.is_some_and(|y| y < target),
        YearCondition::After => paper.year.is_some_and(|y| y > target),
    }
}

fn matches_citations(paper: &PaperRecord, criteria: &SearchCriteria) -> bool {
    criteria
        .min_citations
        .is_none_or(|min| paper.citation_count >= min)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paper(id: &str, year: Option<i32>, citations: u32) -> PaperRecord {
        PaperRecord {
            id: id.to_string(),
            title: format!("Paper {}", id),
            year,
            citation_count: citations,
            authors: vec!["A. Author".to_string()],
            venue: Some("Test Venue".to_string()),
        }
    }

    fn criteria(
        year: Option<i32>,
        year_condition: YearCondition,
        min_citations: Option<u32>,
    ) -> SearchCriteria {
        SearchCriteria {
            topic: "machine learning".to_string(),
            year,
            year_condition,
            min_citations,
        }
    }

    #[test]
    fn test_end_to_end_fixture() {
        // after 2020 with >= 50 citations keeps only the 2022 paper
        let papers = vec![
            paper("a", Some(2019), 500),
            paper("b", Some(2021), 40),
            paper("c", Some(2022), 60),
        ];
        let c = criteria(Some(2020), YearCondition::After, Some(50));

        let kept = apply(papers, &c, 5);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "c");
    }

    #[test]
    fn test_missing_year_rejected_unless_any() {
        let papers = || vec![paper("a", None, 100)];

        for condition in [
            YearCondition::Exact,
            YearCondition::Before,
            YearCondition::After,
        ] {
            let c = criteria(Some(2020), condition, None);
            assert!(apply(papers(), &c, 5).is_empty());
        }

        let c = criteria(None, YearCondition::Any, None);
        assert_eq!(apply(papers(), &c, 5).len(), 1);
    }

    #[test]
    fn test_before_and_exact() {
        let papers = vec![
            paper("a", Some(2019), 10),
            paper("b", Some(2020), 10),
            paper("c", Some(2021), 10),
        ];

        let before = criteria(Some(2020), YearCondition::Before, None);
        let kept = apply(papers.clone(), &before, 5);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "a");

        let exact = criteria(Some(2020), YearCondition::Exact, None);
        let kept = apply(papers, &exact, 5);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "b");
    }

    #[test]
    fn test_zero_citation_paper_fails_threshold() {
        // A missing citationCount decodes to 0 upstream
        let papers = vec![paper("a", Some(2021), 0), paper("b", Some(2021), 10)];
        let c = criteria(None, YearCondition::Any, Some(5));

        let kept = apply(papers, &c, 5);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "b");
    }

    #[test]
    fn test_truncation_preserves_order() {
        let papers: Vec<PaperRecord> = (0..20)
            .map(|i| paper(&i.to_string(), Some(2021), 10))
            .collect();
        let c = criteria(None, YearCondition::Any, None);

        let kept = apply(papers, &c, 5);
        assert_eq!(kept.len(), 5);
        let ids: Vec<&str> = kept.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["0", "1", "2", "3", "4"]);
    }

    #[test]
    fn test_idempotent() {
        let papers = vec![
            paper("a", Some(2019), 500),
            paper("b", Some(2021), 40),
            paper("c", Some(2022), 60),
            paper("d", None, 90),
        ];
        let c = criteria(Some(2018), YearCondition::After, Some(30));

        let once = apply(papers, &c, 2);
        let twice = apply(once.clone(), &c, 2);
        assert_eq!(once, twice);
    }
}
