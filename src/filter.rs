//! Keyword filter over a candidate pool
//!
//! Focus areas arrive as a single comma-separated string ("climate, water").
//! A question is kept when any term is a case-insensitive substring of any
//! of its tags, its category, its `question` text or its `text` field.
//! When nothing matches, the unfiltered pool is returned instead.

use crate::framework::Question;

/// Parsed, lower-cased focus terms
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FocusTerms {
    terms: Vec<String>,
}

impl FocusTerms {
    /// Split on commas, trim and lower-case each term.
    ///
    /// An empty input yields no terms. A term that trims to nothing (as in
    /// `"water,"`) is kept and matches any non-empty field.
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            return Self::default();
        }
        let terms = raw
            .to_lowercase()
            .split(',')
            .map(|term| term.trim().to_string())
            .collect();
        Self { terms }
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Whether any term hits any searchable field of the question
    pub fn matches(&self, question: &Question) -> bool {
        self.terms.iter().any(|term| question_contains(question, term))
    }
}

fn field_contains(field: Option<&str>, term: &str) -> bool {
    field.is_some_and(|value| !value.is_empty() && value.to_lowercase().contains(term))
}

fn question_contains(question: &Question, term: &str) -> bool {
    question
        .tags()
        .iter()
        .any(|tag| tag.to_lowercase().contains(term))
        || field_contains(question.category.as_deref(), term)
        || field_contains(question.question.as_deref(), term)
        || field_contains(question.text.as_deref(), term)
}

/// How the filter arrived at its output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOutcome {
    /// No focus areas given; pool passed through
    Unfiltered,
    /// At least one question matched
    Matched(usize),
    /// Focus areas matched nothing; pool passed through
    FellBack,
}

/// Filter `candidates` by `focus_areas`, preserving order.
pub fn filter(candidates: &[Question], focus_areas: &str) -> Vec<Question> {
    filter_with_outcome(candidates, focus_areas).0
}

/// Like [`filter`] but also reports whether matching or fallback applied.
pub fn filter_with_outcome(
    candidates: &[Question],
    focus_areas: &str,
) -> (Vec<Question>, FilterOutcome) {
    let focus = FocusTerms::parse(focus_areas);
    if focus.is_empty() {
        return (candidates.to_vec(), FilterOutcome::Unfiltered);
    }

    let matched: Vec<Question> = candidates
        .iter()
        .filter(|q| focus.matches(q))
        .cloned()
        .collect();

    if matched.is_empty() {
        tracing::debug!(
            "No questions matched focus areas {:?}; using unfiltered pool of {}",
            focus.terms(),
            candidates.len()
        );
        return (candidates.to_vec(), FilterOutcome::FellBack);
    }

    let count = matched.len();
    (matched, FilterOutcome::Matched(count))
}
