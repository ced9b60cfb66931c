//! Case-insensitive substring filter over question text.
//!
//! # Invariants
//! - Matching is position-independent (`contains`, not prefix).
//! - Both sides are folded with Unicode lowercase before comparison.
//! - Input order is preserved in the output.

use crate::model::question::Question;

/// Folded search term ready for matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm {
    folded: String,
}

impl SearchTerm {
    /// Builds a term, returning `None` for an absent or empty input.
    ///
    /// Whitespace-only input is kept as a literal term.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        let raw = raw.filter(|value| !value.is_empty())?;
        Some(Self {
            folded: raw.to_lowercase(),
        })
    }

    /// Returns whether `text` contains this term, ignoring case.
    pub fn matches(&self, text: &str) -> bool {
        text.to_lowercase().contains(self.folded.as_str())
    }

    /// Character count of the term, for diagnostics.
    pub fn char_len(&self) -> usize {
        self.folded.chars().count()
    }
}

/// Keeps questions whose `question` text contains `term`.
pub fn filter_questions(questions: Vec<Question>, term: &SearchTerm) -> Vec<Question> {
    questions
        .into_iter()
        .filter(|question| term.matches(question.question.as_str()))
        .collect()
}
