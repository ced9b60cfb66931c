//! Question domain model.
//!
//! # Responsibility
//! - Define the persisted question record and its creation input.
//! - Validate creation input before it reaches the store.
//!
//! # Invariants
//! - `id` is assigned by the store and never changes.
//! - Creation input treats empty text and zero integers as missing.
//!   `category = 0` and `difficulty = 0` are therefore rejected even where
//!   they could be meaningful.

use crate::model::category::CategoryId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned question identifier.
pub type QuestionId = i64;

/// Persisted trivia question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub question: String,
    pub answer: String,
    /// Soft reference to `Category::id`; may dangle.
    pub category: CategoryId,
    /// Expected range 1-5, not enforced.
    pub difficulty: i64,
}

/// Validated creation input. All fields are present and truthy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: CategoryId,
    pub difficulty: i64,
}

/// Creation input as received, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionDraft {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<CategoryId>,
    pub difficulty: Option<i64>,
}

/// Validation error for question creation input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionValidationError {
    /// Field is absent, an empty string, or zero.
    MissingField(&'static str),
}

impl Display for QuestionValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "missing required field `{field}`"),
        }
    }
}

impl Error for QuestionValidationError {}

impl QuestionDraft {
    /// Validates the draft into a `NewQuestion`.
    ///
    /// Fields are checked in `question, answer, category, difficulty` order and
    /// the first missing one is reported. Whitespace-only text is accepted.
    pub fn validate(self) -> Result<NewQuestion, QuestionValidationError> {
        let question = self
            .question
            .filter(|value| !value.is_empty())
            .ok_or(QuestionValidationError::MissingField("question"))?;
        let answer = self
            .answer
            .filter(|value| !value.is_empty())
            .ok_or(QuestionValidationError::MissingField("answer"))?;
        let category = self
            .category
            .filter(|value| *value != 0)
            .ok_or(QuestionValidationError::MissingField("category"))?;
        let difficulty = self
            .difficulty
            .filter(|value| *value != 0)
            .ok_or(QuestionValidationError::MissingField("difficulty"))?;

        Ok(NewQuestion {
            question,
            answer,
            category,
            difficulty,
        })
    }
}
