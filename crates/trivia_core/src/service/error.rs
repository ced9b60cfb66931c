//! Caller-facing failure kinds for trivia use-cases.
//!
//! # Invariants
//! - Every store failure is converted into one of these kinds at the service
//!   boundary; store error text is logged, never carried here.
//! - `status_code()` and `message()` are stable wire values.

use crate::model::question::QuestionValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const MESSAGE_BAD_REQUEST: &str = "Bad request";
pub const MESSAGE_MISSING_FIELDS: &str = "Missing required fields";
pub const MESSAGE_NOT_FOUND: &str = "Resource not found";
pub const MESSAGE_METHOD_NOT_ALLOWED: &str = "Method not allowed.";
pub const MESSAGE_UNPROCESSABLE: &str = "Unprocessable entity";

pub type TriviaResult<T> = Result<T, TriviaError>;

/// Failure taxonomy surfaced to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriviaError {
    /// Malformed or missing required input.
    BadRequest(&'static str),
    /// No matching resource, exhausted page range, or failed delete.
    NotFound,
    /// Operation invoked with an unsupported verb.
    MethodNotAllowed,
    /// Well-formed input the store cannot satisfy, or a blank required argument.
    Unprocessable,
}

impl TriviaError {
    /// Numeric status code used in failure envelopes.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest(_) => 400,
            Self::NotFound => 404,
            Self::MethodNotAllowed => 405,
            Self::Unprocessable => 422,
        }
    }

    /// Human-readable message used in failure envelopes.
    pub fn message(&self) -> &'static str {
        match self {
            Self::BadRequest(message) => *message,
            Self::NotFound => MESSAGE_NOT_FOUND,
            Self::MethodNotAllowed => MESSAGE_METHOD_NOT_ALLOWED,
            Self::Unprocessable => MESSAGE_UNPROCESSABLE,
        }
    }
}

impl Display for TriviaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.status_code(), self.message())
    }
}

impl Error for TriviaError {}

impl From<QuestionValidationError> for TriviaError {
    fn from(_: QuestionValidationError) -> Self {
        Self::BadRequest(MESSAGE_MISSING_FIELDS)
    }
}

#[cfg(test)]
mod tests {
    use super::TriviaError;
    use crate::model::question::QuestionValidationError;

    #[test]
    fn kinds_map_to_stable_codes() {
        assert_eq!(TriviaError::BadRequest("x").status_code(), 400);
        assert_eq!(TriviaError::NotFound.status_code(), 404);
        assert_eq!(TriviaError::MethodNotAllowed.status_code(), 405);
        assert_eq!(TriviaError::Unprocessable.status_code(), 422);
        assert_eq!(TriviaError::MethodNotAllowed.message(), "Method not allowed.");
    }

    #[test]
    fn validation_errors_become_bad_request() {
        let err: TriviaError = QuestionValidationError::MissingField("answer").into();
        assert_eq!(err, TriviaError::BadRequest("Missing required fields"));
    }
}
