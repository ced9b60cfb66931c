//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Convert store failures into caller-facing `TriviaError` kinds.
//!
//! # Invariants
//! - Service layer remains storage-agnostic: it only sees repository traits.
//! - Raw store errors never cross the service boundary.

use crate::repo::RepoError;
use crate::service::error::TriviaError;
use log::error;

pub mod category_service;
pub mod error;
pub mod pagination;
pub mod question_service;
pub mod quiz_service;

/// Logs a store failure and converts it into `Unprocessable`.
pub(crate) fn store_failure(event: &'static str, err: RepoError) -> TriviaError {
    error!("event={event} module=service status=error error_code=store_failure error={err}");
    TriviaError::Unprocessable
}
