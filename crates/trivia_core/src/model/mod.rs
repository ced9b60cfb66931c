//! Trivia domain model.
//!
//! # Responsibility
//! - Define the question and category records shared by repositories,
//!   services and the request dispatcher.
//!
//! # Invariants
//! - Identity (`QuestionId`, `CategoryId`) is assigned by the store only.
//! - `Question::category` is a soft reference; it may point at no category.

pub mod category;
pub mod question;
