//! Question text search.
//!
//! # Responsibility
//! - Case-insensitive substring matching over question text.
//! - Distinguish a blank term from a term with no matches.

pub mod substring;
