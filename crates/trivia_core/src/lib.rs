//! Core domain logic for the trivia catalog.
//! This crate owns question/category queries, quiz selection and the
//! request envelopes built on top of them.

pub mod api;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use api::{ApiRequest, ApiResponse, Method, TriviaApi};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::category::{Category, CategoryId, CategoryMap, CategoryScope};
pub use model::question::{
    NewQuestion, Question, QuestionDraft, QuestionId, QuestionValidationError,
};
pub use repo::category_repo::{CategoryRepository, SqliteCategoryRepository};
pub use repo::question_repo::{QuestionListQuery, QuestionRepository, SqliteQuestionRepository};
pub use repo::{RepoError, RepoResult};
pub use search::substring::SearchTerm;
pub use service::category_service::CategoryService;
pub use service::error::{TriviaError, TriviaResult};
pub use service::pagination::QUESTIONS_PER_PAGE;
pub use service::question_service::{CreatedQuestion, QuestionList, QuestionPage, QuestionService};
pub use service::quiz_service::QuizService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
