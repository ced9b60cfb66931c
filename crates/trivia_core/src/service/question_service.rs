//! Question use-case service.
//!
//! # Responsibility
//! - Paged listing, text search, and category filtering of questions.
//! - Validated create and delete with store failures mapped to caller-facing
//!   kinds.
//!
//! # Invariants
//! - Paged listing and text search treat an empty result as `NotFound`;
//!   category filtering treats it as success.
//! - Create returns the full re-read question list, not just the new row.
//! - Delete of an absent id leaves the store unchanged.

use crate::model::category::{category_map, Category, CategoryId, CategoryMap};
use crate::model::question::{Question, QuestionDraft, QuestionId};
use crate::repo::category_repo::CategoryRepository;
use crate::repo::question_repo::{QuestionListQuery, QuestionRepository};
use crate::repo::RepoError;
use crate::search::substring::{filter_questions, SearchTerm};
use crate::service::error::{TriviaError, TriviaResult};
use crate::service::pagination::{paginate, QUESTIONS_PER_PAGE};
use crate::service::store_failure;
use log::{info, warn};
use serde::Serialize;

/// One page of the unscoped question listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionPage {
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub categories: CategoryMap,
    /// Always `None`: the listing is never category-scoped.
    pub current_category: Option<Category>,
}

/// Search or category-filter result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionList {
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: Option<Category>,
}

/// Create result carrying refreshed state for callers to resync from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedQuestion {
    pub created: QuestionId,
    pub questions: Vec<Question>,
}

/// Question service facade over question and category repositories.
pub struct QuestionService<Q: QuestionRepository, C: CategoryRepository> {
    questions: Q,
    categories: C,
}

impl<Q: QuestionRepository, C: CategoryRepository> QuestionService<Q, C> {
    /// Creates a service using the provided repository implementations.
    pub fn new(questions: Q, categories: C) -> Self {
        Self {
            questions,
            categories,
        }
    }

    /// Returns page `page` (1-based) of all questions in store order.
    ///
    /// # Errors
    /// - `NotFound` when the store holds no questions or `page` is outside
    ///   `1..=ceil(total / 10)`.
    pub fn list_page(&self, page: i64) -> TriviaResult<QuestionPage> {
        let all = self.load_all()?;
        let total_questions = all.len();
        if total_questions == 0 {
            return Err(TriviaError::NotFound);
        }

        let Some(slice) = paginate(&all, page, QUESTIONS_PER_PAGE) else {
            return Err(TriviaError::NotFound);
        };
        let questions = slice.to_vec();

        let categories = self
            .categories
            .list_categories()
            .map_err(|err| store_failure("question_page", err))?;

        Ok(QuestionPage {
            questions,
            total_questions,
            categories: category_map(&categories),
            current_category: None,
        })
    }

    /// Searches question text for `term`, ignoring case.
    ///
    /// # Errors
    /// - `Unprocessable` when `term` is absent or empty.
    /// - `NotFound` when nothing matches.
    pub fn search(&self, term: Option<&str>) -> TriviaResult<QuestionList> {
        let term = SearchTerm::parse(term).ok_or(TriviaError::Unprocessable)?;
        let matches = filter_questions(self.load_all()?, &term);
        info!(
            "event=question_search module=service status=ok term_chars={} hits={}",
            term.char_len(),
            matches.len()
        );

        if matches.is_empty() {
            return Err(TriviaError::NotFound);
        }

        Ok(QuestionList {
            total_questions: matches.len(),
            questions: matches,
            current_category: None,
        })
    }

    /// Lists questions whose `category` equals `category_id`.
    ///
    /// # Errors
    /// - `NotFound` when no category with that id exists. An existing category
    ///   without questions yields an empty list.
    pub fn questions_by_category(&self, category_id: CategoryId) -> TriviaResult<QuestionList> {
        let category = self
            .categories
            .get_category(category_id)
            .map_err(|err| store_failure("question_by_category", err))?
            .ok_or(TriviaError::NotFound)?;

        let questions = self
            .questions
            .list_questions(&QuestionListQuery::in_category(category.id))
            .map_err(|err| store_failure("question_by_category", err))?;

        Ok(QuestionList {
            total_questions: questions.len(),
            questions,
            current_category: Some(category),
        })
    }

    /// Validates and inserts one question.
    ///
    /// # Errors
    /// - `BadRequest` when any field is missing, empty, or zero.
    /// - `Unprocessable` when the store rejects the insert; the write is
    ///   rolled back.
    pub fn create_question(&self, draft: QuestionDraft) -> TriviaResult<CreatedQuestion> {
        let new_question = draft.validate().map_err(|err| {
            warn!("event=question_create module=service status=rejected reason={err}");
            TriviaError::from(err)
        })?;

        let created = self
            .questions
            .create_question(&new_question)
            .map_err(|err| store_failure("question_create", err))?;
        info!("event=question_create module=service status=ok question_id={created}");

        Ok(CreatedQuestion {
            created,
            questions: self.load_all()?,
        })
    }

    /// Deletes one question by id and returns that id.
    ///
    /// # Errors
    /// - `NotFound` when the question does not exist or the store fails the
    ///   delete; failed deletes are rolled back.
    pub fn delete_question(&self, id: QuestionId) -> TriviaResult<QuestionId> {
        let existing = self.questions.get_question(id).map_err(|err| {
            log_delete_failure(id, &err);
            TriviaError::NotFound
        })?;

        if existing.is_none() {
            info!("event=question_delete module=service status=not_found question_id={id}");
            return Err(TriviaError::NotFound);
        }

        self.questions.delete_question(id).map_err(|err| {
            log_delete_failure(id, &err);
            TriviaError::NotFound
        })?;
        info!("event=question_delete module=service status=ok question_id={id}");

        Ok(id)
    }

    fn load_all(&self) -> TriviaResult<Vec<Question>> {
        self.questions
            .list_questions(&QuestionListQuery::default())
            .map_err(|err| store_failure("question_list", err))
    }
}

fn log_delete_failure(id: QuestionId, err: &RepoError) {
    warn!("event=question_delete module=service status=error question_id={id} error={err}");
}
