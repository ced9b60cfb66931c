//! Request dispatch and JSON envelopes for the logical endpoints.
//!
//! # Responsibility
//! - Map `(method, path, body)` onto exactly one service operation.
//! - Render results as `{"success": true, ...}` and failures as
//!   `{"success": false, "error": <code>, "message": <text>}`.
//!
//! # Invariants
//! - `handle` never panics and always returns an envelope.
//! - A known path with an unsupported verb yields 405; an unknown path 404.
//! - Store error text never appears in an envelope.

use crate::model::category::CategoryMap;
use crate::model::question::{Question, QuestionId};
use crate::repo::category_repo::SqliteCategoryRepository;
use crate::repo::question_repo::SqliteQuestionRepository;
use crate::repo::RepoResult;
use crate::service::category_service::CategoryService;
use crate::service::error::{TriviaError, TriviaResult};
use crate::service::question_service::QuestionService;
use crate::service::quiz_service::QuizService;
use log::{error, info};
use rand::Rng;
use rusqlite::Connection;
use serde::Serialize;
use serde_json::{Map, Value};
use std::time::Instant;

pub mod body;
pub mod route;

pub use route::{Method, Route};

/// One logical request.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path with optional query string, e.g. `/questions?page=2`.
    pub target: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, target: impl Into<String>) -> Self {
        Self {
            method,
            target: target.into(),
            body: None,
        }
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Status code plus JSON envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    fn success(mut payload: Map<String, Value>) -> Self {
        payload.insert("success".to_string(), Value::Bool(true));
        Self {
            status: 200,
            body: Value::Object(payload),
        }
    }

    fn failure(err: &TriviaError) -> Self {
        let mut payload = Map::new();
        payload.insert("success".to_string(), Value::Bool(false));
        payload.insert("error".to_string(), Value::from(err.status_code()));
        payload.insert("message".to_string(), Value::from(err.message()));
        Self {
            status: err.status_code(),
            body: Value::Object(payload),
        }
    }

    /// Returns whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Serialize)]
struct CategoriesPayload {
    categories: CategoryMap,
}

#[derive(Serialize)]
struct DeletedPayload {
    deleted: QuestionId,
}

#[derive(Serialize)]
struct QuizPayload {
    question: Option<Question>,
}

/// Dispatcher over SQLite-backed services sharing one connection.
pub struct TriviaApi<'conn> {
    categories: CategoryService<SqliteCategoryRepository<'conn>>,
    questions: QuestionService<SqliteQuestionRepository<'conn>, SqliteCategoryRepository<'conn>>,
    quiz: QuizService<SqliteQuestionRepository<'conn>>,
}

impl<'conn> TriviaApi<'conn> {
    /// Builds the dispatcher from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let question_repo = SqliteQuestionRepository::try_new(conn)?;
        let category_repo = SqliteCategoryRepository::try_new(conn)?;
        Ok(Self {
            categories: CategoryService::new(category_repo),
            questions: QuestionService::new(question_repo, category_repo),
            quiz: QuizService::new(question_repo),
        })
    }

    /// Handles one request. `rng` drives quiz selection only.
    pub fn handle<G: Rng + ?Sized>(&self, request: &ApiRequest, rng: &mut G) -> ApiResponse {
        let started_at = Instant::now();
        let (path, query) = route::split_target(request.target.as_str());

        let response = match self.dispatch(request.method, path, query, request.body.as_ref(), rng)
        {
            Ok(payload) => ApiResponse::success(payload),
            Err(err) => ApiResponse::failure(&err),
        };

        info!(
            "event=api_request module=api method={} path={} status={} duration_ms={}",
            request.method,
            path,
            response.status,
            started_at.elapsed().as_millis()
        );
        response
    }

    fn dispatch<G: Rng + ?Sized>(
        &self,
        method: Method,
        path: &str,
        query: Option<&str>,
        json_body: Option<&Value>,
        rng: &mut G,
    ) -> TriviaResult<Map<String, Value>> {
        let route = Route::resolve(path).ok_or(TriviaError::NotFound)?;

        match (route, method) {
            (Route::Categories, Method::Get) => payload(&CategoriesPayload {
                categories: self.categories.list_categories()?,
            }),
            (Route::Questions, Method::Get) => {
                payload(&self.questions.list_page(route::page_param(query))?)
            }
            (Route::Questions, Method::Post) => {
                let draft = body::question_draft(body::json_object(json_body)?);
                payload(&self.questions.create_question(draft)?)
            }
            (Route::Question(id), Method::Delete) => payload(&DeletedPayload {
                deleted: self.questions.delete_question(id)?,
            }),
            (Route::CategoryQuestions(id), Method::Get) => {
                payload(&self.questions.questions_by_category(id)?)
            }
            (Route::QuestionSearch, Method::Post) => {
                let fields = body::json_object(json_body)?;
                payload(&self.questions.search(body::search_term(fields))?)
            }
            (Route::Quizzes, Method::Post) => {
                let request = body::quiz_request(body::json_object(json_body)?)?;
                payload(&QuizPayload {
                    question: self.quiz.next_question(
                        &request.previous_questions,
                        request.category_id,
                        rng,
                    )?,
                })
            }
            _ => Err(TriviaError::MethodNotAllowed),
        }
    }
}

fn payload<T: Serialize>(value: &T) -> TriviaResult<Map<String, Value>> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => {
            error!("event=api_encode module=api status=error error_code=non_object_payload");
            Err(TriviaError::Unprocessable)
        }
        Err(err) => {
            error!("event=api_encode module=api status=error error_code=encode_failed error={err}");
            Err(TriviaError::Unprocessable)
        }
    }
}
