//! JSON request body decoding for POST endpoints.
//!
//! Decoding is lenient where the stock web client is: integer fields accept
//! numbers or numeric strings. Fields of any other JSON type are treated as
//! absent and left to the service layer to reject.

use crate::model::category::CategoryId;
use crate::model::question::{QuestionDraft, QuestionId};
use crate::service::error::{TriviaError, TriviaResult, MESSAGE_BAD_REQUEST};
use serde_json::{Map, Value};

/// Decoded quiz request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizRequest {
    pub previous_questions: Vec<QuestionId>,
    pub category_id: Option<CategoryId>,
}

/// Requires the body to be a JSON object.
pub fn json_object(body: Option<&Value>) -> TriviaResult<&Map<String, Value>> {
    body.and_then(Value::as_object)
        .ok_or(TriviaError::BadRequest(MESSAGE_BAD_REQUEST))
}

/// Reads an integer from a JSON number or numeric string.
pub fn int_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// Decodes the create-question body into an unvalidated draft.
pub fn question_draft(body: &Map<String, Value>) -> QuestionDraft {
    QuestionDraft {
        question: text_field(body, "question"),
        answer: text_field(body, "answer"),
        category: body.get("category").and_then(int_value),
        difficulty: body.get("difficulty").and_then(int_value),
    }
}

/// Reads `searchTerm`; non-string values count as absent.
pub fn search_term(body: &Map<String, Value>) -> Option<&str> {
    body.get("searchTerm").and_then(Value::as_str)
}

/// Decodes `previous_questions` and `quiz_category`.
///
/// # Errors
/// - `BadRequest` when `previous_questions` is not an array of integers, or
///   `quiz_category` is not an object, or its `id` is present, non-null and
///   not an integer. A missing or null `id` means all categories.
pub fn quiz_request(body: &Map<String, Value>) -> TriviaResult<QuizRequest> {
    let previous_questions = match body.get("previous_questions") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| item.as_i64().ok_or(TriviaError::BadRequest(MESSAGE_BAD_REQUEST)))
            .collect::<TriviaResult<Vec<_>>>()?,
        Some(_) => return Err(TriviaError::BadRequest(MESSAGE_BAD_REQUEST)),
    };

    let category_id = match body.get("quiz_category") {
        None | Some(Value::Null) => None,
        Some(Value::Object(category)) => match category.get("id") {
            None | Some(Value::Null) => None,
            Some(id) => Some(int_value(id).ok_or(TriviaError::BadRequest(MESSAGE_BAD_REQUEST))?),
        },
        Some(_) => return Err(TriviaError::BadRequest(MESSAGE_BAD_REQUEST)),
    };

    Ok(QuizRequest {
        previous_questions,
        category_id,
    })
}

fn text_field(body: &Map<String, Value>, key: &str) -> Option<String> {
    body.get(key).and_then(Value::as_str).map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::{int_value, json_object, question_draft, quiz_request, search_term};
    use crate::service::error::TriviaError;
    use serde_json::json;

    #[test]
    fn non_object_bodies_are_bad_requests() {
        assert!(matches!(
            json_object(None),
            Err(TriviaError::BadRequest(_))
        ));
        assert!(json_object(Some(&json!([1, 2]))).is_err());
        assert!(json_object(Some(&json!({}))).is_ok());
    }

    #[test]
    fn integers_accept_numeric_strings() {
        assert_eq!(int_value(&json!(3)), Some(3));
        assert_eq!(int_value(&json!("4")), Some(4));
        assert_eq!(int_value(&json!(2.5)), None);
        assert_eq!(int_value(&json!(true)), None);
    }

    #[test]
    fn draft_treats_wrong_types_as_absent() {
        let body = json!({
            "question": "Capital of Peru?",
            "answer": 42,
            "category": "3",
            "difficulty": 2
        });
        let draft = question_draft(body.as_object().unwrap());
        assert_eq!(draft.question.as_deref(), Some("Capital of Peru?"));
        assert_eq!(draft.answer, None);
        assert_eq!(draft.category, Some(3));
        assert_eq!(draft.difficulty, Some(2));
    }

    #[test]
    fn search_term_ignores_non_strings() {
        let body = json!({ "searchTerm": 5 });
        assert_eq!(search_term(body.as_object().unwrap()), None);
    }

    #[test]
    fn quiz_request_defaults_and_category_forms() {
        let empty = quiz_request(json!({}).as_object().unwrap()).unwrap();
        assert!(empty.previous_questions.is_empty());
        assert_eq!(empty.category_id, None);

        let body = json!({
            "previous_questions": [4, 9],
            "quiz_category": { "type": "Art", "id": "2" }
        });
        let scoped = quiz_request(body.as_object().unwrap()).unwrap();
        assert_eq!(scoped.previous_questions, vec![4, 9]);
        assert_eq!(scoped.category_id, Some(2));

        let unscoped = quiz_request(json!({ "quiz_category": {} }).as_object().unwrap()).unwrap();
        assert_eq!(unscoped.category_id, None);

        let null_id = json!({ "quiz_category": { "type": "Art", "id": null } });
        assert_eq!(quiz_request(null_id.as_object().unwrap()).unwrap().category_id, None);

        let label_only = json!({ "quiz_category": { "type": "Art" } });
        assert_eq!(quiz_request(label_only.as_object().unwrap()).unwrap().category_id, None);
    }

    #[test]
    fn malformed_quiz_fields_are_bad_requests() {
        let bad_previous = json!({ "previous_questions": "1,2" });
        assert!(quiz_request(bad_previous.as_object().unwrap()).is_err());

        let bad_item = json!({ "previous_questions": [1, "x"] });
        assert!(quiz_request(bad_item.as_object().unwrap()).is_err());

        let bad_category = json!({ "quiz_category": { "id": "art" } });
        assert!(quiz_request(bad_category.as_object().unwrap()).is_err());

        let bad_shape = json!({ "quiz_category": 3 });
        assert!(quiz_request(bad_shape.as_object().unwrap()).is_err());
    }
}
