//! Path and query-string resolution for the logical endpoints.

use crate::model::category::CategoryId;
use crate::model::question::QuestionId;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use url::form_urlencoded;

static API_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/api/v1\.0(/.*)$").expect("valid prefix regex"));
static QUESTION_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/questions/([0-9]+)$").expect("valid question id regex"));
static CATEGORY_QUESTIONS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^/categories/([0-9]+)/questions$").expect("valid category questions regex")
});

/// Request verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl FromStr for Method {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            "HEAD" => Ok(Self::Head),
            "OPTIONS" => Ok(Self::Options),
            other => Err(format!("unsupported method `{other}`")),
        }
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        };
        f.write_str(name)
    }
}

/// Known resource paths. Verb checks happen in the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Categories,
    CategoryQuestions(CategoryId),
    Questions,
    Question(QuestionId),
    QuestionSearch,
    Quizzes,
}

impl Route {
    /// Resolves a path (without query string). The `/api/v1.0` prefix is
    /// optional.
    pub fn resolve(path: &str) -> Option<Self> {
        let path = API_PREFIX_RE
            .captures(path)
            .and_then(|caps| caps.get(1))
            .map_or(path, |m| m.as_str());

        match path {
            "/categories" => return Some(Self::Categories),
            "/questions" => return Some(Self::Questions),
            "/questions/search" => return Some(Self::QuestionSearch),
            "/quizzes" => return Some(Self::Quizzes),
            _ => {}
        }

        if let Some(id) = capture_id(&QUESTION_ID_RE, path) {
            return Some(Self::Question(id));
        }
        if let Some(id) = capture_id(&CATEGORY_QUESTIONS_RE, path) {
            return Some(Self::CategoryQuestions(id));
        }

        None
    }
}

fn capture_id(pattern: &Regex, path: &str) -> Option<i64> {
    pattern
        .captures(path)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Splits a request target into path and optional query string.
pub fn split_target(target: &str) -> (&str, Option<&str>) {
    match target.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (target, None),
    }
}

/// Reads the first `page` query parameter, percent-decoded. Missing or
/// non-integer values mean page 1.
pub fn page_param(query: Option<&str>) -> i64 {
    query
        .and_then(|query| {
            form_urlencoded::parse(query.as_bytes()).find(|(key, _)| key == "page")
        })
        .and_then(|(_, value)| value.trim().parse().ok())
        .unwrap_or(1)
}
