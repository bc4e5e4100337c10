use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::{Course, Question};

const QUESTIONS_JSON: &str = include_str!("questions.json");
const COURSES_JSON: &str = include_str!("courses.json");

/// Error raised when the embedded quiz content cannot be parsed.
#[derive(Debug, Error)]
#[error("failed to parse embedded {what}: {source}")]
pub struct LoadError {
    what: &'static str,
    #[source]
    source: serde_json::Error,
}

/// The built-in question sequence, in presentation order.
pub fn builtin_questions() -> Result<Vec<Question>, LoadError> {
    parse("questions", QUESTIONS_JSON)
}

/// The built-in list of training courses.
pub fn builtin_courses() -> Result<Vec<Course>, LoadError> {
    parse("courses", COURSES_JSON)
}

fn parse<T: DeserializeOwned>(what: &'static str, json: &str) -> Result<Vec<T>, LoadError> {
    let items: Vec<T> = serde_json::from_str(json).map_err(|source| LoadError { what, source })?;
    tracing::debug!(what, count = items.len(), "loaded embedded content");
    Ok(items)
}
