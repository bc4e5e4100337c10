use serde::Deserialize;

/// A promotional training course shown below the quiz.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Course {
    pub title: String,
    pub description: String,
    pub lessons: u32,
    pub duration: String,
}
