use serde::{Deserialize, Serialize};

/// Number of answer options every question carries.
pub const NUM_OPTIONS: usize = 4;

/// A single multiple-choice question. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    pub text: String,
    pub options: [String; NUM_OPTIONS],
    pub correct_answer: usize,
    pub category: String,
}

impl Question {
    pub fn is_correct(&self, option_index: usize) -> bool {
        option_index == self.correct_answer
    }

    /// Text of the correct option.
    ///
    /// Falls back to an empty string for a question whose `correct_answer`
    /// was never validated; the engine rejects such questions up front.
    pub fn correct_option(&self) -> &str {
        self.options
            .get(self.correct_answer)
            .map(String::as_str)
            .unwrap_or_default()
    }
}
