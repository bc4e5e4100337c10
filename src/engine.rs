//! Quiz progression engine.
//!
//! Owns the fixed question sequence and the single mutable [`QuizState`].
//! Every transition goes through [`QuizEngine::submit_answer`],
//! [`QuizEngine::advance`] or [`QuizEngine::restart`]; rendering code only
//! ever sees read-only snapshots.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::models::{Question, NUM_OPTIONS};

/// Rejected question sequences.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionSetError {
    #[error("quiz needs at least one question")]
    Empty,
    #[error("question {id} marks option {index} as correct, which does not exist")]
    CorrectAnswerOutOfRange { id: u32, index: usize },
    #[error("question id {0} appears more than once")]
    DuplicateId(u32),
}

/// Rejected answer submissions. The state is left untouched.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum SubmitError {
    #[error("question {question_index} has already been answered")]
    AlreadyAnswered { question_index: usize },
    #[error("option {0} is out of range")]
    OptionOutOfRange(usize),
    #[error("quiz is already complete")]
    QuizComplete,
}

/// Mutable progress through the question sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QuizState {
    pub current_index: usize,
    pub selected_answer: Option<usize>,
    pub score: usize,
    pub answered_count: usize,
    pub is_complete: bool,
}

/// Outcome of a single accepted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerFeedback {
    pub question_id: u32,
    pub selected: usize,
    pub is_correct: bool,
    pub correct_option_text: String,
}

/// Notifications emitted by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizEvent {
    /// An answer was recorded for the current question.
    Answered(AnswerFeedback),
}

/// What [`QuizEngine::advance`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Moved on to the question at this index.
    NextQuestion(usize),
    /// The last question was answered; the quiz is now complete.
    Completed,
    /// Nothing to do: the current question is unanswered or the quiz is
    /// already complete.
    Idle,
}

/// Grade band for the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    NeedsStudy,
    Good,
    Excellent,
}

impl Tier {
    /// Classify `score / total`. Each band includes its lower bound, so
    /// exactly 60% is `Good` and exactly 80% is `Excellent`.
    pub fn classify(score: usize, total: usize) -> Self {
        // score/total >= 4/5  <=>  5*score >= 4*total, no float rounding
        if score * 5 >= total * 4 {
            Tier::Excellent
        } else if score * 5 >= total * 3 {
            Tier::Good
        } else {
            Tier::NeedsStudy
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::NeedsStudy => "Нужно подучить",
            Tier::Good => "Хорошо!",
            Tier::Excellent => "Отлично!",
        }
    }
}

/// Derived view of the current state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizSummary {
    pub score: usize,
    pub total: usize,
    /// Correct answers as a rounded percentage of all questions.
    pub percentage: u32,
    /// How far into the sequence the current question is. `None` once the
    /// quiz is complete.
    pub progress_percent: Option<f64>,
    pub tier: Tier,
}

impl QuizSummary {
    /// Unrounded share of correct answers, for gauges.
    pub fn accuracy(&self) -> f64 {
        self.score as f64 / self.total as f64
    }
}

pub struct QuizEngine {
    questions: Arc<[Question]>,
    state: QuizState,
    events: Option<mpsc::UnboundedSender<QuizEvent>>,
}

impl QuizEngine {
    /// Create an engine over a fixed question sequence.
    ///
    /// # Errors
    ///
    /// Returns `QuestionSetError` if the sequence is empty, a question's
    /// correct answer is not one of its options, or an id repeats.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuestionSetError> {
        validate_questions(&questions)?;

        Ok(Self {
            questions: questions.into(),
            state: QuizState::default(),
            events: None,
        })
    }

    /// Attach a channel that receives a [`QuizEvent`] for every accepted
    /// answer.
    #[must_use]
    pub fn with_events(mut self, events: mpsc::UnboundedSender<QuizEvent>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn state(&self) -> &QuizState {
        &self.state
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.state.current_index]
    }

    pub fn is_complete(&self) -> bool {
        self.state.is_complete
    }

    /// Record an answer for the current question.
    ///
    /// # Errors
    ///
    /// Returns `SubmitError` if the quiz is complete, the current question
    /// already has an answer, or `option_index` is not a valid option.
    pub fn submit_answer(&mut self, option_index: usize) -> Result<AnswerFeedback, SubmitError> {
        if let Err(err) = self.check_submit(option_index) {
            tracing::warn!(option_index, %err, "rejected answer");
            return Err(err);
        }

        let question = &self.questions[self.state.current_index];
        let is_correct = question.is_correct(option_index);

        self.state.selected_answer = Some(option_index);
        if is_correct {
            self.state.score += 1;
        }
        self.state.answered_count += 1;

        let feedback = AnswerFeedback {
            question_id: question.id,
            selected: option_index,
            is_correct,
            correct_option_text: question.correct_option().to_string(),
        };

        tracing::debug!(
            question_id = question.id,
            option_index,
            is_correct,
            score = self.state.score,
            "answer recorded"
        );

        if let Some(events) = &self.events {
            // Receiver gone means nobody is rendering; the answer still counts.
            let _ = events.send(QuizEvent::Answered(feedback.clone()));
        }

        Ok(feedback)
    }

    fn check_submit(&self, option_index: usize) -> Result<(), SubmitError> {
        if self.state.is_complete {
            return Err(SubmitError::QuizComplete);
        }
        if self.state.selected_answer.is_some() {
            return Err(SubmitError::AlreadyAnswered {
                question_index: self.state.current_index,
            });
        }
        if option_index >= NUM_OPTIONS {
            return Err(SubmitError::OptionOutOfRange(option_index));
        }
        Ok(())
    }

    /// Move past the answered question, or complete the quiz after the last
    /// one.
    pub fn advance(&mut self) -> AdvanceOutcome {
        if self.state.is_complete || self.state.selected_answer.is_none() {
            return AdvanceOutcome::Idle;
        }

        if self.state.current_index + 1 < self.questions.len() {
            self.state.current_index += 1;
            self.state.selected_answer = None;
            tracing::debug!(current_index = self.state.current_index, "advanced");
            AdvanceOutcome::NextQuestion(self.state.current_index)
        } else {
            self.state.is_complete = true;
            tracing::info!(
                score = self.state.score,
                total = self.questions.len(),
                "quiz complete"
            );
            AdvanceOutcome::Completed
        }
    }

    /// Discard all progress and start over from the first question.
    pub fn restart(&mut self) {
        self.state = QuizState::default();
        tracing::info!("quiz restarted");
    }

    pub fn summary(&self) -> QuizSummary {
        let total = self.questions.len();
        let score = self.state.score;
        let percentage = (100.0 * score as f64 / total as f64).round() as u32;
        let progress_percent = (!self.state.is_complete)
            .then(|| 100.0 * (self.state.current_index + 1) as f64 / total as f64);

        QuizSummary {
            score,
            total,
            percentage,
            progress_percent,
            tier: Tier::classify(score, total),
        }
    }
}

fn validate_questions(questions: &[Question]) -> Result<(), QuestionSetError> {
    if questions.is_empty() {
        return Err(QuestionSetError::Empty);
    }

    let mut seen = HashSet::with_capacity(questions.len());
    for question in questions {
        if question.correct_answer >= NUM_OPTIONS {
            return Err(QuestionSetError::CorrectAnswerOutOfRange {
                id: question.id,
                index: question.correct_answer,
            });
        }
        if !seen.insert(question.id) {
            return Err(QuestionSetError::DuplicateId(question.id));
        }
    }

    Ok(())
}
