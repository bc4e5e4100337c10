//! # safety-quiz
//!
//! A terminal quiz on hydrogen-sulfide workplace safety: fixed
//! multiple-choice questions, instant feedback, a running score and a graded
//! results screen.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use safety_quiz::{Config, Quiz, QuizError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     let quiz = Quiz::builtin(&Config::default())?;
//!     quiz.run().await
//! }
//! ```
//!
//! The progression rules live in [`QuizEngine`] and can be driven without a
//! terminal:
//!
//! ```rust
//! use safety_quiz::{builtin_questions, QuizEngine, Tier};
//!
//! let mut engine = QuizEngine::new(builtin_questions().unwrap()).unwrap();
//! for answer in [1, 1, 0, 2, 2] {
//!     engine.submit_answer(answer).unwrap();
//!     engine.advance();
//! }
//! assert_eq!(engine.summary().tier, Tier::Excellent);
//! ```

mod app;
mod config;
mod data;
mod engine;
mod models;
mod session;
pub mod terminal;
mod ui;

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{Event, EventStream, KeyEventKind};
use futures_util::StreamExt;
use thiserror::Error;
use tokio::sync::mpsc;

pub use app::{App, Toast, View};
pub use config::Config;
pub use data::{builtin_courses, builtin_questions, LoadError};
pub use engine::{
    AdvanceOutcome, AnswerFeedback, QuestionSetError, QuizEngine, QuizEvent, QuizState,
    QuizSummary, SubmitError, Tier,
};
pub use models::{Course, Question, NUM_OPTIONS};
pub use session::{AdvanceTicket, QuizSession, DEFAULT_FEEDBACK_DELAY};

const REDRAW_INTERVAL: Duration = Duration::from_millis(100);

/// Error type for quiz operations.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("failed to load quiz content: {0}")]
    Load(#[from] LoadError),
    #[error("invalid question set: {0}")]
    QuestionSet(#[from] QuestionSetError),
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
}

/// A quiz ready to run in the terminal.
pub struct Quiz {
    app: App,
    timer_rx: mpsc::UnboundedReceiver<AdvanceTicket>,
    events_rx: mpsc::UnboundedReceiver<QuizEvent>,
}

impl Quiz {
    /// Create a quiz over the given questions and course list.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::QuestionSet` if the questions are rejected by the
    /// engine.
    pub fn new(
        questions: Vec<Question>,
        courses: Vec<Course>,
        feedback_delay: Duration,
    ) -> Result<Self, QuizError> {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let engine = QuizEngine::new(questions)?.with_events(events_tx);
        let (session, timer_rx) = QuizSession::new(engine, feedback_delay);

        tracing::info!(
            questions = session.engine().total_questions(),
            courses = courses.len(),
            delay_ms = session.delay().as_millis() as u64,
            "quiz ready"
        );

        Ok(Self {
            app: App::new(session, courses),
            timer_rx,
            events_rx,
        })
    }

    /// Create the built-in H₂S safety quiz.
    pub fn builtin(config: &Config) -> Result<Self, QuizError> {
        Self::new(builtin_questions()?, builtin_courses()?, config.feedback_delay)
    }

    /// Run the quiz in the terminal until the user quits.
    pub async fn run(mut self) -> Result<(), QuizError> {
        let mut term = terminal::init()?;
        let result = run_event_loop(&mut term, &mut self).await;
        terminal::restore(&mut term)?;
        result
    }

    pub fn app(&self) -> &App {
        &self.app
    }
}

async fn run_event_loop(terminal: &mut terminal::QuizTerminal, quiz: &mut Quiz) -> Result<(), QuizError> {
    let mut input = EventStream::new();
    let mut redraw = tokio::time::interval(REDRAW_INTERVAL);

    loop {
        terminal.draw(|frame| ui::render(frame, &quiz.app))?;

        tokio::select! {
            event = input.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    if quiz.app.handle_key(key.code) {
                        break;
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(err)) => return Err(err.into()),
                None => break,
            },
            Some(ticket) = quiz.timer_rx.recv() => quiz.app.on_timer(ticket),
            Some(event) = quiz.events_rx.recv() => quiz.app.on_quiz_event(event, Instant::now()),
            _ = redraw.tick() => quiz.app.expire_toast(Instant::now()),
        }
    }

    tracing::info!("quiz closed");
    Ok(())
}
