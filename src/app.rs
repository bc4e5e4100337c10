use std::time::{Duration, Instant};

use crossterm::event::KeyCode;

use crate::engine::{AdvanceOutcome, AnswerFeedback, QuizEvent, QuizSummary};
use crate::models::{Course, Question, NUM_OPTIONS};
use crate::session::{AdvanceTicket, QuizSession};

const CORRECT_TOAST_DURATION: Duration = Duration::from_millis(2000);
const INCORRECT_TOAST_DURATION: Duration = Duration::from_millis(3000);

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Quiz,
    Result,
}

/// Transient answer notification.
#[derive(Debug, Clone)]
pub struct Toast {
    pub feedback: AnswerFeedback,
    pub expires_at: Instant,
}

pub struct App {
    session: QuizSession,
    courses: Vec<Course>,
    cursor: usize,
    toast: Option<Toast>,
    pub should_quit: bool,
}

impl App {
    pub fn new(session: QuizSession, courses: Vec<Course>) -> Self {
        Self {
            session,
            courses,
            cursor: 0,
            toast: None,
            should_quit: false,
        }
    }

    pub fn view(&self) -> View {
        if self.session.engine().is_complete() {
            View::Result
        } else {
            View::Quiz
        }
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn current_question(&self) -> &Question {
        self.session.engine().current_question()
    }

    pub fn current_question_number(&self) -> usize {
        self.session.engine().state().current_index + 1
    }

    pub fn total_questions(&self) -> usize {
        self.session.engine().total_questions()
    }

    pub fn selected_answer(&self) -> Option<usize> {
        self.session.engine().state().selected_answer
    }

    pub fn summary(&self) -> QuizSummary {
        self.session.engine().summary()
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    fn is_locked(&self) -> bool {
        self.selected_answer().is_some()
    }

    pub fn select_next_option(&mut self) {
        if !self.is_locked() {
            self.cursor = (self.cursor + 1) % NUM_OPTIONS;
        }
    }

    pub fn select_previous_option(&mut self) {
        if !self.is_locked() {
            self.cursor = (self.cursor + NUM_OPTIONS - 1) % NUM_OPTIONS;
        }
    }

    /// Answer with the option under the cursor.
    pub fn submit_selected(&mut self) {
        self.submit(self.cursor);
    }

    /// Answer with a specific option. Ignored while the current answer is on
    /// display.
    pub fn submit(&mut self, option_index: usize) {
        if self.is_locked() || self.view() != View::Quiz {
            return;
        }
        self.cursor = option_index;
        // Feedback arrives through the engine's event channel.
        let _ = self.session.submit_answer(option_index);
    }

    pub fn restart(&mut self) {
        self.session.restart();
        self.cursor = 0;
        self.toast = None;
    }

    pub fn on_timer(&mut self, ticket: AdvanceTicket) {
        if let Some(AdvanceOutcome::NextQuestion(_)) = self.session.on_timer(ticket) {
            self.cursor = 0;
        }
    }

    pub fn on_quiz_event(&mut self, event: QuizEvent, now: Instant) {
        match event {
            QuizEvent::Answered(feedback) => {
                let duration = if feedback.is_correct {
                    CORRECT_TOAST_DURATION
                } else {
                    INCORRECT_TOAST_DURATION
                };
                self.toast = Some(Toast {
                    feedback,
                    expires_at: now + duration,
                });
            }
        }
    }

    pub fn expire_toast(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|t| t.expires_at <= now) {
            self.toast = None;
        }
    }

    /// Returns true if the app should exit.
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        if matches!(key, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc) {
            self.should_quit = true;
            return true;
        }

        match self.view() {
            View::Quiz => self.handle_quiz_key(key),
            View::Result => self.handle_result_key(key),
        }
        false
    }

    fn handle_quiz_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => self.select_previous_option(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next_option(),
            KeyCode::Enter | KeyCode::Char(' ') => self.submit_selected(),
            KeyCode::Char('r') | KeyCode::Char('R') => self.restart(),
            KeyCode::Char(c) => {
                if let Some(index) = option_for_key(c) {
                    self.submit(index);
                }
            }
            _ => {}
        }
    }

    fn handle_result_key(&mut self, key: KeyCode) {
        if matches!(key, KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter) {
            self.restart();
        }
    }
}

/// Map `a`-`d` / `1`-`4` to an option index.
fn option_for_key(c: char) -> Option<usize> {
    match c.to_ascii_lowercase() {
        'a'..='d' => Some(c.to_ascii_lowercase() as usize - 'a' as usize),
        '1'..='4' => Some(c as usize - '1' as usize),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;

    use super::*;
    use crate::data::{builtin_courses, builtin_questions};
    use crate::engine::QuizEngine;

    fn app() -> (
        App,
        mpsc::UnboundedReceiver<AdvanceTicket>,
        mpsc::UnboundedReceiver<QuizEvent>,
    ) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let engine = QuizEngine::new(builtin_questions().unwrap())
            .unwrap()
            .with_events(events_tx);
        let (session, timer_rx) = QuizSession::new(engine, Duration::from_millis(2000));
        (App::new(session, builtin_courses().unwrap()), timer_rx, events_rx)
    }

    #[test]
    fn test_option_for_key() {
        assert_eq!(option_for_key('a'), Some(0));
        assert_eq!(option_for_key('D'), Some(3));
        assert_eq!(option_for_key('3'), Some(2));
        assert_eq!(option_for_key('e'), None);
        assert_eq!(option_for_key('5'), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cursor_wraps_and_locks_after_answer() {
        let (mut app, _timer_rx, _events_rx) = app();

        app.handle_key(KeyCode::Up);
        assert_eq!(app.cursor(), 3);
        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Down);
        assert_eq!(app.cursor(), 1);

        app.handle_key(KeyCode::Enter);
        assert_eq!(app.selected_answer(), Some(1));

        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Char('c'));
        assert_eq!(app.cursor(), 1);
        assert_eq!(app.session().engine().state().answered_count, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_toast_from_event() {
        let (mut app, _timer_rx, mut events_rx) = app();
        let now = Instant::now();

        app.handle_key(KeyCode::Char('a'));
        app.on_quiz_event(events_rx.try_recv().unwrap(), now);

        let toast = app.toast().unwrap();
        assert!(!toast.feedback.is_correct);
        assert_eq!(toast.feedback.correct_option_text, "10 мг/м³");
        assert_eq!(toast.expires_at, now + INCORRECT_TOAST_DURATION);

        app.expire_toast(now + Duration::from_millis(2999));
        assert!(app.toast().is_some());
        app.expire_toast(now + INCORRECT_TOAST_DURATION);
        assert!(app.toast().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_run_and_restart() {
        let (mut app, mut timer_rx, _events_rx) = app();

        for key in ['b', 'b', 'a', 'c', 'c'] {
            app.handle_key(KeyCode::Char(key));
            let ticket = timer_rx.recv().await.unwrap();
            app.on_timer(ticket);
        }

        assert_eq!(app.view(), View::Result);
        assert_eq!(app.summary().percentage, 100);

        assert!(!app.handle_key(KeyCode::Char('r')));
        assert_eq!(app.view(), View::Quiz);
        assert_eq!(app.current_question_number(), 1);
        assert_eq!(app.cursor(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_mid_feedback_drops_pending_advance() {
        let (mut app, mut timer_rx, _events_rx) = app();

        app.handle_key(KeyCode::Char('b'));
        app.handle_key(KeyCode::Char('r'));
        assert!(!app.session().is_advance_pending());
        assert!(app.toast().is_none());

        tokio::time::advance(Duration::from_millis(3000)).await;
        tokio::task::yield_now().await;
        assert!(timer_rx.try_recv().is_err());
        assert_eq!(app.current_question_number(), 1);
        assert_eq!(app.selected_answer(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_quit_from_any_view() {
        let (mut app, _timer_rx, _events_rx) = app();
        assert!(app.handle_key(KeyCode::Esc));
        assert!(app.should_quit);
    }
}
