//! A quiz run with its deferred advance.
//!
//! After an answer is accepted the session schedules a one-shot timer task.
//! When it fires, the task posts an [`AdvanceTicket`] back to whoever owns
//! the session, and the owner hands it to [`QuizSession::on_timer`]. Only the
//! ticket of the currently pending timer is honoured, so a timer that fires
//! after a restart is dropped even if it raced the abort.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::engine::{AdvanceOutcome, AnswerFeedback, QuizEngine, SubmitError};

/// Delay between an answer and moving on to the next question.
pub const DEFAULT_FEEDBACK_DELAY: Duration = Duration::from_millis(2000);

/// Identifies one scheduled advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceTicket(u64);

struct PendingAdvance {
    ticket: AdvanceTicket,
    handle: JoinHandle<()>,
}

pub struct QuizSession {
    engine: QuizEngine,
    delay: Duration,
    timer_tx: mpsc::UnboundedSender<AdvanceTicket>,
    pending: Option<PendingAdvance>,
    next_ticket: u64,
}

impl QuizSession {
    /// Wrap an engine. The returned receiver yields a ticket each time a
    /// scheduled advance is due.
    pub fn new(engine: QuizEngine, delay: Duration) -> (Self, mpsc::UnboundedReceiver<AdvanceTicket>) {
        let (timer_tx, timer_rx) = mpsc::unbounded_channel();
        let session = Self {
            engine,
            delay,
            timer_tx,
            pending: None,
            next_ticket: 0,
        };
        (session, timer_rx)
    }

    pub fn engine(&self) -> &QuizEngine {
        &self.engine
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn is_advance_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Answer the current question and schedule the advance.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns the engine's `SubmitError`; no timer is scheduled then.
    pub fn submit_answer(&mut self, option_index: usize) -> Result<AnswerFeedback, SubmitError> {
        let feedback = self.engine.submit_answer(option_index)?;
        self.schedule_advance();
        Ok(feedback)
    }

    /// Apply a fired timer. Stale tickets are ignored and return `None`.
    pub fn on_timer(&mut self, ticket: AdvanceTicket) -> Option<AdvanceOutcome> {
        match &self.pending {
            Some(pending) if pending.ticket == ticket => {
                self.pending = None;
                Some(self.engine.advance())
            }
            _ => {
                tracing::debug!(?ticket, "ignoring stale advance");
                None
            }
        }
    }

    /// Cancel any pending advance and start over.
    pub fn restart(&mut self) {
        self.cancel_pending();
        self.engine.restart();
    }

    fn schedule_advance(&mut self) {
        self.cancel_pending();

        let ticket = AdvanceTicket(self.next_ticket);
        self.next_ticket += 1;

        let delay = self.delay;
        let timer_tx = self.timer_tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = timer_tx.send(ticket);
        });

        tracing::debug!(?ticket, delay_ms = delay.as_millis() as u64, "advance scheduled");
        self.pending = Some(PendingAdvance { ticket, handle });
    }

    fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.handle.abort();
            tracing::debug!(ticket = ?pending.ticket, "advance cancelled");
        }
    }
}

impl Drop for QuizSession {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Question;

    fn session(delay_ms: u64) -> (QuizSession, mpsc::UnboundedReceiver<AdvanceTicket>) {
        let questions = (1..=3)
            .map(|id| Question {
                id,
                text: format!("Q{}", id),
                options: ["a".into(), "b".into(), "c".into(), "d".into()],
                correct_answer: 0,
                category: "test".into(),
            })
            .collect();
        let engine = QuizEngine::new(questions).unwrap();
        QuizSession::new(engine, Duration::from_millis(delay_ms))
    }

    #[tokio::test(start_paused = true)]
    async fn test_advance_fires_after_delay() {
        let (mut session, mut timer_rx) = session(2000);

        session.submit_answer(0).unwrap();
        assert!(session.is_advance_pending());

        tokio::time::advance(Duration::from_millis(1999)).await;
        assert!(timer_rx.try_recv().is_err());
        assert_eq!(session.engine().state().current_index, 0);

        let ticket = timer_rx.recv().await.unwrap();
        assert_eq!(session.on_timer(ticket), Some(AdvanceOutcome::NextQuestion(1)));
        assert!(!session.is_advance_pending());
        assert_eq!(session.engine().state().selected_answer, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_feedback_visible_before_advance() {
        let (mut session, mut timer_rx) = session(500);

        let feedback = session.submit_answer(2).unwrap();
        assert!(!feedback.is_correct);
        assert_eq!(session.engine().state().selected_answer, Some(2));
        assert_eq!(session.engine().state().answered_count, 1);

        let ticket = timer_rx.recv().await.unwrap();
        session.on_timer(ticket);
        assert_eq!(session.engine().state().current_index, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_cancels_pending_advance() {
        let (mut session, mut timer_rx) = session(2000);

        session.submit_answer(0).unwrap();
        let ticket = timer_rx.recv().await.unwrap();
        session.on_timer(ticket);
        session.submit_answer(1).unwrap();

        session.restart();
        assert!(!session.is_advance_pending());

        tokio::time::advance(Duration::from_millis(5000)).await;
        tokio::task::yield_now().await;
        assert!(timer_rx.try_recv().is_err());
        assert_eq!(session.engine().state(), &Default::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_ticket_is_ignored() {
        let (mut session, mut timer_rx) = session(100);

        session.submit_answer(0).unwrap();
        let stale = timer_rx.recv().await.unwrap();

        // Restart after the timer fired but before the ticket was handled.
        session.restart();
        assert_eq!(session.on_timer(stale), None);
        assert_eq!(session.engine().state(), &Default::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejected_submit_schedules_nothing() {
        let (mut session, mut timer_rx) = session(100);

        session.submit_answer(0).unwrap();
        assert!(session.submit_answer(1).is_err());

        let ticket = timer_rx.recv().await.unwrap();
        assert!(session.on_timer(ticket).is_some());

        tokio::time::advance(Duration::from_millis(1000)).await;
        tokio::task::yield_now().await;
        assert!(timer_rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_runs_to_completion() {
        let (mut session, mut timer_rx) = session(2000);
        let mut outcomes = Vec::new();

        for _ in 0..3 {
            session.submit_answer(0).unwrap();
            let ticket = timer_rx.recv().await.unwrap();
            outcomes.push(session.on_timer(ticket).unwrap());
        }

        assert_eq!(
            outcomes,
            vec![
                AdvanceOutcome::NextQuestion(1),
                AdvanceOutcome::NextQuestion(2),
                AdvanceOutcome::Completed,
            ]
        );
        assert!(session.engine().is_complete());
        assert_eq!(session.engine().state().score, 3);
    }
}
