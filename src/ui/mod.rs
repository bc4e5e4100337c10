mod courses;
mod quiz;
mod result;
mod toast;

use ratatui::{
    prelude::*,
    widgets::{Block, Paragraph},
};

use crate::app::{App, View};

const TITLE: &str = "ОХРАНА ТРУДА PRO";
const SUBTITLE: &str = "Образовательная платформа для подготовки специалистов по охране труда";

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(7),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_header(frame, chunks[0]);

    match app.view() {
        View::Quiz => quiz::render(frame, chunks[1], app),
        View::Result => result::render(frame, chunks[1], app),
    }

    courses::render(frame, chunks[2], app.courses());
    render_controls(frame, chunks[3], app.view());

    if let Some(toast) = app.toast() {
        toast::render(frame, area, toast);
    }
}

fn render_header(frame: &mut Frame, area: Rect) {
    let content = vec![
        Line::from(Span::styled(
            TITLE,
            Style::default().fg(Color::Magenta).bold(),
        )),
        Line::from(SUBTITLE.fg(Color::DarkGray)),
    ];
    frame.render_widget(Paragraph::new(content).alignment(Alignment::Center), area);
}

fn render_controls(frame: &mut Frame, area: Rect, view: View) {
    let hint = match view {
        View::Quiz => "j/k navigate  ·  enter/a-d answer  ·  r restart  ·  q quit",
        View::Result => "r restart  ·  q quit",
    };
    let widget = Paragraph::new(hint)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use ratatui::backend::TestBackend;
    use tokio::sync::mpsc;

    use super::*;
    use crate::data::{builtin_courses, builtin_questions};
    use crate::engine::QuizEngine;
    use crate::session::QuizSession;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_renders_quiz_and_results() {
        let (events_tx, mut events_rx) = mpsc::unbounded_channel();
        let engine = QuizEngine::new(builtin_questions().unwrap())
            .unwrap()
            .with_events(events_tx);
        let (session, mut timer_rx) = QuizSession::new(engine, Duration::from_millis(10));
        let mut app = App::new(session, builtin_courses().unwrap());
        let mut terminal = Terminal::new(TestBackend::new(160, 50)).unwrap();

        terminal.draw(|frame| render(frame, &app)).unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Вопрос 1 из 5"));
        assert!(text.contains("Первая помощь"));

        app.submit(0);
        app.on_quiz_event(events_rx.try_recv().unwrap(), Instant::now());
        terminal.draw(|frame| render(frame, &app)).unwrap();
        assert!(buffer_text(&terminal).contains("Неправильно"));

        for option in [1, 0, 2, 2] {
            let ticket = timer_rx.recv().await.unwrap();
            app.on_timer(ticket);
            app.submit(option);
        }
        let ticket = timer_rx.recv().await.unwrap();
        app.on_timer(ticket);

        terminal.draw(|frame| render(frame, &app)).unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("4/5"));
        assert!(text.contains("80%"));
        assert!(text.contains("Отлично!"));
    }
}
