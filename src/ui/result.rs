use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Paragraph},
};

use crate::app::App;
use crate::engine::{QuizSummary, Tier};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let summary = app.summary();
    let tier_color = tier_color(summary.tier);

    let columns = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Max(70),
        Constraint::Fill(1),
    ])
    .split(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Color::Magenta)
        .title(Line::from(" Тест завершён! ").centered());
    let inner = block.inner(columns[1]);
    frame.render_widget(block, columns[1]);

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(5),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Fill(1),
    ])
    .margin(1)
    .split(inner);

    render_score_summary(frame, chunks[1], &summary);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(tier_color))
        .ratio(summary.accuracy().clamp(0.0, 1.0))
        .label("");
    frame.render_widget(gauge, chunks[2]);

    let badge = Paragraph::new(Span::styled(
        format!(" {} ", summary.tier.label()),
        Style::default().fg(Color::Black).bg(tier_color).bold(),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(badge, chunks[4]);

    let restart = Paragraph::new(Line::from(vec![
        Span::styled("R", Style::default().fg(Color::Green).bold()),
        Span::styled("  пройти тест заново", Style::default().fg(Color::DarkGray)),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(restart, chunks[5]);
}

fn tier_color(tier: Tier) -> Color {
    match tier {
        Tier::Excellent => Color::Green,
        Tier::Good => Color::Yellow,
        Tier::NeedsStudy => Color::Red,
    }
}

fn render_score_summary(frame: &mut Frame, area: Rect, summary: &QuizSummary) {
    let content = vec![
        Line::from(Span::styled(
            "Вот ваши результаты",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{}/{}", summary.score, summary.total),
            Style::default().fg(Color::Magenta).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{}% правильных ответов", summary.percentage),
            Style::default().fg(Color::White).bold(),
        )),
    ];

    frame.render_widget(Paragraph::new(content).alignment(Alignment::Center), area);
}
