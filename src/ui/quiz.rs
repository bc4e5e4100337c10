use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::models::Question;

const OPTION_LABELS: [char; 4] = ['A', 'B', 'C', 'D'];
const TIP: &str = "Внимательно читайте каждый вопрос. Сероводород (H₂S) — опасный газ, \
                   знание правил безопасности может спасти жизнь!";

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::horizontal([Constraint::Percentage(66), Constraint::Percentage(34)])
        .spacing(2)
        .split(area);

    let left = Layout::vertical([Constraint::Fill(1), Constraint::Length(4)]).split(columns[0]);
    let right = Layout::vertical([Constraint::Length(6), Constraint::Fill(1)]).split(columns[1]);

    render_question_card(frame, left[0], app);
    render_progress(frame, left[1], app);
    render_score(frame, right[0], app);
    render_tip(frame, right[1]);
}

fn render_question_card(frame: &mut Frame, area: Rect, app: &App) {
    let question = app.current_question();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Color::Magenta)
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
    ])
    .split(inner);

    render_heading(frame, chunks[0], app, &question.category);

    let text = Paragraph::new(question.text.as_str())
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(text, chunks[2]);

    render_options(frame, chunks[3], question, app.cursor(), app.selected_answer());
}

fn render_heading(frame: &mut Frame, area: Rect, app: &App, category: &str) {
    let halves = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).split(area);

    let badge = Paragraph::new(Span::styled(
        format!(" {} ", category),
        Style::default().fg(Color::White).bg(Color::Magenta).bold(),
    ));
    frame.render_widget(badge, halves[0]);

    let position = Paragraph::new(format!(
        "Вопрос {} из {}",
        app.current_question_number(),
        app.total_questions()
    ))
    .alignment(Alignment::Right)
    .fg(Color::DarkGray);
    frame.render_widget(position, halves[1]);
}

fn render_options(
    frame: &mut Frame,
    area: Rect,
    question: &Question,
    cursor: usize,
    selected: Option<usize>,
) {
    let mut lines: Vec<Line> = Vec::with_capacity(question.options.len() * 2);

    for (index, option) in question.options.iter().enumerate() {
        let (marker, style) = option_style(index, question.correct_answer, cursor, selected);

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", OPTION_LABELS[index]), style),
            Span::styled(option.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

/// Before answering the cursor is highlighted. Afterwards the correct option
/// is green and a wrong pick is red.
fn option_style(
    index: usize,
    correct: usize,
    cursor: usize,
    selected: Option<usize>,
) -> (&'static str, Style) {
    match selected {
        None if index == cursor => (">", Style::default().fg(Color::Cyan).bold()),
        None => (" ", Style::default().fg(Color::Gray)),
        Some(_) if index == correct => ("✔", Style::default().fg(Color::Green).bold()),
        Some(picked) if index == picked => ("✘", Style::default().fg(Color::Red).bold()),
        Some(_) => (" ", Style::default().fg(Color::DarkGray)),
    }
}

fn render_progress(frame: &mut Frame, area: Rect, app: &App) {
    let percent = app.summary().progress_percent.unwrap_or(100.0);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Color::DarkGray)
                .title(" Прогресс теста "),
        )
        .gauge_style(Style::default().fg(Color::Magenta))
        .ratio((percent / 100.0).clamp(0.0, 1.0))
        .label(format!("{}%", percent.round()));
    frame.render_widget(gauge, area);
}

fn render_score(frame: &mut Frame, area: Rect, app: &App) {
    let state = app.session().engine().state();
    let content = vec![
        Line::from(Span::styled(
            state.score.to_string(),
            Style::default().fg(Color::Magenta).bold(),
        )),
        Line::from(Span::styled(
            format!("из {} ответов", state.answered_count),
            Style::default().fg(Color::Gray),
        )),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::Magenta)
            .title(" Текущий результат ")
            .padding(Padding::vertical(1)),
    );
    frame.render_widget(widget, area);
}

fn render_tip(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new(TIP)
        .wrap(Wrap { trim: true })
        .fg(Color::DarkGray)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Color::DarkGray)
                .title(" Совет ")
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(widget, area);
}
