use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::models::Course;

const ACCENTS: [Color; 3] = [Color::Magenta, Color::LightRed, Color::Cyan];

pub fn render(frame: &mut Frame, area: Rect, courses: &[Course]) {
    if courses.is_empty() {
        return;
    }

    let chunks = Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).split(area);

    let heading = Paragraph::new(Span::styled(
        "Доступные курсы",
        Style::default().fg(Color::White).bold(),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(heading, chunks[0]);

    let cards = Layout::horizontal(vec![Constraint::Fill(1); courses.len()])
        .spacing(1)
        .split(chunks[1]);

    for (index, (course, card)) in courses.iter().zip(cards.iter()).enumerate() {
        render_card(frame, *card, course, ACCENTS[index % ACCENTS.len()]);
    }
}

fn render_card(frame: &mut Frame, area: Rect, course: &Course, accent: Color) {
    let content = vec![
        Line::from(Span::styled(
            course.description.as_str(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            format!("{} уроков  ·  {}", course.lessons, course.duration),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let widget = Paragraph::new(content).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(accent)
            .title(Span::styled(
                format!(" {} ", course.title),
                Style::default().fg(accent).bold(),
            ))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}
