use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::app::Toast;

const TOAST_WIDTH: u16 = 44;
const TOAST_HEIGHT: u16 = 4;

/// Draw the answer notification in the top-right corner, over everything
/// else.
pub fn render(frame: &mut Frame, area: Rect, toast: &Toast) {
    let rect = corner(area);
    let feedback = &toast.feedback;

    let (title, body, color) = if feedback.is_correct {
        ("✔ Правильно!", "Вы ответили верно".to_string(), Color::Green)
    } else {
        (
            "✘ Неправильно",
            format!("Правильный ответ: {}", feedback.correct_option_text),
            Color::Red,
        )
    };

    let widget = Paragraph::new(body).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(color)
            .title(Span::styled(title, Style::default().fg(color).bold())),
    );

    frame.render_widget(Clear, rect);
    frame.render_widget(widget, rect);
}

fn corner(area: Rect) -> Rect {
    let width = TOAST_WIDTH.min(area.width);
    let height = TOAST_HEIGHT.min(area.height);
    Rect {
        x: area.x + area.width - width,
        y: area.y,
        width,
        height,
    }
}
