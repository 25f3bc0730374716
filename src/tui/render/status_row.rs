use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode, StatusKind};
use crate::util::unicode;

const NAVIGATE_HINTS: &str = "a add  space done  d delete  i info  q quit";

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let line = if let Some(status) = &app.status {
        let color = match status.kind {
            StatusKind::Info => app.theme.text,
            StatusKind::Warning => app.theme.yellow,
            StatusKind::Error => app.theme.red,
        };
        let mut style = Style::default().fg(color).bg(bg);
        if status.kind == StatusKind::Error {
            style = style.add_modifier(Modifier::BOLD);
        }
        Line::from(Span::styled(
            unicode::truncate_to_width(&format!(" {}", status.text), width),
            style,
        ))
    } else if app.show_key_hints && app.mode == Mode::Navigate {
        // Hints are right-aligned and dropped when they don't fit
        let hint_width = unicode::display_width(NAVIGATE_HINTS);
        if hint_width + 1 < width {
            Line::from(vec![
                Span::styled(" ".repeat(width - hint_width - 1), Style::default().bg(bg)),
                Span::styled(NAVIGATE_HINTS, Style::default().fg(app.theme.dim).bg(bg)),
            ])
        } else {
            Line::from("")
        }
    } else {
        Line::from("")
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
