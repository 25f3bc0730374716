use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::model::task::DEFAULT_TASK_NAME;
use crate::tui::app::App;
use crate::util::unicode;

use super::helpers::centered_rect_fixed;

/// Render the Add Task prompt as a centered popup
pub fn render_add_dialog(frame: &mut Frame, app: &App, area: Rect) {
    let popup_w: u16 = 50.min(area.width.saturating_sub(2));
    let popup_h: u16 = 5.min(area.height);
    let inner_w = popup_w.saturating_sub(2) as usize;

    let bg = app.theme.background;
    let highlight = app.theme.highlight;
    let text_style = Style::default().fg(app.theme.text_bright).bg(bg);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);
    let cursor_style = Style::default().fg(highlight).bg(bg);

    let overlay_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    // Input line: text before cursor, ▌, text after. Empty input shows the placeholder.
    let prompt = &app.prompt;
    let mut input: Vec<Span> = vec![Span::styled(" ", text_style)];
    if prompt.buffer.is_empty() {
        input.push(Span::styled("\u{258C}", cursor_style));
        input.push(Span::styled(DEFAULT_TASK_NAME, dim_style));
    } else {
        let (before, after) = prompt.buffer.split_at(prompt.cursor);
        // Keep the cursor in view by dropping leading text on overflow
        let budget = inner_w.saturating_sub(3);
        let before_w = unicode::display_width(before);
        let before = if before_w > budget {
            tail_to_width(before, budget)
        } else {
            before.to_string()
        };
        let after_budget = budget.saturating_sub(unicode::display_width(&before));
        input.push(Span::styled(before, text_style));
        input.push(Span::styled("\u{258C}", cursor_style));
        input.push(Span::styled(
            unicode::truncate_to_width(after, after_budget),
            text_style,
        ));
    }

    let lines = vec![
        Line::from(input),
        Line::from(""),
        Line::from(Span::styled(" Enter add  Esc cancel", dim_style)),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            " Add Task ",
            Style::default()
                .fg(highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(highlight).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, overlay_area);
}

/// The longest suffix of `s` that fits in `max_cells`
fn tail_to_width(s: &str, max_cells: usize) -> String {
    let mut start = s.len();
    while let Some(prev) = unicode::prev_grapheme_boundary(s, start) {
        if unicode::display_width(&s[prev..]) > max_cells {
            break;
        }
        start = prev;
    }
    s[start..].to_string()
}
