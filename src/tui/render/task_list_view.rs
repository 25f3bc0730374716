use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::task::Task;
use crate::tui::app::App;
use crate::util::unicode;

/// Render the task list, scrolled so the selected row is visible
pub fn render_task_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;

    if app.list.is_empty() {
        let empty = Paragraph::new(" No tasks. Press a to add one.")
            .style(Style::default().fg(app.theme.dim).bg(bg));
        frame.render_widget(empty, area);
        return;
    }

    let visible_height = area.height as usize;
    app.scroll_to_selection(visible_height);

    let app = &*app;
    let scroll = app.scroll_offset;
    let selected = app.selected();
    let width = area.width as usize;
    let end = app.list.len().min(scroll + visible_height);
    let scroll = scroll.min(end);

    let lines: Vec<Line> = app.list.tasks()[scroll..end]
        .iter()
        .zip(scroll..end)
        .map(|(task, row)| render_task_line(app, task, selected == Some(row), width))
        .collect();

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn render_task_line<'a>(app: &'a App, task: &Task, is_selected: bool, width: usize) -> Line<'a> {
    let row_bg = if is_selected {
        app.theme.selection_bg
    } else {
        app.theme.background
    };
    let mut spans: Vec<Span> = Vec::new();

    // Column 0: left border accent on the selected row
    if is_selected {
        spans.push(Span::styled(
            "\u{258E}",
            Style::default().fg(app.theme.highlight).bg(row_bg),
        ));
    } else {
        spans.push(Span::styled(" ", Style::default().bg(row_bg)));
    }

    let checkbox = if task.done { "[x]" } else { "[ ]" };
    spans.push(Span::styled(
        format!("{} ", checkbox),
        Style::default().fg(app.theme.task_color(task.done)).bg(row_bg),
    ));

    let mut name_style = Style::default().bg(row_bg);
    name_style = if task.done {
        name_style
            .fg(app.theme.done)
            .add_modifier(Modifier::CROSSED_OUT)
    } else if is_selected {
        name_style.fg(app.theme.text_bright)
    } else {
        name_style.fg(app.theme.text)
    };

    // Separator bytes would corrupt the terminal; show them as a visible glyph
    let name = task.name.replace('\u{6}', "\u{2406}");
    let name_width = width.saturating_sub(5);
    let name = unicode::truncate_to_width(&name, name_width);
    let used = 5 + unicode::display_width(&name);
    spans.push(Span::styled(name, name_style));

    // Fill the rest of the row so the selection background spans the width
    if used < width {
        spans.push(Span::styled(
            " ".repeat(width - used),
            Style::default().bg(row_bg),
        ));
    }

    Line::from(spans)
}
