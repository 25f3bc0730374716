pub mod add_dialog;
pub mod helpers;
pub mod info_dialog;
pub mod status_row;
pub mod task_list_view;
pub mod title_bar;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::{App, Mode};

/// Main render function, dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: title bar (2 rows) | task list | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // title + separator
            Constraint::Min(1),    // task list
            Constraint::Length(1), // status row
        ])
        .split(area);

    title_bar::render_title_bar(frame, app, chunks[0]);
    task_list_view::render_task_list(frame, app, chunks[1]);

    // Dialogs render on top of everything
    match app.mode {
        Mode::AddTask => add_dialog::render_add_dialog(frame, app, area),
        Mode::Info => info_dialog::render_info_dialog(frame, app, area),
        Mode::Navigate => {}
    }

    status_row::render_status_row(frame, app, chunks[2]);
}
