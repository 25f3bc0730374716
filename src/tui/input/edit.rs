use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::App;

/// Keys for the Add Task prompt
pub(super) fn handle_add_prompt(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => return app.confirm_add(),
        KeyCode::Esc => return app.cancel_add(),
        _ => {}
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let prompt = &mut app.prompt;
    match key.code {
        KeyCode::Char('a') if ctrl => prompt.home(),
        KeyCode::Char('e') if ctrl => prompt.end(),
        KeyCode::Char('u') if ctrl => prompt.delete_to_start(),
        KeyCode::Char('w') if ctrl => prompt.delete_word(),
        KeyCode::Char(_) if ctrl => {}
        KeyCode::Char(c) => {
            let mut buf = [0u8; 4];
            prompt.insert_str(c.encode_utf8(&mut buf));
        }
        KeyCode::Backspace => prompt.backspace(),
        KeyCode::Delete => prompt.delete(),
        KeyCode::Left => prompt.left(),
        KeyCode::Right => prompt.right(),
        KeyCode::Home => prompt.home(),
        KeyCode::End => prompt.end(),
        _ => {}
    }
}
