use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::recovery::log_task_deletion;
use crate::io::store::{StoreError, TaskStore};
use crate::io::workspace::Workspace;
use crate::model::UiConfig;
use crate::ops::TaskList;
use crate::parse::name_is_encodable;
use crate::util::unicode::{next_grapheme_boundary, prev_grapheme_boundary, word_boundary_left};

use super::input;
use super::render;
use super::theme::Theme;

/// The store behind the TUI's task list
pub type AppStore = Box<dyn TaskStore>;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// The Add Task prompt is open
    AddTask,
    /// The Info dialog is open
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Warning,
    Error,
}

/// One-shot message for the status row, cleared on the next key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

/// Single-line text input with a byte-offset cursor on a grapheme boundary
#[derive(Debug, Clone, Default)]
pub struct Prompt {
    pub buffer: String,
    pub cursor: usize,
}

impl Prompt {
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    pub fn insert_str(&mut self, text: &str) {
        self.buffer.insert_str(self.cursor, text);
        self.cursor += text.len();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = prev_grapheme_boundary(&self.buffer, self.cursor) {
            self.buffer.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if let Some(next) = next_grapheme_boundary(&self.buffer, self.cursor) {
            self.buffer.replace_range(self.cursor..next, "");
        }
    }

    pub fn delete_word(&mut self) {
        let start = word_boundary_left(&self.buffer, self.cursor);
        self.buffer.replace_range(start..self.cursor, "");
        self.cursor = start;
    }

    pub fn delete_to_start(&mut self) {
        self.buffer.replace_range(..self.cursor, "");
        self.cursor = 0;
    }

    pub fn left(&mut self) {
        if let Some(prev) = prev_grapheme_boundary(&self.buffer, self.cursor) {
            self.cursor = prev;
        }
    }

    pub fn right(&mut self) {
        if let Some(next) = next_grapheme_boundary(&self.buffer, self.cursor) {
            self.cursor = next;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.buffer.len();
    }
}

/// Main application state
pub struct App {
    pub list: TaskList<AppStore>,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    pub prompt: Prompt,
    pub status: Option<StatusMessage>,
    /// First visible row of the task list
    pub scroll_offset: usize,
    pub show_key_hints: bool,
    pub info_text: String,
    /// Where removed tasks are logged (None = not logged)
    pub log_dir: Option<PathBuf>,
}

impl App {
    /// Wrap a loaded list. The last task starts selected, as if each loaded
    /// task had just been added.
    pub fn new(mut list: TaskList<AppStore>, ui: &UiConfig) -> Self {
        if let Some(last) = list.len().checked_sub(1) {
            list.select(last);
        }
        App {
            list,
            mode: Mode::Navigate,
            should_quit: false,
            theme: Theme::from_config(ui),
            prompt: Prompt::default(),
            status: None,
            scroll_offset: 0,
            show_key_hints: ui.show_key_hints,
            info_text: ui.info_text(),
            log_dir: None,
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.list.selection().get()
    }

    // -----------------------------------------------------------------------
    // Cursor
    // -----------------------------------------------------------------------

    pub fn select_next(&mut self) {
        if self.list.is_empty() {
            return;
        }
        let last = self.list.len() - 1;
        let next = match self.selected() {
            Some(i) => (i + 1).min(last),
            None => 0,
        };
        self.list.select(next);
    }

    pub fn select_prev(&mut self) {
        if self.list.is_empty() {
            return;
        }
        let last = self.list.len() - 1;
        let prev = match self.selected() {
            Some(i) => i.min(last).saturating_sub(1),
            None => last,
        };
        self.list.select(prev);
    }

    pub fn select_first(&mut self) {
        if !self.list.is_empty() {
            self.list.select(0);
        }
    }

    pub fn select_last(&mut self) {
        if let Some(last) = self.list.len().checked_sub(1) {
            self.list.select(last);
        }
    }

    // -----------------------------------------------------------------------
    // Task actions
    // -----------------------------------------------------------------------

    pub fn toggle_selected(&mut self) {
        let Some(index) = self.selected() else {
            return;
        };
        let result = self.list.toggle_done(index);
        self.report(result);
    }

    pub fn delete_selected(&mut self) {
        match self.list.remove_selected() {
            Ok(Some((index, task))) => {
                let mut text = format!("removed \"{}\"", task.name);
                if let Some(dir) = &self.log_dir {
                    log_task_deletion(dir, index, &task);
                    text.push_str(" (kept in todo recovery)");
                }
                self.status = Some(StatusMessage {
                    text,
                    kind: StatusKind::Info,
                });
            }
            Ok(None) => {}
            Err(e) => self.set_error(e),
        }
    }

    pub fn open_add_prompt(&mut self) {
        self.prompt.clear();
        self.mode = Mode::AddTask;
    }

    pub fn cancel_add(&mut self) {
        self.prompt.clear();
        self.mode = Mode::Navigate;
    }

    /// Add the prompt's text as a new task and select it
    pub fn confirm_add(&mut self) {
        let name = std::mem::take(&mut self.prompt.buffer);
        self.prompt.clear();
        self.mode = Mode::Navigate;

        let result = self.list.add_task(&name, false);
        // The task is in the list even if the write failed
        self.select_last();
        match result {
            Ok(_) if !name_is_encodable(&name) => {
                self.status = Some(StatusMessage {
                    text: "name contains a control separator; it will not reload intact".into(),
                    kind: StatusKind::Warning,
                });
            }
            Ok(_) => {}
            Err(e) => self.set_error(e),
        }
    }

    pub fn open_info(&mut self) {
        self.mode = Mode::Info;
    }

    pub fn close_info(&mut self) {
        self.mode = Mode::Navigate;
    }

    fn report<T>(&mut self, result: Result<T, StoreError>) {
        if let Err(e) = result {
            self.set_error(e);
        }
    }

    fn set_error(&mut self, e: StoreError) {
        self.status = Some(StatusMessage {
            text: e.to_string(),
            kind: StatusKind::Error,
        });
    }

    /// Adjust the scroll offset so the selection is inside a viewport of `height` rows
    pub fn scroll_to_selection(&mut self, height: usize) {
        let max_offset = self.list.len().saturating_sub(height);
        self.scroll_offset = self.scroll_offset.min(max_offset);
        if height == 0 {
            return;
        }
        if let Some(sel) = self.selected()
            && sel < self.list.len()
        {
            if sel < self.scroll_offset {
                self.scroll_offset = sel;
            } else if sel >= self.scroll_offset + height {
                self.scroll_offset = sel + 1 - height;
            }
        }
        self.scroll_offset = self.scroll_offset.min(max_offset);
    }
}

/// Run the TUI application
pub fn run(workspace: Workspace) -> Result<(), Box<dyn std::error::Error>> {
    let store: AppStore = Box::new(workspace.file_store());
    let list = TaskList::load(store)?;

    let mut app = App::new(list, &workspace.config.ui);
    app.log_dir = Some(workspace.dir.clone());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Restore the terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
