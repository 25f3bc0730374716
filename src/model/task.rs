use serde::{Deserialize, Serialize};

/// Name given to a task created with an empty name
pub const DEFAULT_TASK_NAME: &str = "Task Name";

/// A single to-do item. Tasks have no id; identity is their position in the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Display name (never empty once created through `Task::new`)
    pub name: String,
    /// Whether the task has been checked off
    pub done: bool,
}

impl Task {
    /// Create a task, substituting the default name for an empty one
    pub fn new(name: impl Into<String>, done: bool) -> Self {
        let name = name.into();
        let name = if name.is_empty() {
            DEFAULT_TASK_NAME.to_string()
        } else {
            name
        };
        Task { name, done }
    }

    /// Flip the done flag, returning the new state
    pub fn toggle(&mut self) -> bool {
        self.done = !self.done;
        self.done
    }

    /// The character shown inside the checkbox `[ ]`
    pub fn checkbox_char(&self) -> char {
        if self.done { 'x' } else { ' ' }
    }
}
