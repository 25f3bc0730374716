use serde::Serialize;

use crate::io::recovery::RecoveryEntry;
use crate::model::selection::Selection;
use crate::model::task::Task;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    pub index: usize,
    pub name: String,
    pub done: bool,
}

#[derive(Serialize)]
pub struct ListJson {
    /// Selected index, -1 when none
    pub selection: i64,
    pub tasks: Vec<TaskJson>,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn task_to_json(index: usize, task: &Task) -> TaskJson {
    TaskJson {
        index,
        name: task.name.clone(),
        done: task.done,
    }
}

pub fn list_to_json(tasks: &[Task], selection: Selection) -> ListJson {
    ListJson {
        selection: selection.raw(),
        tasks: tasks
            .iter()
            .enumerate()
            .map(|(i, t)| task_to_json(i, t))
            .collect(),
    }
}

pub fn recovery_to_json(entries: &[RecoveryEntry]) -> serde_json::Value {
    serde_json::Value::Array(entries.iter().map(RecoveryEntry::to_json).collect())
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// Format a single task as `  0 [x] name`
pub fn format_task_line(index: usize, task: &Task) -> String {
    format!("{:>3} [{}] {}", index, task.checkbox_char(), task.name)
}

pub fn format_task_list(tasks: &[Task]) -> Vec<String> {
    tasks
        .iter()
        .enumerate()
        .map(|(i, t)| format_task_line(i, t))
        .collect()
}

/// One-line summary after a mutation, e.g. `done: [x] Buy milk`
pub fn format_task_change(verb: &str, task: &Task) -> String {
    format!("{}: [{}] {}", verb, task.checkbox_char(), task.name)
}
