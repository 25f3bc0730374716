use crate::io::store::{StoreError, TaskStore};
use crate::model::selection::Selection;
use crate::model::task::Task;

/// The in-memory task list, kept in step with its store.
///
/// Every mutation rewrites the whole store before returning. If the write
/// fails the mutation stays applied in memory and the error is returned,
/// so the caller can report it and carry on.
#[derive(Debug)]
pub struct TaskList<S: TaskStore> {
    tasks: Vec<Task>,
    selection: Selection,
    store: S,
}

impl<S: TaskStore> TaskList<S> {
    /// Build the list from whatever the store has persisted.
    pub fn load(mut store: S) -> Result<Self, StoreError> {
        let tasks = store.load()?;
        Ok(TaskList {
            tasks,
            selection: Selection::none(),
            store,
        })
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn done_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.done).count()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Append a task and return its index. An empty name becomes "Task Name".
    pub fn add_task(&mut self, name: &str, done: bool) -> Result<usize, StoreError> {
        self.tasks.push(Task::new(name, done));
        self.persist()?;
        Ok(self.tasks.len() - 1)
    }

    /// Remove the task at `index`, shifting later tasks down.
    ///
    /// Out of range is a silent no-op: nothing changes and nothing is
    /// written. Otherwise the selection is cleared, whichever task it was on.
    pub fn remove_task(&mut self, index: usize) -> Result<Option<Task>, StoreError> {
        if index >= self.tasks.len() {
            return Ok(None);
        }
        let removed = self.tasks.remove(index);
        self.selection.clear();
        self.persist()?;
        Ok(Some(removed))
    }

    /// Remove the selected task. No selection is the out-of-range no-op.
    pub fn remove_selected(&mut self) -> Result<Option<(usize, Task)>, StoreError> {
        let Some(index) = self.selection.get() else {
            return Ok(None);
        };
        Ok(self.remove_task(index)?.map(|task| (index, task)))
    }

    /// Flip the done flag of the task at `index`, returning its new state.
    /// Out of range returns `None` without writing.
    pub fn toggle_done(&mut self, index: usize) -> Result<Option<bool>, StoreError> {
        let Some(task) = self.tasks.get_mut(index) else {
            return Ok(None);
        };
        let done = task.toggle();
        self.persist()?;
        Ok(Some(done))
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn select(&mut self, index: usize) {
        self.selection.select(index);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        self.store.save(&self.tasks)
    }
}
