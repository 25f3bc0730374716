use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::io::recovery::{RecoveryCategory, RecoveryEntry, atomic_write, log_recovery};
use crate::model::task::Task;
use crate::parse::{DoneFlagCompat, DroppedRecord, parse_tasks, serialize_tasks};

/// Error type for task store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Where a task list is persisted.
///
/// `save` always receives the whole list; stores never see deltas.
pub trait TaskStore {
    /// Read the persisted list. A store with nothing saved yet returns an empty list.
    fn load(&mut self) -> Result<Vec<Task>, StoreError>;
    /// Replace the persisted list with `tasks`.
    fn save(&mut self, tasks: &[Task]) -> Result<(), StoreError>;
}

impl<T: TaskStore + ?Sized> TaskStore for Box<T> {
    fn load(&mut self) -> Result<Vec<Task>, StoreError> {
        (**self).load()
    }

    fn save(&mut self, tasks: &[Task]) -> Result<(), StoreError> {
        (**self).save(tasks)
    }
}

// ---------------------------------------------------------------------------
// File store
// ---------------------------------------------------------------------------

/// The task file on disk (`tasks.dat` by default).
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    log_dir: PathBuf,
    compat: DoneFlagCompat,
}

impl FileStore {
    /// A store at `path` that logs to the recovery log in `log_dir`.
    pub fn new(path: impl Into<PathBuf>, log_dir: impl Into<PathBuf>) -> Self {
        FileStore {
            path: path.into(),
            log_dir: log_dir.into(),
            compat: DoneFlagCompat::default(),
        }
    }

    pub fn with_compat(mut self, compat: DoneFlagCompat) -> Self {
        self.compat = compat;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    fn log_dropped(&self, dropped: &[DroppedRecord]) {
        let mut entry = RecoveryEntry::now(RecoveryCategory::Parser, "dropped records")
            .field("Source", self.path.display().to_string());
        for record in dropped {
            entry = entry.field(&format!("Line {}", record.line), record.reason.to_string());
        }
        let body = dropped
            .iter()
            .map(|r| r.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        log_recovery(&self.log_dir, entry.body(body));
    }
}

impl TaskStore for FileStore {
    fn load(&mut self) -> Result<Vec<Task>, StoreError> {
        let source = match fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };

        let (tasks, dropped) = parse_tasks(&source, self.compat);
        if !dropped.is_empty() {
            eprintln!(
                "warning: skipped {} malformed record{} in {} (see todo recovery)",
                dropped.len(),
                if dropped.len() == 1 { "" } else { "s" },
                self.path.display()
            );
            self.log_dropped(&dropped);
        }
        Ok(tasks)
    }

    fn save(&mut self, tasks: &[Task]) -> Result<(), StoreError> {
        let content = serialize_tasks(tasks);
        if let Err(e) = atomic_write(&self.path, content.as_bytes()) {
            log_recovery(
                &self.log_dir,
                RecoveryEntry::now(RecoveryCategory::Write, "task file write failed")
                    .field("Target", self.path.display().to_string())
                    .field("Error", e.to_string())
                    .body(content),
            );
            return Err(StoreError::Write {
                path: self.path.clone(),
                source: e,
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Memory store
// ---------------------------------------------------------------------------

/// An in-memory store holding the encoded file contents.
///
/// `contents` is `None` until the first save, mirroring a missing file.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub contents: Option<String>,
    /// Number of successful saves
    pub writes: usize,
    pub compat: DoneFlagCompat,
    /// Make every save fail (the contents are left untouched)
    pub fail_writes: bool,
    /// Records skipped by the last load
    pub dropped: Vec<DroppedRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// A store that starts with `contents` already persisted.
    pub fn with_contents(contents: impl Into<String>) -> Self {
        MemoryStore {
            contents: Some(contents.into()),
            ..Default::default()
        }
    }
}

impl TaskStore for MemoryStore {
    fn load(&mut self) -> Result<Vec<Task>, StoreError> {
        let Some(source) = &self.contents else {
            self.dropped.clear();
            return Ok(Vec::new());
        };
        let (tasks, dropped) = parse_tasks(source, self.compat);
        if !dropped.is_empty() {
            eprintln!(
                "warning: skipped {} malformed record{} in memory store",
                dropped.len(),
                if dropped.len() == 1 { "" } else { "s" },
            );
        }
        self.dropped = dropped;
        Ok(tasks)
    }

    fn save(&mut self, tasks: &[Task]) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Unavailable("writes disabled".into()));
        }
        self.contents = Some(serialize_tasks(tasks));
        self.writes += 1;
        Ok(())
    }
}
