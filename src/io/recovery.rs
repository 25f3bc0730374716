use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::model::task::Task;
use crate::parse::serialize_task;

/// Default number of days before entries are prunable.
pub const PRUNE_AGE_DAYS: i64 = 30;

const LOG_FILE_NAME: &str = ".todo-recovery.log";

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// Category of a recovery entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryCategory {
    /// Records skipped while reading the task file
    Parser,
    /// A task file write that failed
    Write,
    /// A task removed from the list
    Delete,
}

impl fmt::Display for RecoveryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecoveryCategory::Parser => write!(f, "parser"),
            RecoveryCategory::Write => write!(f, "write"),
            RecoveryCategory::Delete => write!(f, "delete"),
        }
    }
}

/// One line of the recovery log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryEntry {
    pub timestamp: DateTime<Utc>,
    pub category: RecoveryCategory,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<(String, String)>,
    /// Raw task-file text that could not be loaded, saved, or was removed
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub body: String,
}

impl RecoveryEntry {
    /// Build an entry stamped with the current time.
    pub fn now(category: RecoveryCategory, description: impl Into<String>) -> Self {
        RecoveryEntry {
            timestamp: Utc::now(),
            category,
            description: description.into(),
            fields: Vec::new(),
            body: String::new(),
        }
    }

    pub fn field(mut self, key: &str, value: impl Into<String>) -> Self {
        self.fields.push((key.to_string(), value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Human-readable block for `todo recovery`.
    /// The record separator is shown escaped.
    pub fn to_display_markdown(&self) -> String {
        let mut out = format!(
            "## {} | {}: {}\n",
            self.timestamp
                .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            self.category,
            self.description,
        );
        for (key, value) in &self.fields {
            out.push_str(&format!("{}: {}\n", key, value));
        }
        if !self.body.is_empty() {
            out.push_str("\n```text\n");
            out.push_str(&self.body);
            out.push_str("\n```\n");
        }
        out.push('\n');
        out.replace(crate::parse::SEPARATOR, "\\x06")
    }

    /// JSON value for `todo recovery --json`, with `fields` as an object.
    pub fn to_json(&self) -> serde_json::Value {
        let fields: serde_json::Map<String, serde_json::Value> = self
            .fields
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
            .collect();

        serde_json::json!({
            "timestamp": self.timestamp.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            "category": self.category,
            "description": self.description,
            "fields": fields,
            "body": self.body,
        })
    }
}

/// Return the path to the recovery log file.
pub fn recovery_log_path(log_dir: &Path) -> PathBuf {
    log_dir.join(LOG_FILE_NAME)
}

// ---------------------------------------------------------------------------
// Atomic file write
// ---------------------------------------------------------------------------

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Append a recovery entry to the log. Errors are swallowed and printed to stderr.
pub fn log_recovery(log_dir: &Path, entry: RecoveryEntry) {
    if let Err(e) = append_entry(log_dir, &entry) {
        eprintln!("warning: could not write to recovery log: {}", e);
    }
}

fn append_entry(log_dir: &Path, entry: &RecoveryEntry) -> io::Result<()> {
    let mut line = serde_json::to_string(entry)?;
    line.push('\n');
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(recovery_log_path(log_dir))?;
    file.write_all(line.as_bytes())
}

/// Log a removed task so it can be recovered by hand.
pub fn log_task_deletion(log_dir: &Path, index: usize, task: &Task) {
    log_recovery(
        log_dir,
        RecoveryEntry::now(RecoveryCategory::Delete, format!("task {} removed", index))
            .field("Task", task.name.clone())
            .body(serialize_task(task)),
    );
}

// ---------------------------------------------------------------------------
// Reading and pruning
// ---------------------------------------------------------------------------

/// All entries, oldest first. Lines that don't parse are skipped.
fn load_entries(log_dir: &Path) -> io::Result<Vec<RecoveryEntry>> {
    let content = match fs::read_to_string(recovery_log_path(log_dir)) {
        Ok(c) => c,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };
    Ok(content
        .lines()
        .filter_map(|line| serde_json::from_str(line).ok())
        .collect())
}

/// Read recovery entries, most recent first.
pub fn read_recovery_entries(
    log_dir: &Path,
    limit: Option<usize>,
    since: Option<DateTime<Utc>>,
) -> Vec<RecoveryEntry> {
    let mut entries = load_entries(log_dir).unwrap_or_default();
    if let Some(since) = since {
        entries.retain(|e| e.timestamp >= since);
    }
    entries.reverse();
    if let Some(n) = limit {
        entries.truncate(n);
    }
    entries
}

/// Remove entries older than `before` (default: PRUNE_AGE_DAYS ago), or all of
/// them. Returns the number removed.
pub fn prune_recovery(
    log_dir: &Path,
    before: Option<DateTime<Utc>>,
    all: bool,
) -> io::Result<usize> {
    let entries = load_entries(log_dir)?;
    if entries.is_empty() {
        return Ok(0);
    }

    let cutoff = before.unwrap_or_else(|| Utc::now() - chrono::Duration::days(PRUNE_AGE_DAYS));
    let kept: Vec<&RecoveryEntry> = if all {
        Vec::new()
    } else {
        entries.iter().filter(|e| e.timestamp >= cutoff).collect()
    };

    let mut content = String::new();
    for entry in &kept {
        content.push_str(&serde_json::to_string(entry)?);
        content.push('\n');
    }
    atomic_write(&recovery_log_path(log_dir), content.as_bytes())?;
    Ok(entries.len() - kept.len())
}
