mod init;
pub use init::cmd_init;

use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::recovery::{
    log_task_deletion, prune_recovery, read_recovery_entries, recovery_log_path,
};
use crate::io::store::FileStore;
use crate::io::workspace::Workspace;
use crate::ops::TaskList;
use crate::parse::name_is_encodable;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let workspace = open_workspace(&cli)?;

    match cli.command {
        None => crate::tui::run(workspace),
        Some(cmd) => match cmd {
            // Init is handled in main.rs before the config is read
            Commands::Init(args) => cmd_init(args, cli.dir.as_deref()),

            // Read commands
            Commands::List => cmd_list(&workspace, json),
            Commands::Info => cmd_info(&workspace),
            Commands::Recovery(args) => cmd_recovery(&workspace, args, json),

            // Write commands
            Commands::Add(args) => cmd_add(&workspace, args, json),
            Commands::Toggle(args) => cmd_toggle(&workspace, args, json),
            Commands::Rm(args) => cmd_rm(&workspace, args, json),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve the data directory and apply command-line overrides to its config.
pub fn open_workspace(cli: &Cli) -> Result<Workspace, Box<dyn std::error::Error>> {
    let mut workspace = Workspace::discover(cli.dir.as_deref())?;
    if let Some(ref file) = cli.file {
        workspace.file_override = Some(PathBuf::from(file));
    }
    workspace.force_legacy = cli.legacy_done_flag;
    Ok(workspace)
}

fn load_list(workspace: &Workspace) -> Result<TaskList<FileStore>, Box<dyn std::error::Error>> {
    Ok(TaskList::load(workspace.file_store())?)
}

/// Parse an ISO-8601 timestamp or a bare `YYYY-MM-DD` date (midnight UTC).
fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| format!("invalid timestamp '{}' (expected YYYY-MM-DD or ISO-8601)", s))
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(workspace: &Workspace, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let list = load_list(workspace)?;
    if json {
        let out = list_to_json(list.tasks(), list.selection());
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for line in format_task_list(list.tasks()) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_info(workspace: &Workspace) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", workspace.config.ui.info_text());
    Ok(())
}

fn cmd_recovery(
    workspace: &Workspace,
    args: RecoveryCmd,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = &workspace.dir;
    match args.action {
        Some(RecoveryAction::Path) => {
            println!("{}", recovery_log_path(dir).display());
        }
        Some(RecoveryAction::Prune(prune)) => {
            let before = prune.before.as_deref().map(parse_timestamp).transpose()?;
            let removed = prune_recovery(dir, before, prune.all)?;
            println!(
                "pruned {} {}",
                removed,
                if removed == 1 { "entry" } else { "entries" }
            );
        }
        None => {
            let since = args.since.as_deref().map(parse_timestamp).transpose()?;
            let mut entries = read_recovery_entries(dir, None, since);
            let total = entries.len();
            entries.truncate(args.limit.unwrap_or(10));
            if json {
                println!("{}", serde_json::to_string_pretty(&recovery_to_json(&entries))?);
            } else if entries.is_empty() {
                println!("recovery log is empty");
            } else {
                for entry in &entries {
                    print!("{}", entry.to_display_markdown());
                }
                if total > entries.len() {
                    println!(
                        "({} of {} entries shown, use --limit for more)",
                        entries.len(),
                        total
                    );
                }
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(
    workspace: &Workspace,
    args: AddArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut list = load_list(workspace)?;
    let name = args.name.unwrap_or_default();
    if !name_is_encodable(&name) {
        eprintln!("warning: task name contains a newline or the 0x06 separator; it will not reload intact");
    }
    let index = list.add_task(&name, args.done)?;
    let task = list.get(index).ok_or("task vanished after add")?;
    if json {
        println!("{}", serde_json::to_string_pretty(&task_to_json(index, task))?);
    } else {
        println!("{}", format_task_line(index, task));
    }
    Ok(())
}

fn cmd_toggle(
    workspace: &Workspace,
    args: IndexArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut list = load_list(workspace)?;
    if list.toggle_done(args.index)?.is_none() {
        return Err(format!(
            "no task at index {} (list has {} {})",
            args.index,
            list.len(),
            if list.len() == 1 { "task" } else { "tasks" }
        )
        .into());
    }
    let task = list.get(args.index).ok_or("task vanished after toggle")?;
    if json {
        println!("{}", serde_json::to_string_pretty(&task_to_json(args.index, task))?);
    } else {
        let verb = if task.done { "done" } else { "undone" };
        println!("{}", format_task_change(verb, task));
    }
    Ok(())
}

/// Out-of-range indices are a silent no-op, matching the TUI.
fn cmd_rm(
    workspace: &Workspace,
    args: IndexArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut list = load_list(workspace)?;
    let Some(task) = list.remove_task(args.index)? else {
        if json {
            println!("null");
        }
        return Ok(());
    };
    log_task_deletion(&workspace.dir, args.index, &task);
    if json {
        println!("{}", serde_json::to_string_pretty(&task_to_json(args.index, &task))?);
    } else {
        println!("{}", format_task_change("removed", &task));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn timestamps_accept_dates_and_rfc3339() {
        let d = parse_timestamp("2024-03-05").unwrap();
        assert_eq!((d.year(), d.month(), d.day(), d.hour()), (2024, 3, 5, 0));
        let t = parse_timestamp("2024-03-05T10:30:00+02:00").unwrap();
        assert_eq!(t.hour(), 8);
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn overrides_apply_to_workspace() {
        let tmp = tempfile::TempDir::new().unwrap();
        let cli = <Cli as clap::Parser>::try_parse_from([
            "todo",
            "list",
            "-C",
            tmp.path().to_str().unwrap(),
            "--file",
            "other.dat",
            "--legacy-done-flag",
        ])
        .unwrap();
        let ws = open_workspace(&cli).unwrap();
        assert_eq!(ws.store_path(), tmp.path().join("other.dat"));
        assert_eq!(ws.compat(), crate::parse::DoneFlagCompat::Legacy);
    }
}
