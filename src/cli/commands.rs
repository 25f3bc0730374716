use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "todo", about = concat!("[x] todo v", env!("CARGO_PKG_VERSION"), " - a plain-text to-do list"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different data directory (default: current directory)
    #[arg(short = 'C', long = "dir", global = true)]
    pub dir: Option<String>,

    /// Task file to use instead of the configured one
    #[arg(long, global = true)]
    pub file: Option<String>,

    /// Read done flags the way older releases did
    #[arg(long, global = true)]
    pub legacy_done_flag: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a commented todo.toml into the data directory
    Init(InitArgs),
    /// List tasks
    #[command(alias = "ls")]
    List,
    /// Add a task to the end of the list
    Add(AddArgs),
    /// Flip a task between done and not done
    #[command(alias = "done")]
    Toggle(IndexArgs),
    /// Remove a task
    Rm(IndexArgs),
    /// Show information about this program
    Info,
    /// View or manage the recovery log
    Recovery(RecoveryCmd),
}

// ---------------------------------------------------------------------------
// Task args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct InitArgs {
    /// Overwrite an existing todo.toml
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task name (default: "Task Name")
    pub name: Option<String>,
    /// Add the task already marked done
    #[arg(long)]
    pub done: bool,
}

#[derive(Args)]
pub struct IndexArgs {
    /// Zero-based position in the list
    pub index: usize,
}

// ---------------------------------------------------------------------------
// Recovery log
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct RecoveryCmd {
    #[command(subcommand)]
    pub action: Option<RecoveryAction>,
    /// Maximum number of entries to show (default: 10)
    #[arg(long)]
    pub limit: Option<usize>,
    /// Show entries after this timestamp (ISO-8601)
    #[arg(long)]
    pub since: Option<String>,
}

#[derive(Subcommand)]
pub enum RecoveryAction {
    /// Remove old entries
    Prune(RecoveryPruneArgs),
    /// Print the absolute path to the recovery log
    Path,
}

#[derive(Args)]
pub struct RecoveryPruneArgs {
    /// Remove entries older than this timestamp (default: 30 days ago)
    #[arg(long)]
    pub before: Option<String>,
    /// Remove all entries
    #[arg(long)]
    pub all: bool,
}
