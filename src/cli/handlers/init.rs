use std::path::PathBuf;

use crate::cli::commands::InitArgs;
use crate::io::config_io::write_config_template;

/// Write todo.toml into `dir` (or the current directory). The task file is
/// not created; it appears on the first change.
pub fn cmd_init(args: InitArgs, dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let dir = match dir {
        Some(d) => PathBuf::from(d),
        None => std::env::current_dir()?,
    };
    if !dir.is_dir() {
        return Err(format!("directory not found: {}", dir.display()).into());
    }
    let path = write_config_template(&dir, args.force)?;
    println!("created {}", path.display());
    Ok(())
}
