use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::model::config::Config;

pub const CONFIG_FILE_NAME: &str = "todo.toml";

/// Written by `todo init`
const CONFIG_TEMPLATE: &str = r##"# todo configuration

[store]
# Task file, relative to this directory
file = "tasks.dat"
# Read done flags the way older releases did: the last task in the file
# never restores its done state. Leave false unless you need that behavior.
legacy_done_flag = false

[ui]
show_key_hints = true
# info_text = "Shown by the Info dialog"

[ui.colors]
# background = "#0C001B"
# highlight = "#FB4196"
"##;

/// Error type for config I/O
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse todo.toml: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("{0} already exists (use --force to overwrite)")]
    Exists(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn config_path(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE_NAME)
}

/// Read todo.toml from `dir`. A missing file yields the defaults.
pub fn read_config(dir: &Path) -> Result<Config, ConfigError> {
    let path = config_path(dir);
    let text = match fs::read_to_string(&path) {
        Ok(t) => t,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Config::default()),
        Err(e) => return Err(ConfigError::Read { path, source: e }),
    };
    Ok(toml::from_str(&text)?)
}

/// Write the commented config template. Refuses to overwrite unless `force`.
pub fn write_config_template(dir: &Path, force: bool) -> Result<PathBuf, ConfigError> {
    let path = config_path(dir);
    if path.exists() && !force {
        return Err(ConfigError::Exists(path));
    }
    fs::write(&path, CONFIG_TEMPLATE)?;
    Ok(path)
}
