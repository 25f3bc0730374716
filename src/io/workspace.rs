use std::path::{Path, PathBuf};

use crate::io::config_io::{ConfigError, read_config};
use crate::io::store::FileStore;
use crate::model::config::Config;
use crate::parse::DoneFlagCompat;

/// The directory the to-do list lives in, with its configuration.
///
/// The task file path is fixed relative to this directory (the working
/// directory unless overridden with `-C`).
#[derive(Debug, Clone)]
pub struct Workspace {
    pub dir: PathBuf,
    pub config: Config,
    /// Overrides `[store] file` when set
    pub file_override: Option<PathBuf>,
    /// Forces legacy done-flag decoding regardless of config
    pub force_legacy: bool,
}

impl Workspace {
    /// Open the workspace at `dir`, reading todo.toml if present.
    pub fn open(dir: &Path) -> Result<Self, ConfigError> {
        let config = read_config(dir)?;
        Ok(Workspace {
            dir: dir.to_path_buf(),
            config,
            file_override: None,
            force_legacy: false,
        })
    }

    /// Open the workspace in `dir`, or the current directory.
    pub fn discover(dir: Option<&str>) -> Result<Self, ConfigError> {
        let dir = match dir {
            Some(d) => PathBuf::from(d),
            None => std::env::current_dir()?,
        };
        Self::open(&dir)
    }

    /// Absolute path of the task file
    pub fn store_path(&self) -> PathBuf {
        let file = self
            .file_override
            .clone()
            .unwrap_or_else(|| PathBuf::from(&self.config.store.file));
        if file.is_absolute() {
            file
        } else {
            self.dir.join(file)
        }
    }

    pub fn compat(&self) -> DoneFlagCompat {
        if self.force_legacy || self.config.store.legacy_done_flag {
            DoneFlagCompat::Legacy
        } else {
            DoneFlagCompat::Strict
        }
    }

    pub fn file_store(&self) -> FileStore {
        FileStore::new(self.store_path(), &self.dir).with_compat(self.compat())
    }
}
