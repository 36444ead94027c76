//! Resolution of file locations.
//!
//! The data file comes from `--data` when given; otherwise it lives in
//! `~/.tolearn/data.json`, and that directory is created on first run. The log
//! file always sits next to the data file.

use std::path::{Path, PathBuf};

use crate::cli::Cli;

pub const DATA_DIR_NAME: &str = ".tolearn";
pub const DATA_FILE_NAME: &str = "data.json";
pub const LOG_FILE_NAME: &str = "tolearn.log";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to create data directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Concrete locations and flags for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub data_file: PathBuf,
    pub log_file: PathBuf,
    pub verbose: bool,
}

impl Config {
    /// Resolve from command line flags and `$HOME`.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let home = std::env::var("HOME").ok();
        Self::resolve(cli.data.as_deref(), home.as_deref(), cli.verbose)
    }

    /// Resolve against an explicit home directory (`.` when unknown).
    pub fn resolve(data: Option<&Path>, home: Option<&str>, verbose: bool) -> Result<Self, ConfigError> {
        let (data_dir, data_file) = match data {
            Some(file) => {
                let dir = file
                    .parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .unwrap_or_else(|| Path::new("."))
                    .to_path_buf();
                (dir, file.to_path_buf())
            }
            None => {
                let dir = PathBuf::from(home.unwrap_or(".")).join(DATA_DIR_NAME);
                std::fs::create_dir_all(&dir).map_err(|source| ConfigError::CreateDir {
                    path: dir.clone(),
                    source,
                })?;
                let file = dir.join(DATA_FILE_NAME);
                (dir, file)
            }
        };
        let log_file = data_dir.join(LOG_FILE_NAME);
        Ok(Config {
            data_dir,
            data_file,
            log_file,
            verbose,
        })
    }
}
