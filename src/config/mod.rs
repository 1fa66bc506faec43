//! Configuration structures and loading logic.

mod io;
pub mod monitor;
mod store;

pub use io::{config_dir, config_path};
pub use store::ConfigStore;

use std::path::PathBuf;

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use autoclip_core::Settings;

/// Top-level configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub autoclip: Settings,
    pub log: LogConfig,
}

/// Debug log configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `off`, `error`, `warn`, `info`, `debug` or `trace`.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
        }
    }
}

impl LogConfig {
    /// Parses `level`, falling back to `Info` for unknown names.
    pub fn level_filter(&self) -> LevelFilter {
        self.level.parse().unwrap_or(LevelFilter::Info)
    }
}

/// Reading or writing the config file failed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parse error in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ConfigError {
    /// True when the file simply does not exist yet.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Read { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}
