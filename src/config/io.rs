//! Configuration file I/O: path resolution, loading, and saving.

use std::path::{Path, PathBuf};

use super::{Config, ConfigError};

/// Returns the platform-specific configuration directory for autoclip.
pub fn config_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Ok(appdata) = std::env::var("APPDATA") {
            return PathBuf::from(appdata).join("autoclip");
        }
        PathBuf::from(".").join("autoclip")
    }
    #[cfg(not(target_os = "windows"))]
    {
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("autoclip");
        }
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(".config").join("autoclip");
        }
        PathBuf::from(".").join("autoclip")
    }
}

/// Returns the path to the config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

impl Config {
    /// Loads config from `path`. Returns defaults if the file doesn't exist
    /// or can't be parsed.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(cfg) => {
                log::info!("config: loaded from {}", path.display());
                cfg
            }
            Err(e) if e.is_not_found() => Self::default(),
            Err(e) => {
                log::warn!("config: {e}, using defaults");
                Self::default()
            }
        }
    }

    /// Tries to load config, returning an error on failure.
    /// Unlike `load()`, this preserves the distinction between "file missing"
    /// and "parse error" so callers can keep the previous config on error.
    pub fn try_load(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Saves config to `path`. Creates the directory if needed.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let data = toml::to_string_pretty(self)?;
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        std::fs::write(path, data).map_err(write_err)?;
        log::debug!("config: saved to {}", path.display());
        Ok(())
    }
}
