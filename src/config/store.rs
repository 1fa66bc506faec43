//! The live configuration, shared between the host and the watcher.

use std::path::{Path, PathBuf};

use parking_lot::RwLock;

use autoclip_core::{ConfigurationView, Settings};

use super::{Config, ConfigError};

/// Holds the current `Config` and the file it came from.
pub struct ConfigStore {
    path: PathBuf,
    config: RwLock<Config>,
}

impl ConfigStore {
    /// Loads the config at `path`, falling back to defaults.
    pub fn open(path: PathBuf) -> Self {
        let config = Config::load(&path);
        Self {
            path,
            config: RwLock::new(config),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Snapshot of the current config.
    pub fn config(&self) -> Config {
        self.config.read().clone()
    }

    /// Re-reads the file. On error the previous config stays in place.
    ///
    /// A missing file resets to defaults, the same as at startup.
    pub fn reload(&self) -> Result<(), ConfigError> {
        let fresh = match Config::try_load(&self.path) {
            Ok(cfg) => cfg,
            Err(e) if e.is_not_found() => Config::default(),
            Err(e) => return Err(e),
        };
        *self.config.write() = fresh;
        log::info!("config: reloaded from {}", self.path.display());
        Ok(())
    }

    /// Records the on/off state of automatic reading and saves the file.
    pub fn set_automatic_reading(&self, enabled: bool) -> Result<(), ConfigError> {
        let snapshot = {
            let mut config = self.config.write();
            config.autoclip.automatic_reading = enabled;
            config.clone()
        };
        snapshot.save(&self.path)
    }
}

impl ConfigurationView for ConfigStore {
    fn settings(&self) -> Settings {
        self.config.read().autoclip.clone()
    }
}
