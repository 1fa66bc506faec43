//! Reading settings and the read-only view the watcher pulls them from.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::event::Chunking;
use crate::segment::MIN_CHUNK_SIZE;

/// Automatic clipboard reading settings.
///
/// Every field has a default so a partial (or empty) config section is
/// valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Cancel ongoing speech before reading a new clipboard change.
    pub interrupt: bool,
    /// Restore `automatic_reading` at startup and on profile switch.
    pub remember_state: bool,
    /// Persisted on/off state of automatic reading.
    pub automatic_reading: bool,
    /// Whether the host shows the toggle in its menu.
    pub show_in_menu: bool,
    /// Maximum characters per spoken chunk. Below 100 disables splitting.
    pub chunk_size: usize,
    /// Clipboard text this long or longer is ignored.
    pub max_length: usize,
    /// Prefer splitting chunks at spaces.
    pub split_at_word: bool,
    /// Identical text within this window is treated as one copy.
    pub debounce_delay_ms: u64,
    /// Changes closer together than this do not interrupt each other.
    pub interrupt_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            interrupt: false,
            remember_state: false,
            automatic_reading: false,
            show_in_menu: true,
            chunk_size: 500,
            max_length: 15_000,
            split_at_word: true,
            debounce_delay_ms: 100,
            interrupt_delay_ms: 50,
        }
    }
}

impl Settings {
    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_delay_ms)
    }

    pub fn interrupt_delay(&self) -> Duration {
        Duration::from_millis(self.interrupt_delay_ms)
    }

    /// Returns true when `chunk_size` is large enough for splitting to apply.
    pub fn splitting_enabled(&self) -> bool {
        self.chunk_size >= MIN_CHUNK_SIZE
    }

    /// Chunking parameters captured into each announcement.
    pub fn chunking(&self) -> Chunking {
        Chunking {
            size: self.chunk_size,
            split_at_word: self.split_at_word,
        }
    }
}

/// Read-only access to the current settings.
///
/// Implementations return a snapshot; the watcher re-reads it on `start()`
/// and whenever the host reports a configuration change.
pub trait ConfigurationView {
    fn settings(&self) -> Settings;
}

impl ConfigurationView for Settings {
    fn settings(&self) -> Settings {
        self.clone()
    }
}

#[cfg(test)]
mod tests;
