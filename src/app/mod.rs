//! Host controller: the on/off switch around the clipboard watcher.
//!
//! `App` owns the watcher and decides when it runs: on request
//! (`enable`, `disable`, `toggle`), from the remembered state at startup
//! and after a config reload, and never past `terminate`. Status messages
//! for the user go through the same event queue as clipboard text.

mod config_reload;
#[cfg(windows)]
mod event_loop;

use std::sync::Arc;

use autoclip_core::{Announcement, ClipboardWatcher, EventQueue, Notifier, WatchError};

use crate::config::ConfigStore;

pub const ENABLED_MESSAGE: &str = "Enabled automatic clipboard reading.";
pub const DISABLED_MESSAGE: &str = "Disabled automatic clipboard reading.";
pub const START_FAILED_MESSAGE: &str = "Unable to start automatic clipboard reading.";

pub struct App<N: Notifier> {
    watcher: ClipboardWatcher<N>,
    store: Arc<ConfigStore>,
    queue: Arc<dyn EventQueue>,
    /// Secure desktop / locked session: never auto-start.
    secure: bool,
}

impl<N: Notifier> App<N> {
    pub fn new(
        notifier: N,
        store: Arc<ConfigStore>,
        queue: Arc<dyn EventQueue>,
        secure: bool,
    ) -> Self {
        let watcher = ClipboardWatcher::new(notifier, store.clone(), queue.clone());
        Self {
            watcher,
            store,
            queue,
            secure,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.watcher.is_running()
    }

    /// Starts watching. A failed start is logged and announced; the
    /// watcher stays stopped.
    pub fn enable(&mut self) -> Result<(), WatchError> {
        if let Err(e) = self.watcher.start() {
            log::error!("unable to start clipboard watcher: {e}");
            self.queue.post(Announcement::message(START_FAILED_MESSAGE));
            return Err(e);
        }
        log::info!("automatic clipboard reading enabled");
        Ok(())
    }

    pub fn disable(&mut self) {
        if self.watcher.is_running() {
            self.watcher.stop();
            log::info!("automatic clipboard reading disabled");
        }
    }

    /// Flips automatic reading, remembers the new state and announces it.
    pub fn toggle(&mut self) {
        let enabled = if self.watcher.is_running() {
            self.disable();
            false
        } else {
            if self.enable().is_err() {
                return;
            }
            true
        };

        if let Err(e) = self.store.set_automatic_reading(enabled) {
            log::warn!("failed to persist automatic reading state: {e}");
        }
        let message = if enabled {
            ENABLED_MESSAGE
        } else {
            DISABLED_MESSAGE
        };
        self.queue.post(Announcement::message(message));
    }

    /// Brings the watcher in line with the remembered state.
    ///
    /// Runs at startup and after every config reload. Does nothing unless
    /// `remember_state` is set, and never starts in secure mode.
    pub fn on_config_init(&mut self) {
        let settings = self.store.config().autoclip;
        if !settings.remember_state || self.secure {
            return;
        }
        if settings.automatic_reading {
            let _ = self.enable();
        } else {
            self.disable();
        }
    }

    /// Stops the watcher for good.
    pub fn terminate(&mut self) {
        self.disable();
        log::debug!("app terminated");
    }
}

/// Command-line switches that affect the controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Start watching immediately, regardless of the remembered state.
    pub enable: bool,
    /// Never auto-start from the remembered state.
    pub secure: bool,
}

/// The app could not run.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Watch(#[from] WatchError),
    #[error("failed to spawn the speech thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Runs the app on the calling thread until Ctrl+C or console close.
#[cfg(windows)]
pub fn run(store: Arc<ConfigStore>, options: RunOptions) -> Result<(), RunError> {
    event_loop::run(store, options)
}

/// Clipboard notifications are Windows-only.
#[cfg(not(windows))]
pub fn run(_store: Arc<ConfigStore>, _options: RunOptions) -> Result<(), RunError> {
    Err(RunError::Watch(WatchError::Unsupported))
}

#[cfg(test)]
mod tests;
