//! Config file change monitor. Watches the TOML file and sends reload events.

use std::path::Path;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread::JoinHandle;
use std::time::Duration;

use notify::{RecursiveMode, Watcher};

use crate::event::{AppEvent, EventProxy};

/// Bursts of file events closer together than this become one reload.
const DEBOUNCE: Duration = Duration::from_millis(200);

/// How often the watch thread checks for shutdown while idle.
const SHUTDOWN_POLL: Duration = Duration::from_millis(250);

type NotifyResult = Result<notify::Event, notify::Error>;

/// Watches the config file's parent directory for changes and sends
/// `AppEvent::ConfigReload` through the event proxy when the config file
/// is modified.
pub struct ConfigMonitor {
    shutdown_tx: mpsc::Sender<()>,
    thread: Option<JoinHandle<()>>,
}

impl ConfigMonitor {
    /// Start watching `config_file` for changes.
    /// Returns `None` if the parent directory doesn't exist.
    pub fn new<P>(config_file: &Path, proxy: P) -> Option<Self>
    where
        P: EventProxy + Send + 'static,
    {
        let parent = config_file.parent()?.to_path_buf();

        if !parent.exists() {
            log::info!(
                "config_monitor: parent dir {} does not exist, skipping watch",
                parent.display()
            );
            return None;
        }

        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();
        let (notify_tx, notify_rx) = mpsc::channel();

        let mut watcher = match notify::recommended_watcher(notify_tx) {
            Ok(w) => w,
            Err(e) => {
                log::warn!("config_monitor: failed to create watcher: {e}");
                return None;
            }
        };

        if let Err(e) = watcher.watch(&parent, RecursiveMode::NonRecursive) {
            log::warn!(
                "config_monitor: failed to watch {}: {e}",
                parent.display()
            );
            return None;
        }

        log::debug!("config_monitor: watching {}", parent.display());

        let config_file = config_file.to_path_buf();
        let thread = std::thread::Builder::new()
            .name("config-watcher".into())
            .spawn(move || {
                // Keep the watcher alive for the lifetime of this thread.
                let _watcher = watcher;
                Self::watch_loop(&config_file, &proxy, &notify_rx, &shutdown_rx);
            })
            .ok()?;

        Some(Self {
            shutdown_tx,
            thread: Some(thread),
        })
    }

    fn watch_loop<P: EventProxy>(
        config_file: &Path,
        proxy: &P,
        notify_rx: &mpsc::Receiver<NotifyResult>,
        shutdown_rx: &mpsc::Receiver<()>,
    ) {
        loop {
            let event = match notify_rx.recv_timeout(SHUTDOWN_POLL) {
                Ok(event) => event,
                Err(RecvTimeoutError::Timeout) => {
                    if shutdown_rx.try_recv().is_ok() {
                        return;
                    }
                    continue;
                }
                Err(RecvTimeoutError::Disconnected) => return,
            };

            if shutdown_rx.try_recv().is_ok() {
                return;
            }
            if !concerns(&event, config_file) {
                continue;
            }

            // Debounce: drain any further events within the window.
            while notify_rx.recv_timeout(DEBOUNCE).is_ok() {}

            if shutdown_rx.try_recv().is_ok() {
                return;
            }

            log::debug!("config_monitor: config file changed, sending reload event");
            if !proxy.send_event(AppEvent::ConfigReload) {
                // Message loop gone.
                return;
            }
        }
    }

    /// Shut down the watcher thread.
    pub fn shutdown(mut self) {
        let _ = self.shutdown_tx.send(());
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

/// Whether a file event touches `config_file`.
fn concerns(event: &NotifyResult, config_file: &Path) -> bool {
    match event {
        Ok(ev) => ev.paths.iter().any(|p| p == config_file),
        Err(_) => false,
    }
}
