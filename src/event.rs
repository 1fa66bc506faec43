//! Host events delivered to the thread that owns the notification window.
//!
//! Background threads (the config monitor, the Ctrl+C handler) never touch
//! the watcher. They send an `AppEvent` through an `EventProxy`, and the
//! message loop applies it on its own thread.

use std::sync::mpsc;

/// Requests for the message-loop thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The config file changed on disk.
    ConfigReload,
    /// Leave the message loop and shut down.
    Quit,
}

/// Sends `AppEvent`s to the message-loop thread.
pub trait EventProxy {
    /// Returns false when the receiving loop is gone.
    fn send_event(&self, event: AppEvent) -> bool;
}

impl EventProxy for mpsc::Sender<AppEvent> {
    fn send_event(&self, event: AppEvent) -> bool {
        self.send(event).is_ok()
    }
}
