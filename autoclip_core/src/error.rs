//! Errors surfaced by `ClipboardWatcher::start`.

use crate::clipboard::OsError;

/// Failure to subscribe to clipboard-update notifications.
///
/// Everything else the watcher runs into (busy clipboard, missing text,
/// oversized payloads) is handled in place and never becomes an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WatchError {
    #[error("failed to register the notification window class: {0}")]
    RegisterClass(#[source] OsError),
    #[error("failed to create the notification window: {0}")]
    CreateWindow(#[source] OsError),
    #[error("failed to register as a clipboard format listener: {0}")]
    AddListener(#[source] OsError),
    #[error("clipboard notifications are not supported on this platform")]
    Unsupported,
}
