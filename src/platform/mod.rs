//! Operating-system bindings.
//!
//! Clipboard notifications exist only on Windows. Elsewhere
//! `NativeNotifier` refuses every subscription, so the rest of the crate
//! (config, logging, the controller) still builds and tests everywhere.

#[cfg(windows)]
mod win32;
#[cfg(windows)]
pub use win32::{
    ClipboardGuard, NativeClipboard, NativeNotifier, NotificationWindow, ThreadProxy,
    message_loop,
};

#[cfg(not(windows))]
mod unsupported;
#[cfg(not(windows))]
pub use unsupported::NativeNotifier;
