//! Clipboard observation and notification pipeline.
//!
//! This crate holds everything about automatic clipboard reading that does
//! not touch the operating system: the settings model, the notify policy
//! (debounce and interrupt gating), text segmentation, the delivery path,
//! and the watcher state machine. The OS side plugs in through the
//! `Notifier` / `ClipboardRead` traits; the `autoclip` crate provides the
//! Win32 implementation, tests use `ManualNotifier`.

#![deny(unsafe_code)]

pub mod clipboard;
pub mod error;
pub mod event;
pub mod policy;
pub mod segment;
pub mod settings;
pub mod watcher;

pub use clipboard::{OsError, RetryPolicy, decode_utf16_bounded};
pub use error::WatchError;
pub use event::{Announcement, Chunking, EventQueue, InterruptSignal, MessageSink, deliver};
pub use policy::{Discard, NotifyPolicy, Verdict};
pub use segment::{MIN_CHUNK_SIZE, Segment, Segments, segments, split};
pub use settings::{ConfigurationView, Settings};
pub use watcher::{
    ClipboardRead, ClipboardWatcher, ManualNotifier, Notifier, Subscription, UpdateCallback,
    WatchState,
};
