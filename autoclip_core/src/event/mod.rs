//! Announcements and the collaborator traits they flow through.
//!
//! The watcher never speaks directly. An accepted clipboard change becomes
//! an `Announcement` posted to an `EventQueue`; whoever drains the queue
//! runs [`deliver`], which interrupts (if asked) and hands the text to the
//! `MessageSink` one chunk at a time. Keeping the two halves apart means a
//! long run of chunks never stalls the thread that owns the OS message
//! pump.

use std::sync::mpsc;

use crate::segment::segments;

/// How an announcement's text is cut before delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunking {
    pub size: usize,
    pub split_at_word: bool,
}

/// A unit of speech posted for deferred delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub text: String,
    /// Cancel ongoing speech before the first chunk.
    pub interrupt: bool,
    /// `None` delivers the text as one unit.
    pub chunking: Option<Chunking>,
}

impl Announcement {
    /// Clipboard text accepted by the notify policy.
    pub fn clipboard(text: String, interrupt: bool, chunking: Chunking) -> Self {
        Self {
            text,
            interrupt,
            chunking: Some(chunking),
        }
    }

    /// A short status message from the host (never split, never interrupts).
    pub fn message(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            interrupt: false,
            chunking: None,
        }
    }
}

/// Delivers text for vocalization. Called once per chunk, in order.
pub trait MessageSink {
    fn speak(&self, text: &str);
}

/// Cancels whatever is currently being spoken.
pub trait InterruptSignal {
    fn cancel_speech(&self);
}

/// The host's deferred event mechanism.
///
/// Bound: `Send + Sync` because the queue handle is shared with the
/// notification callback.
pub trait EventQueue: Send + Sync {
    fn post(&self, announcement: Announcement);
}

impl EventQueue for mpsc::Sender<Announcement> {
    fn post(&self, announcement: Announcement) {
        if self.send(announcement).is_err() {
            log::debug!("event queue closed, announcement dropped");
        }
    }
}

/// Runs the delivery path for one announcement.
///
/// Interrupts first when asked, then speaks the text, split into chunks
/// when it is longer than the captured chunk size.
pub fn deliver(
    announcement: &Announcement,
    interrupt: &dyn InterruptSignal,
    sink: &dyn MessageSink,
) {
    if announcement.interrupt {
        interrupt.cancel_speech();
    }
    match announcement.chunking {
        Some(chunking) if announcement.text.chars().nth(chunking.size).is_some() => {
            for segment in segments(&announcement.text, chunking.size, chunking.split_at_word) {
                sink.speak(segment.text);
            }
        }
        _ => sink.speak(&announcement.text),
    }
}

#[cfg(test)]
mod tests;
