//! Debounce and interrupt gating for clipboard notifications.
//!
//! Some applications fire several clipboard-update notifications for one
//! copy, and bursts of distinct copies should not cut each other off.
//! `NotifyPolicy` remembers the last accepted text and the time of the last
//! notification and turns each new read into a `Verdict`.

use std::time::{Duration, Instant};

use crate::settings::Settings;

/// Why a clipboard read was dropped without touching policy state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discard {
    /// No text, or whitespace only.
    Blank,
    /// At or above `max_length` characters.
    Oversized,
}

/// Outcome of one notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Discard(Discard),
    /// Same text as last time, inside the debounce window.
    Coalesced,
    /// Announce the text.
    Deliver { interrupt: bool },
}

/// Last-notification state for one running watcher.
#[derive(Debug, Default)]
pub struct NotifyPolicy {
    last_text: String,
    last_notify: Option<Instant>,
}

impl NotifyPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Judges a clipboard read taken at `now` and updates the state.
    ///
    /// Discarded reads leave the state untouched. A coalesced read only
    /// refreshes the notification time. A delivered read records both the
    /// text and the time.
    pub fn evaluate(&mut self, text: &str, now: Instant, settings: &Settings) -> Verdict {
        if text.trim().is_empty() {
            return Verdict::Discard(Discard::Blank);
        }
        if text.chars().nth(settings.max_length.saturating_sub(1)).is_some() {
            return Verdict::Discard(Discard::Oversized);
        }

        let elapsed = self.elapsed(now);
        if text == self.last_text && elapsed.is_some_and(|e| e < settings.debounce_delay()) {
            self.touch(now);
            return Verdict::Coalesced;
        }

        let interrupt =
            settings.interrupt && elapsed.is_none_or(|e| e > settings.interrupt_delay());

        text.clone_into(&mut self.last_text);
        self.touch(now);
        Verdict::Deliver { interrupt }
    }

    /// Forgets the last text and time.
    pub fn reset(&mut self) {
        self.last_text.clear();
        self.last_notify = None;
    }

    pub fn last_text(&self) -> &str {
        &self.last_text
    }

    pub fn last_notify(&self) -> Option<Instant> {
        self.last_notify
    }

    /// Time since the last notification; `None` if there never was one.
    fn elapsed(&self, now: Instant) -> Option<Duration> {
        self.last_notify.map(|last| now.saturating_duration_since(last))
    }

    /// Records `now`, never moving the clock backwards.
    fn touch(&mut self, now: Instant) {
        self.last_notify = Some(self.last_notify.map_or(now, |last| last.max(now)));
    }
}
