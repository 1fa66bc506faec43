//! Platform-free pieces of clipboard access.
//!
//! The clipboard is shared by every process on the desktop and another
//! program may hold it open for a moment. Opening it is therefore retried
//! for a bounded time; the OS bindings supply the single attempt and this
//! module supplies the loop.

use std::thread;
use std::time::{Duration, Instant};

/// A raw OS error code (`GetLastError` on Windows).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("os error {0}")]
pub struct OsError(pub u32);

/// Bounded retry for opening the clipboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Stop retrying once this much time has passed since the first attempt.
    pub timeout: Duration,
    /// Sleep between attempts.
    pub interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(500),
            interval: Duration::from_millis(10),
        }
    }
}

impl RetryPolicy {
    /// Calls `attempt` until it succeeds or the deadline passes.
    ///
    /// Always makes at least one attempt and never sleeps past the
    /// deadline. Each failure is logged as a warning. Returns whether an
    /// attempt succeeded.
    pub fn run<E: std::fmt::Display>(&self, mut attempt: impl FnMut() -> Result<(), E>) -> bool {
        let deadline = Instant::now() + self.timeout;
        loop {
            match attempt() {
                Ok(()) => return true,
                Err(e) => log::warn!("error while trying to open clipboard: {e}"),
            }
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            thread::sleep(self.interval.min(deadline - now));
        }
    }
}

/// Decodes UTF-16 clipboard data bounded by the reported buffer size.
///
/// Stops at the first NUL if there is one, otherwise takes the whole
/// buffer: producers that forget the terminator must not cause a read past
/// the allocation. Invalid surrogates become U+FFFD.
pub fn decode_utf16_bounded(units: &[u16]) -> String {
    let end = units.iter().position(|&u| u == 0).unwrap_or(units.len());
    String::from_utf16_lossy(&units[..end])
}

#[cfg(test)]
mod tests;
