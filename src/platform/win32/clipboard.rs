//! Scoped access to the Win32 clipboard.

use windows_sys::Win32::Foundation::HWND;
use windows_sys::Win32::System::DataExchange::{
    CloseClipboard, GetClipboardData, IsClipboardFormatAvailable, OpenClipboard,
};
use windows_sys::Win32::System::Memory::{GlobalLock, GlobalSize, GlobalUnlock};
use windows_sys::Win32::System::Ole::CF_UNICODETEXT;

use autoclip_core::{ClipboardRead, RetryPolicy, decode_utf16_bounded};

use super::last_error;

/// The clipboard, opened for reading on behalf of `owner`.
///
/// Dropping the guard closes the clipboard, whether or not opening it
/// ever succeeded.
pub struct ClipboardGuard {
    opened: bool,
}

impl ClipboardGuard {
    /// Opens the clipboard, retrying under `retry` while another process
    /// holds it.
    ///
    /// Never fails. After the deadline the guard is returned anyway and
    /// reads are attempted best-effort.
    #[allow(unsafe_code)]
    pub fn acquire(owner: HWND, retry: &RetryPolicy) -> Self {
        let opened = retry.run(|| {
            // SAFETY: `owner` is either null or a window owned by this thread.
            if unsafe { OpenClipboard(owner) } != 0 {
                Ok(())
            } else {
                Err(last_error())
            }
        });
        if !opened {
            log::warn!(
                "clipboard: still busy after {:?}, reading anyway",
                retry.timeout
            );
        }
        Self { opened }
    }

    pub fn is_open(&self) -> bool {
        self.opened
    }

    /// The clipboard's Unicode text, or an empty string.
    #[allow(unsafe_code)]
    pub fn read_text(&self) -> String {
        let format = u32::from(CF_UNICODETEXT);
        // SAFETY: format queries have no preconditions.
        if unsafe { IsClipboardFormatAvailable(format) } == 0 {
            return String::new();
        }

        // SAFETY: the returned handle is owned by the clipboard and only
        // used while it is open (or best-effort after a timed-out open).
        let handle = unsafe { GetClipboardData(format) };
        if handle.is_null() {
            log::warn!("clipboard: no data handle for text ({})", last_error());
            return String::new();
        }

        // SAFETY: `handle` is a global memory object from `GetClipboardData`.
        // The locked region is `GlobalSize` bytes long and is only read
        // between `GlobalLock` and `GlobalUnlock`.
        unsafe {
            let ptr = GlobalLock(handle).cast::<u16>();
            if ptr.is_null() {
                log::error!("clipboard: failed to lock text ({})", last_error());
                return String::new();
            }
            let units = GlobalSize(handle) / size_of::<u16>();
            let text = decode_utf16_bounded(std::slice::from_raw_parts(ptr, units));
            GlobalUnlock(handle);
            text
        }
    }
}

impl Drop for ClipboardGuard {
    #[allow(unsafe_code)]
    fn drop(&mut self) {
        // SAFETY: closing a clipboard this thread does not hold open fails
        // harmlessly.
        unsafe {
            CloseClipboard();
        }
    }
}

/// `ClipboardRead` for notifications delivered to the window `owner`.
pub struct NativeClipboard {
    pub owner: HWND,
    pub retry: RetryPolicy,
}

impl ClipboardRead for NativeClipboard {
    fn read_text(&self) -> String {
        let guard = ClipboardGuard::acquire(self.owner, &self.retry);
        if !guard.is_open() {
            log::debug!("clipboard: best-effort read without ownership");
        }
        guard.read_text()
    }
}
