//! Win32 clipboard bindings.

mod clipboard;
pub mod message_loop;
mod window;

pub use clipboard::{ClipboardGuard, NativeClipboard};
pub use message_loop::ThreadProxy;
pub use window::{NativeNotifier, NotificationWindow};

use windows_sys::Win32::Foundation::{GetLastError, HINSTANCE};
use windows_sys::Win32::System::LibraryLoader::GetModuleHandleW;

use autoclip_core::OsError;

/// NUL-terminated UTF-16 for Win32 string parameters.
fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// The calling thread's last Win32 error.
#[allow(unsafe_code)]
fn last_error() -> OsError {
    // SAFETY: reads thread-local error state only.
    OsError(unsafe { GetLastError() })
}

/// Instance handle of the running executable.
#[allow(unsafe_code)]
fn module_handle() -> HINSTANCE {
    // SAFETY: a null name asks for the current process image, which stays
    // loaded for the life of the process.
    unsafe { GetModuleHandleW(std::ptr::null()) }
}
