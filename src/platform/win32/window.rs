//! Hidden message-only window registered as a clipboard format listener.
//!
//! The window class is registered once per process and reused across
//! create/destroy cycles. Each window carries its own heap `CallbackSlot`
//! in `GWLP_USERDATA`; the window procedure finds the callback through it.

use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe};
use std::ptr;
use std::sync::atomic::{AtomicBool, Ordering};

use windows_sys::Win32::Foundation::{ERROR_CLASS_ALREADY_EXISTS, HWND, LPARAM, LRESULT, WPARAM};
use windows_sys::Win32::System::DataExchange::{
    AddClipboardFormatListener, RemoveClipboardFormatListener,
};
use windows_sys::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, GWLP_USERDATA, GetWindowLongPtrW,
    HWND_MESSAGE, RegisterClassExW, SetWindowLongPtrW, WM_CLIPBOARDUPDATE, WNDCLASSEXW,
};

use autoclip_core::{
    ClipboardRead, Notifier, RetryPolicy, Subscription, UpdateCallback, WatchError,
};

use super::clipboard::NativeClipboard;
use super::{last_error, module_handle, wide};

const CLASS_NAME: &str = "AutoclipNotificationWindow";

static CLASS_REGISTERED: AtomicBool = AtomicBool::new(false);

/// Per-window state reachable from the window procedure.
struct CallbackSlot {
    callback: RefCell<Option<UpdateCallback>>,
    retry: RetryPolicy,
}

/// One message-only window and its listener registration.
pub struct NotificationWindow {
    hwnd: HWND,
    /// Owned; freed in `teardown`. Null once torn down.
    slot: *mut CallbackSlot,
    listening: bool,
}

impl NotificationWindow {
    /// Creates the window and subscribes it to clipboard updates.
    ///
    /// Nothing is left registered on error.
    #[allow(unsafe_code)]
    pub fn create(retry: RetryPolicy) -> Result<Self, WatchError> {
        register_class()?;

        let class = wide(CLASS_NAME);
        // SAFETY: the class is registered and `class` outlives the call.
        let hwnd = unsafe {
            CreateWindowExW(
                0,
                class.as_ptr(),
                class.as_ptr(),
                0,
                0,
                0,
                0,
                0,
                HWND_MESSAGE,
                ptr::null_mut(),
                module_handle(),
                ptr::null(),
            )
        };
        if hwnd.is_null() {
            return Err(WatchError::CreateWindow(last_error()));
        }

        let slot = Box::into_raw(Box::new(CallbackSlot {
            callback: RefCell::new(None),
            retry,
        }));
        // SAFETY: `hwnd` was just created on this thread; the slot stays
        // alive until `teardown` detaches it.
        unsafe {
            SetWindowLongPtrW(hwnd, GWLP_USERDATA, slot as isize);
        }

        let mut window = Self {
            hwnd,
            slot,
            listening: false,
        };

        // SAFETY: valid window handle owned by this thread.
        if unsafe { AddClipboardFormatListener(hwnd) } == 0 {
            let err = last_error();
            window.teardown();
            return Err(WatchError::AddListener(err));
        }
        window.listening = true;
        log::debug!("notification window created");
        Ok(window)
    }

    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }

    /// Replaces the callback run on every clipboard update.
    pub fn set_callback(&self, callback: UpdateCallback) {
        if let Ok(mut current) = self.slot().callback.try_borrow_mut() {
            *current = Some(callback);
        } else {
            log::warn!("notification window: callback busy, not replaced");
        }
    }

    /// Later notifications become no-ops.
    pub fn clear_callback(&self) {
        if let Ok(mut current) = self.slot().callback.try_borrow_mut() {
            *current = None;
        }
    }

    /// Unsubscribes, clears the callback and destroys the window.
    pub fn destroy(mut self) {
        self.teardown();
    }

    #[allow(unsafe_code)]
    fn slot(&self) -> &CallbackSlot {
        // SAFETY: `slot` is non-null from `create` until `teardown`, which
        // only runs through `destroy` (consuming) or `Drop`.
        unsafe { &*self.slot }
    }

    #[allow(unsafe_code)]
    fn teardown(&mut self) {
        if self.hwnd.is_null() {
            return;
        }
        if self.listening {
            // SAFETY: valid handle with an active listener registration.
            if unsafe { RemoveClipboardFormatListener(self.hwnd) } == 0 {
                log::warn!(
                    "notification window: failed to remove listener ({})",
                    last_error()
                );
            }
            self.listening = false;
        }
        self.clear_callback();

        // SAFETY: detach the slot before the window goes away so a late
        // message finds nothing, then free the slot we boxed in `create`.
        unsafe {
            SetWindowLongPtrW(self.hwnd, GWLP_USERDATA, 0);
            if DestroyWindow(self.hwnd) == 0 {
                log::warn!(
                    "notification window: failed to destroy window ({})",
                    last_error()
                );
            }
            drop(Box::from_raw(self.slot));
        }
        self.hwnd = ptr::null_mut();
        self.slot = ptr::null_mut();
        log::debug!("notification window destroyed");
    }
}

impl Drop for NotificationWindow {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl Subscription for NotificationWindow {
    fn destroy(mut self) {
        self.teardown();
    }
}

/// Registers the window class, once.
#[allow(unsafe_code)]
fn register_class() -> Result<(), WatchError> {
    if CLASS_REGISTERED.load(Ordering::Acquire) {
        return Ok(());
    }
    let class = wide(CLASS_NAME);
    let wc = WNDCLASSEXW {
        cbSize: size_of::<WNDCLASSEXW>() as u32,
        style: 0,
        lpfnWndProc: Some(wnd_proc),
        cbClsExtra: 0,
        cbWndExtra: 0,
        hInstance: module_handle(),
        hIcon: ptr::null_mut(),
        hCursor: ptr::null_mut(),
        hbrBackground: ptr::null_mut(),
        lpszMenuName: ptr::null(),
        lpszClassName: class.as_ptr(),
        hIconSm: ptr::null_mut(),
    };
    // SAFETY: `wc` is fully initialized and `class` outlives the call.
    if unsafe { RegisterClassExW(&raw const wc) } == 0 {
        let err = last_error();
        if err.0 != ERROR_CLASS_ALREADY_EXISTS {
            return Err(WatchError::RegisterClass(err));
        }
    }
    CLASS_REGISTERED.store(true, Ordering::Release);
    Ok(())
}

#[allow(unsafe_code)]
unsafe extern "system" fn wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    if msg == WM_CLIPBOARDUPDATE {
        // SAFETY: USERDATA is zero or the slot installed by `create`, which
        // is detached before it is freed.
        let slot = unsafe { GetWindowLongPtrW(hwnd, GWLP_USERDATA) } as *const CallbackSlot;
        // SAFETY: see above.
        if let Some(slot) = unsafe { slot.as_ref() } {
            dispatch(slot, hwnd);
        }
        return 0;
    }
    // SAFETY: default handling for every other message.
    unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) }
}

/// Runs the callback for one notification. Never unwinds into the OS.
fn dispatch(slot: &CallbackSlot, hwnd: HWND) {
    let Ok(mut current) = slot.callback.try_borrow_mut() else {
        log::debug!("notification window: re-entrant notification dropped");
        return;
    };
    let Some(callback) = current.as_mut() else {
        return;
    };
    let clipboard: &dyn ClipboardRead = &NativeClipboard {
        owner: hwnd,
        retry: slot.retry,
    };
    if panic::catch_unwind(AssertUnwindSafe(|| callback(clipboard))).is_err() {
        log::error!("notification window: callback panicked, notification dropped");
    }
}

/// Hands out `NotificationWindow`s as watcher subscriptions.
#[derive(Debug, Default)]
pub struct NativeNotifier {
    retry: RetryPolicy,
}

impl NativeNotifier {
    pub fn new(retry: RetryPolicy) -> Self {
        Self { retry }
    }
}

impl Notifier for NativeNotifier {
    type Subscription = NotificationWindow;

    fn subscribe(&mut self, callback: UpdateCallback) -> Result<NotificationWindow, WatchError> {
        let window = NotificationWindow::create(self.retry)?;
        window.set_callback(callback);
        Ok(window)
    }
}

#[cfg(test)]
mod tests {
    use autoclip_core::{Notifier, RetryPolicy};

    use super::{NativeNotifier, NotificationWindow};

    #[test]
    fn create_destroy_cycles_reuse_the_class() {
        for _ in 0..3 {
            let window = NotificationWindow::create(RetryPolicy::default()).expect("create");
            assert!(!window.hwnd().is_null());
            window.destroy();
        }
    }

    #[test]
    fn notifier_subscription_tears_down_on_drop() {
        let mut notifier = NativeNotifier::default();
        let window = notifier.subscribe(Box::new(|_| {})).expect("subscribe");
        window.clear_callback();
        drop(window);
    }
}
