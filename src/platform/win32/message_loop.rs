//! The thread message loop that owns the notification window.
//!
//! Clipboard updates arrive as window messages and are dispatched to the
//! window procedure by `run`. Other threads reach the loop by posting
//! thread messages through a `ThreadProxy`.

use std::ops::ControlFlow;
use std::ptr;
use std::sync::atomic::{AtomicU32, Ordering};

use windows_sys::Win32::Foundation::{FALSE, TRUE};
use windows_sys::Win32::System::Console::SetConsoleCtrlHandler;
use windows_sys::Win32::System::Threading::GetCurrentThreadId;
use windows_sys::Win32::UI::WindowsAndMessaging::{
    DispatchMessageW, GetMessageW, MSG, PM_NOREMOVE, PeekMessageW, PostThreadMessageW,
    TranslateMessage, WM_APP,
};

use super::last_error;
use crate::event::{AppEvent, EventProxy};

const WM_CONFIG_RELOAD: u32 = WM_APP + 1;
const WM_QUIT_REQUESTED: u32 = WM_APP + 2;

/// Thread id of the loop, for the console control handler.
static LOOP_THREAD: AtomicU32 = AtomicU32::new(0);

/// Posts `AppEvent`s to the message-loop thread.
#[derive(Debug, Clone, Copy)]
pub struct ThreadProxy {
    thread_id: u32,
}

impl EventProxy for ThreadProxy {
    fn send_event(&self, event: AppEvent) -> bool {
        post(self.thread_id, event)
    }
}

#[allow(unsafe_code)]
fn post(thread_id: u32, event: AppEvent) -> bool {
    let msg = match event {
        AppEvent::ConfigReload => WM_CONFIG_RELOAD,
        AppEvent::Quit => WM_QUIT_REQUESTED,
    };
    // SAFETY: posting to a thread id has no memory preconditions.
    let ok = unsafe { PostThreadMessageW(thread_id, msg, 0, 0) } != 0;
    if !ok {
        log::debug!("message loop: failed to post {event:?} ({})", last_error());
    }
    ok
}

/// Prepares the calling thread to run the loop.
///
/// Creates the thread's message queue (so posts made before `run` are not
/// lost) and routes Ctrl+C and console close to `AppEvent::Quit`.
#[allow(unsafe_code)]
pub fn prepare() -> ThreadProxy {
    // SAFETY: plain thread queries; `msg` is a valid out pointer.
    let thread_id = unsafe {
        let mut msg: MSG = std::mem::zeroed();
        PeekMessageW(&raw mut msg, ptr::null_mut(), 0, 0, PM_NOREMOVE);
        GetCurrentThreadId()
    };
    LOOP_THREAD.store(thread_id, Ordering::Release);

    // SAFETY: the handler is a plain function that only posts a message.
    if unsafe { SetConsoleCtrlHandler(Some(console_ctrl), TRUE) } == 0 {
        log::warn!("message loop: no console control handler ({})", last_error());
    }
    ThreadProxy { thread_id }
}

#[allow(unsafe_code)]
unsafe extern "system" fn console_ctrl(ctrl_type: u32) -> i32 {
    log::info!("console control event {ctrl_type}, shutting down");
    let thread_id = LOOP_THREAD.load(Ordering::Acquire);
    if thread_id != 0 && post(thread_id, AppEvent::Quit) {
        TRUE
    } else {
        FALSE
    }
}

/// Pumps messages until `handler` breaks or `WM_QUIT` arrives.
///
/// Window messages go to their window procedures; `AppEvent`s posted
/// through a `ThreadProxy` go to `handler`.
#[allow(unsafe_code)]
pub fn run(mut handler: impl FnMut(AppEvent) -> ControlFlow<()>) {
    // SAFETY: MSG is plain data; zeroed is a valid initial value.
    let mut msg: MSG = unsafe { std::mem::zeroed() };
    loop {
        // SAFETY: `msg` is a valid out pointer; null hwnd receives both
        // window and thread messages.
        let status = unsafe { GetMessageW(&raw mut msg, ptr::null_mut(), 0, 0) };
        if status == 0 {
            log::debug!("message loop: WM_QUIT");
            return;
        }
        if status == -1 {
            log::error!("message loop: GetMessageW failed ({})", last_error());
            return;
        }

        let event = if msg.hwnd.is_null() {
            match msg.message {
                WM_CONFIG_RELOAD => Some(AppEvent::ConfigReload),
                WM_QUIT_REQUESTED => Some(AppEvent::Quit),
                _ => None,
            }
        } else {
            None
        };

        match event {
            Some(event) => {
                if handler(event).is_break() {
                    return;
                }
            }
            // SAFETY: `msg` was filled in by GetMessageW.
            None => unsafe {
                TranslateMessage(&raw const msg);
                DispatchMessageW(&raw const msg);
            },
        }
    }
}
