//! The clipboard watcher state machine.
//!
//! `ClipboardWatcher` owns a `Notifier` (the OS seam) and, while running,
//! the one `Subscription` it handed out. The subscription calls back into a
//! shared observer for every clipboard-update notification; the observer
//! reads the clipboard, runs the notify policy, and posts accepted text to
//! the event queue. Nothing is spoken on the notification thread.

use std::cell::{Cell, RefCell};
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;

use crate::error::WatchError;
use crate::event::{Announcement, EventQueue};
use crate::policy::{NotifyPolicy, Verdict};
use crate::settings::{ConfigurationView, Settings};

/// Source of clipboard text for one notification.
///
/// The OS binding passes an implementation tied to its own window so that
/// clipboard ownership is attributed correctly.
pub trait ClipboardRead {
    /// Returns the current text, or an empty string when there is none.
    fn read_text(&self) -> String;
}

impl ClipboardRead for String {
    fn read_text(&self) -> String {
        self.clone()
    }
}

/// Invoked once per clipboard-update notification.
pub type UpdateCallback = Box<dyn FnMut(&dyn ClipboardRead)>;

/// A live registration for clipboard-update notifications.
pub trait Subscription {
    /// Unsubscribes, drops the callback, and releases native resources.
    fn destroy(self);
}

/// Hands out clipboard-update subscriptions.
pub trait Notifier {
    type Subscription: Subscription;

    /// Registers `callback` for clipboard-update notifications.
    ///
    /// On error nothing stays registered.
    fn subscribe(&mut self, callback: UpdateCallback) -> Result<Self::Subscription, WatchError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    Stopped,
    Running,
}

/// State shared between the watcher and its notification callback.
struct Observer {
    policy: NotifyPolicy,
    settings: Settings,
    queue: Arc<dyn EventQueue>,
}

impl Observer {
    fn on_notify(&mut self, clipboard: &dyn ClipboardRead) {
        let text = clipboard.read_text();
        let now = Instant::now();
        match self.policy.evaluate(&text, now, &self.settings) {
            Verdict::Deliver { interrupt } => {
                log::debug!(
                    "clipboard: announcing {} chars (interrupt: {interrupt})",
                    text.chars().count()
                );
                let chunking = self.settings.chunking();
                self.queue
                    .post(Announcement::clipboard(text, interrupt, chunking));
            }
            Verdict::Coalesced => log::trace!("clipboard: repeated notification coalesced"),
            Verdict::Discard(reason) => log::trace!("clipboard: discarded ({reason:?})"),
        }
    }
}

/// Watches the clipboard and posts announcements for new text.
pub struct ClipboardWatcher<N: Notifier> {
    notifier: N,
    subscription: Option<N::Subscription>,
    config: Arc<dyn ConfigurationView>,
    observer: Arc<Mutex<Observer>>,
}

impl<N: Notifier> ClipboardWatcher<N> {
    /// Creates a stopped watcher.
    pub fn new(
        notifier: N,
        config: Arc<dyn ConfigurationView>,
        queue: Arc<dyn EventQueue>,
    ) -> Self {
        let settings = config.settings();
        Self {
            notifier,
            subscription: None,
            config,
            observer: Arc::new(Mutex::new(Observer {
                policy: NotifyPolicy::new(),
                settings,
                queue,
            })),
        }
    }

    /// Subscribes to clipboard notifications. No-op when already running.
    ///
    /// On error the watcher stays stopped.
    pub fn start(&mut self) -> Result<(), WatchError> {
        if self.subscription.is_some() {
            return Ok(());
        }
        self.observer.lock().settings = self.config.settings();

        let observer = Arc::clone(&self.observer);
        let callback: UpdateCallback = Box::new(move |clipboard: &dyn ClipboardRead| {
            let Some(mut state) = observer.try_lock() else {
                log::warn!("clipboard: notification arrived while busy, dropped");
                return;
            };
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| state.on_notify(clipboard)));
            if outcome.is_err() {
                log::error!("clipboard: notification handler panicked, event dropped");
            }
        });

        self.subscription = Some(self.notifier.subscribe(callback)?);
        log::debug!("clipboard watcher started");
        Ok(())
    }

    /// Unsubscribes and forgets the last text and time. No-op when stopped.
    ///
    /// Announcements already posted are not recalled.
    pub fn stop(&mut self) {
        let Some(subscription) = self.subscription.take() else {
            return;
        };
        subscription.destroy();
        self.observer.lock().policy.reset();
        log::debug!("clipboard watcher stopped");
    }

    /// Starts a stopped watcher or stops a running one.
    pub fn toggle(&mut self) -> Result<WatchState, WatchError> {
        if self.is_running() {
            self.stop();
        } else {
            self.start()?;
        }
        Ok(self.state())
    }

    /// Re-reads the configuration view; applies to the next notification.
    pub fn config_changed(&mut self) {
        self.observer.lock().settings = self.config.settings();
    }

    pub fn state(&self) -> WatchState {
        if self.subscription.is_some() {
            WatchState::Running
        } else {
            WatchState::Stopped
        }
    }

    pub fn is_running(&self) -> bool {
        self.subscription.is_some()
    }

    /// The last announced text (empty when stopped or nothing announced yet).
    pub fn last_text(&self) -> String {
        self.observer.lock().policy.last_text().to_owned()
    }
}

impl<N: Notifier> Drop for ClipboardWatcher<N> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// A notifier driven by hand, for headless operation and tests.
///
/// Clones share one callback slot, so a clone kept outside the watcher can
/// fire notifications into it.
#[derive(Clone, Default)]
pub struct ManualNotifier {
    inner: Rc<ManualInner>,
}

#[derive(Default)]
struct ManualInner {
    callback: RefCell<Option<UpdateCallback>>,
    active: Cell<usize>,
    subscribes: Cell<usize>,
    fail_next: RefCell<Option<WatchError>>,
}

/// Subscription handed out by [`ManualNotifier`].
pub struct ManualSubscription {
    inner: Rc<ManualInner>,
}

impl ManualNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fires one clipboard-update notification.
    ///
    /// Returns false when nobody is subscribed (or on re-entry).
    pub fn notify(&self, clipboard: &dyn ClipboardRead) -> bool {
        let Ok(mut slot) = self.inner.callback.try_borrow_mut() else {
            return false;
        };
        match slot.as_mut() {
            Some(callback) => {
                callback(clipboard);
                true
            }
            None => false,
        }
    }

    /// Fires a notification for a clipboard holding `text`.
    pub fn notify_text(&self, text: &str) -> bool {
        self.notify(&text.to_owned())
    }

    /// Number of live subscriptions.
    pub fn active_subscriptions(&self) -> usize {
        self.inner.active.get()
    }

    /// Number of successful `subscribe` calls so far.
    pub fn subscribe_count(&self) -> usize {
        self.inner.subscribes.get()
    }

    /// Makes the next `subscribe` fail with `error`.
    pub fn fail_next_subscribe(&self, error: WatchError) {
        *self.inner.fail_next.borrow_mut() = Some(error);
    }
}

impl Notifier for ManualNotifier {
    type Subscription = ManualSubscription;

    fn subscribe(&mut self, callback: UpdateCallback) -> Result<ManualSubscription, WatchError> {
        if let Some(error) = self.inner.fail_next.borrow_mut().take() {
            return Err(error);
        }
        *self.inner.callback.borrow_mut() = Some(callback);
        self.inner.active.set(self.inner.active.get() + 1);
        self.inner.subscribes.set(self.inner.subscribes.get() + 1);
        Ok(ManualSubscription {
            inner: Rc::clone(&self.inner),
        })
    }
}

impl Subscription for ManualSubscription {
    fn destroy(self) {
        *self.inner.callback.borrow_mut() = None;
        self.inner.active.set(self.inner.active.get().saturating_sub(1));
    }
}
