//! Stand-in for targets without clipboard-update notifications.

use autoclip_core::{Notifier, RetryPolicy, Subscription, UpdateCallback, WatchError};

/// Refuses every subscription with `WatchError::Unsupported`.
#[derive(Debug, Default)]
pub struct NativeNotifier;

impl NativeNotifier {
    /// Mirrors the Windows constructor; the policy is unused here.
    pub fn new(_retry: RetryPolicy) -> Self {
        Self
    }
}

/// Never constructed.
pub enum NoSubscription {}

impl Subscription for NoSubscription {
    fn destroy(self) {
        match self {}
    }
}

impl Notifier for NativeNotifier {
    type Subscription = NoSubscription;

    fn subscribe(&mut self, _callback: UpdateCallback) -> Result<NoSubscription, WatchError> {
        Err(WatchError::Unsupported)
    }
}
