//! Controller tests, driven through `ManualNotifier` and a temp config file.

use std::path::Path;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};

use autoclip_core::{Announcement, ManualNotifier, OsError, WatchError};
use tempfile::TempDir;

use super::{App, DISABLED_MESSAGE, ENABLED_MESSAGE, START_FAILED_MESSAGE};
use crate::config::{Config, ConfigStore};

struct Harness {
    _dir: TempDir,
    notifier: ManualNotifier,
    store: Arc<ConfigStore>,
    app: App<ManualNotifier>,
    rx: Receiver<Announcement>,
}

impl Harness {
    fn with_config(toml: &str, secure: bool) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, toml).expect("write");
        let store = Arc::new(ConfigStore::open(path));
        let notifier = ManualNotifier::new();
        let (tx, rx) = mpsc::channel();
        let app = App::new(notifier.clone(), store.clone(), Arc::new(tx), secure);
        Self {
            _dir: dir,
            notifier,
            store,
            app,
            rx,
        }
    }

    fn new() -> Self {
        Self::with_config("", false)
    }

    fn messages(&self) -> Vec<String> {
        self.rx.try_iter().map(|a| a.text).collect()
    }

    fn rewrite(&self, toml: &str) {
        std::fs::write(self.store.path(), toml).expect("write");
    }

    fn on_disk(path: &Path) -> Config {
        Config::try_load(path).expect("load")
    }
}

#[test]
fn starts_disabled() {
    let h = Harness::new();
    assert!(!h.app.is_enabled());
    assert_eq!(h.notifier.active_subscriptions(), 0);
}

#[test]
fn enable_and_disable_are_idempotent() {
    let mut h = Harness::new();
    h.app.enable().expect("enable");
    h.app.enable().expect("enable again");
    assert_eq!(h.notifier.subscribe_count(), 1);

    h.app.disable();
    h.app.disable();
    assert!(!h.app.is_enabled());
    assert_eq!(h.notifier.active_subscriptions(), 0);
    assert!(h.messages().is_empty());
}

#[test]
fn enabled_app_forwards_clipboard_text() {
    let mut h = Harness::new();
    h.app.enable().expect("enable");
    assert!(h.notifier.notify_text("hello world"));
    assert_eq!(h.messages(), ["hello world"]);
}

#[test]
fn toggle_announces_and_persists() {
    let mut h = Harness::new();

    h.app.toggle();
    assert!(h.app.is_enabled());
    assert_eq!(h.messages(), [ENABLED_MESSAGE]);
    assert!(Harness::on_disk(h.store.path()).autoclip.automatic_reading);

    h.app.toggle();
    assert!(!h.app.is_enabled());
    assert_eq!(h.messages(), [DISABLED_MESSAGE]);
    assert!(!Harness::on_disk(h.store.path()).autoclip.automatic_reading);
}

#[test]
fn failed_start_is_announced_and_not_persisted() {
    let mut h = Harness::new();
    h.notifier
        .fail_next_subscribe(WatchError::CreateWindow(OsError(1400)));

    h.app.toggle();
    assert!(!h.app.is_enabled());
    assert_eq!(h.messages(), [START_FAILED_MESSAGE]);
    assert!(!h.store.config().autoclip.automatic_reading);
}

#[test]
fn enable_failure_returns_the_error() {
    let mut h = Harness::new();
    h.notifier.fail_next_subscribe(WatchError::AddListener(OsError(5)));
    assert_eq!(
        h.app.enable(),
        Err(WatchError::AddListener(OsError(5)))
    );
    assert_eq!(h.messages(), [START_FAILED_MESSAGE]);
}

#[test]
fn remembered_state_starts_watcher() {
    let mut h = Harness::with_config(
        "[autoclip]\nremember_state = true\nautomatic_reading = true\n",
        false,
    );
    h.app.on_config_init();
    assert!(h.app.is_enabled());
    // Auto-start is silent.
    assert!(h.messages().is_empty());
}

#[test]
fn remembered_state_ignored_without_remember_flag() {
    let mut h = Harness::with_config("[autoclip]\nautomatic_reading = true\n", false);
    h.app.on_config_init();
    assert!(!h.app.is_enabled());
}

#[test]
fn secure_mode_never_auto_starts() {
    let mut h = Harness::with_config(
        "[autoclip]\nremember_state = true\nautomatic_reading = true\n",
        true,
    );
    h.app.on_config_init();
    assert!(!h.app.is_enabled());
}

#[test]
fn reload_follows_remembered_state() {
    let mut h = Harness::with_config(
        "[autoclip]\nremember_state = true\nautomatic_reading = true\n",
        false,
    );
    h.app.on_config_init();
    assert!(h.app.is_enabled());

    h.rewrite("[autoclip]\nremember_state = true\nautomatic_reading = false\n");
    h.app.apply_config_reload();
    assert!(!h.app.is_enabled());
}

#[test]
fn reload_applies_new_limits_without_restart() {
    let mut h = Harness::new();
    h.app.enable().expect("enable");

    h.rewrite("[autoclip]\nmax_length = 5\n");
    h.app.apply_config_reload();
    assert!(h.app.is_enabled());
    assert_eq!(h.notifier.subscribe_count(), 1);

    h.notifier.notify_text("far too long");
    h.notifier.notify_text("ok");
    assert_eq!(h.messages(), ["ok"]);
}

#[test]
fn broken_reload_keeps_previous_settings() {
    let mut h = Harness::with_config("[autoclip]\nmax_length = 5\n", false);
    h.app.enable().expect("enable");

    h.rewrite("[autoclip\n");
    h.app.apply_config_reload();
    assert_eq!(h.store.config().autoclip.max_length, 5);
    assert!(h.app.is_enabled());
}

#[test]
fn terminate_stops_watching() {
    let mut h = Harness::new();
    h.app.enable().expect("enable");
    h.app.terminate();
    assert!(!h.app.is_enabled());
    assert_eq!(h.notifier.active_subscriptions(), 0);
    assert!(!h.notifier.notify_text("after"));
}

#[cfg(not(windows))]
#[test]
fn run_is_unsupported_off_windows() {
    use super::{RunError, RunOptions, run};

    let h = Harness::new();
    let result = run(h.store.clone(), RunOptions::default());
    assert!(matches!(
        result,
        Err(RunError::Watch(WatchError::Unsupported))
    ));
}
