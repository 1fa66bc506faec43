//! Configuration hot-reload: applies a changed config file to the watcher.

use autoclip_core::Notifier;

use super::App;

impl<N: Notifier> App<N> {
    /// Re-reads the config file and applies it.
    ///
    /// A broken file keeps the previous settings. Changed timing and
    /// chunking values apply from the next notification; a changed
    /// remembered state is followed when `remember_state` is set.
    pub fn apply_config_reload(&mut self) {
        if let Err(e) = self.store.reload() {
            log::warn!("config reload: {e}");
            return;
        }
        self.watcher.config_changed();
        self.on_config_init();
    }
}
