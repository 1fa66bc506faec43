//! Win32 message loop driving the app.

use std::ops::ControlFlow;
use std::sync::Arc;

use autoclip_core::RetryPolicy;

use crate::config::ConfigStore;
use crate::config::monitor::ConfigMonitor;
use crate::event::AppEvent;
use crate::platform::{NativeNotifier, message_loop};
use crate::speech::{ConsoleSpeaker, Dispatcher};

use super::{App, RunError, RunOptions};

pub(super) fn run(store: Arc<ConfigStore>, options: RunOptions) -> Result<(), RunError> {
    let proxy = message_loop::prepare();
    let dispatcher = Dispatcher::spawn(ConsoleSpeaker)?;
    let config_monitor = ConfigMonitor::new(store.path(), proxy);

    let mut app = App::new(
        NativeNotifier::new(RetryPolicy::default()),
        store,
        dispatcher.queue(),
        options.secure,
    );
    app.on_config_init();

    let result = if options.enable && !app.is_enabled() {
        app.enable().map_err(RunError::from)
    } else {
        Ok(())
    };

    if result.is_ok() {
        log::info!("message loop running (enabled: {})", app.is_enabled());
        message_loop::run(|event| match event {
            AppEvent::ConfigReload => {
                app.apply_config_reload();
                ControlFlow::Continue(())
            }
            AppEvent::Quit => ControlFlow::Break(()),
        });
    }

    app.terminate();
    drop(app);
    if let Some(monitor) = config_monitor {
        monitor.shutdown();
    }
    dispatcher.shutdown();
    log::info!("shut down");
    result
}
