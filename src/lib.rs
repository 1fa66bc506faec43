//! Automatic clipboard reading.
//!
//! Wires the platform-free pipeline in `autoclip_core` to Win32 clipboard
//! notifications, a TOML config file that is watched for changes, a debug
//! log, and a speech dispatcher thread.

pub mod app;
pub mod config;
pub mod event;
pub mod logging;
pub mod platform;
pub mod speech;
