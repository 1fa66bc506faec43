//! Debug log written next to the executable.
//!
//! Everything goes through the `log` facade. The file is truncated on
//! every start so it only ever holds the current session.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;

const LOG_FILE: &str = "autoclip_debug.log";

/// Where the debug log lives: beside the executable, or in the working
/// directory when the executable path is unknown.
pub fn log_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .as_deref()
        .and_then(Path::parent)
        .unwrap_or(Path::new("."))
        .join(LOG_FILE)
}

/// A `log::Log` that appends one line per record to a file.
pub struct FileLogger {
    level: LevelFilter,
    file: Mutex<File>,
}

impl FileLogger {
    /// Creates (or truncates) the log file at `path`.
    pub fn create(path: &Path, level: LevelFilter) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;
        Ok(Self {
            level,
            file: Mutex::new(file),
        })
    }
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "[{:<5} {}] {}\n",
            record.level(),
            record.target(),
            record.args()
        );
        // A failed write to the debug log is not worth reporting anywhere.
        let _ = self.file.lock().write_all(line.as_bytes());
    }

    fn flush(&self) {
        let _ = self.file.lock().flush();
    }
}

/// Installing the global logger failed.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("a logger is already installed")]
    Install(#[from] log::SetLoggerError),
}

/// Installs a `FileLogger` at `log_path()` as the process logger.
pub fn init(level: LevelFilter) -> Result<(), InitError> {
    let path = log_path();
    let logger =
        FileLogger::create(&path, level).map_err(|source| InitError::Open { path, source })?;
    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use log::{Level, LevelFilter, Log, Record};

    use super::{FileLogger, LOG_FILE, log_path};

    fn emit(logger: &FileLogger, level: Level, msg: &str) {
        logger.log(
            &Record::builder()
                .level(level)
                .target("autoclip::test")
                .args(format_args!("{msg}"))
                .build(),
        );
    }

    #[test]
    fn writes_records_at_or_above_level() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("debug.log");
        let logger = FileLogger::create(&path, LevelFilter::Info).expect("create");

        emit(&logger, Level::Info, "watching");
        emit(&logger, Level::Debug, "noise");
        emit(&logger, Level::Error, "broken");
        logger.flush();

        let text = std::fs::read_to_string(&path).expect("read");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            [
                "[INFO  autoclip::test] watching",
                "[ERROR autoclip::test] broken",
            ]
        );
    }

    #[test]
    fn create_truncates_previous_session() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("debug.log");
        std::fs::write(&path, "old session\n").expect("write");

        let logger = FileLogger::create(&path, LevelFilter::Trace).expect("create");
        emit(&logger, Level::Trace, "new");
        logger.flush();

        let text = std::fs::read_to_string(&path).expect("read");
        assert_eq!(text, "[TRACE autoclip::test] new\n");
    }

    #[test]
    fn log_file_sits_beside_executable() {
        assert!(log_path().ends_with(LOG_FILE));
    }
}
