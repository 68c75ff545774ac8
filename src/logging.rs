// File: src/logging.rs
use crate::error::LogInitError;
use log::{LevelFilter, Log, Metadata, Record};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

/// Appends one line per record to a file. The terminal belongs to the UI,
/// so nothing is ever written to stdout or stderr.
struct FileLogger {
    file: Mutex<File>,
    level: LevelFilter,
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "[{}] {}: {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

/// Installs the global logger, truncating any previous log file.
pub fn init_file_logger(path: &Path, level: LevelFilter) -> Result<(), LogInitError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    log::set_boxed_logger(Box::new(FileLogger { file: Mutex::new(file), level }))?;
    log::set_max_level(level);
    Ok(())
}
