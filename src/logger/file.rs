/// File persistence for log lines
use super::config::get_logger_config;
use once_cell::sync::OnceCell;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;

/// Log directory relative to the working directory
const LOG_DIR: &str = "logs";
const LOG_FILE: &str = "tokenomics.log";

static LOG_WRITER: OnceCell<Mutex<BufWriter<File>>> = OnceCell::new();

/// Open (or create) the log file
///
/// Failures are reported on stderr and leave file logging disabled.
pub fn init_file_logging() {
    if !get_logger_config().file_logging {
        return;
    }

    if let Err(e) = fs::create_dir_all(LOG_DIR) {
        eprintln!("Failed to create log directory '{}': {}", LOG_DIR, e);
        return;
    }

    let path = Path::new(LOG_DIR).join(LOG_FILE);
    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => {
            let _ = LOG_WRITER.set(Mutex::new(BufWriter::new(file)));
        }
        Err(e) => eprintln!("Failed to open log file '{}': {}", path.display(), e),
    }
}

pub fn write_to_file(line: &str) {
    if let Some(writer) = LOG_WRITER.get() {
        if let Ok(mut writer) = writer.lock() {
            let _ = writeln!(writer, "{}", line);
        }
    }
}

pub fn flush_file_logging() {
    if let Some(writer) = LOG_WRITER.get() {
        if let Ok(mut writer) = writer.lock() {
            let _ = writer.flush();
        }
    }
}
