//! Structured logging system for the tokenomics service
//!
//! This module provides a small, ergonomic logging API with:
//! - Debug mode filtering from command-line arguments
//! - Standard log levels (Error/Warning/Info/Debug/Verbose)
//! - Per-module debug control via --debug-<module> flags
//! - Dual output: colored console + file persistence
//!
//! ## Usage
//!
//! ```rust
//! use tokenomics::logger::{self, LogTag};
//!
//! logger::error(LogTag::Cache, "Redis connection refused");
//! logger::warning(LogTag::Api, "Birdeye returned HTTP 429");
//! logger::info(LogTag::Aggregator, "Returning cached data");
//! logger::debug(LogTag::Cache, "Cache HIT for key ..."); // Only if --debug-cache
//! logger::verbose(LogTag::Api, "Raw payload: ..."); // Only if --verbose
//! ```
//!
//! ## Initialization
//!
//! Call once at startup, before services are constructed:
//! ```rust
//! tokenomics::logger::init();
//! ```

mod config;
mod core;
mod file;
mod format;
mod levels;
mod tags;

pub use config::{get_logger_config, init_from_args, set_logger_config, LoggerConfig};
pub use levels::LogLevel;
pub use tags::LogTag;

/// Initialize the logger system
///
/// Parses debug flags from the command line and opens the log file.
pub fn init() {
    config::init_from_args();
    file::init_file_logging();
}

/// Log at ERROR level (always shown, critical issues)
///
/// # Example
/// ```rust
/// use tokenomics::logger::{self, LogTag};
/// logger::error(LogTag::Cache, "Failed to connect to Redis");
/// ```
pub fn error(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Error, message);
}

/// Log at WARNING level (important issues)
pub fn warning(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Warning, message);
}

/// Log at INFO level (standard operations)
pub fn info(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Info, message);
}

/// Log at DEBUG level (detailed diagnostics)
///
/// Debug logs are ONLY shown when the --debug-<module> flag for the tag is
/// provided, e.g. `--debug-cache` for [`LogTag::Cache`].
pub fn debug(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Debug, message);
}

/// Log at VERBOSE level (very detailed tracing, requires --verbose)
pub fn verbose(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Verbose, message);
}

/// Force flush all pending log writes
///
/// Call this during shutdown to ensure all logs are written to disk.
pub fn flush() {
    file::flush_file_logging();
}
