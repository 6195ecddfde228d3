/// Logger configuration derived from command-line arguments
use super::levels::LogLevel;
use super::tags::LogTag;
use crate::arguments::{get_arg_value, get_cmd_args};
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::sync::RwLock;

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Highest level that is printed (Debug additionally needs a per-tag flag)
    pub min_level: LogLevel,
    /// Tags with --debug-<tag> enabled
    pub debug_tags: HashSet<String>,
    /// Restrict output to these tags (empty = all)
    pub enabled_tags: HashSet<String>,
    /// Mirror console output into the log file
    pub file_logging: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            debug_tags: HashSet::new(),
            enabled_tags: HashSet::new(),
            file_logging: true,
        }
    }
}

static LOGGER_CONFIG: Lazy<RwLock<LoggerConfig>> =
    Lazy::new(|| RwLock::new(LoggerConfig::default()));

/// Snapshot of the current logger configuration
pub fn get_logger_config() -> LoggerConfig {
    match LOGGER_CONFIG.read() {
        Ok(config) => config.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// Replace the logger configuration
pub fn set_logger_config(config: LoggerConfig) {
    match LOGGER_CONFIG.write() {
        Ok(mut current) => *current = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
}

/// Build the logger configuration from the global command-line arguments
pub fn init_from_args() {
    set_logger_config(config_from_args(&get_cmd_args(), get_arg_value("--log-level")));
}

fn config_from_args(args: &[String], log_level: Option<String>) -> LoggerConfig {
    let mut config = LoggerConfig::default();

    for arg in args {
        if arg == "--debug-all" {
            config
                .debug_tags
                .extend(LogTag::ALL.iter().map(|tag| tag.to_debug_key()));
        } else if let Some(key) = arg.strip_prefix("--debug-") {
            config.debug_tags.insert(key.to_string());
        } else if arg == "--verbose" {
            config.min_level = LogLevel::Verbose;
        } else if arg == "--quiet" {
            config.min_level = LogLevel::Warning;
        } else if arg == "--no-log-file" {
            config.file_logging = false;
        }
    }

    if let Some(level) = log_level.as_deref().and_then(LogLevel::parse) {
        config.min_level = level;
    }

    config
}

pub fn is_debug_enabled_for_tag(tag: &LogTag) -> bool {
    match LOGGER_CONFIG.read() {
        Ok(config) => config.debug_tags.contains(&tag.to_debug_key()),
        Err(_) => false,
    }
}
