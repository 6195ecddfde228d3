/// Centralized argument handling for the tokenomics service
///
/// Features:
/// - Centralized CMD_ARGS storage with thread-safe access
/// - Debug flag checking functions for each module
/// - Process mode flags (--once, --clear-cache, --help)
use once_cell::sync::Lazy;
use std::env;
use std::sync::Mutex;

/// Global command-line arguments storage
/// Thread-safe singleton that stores arguments for access throughout the application
pub static CMD_ARGS: Lazy<Mutex<Vec<String>>> = Lazy::new(|| Mutex::new(env::args().collect()));

/// Sets the global command-line arguments
/// Used by binaries and tests to override the default env::args() collection
pub fn set_cmd_args(args: Vec<String>) {
    if let Ok(mut cmd_args) = CMD_ARGS.lock() {
        *cmd_args = args;
    }
}

/// Gets a copy of the current command-line arguments
pub fn get_cmd_args() -> Vec<String> {
    match CMD_ARGS.lock() {
        Ok(args) => args.clone(),
        Err(_) => env::args().collect(),
    }
}

/// Checks if a specific argument is present in the command line
pub fn has_arg(arg: &str) -> bool {
    get_cmd_args().iter().any(|a| a == arg)
}

/// Gets the value of a command-line argument that follows a flag
/// Returns None if the flag is not found or has no value
pub fn get_arg_value(flag: &str) -> Option<String> {
    let args = get_cmd_args();
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|i| args.get(i + 1).cloned())
}

// =============================================================================
// DEBUG FLAGS
// =============================================================================

/// Cache adapter / manager debug mode
pub fn is_debug_cache_enabled() -> bool {
    has_arg("--debug-cache")
}

/// Provider API calls debug mode
pub fn is_debug_api_enabled() -> bool {
    has_arg("--debug-api")
}

/// Aggregator debug mode
pub fn is_debug_aggregator_enabled() -> bool {
    has_arg("--debug-aggregator")
}

/// Webserver request debug mode
pub fn is_debug_webserver_enabled() -> bool {
    has_arg("--debug-webserver")
}

// =============================================================================
// PROCESS MODES
// =============================================================================

/// Run a single aggregation, print it as JSON and exit
pub fn is_once_enabled() -> bool {
    has_arg("--once")
}

/// Flush the cache backend and exit
pub fn is_clear_cache_enabled() -> bool {
    has_arg("--clear-cache")
}

/// Checks for help flags
pub fn is_help_requested() -> bool {
    has_arg("--help") || has_arg("-h")
}

/// Config file path override (`--config <path>`)
pub fn get_config_path() -> Option<String> {
    get_arg_value("--config")
}

/// Displays the help menu with all available flags and their descriptions
pub fn print_help() {
    println!("tokenomics - cached token market data aggregator");
    println!();
    println!("USAGE:");
    println!("    tokenomics [FLAGS]");
    println!();
    println!("FLAGS:");
    println!("    --config <path>           Config file (default: data/config.toml)");
    println!("    --once                    Aggregate once, print JSON and exit");
    println!("    --clear-cache             Flush the cache backend and exit");
    println!("    --help, -h                Show this help message");
    println!();
    println!("LOGGING:");
    println!("    --debug-api               Provider API calls debug mode");
    println!("    --debug-aggregator        Aggregator debug mode");
    println!("    --debug-cache             Cache adapter debug mode");
    println!("    --debug-webserver         Webserver debug mode");
    println!("    --debug-all               Enable every debug mode");
    println!("    --log-level <level>       error | warning | info | debug | verbose");
    println!("    --verbose                 Very detailed output");
    println!("    --quiet                   Warnings and errors only");
    println!("    --no-log-file             Do not write logs/tokenomics.log");
}

/// Gets a list of all enabled debug modes
pub fn get_enabled_debug_modes() -> Vec<&'static str> {
    let mut modes = Vec::new();

    if is_debug_cache_enabled() {
        modes.push("cache");
    }
    if is_debug_api_enabled() {
        modes.push("api");
    }
    if is_debug_aggregator_enabled() {
        modes.push("aggregator");
    }
    if is_debug_webserver_enabled() {
        modes.push("webserver");
    }

    modes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_lookup() {
        set_cmd_args(vec![
            "tokenomics".to_string(),
            "--debug-cache".to_string(),
            "--config".to_string(),
            "custom.toml".to_string(),
            "--once".to_string(),
        ]);

        assert!(is_debug_cache_enabled());
        assert!(!is_debug_api_enabled());
        assert!(is_once_enabled());
        assert!(!is_clear_cache_enabled());
        assert_eq!(get_config_path(), Some("custom.toml".to_string()));
        assert_eq!(get_arg_value("--missing"), None);
        assert_eq!(get_enabled_debug_modes(), vec!["cache"]);
    }
}
