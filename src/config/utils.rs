use super::schemas::Config;
/// Configuration utilities - loading, environment overrides and access helpers
///
/// Values are resolved in this order (later wins):
/// 1. Defaults embedded in the schema definitions
/// 2. The TOML config file, when present
/// 3. `.env` file entries and process environment variables
use once_cell::sync::OnceCell;
use std::sync::RwLock;

/// Global configuration instance
///
/// Access it using the helper functions below.
pub static CONFIG: OnceCell<RwLock<Config>> = OnceCell::new();

/// Default configuration file path
pub const CONFIG_FILE_PATH: &str = "data/config.toml";

/// Load configuration from the default path (or `--config <path>`) and
/// initialize the global CONFIG
pub fn load_config() -> Result<Config, String> {
    let path = crate::arguments::get_config_path().unwrap_or_else(|| CONFIG_FILE_PATH.to_string());
    let config = load_config_from_path(&path)?;
    set_config(config.clone());
    Ok(config)
}

/// Load configuration from a specific file path without touching the global
///
/// A missing file is not an error: schema defaults are used instead.
/// Environment overrides are applied after the file is parsed.
pub fn load_config_from_path(path: &str) -> Result<Config, String> {
    let mut config = read_config_file(path)?;

    // .env is optional; variables already set in the process take precedence
    let _ = dotenv::dotenv();
    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;

    Ok(config)
}

/// Parse the TOML config file, or return defaults when it does not exist
pub fn read_config_file(path: &str) -> Result<Config, String> {
    if !std::path::Path::new(path).exists() {
        eprintln!("⚠️  Config file '{}' not found, using default values", path);
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config file '{}': {}", path, e))?;

    toml::from_str::<Config>(&contents)
        .map_err(|e| format!("Failed to parse config file '{}': {}", path, e))
}

/// Apply environment overrides using the given lookup
///
/// Recognized keys: `TOKEN_ADDRESS`, `MORALIS_API_KEY`, `MORALIS_URL`,
/// `BIRDEYE_API_KEY`, `BIRDEYE_URL`, `REDIS_HOST`, `REDIS_PORT`,
/// `REDIS_PASSWORD`, `CACHE_BACKEND`, `CACHE_EXPIRATION_SECONDS`.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<(), String>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup("TOKEN_ADDRESS") {
        config.tokenomics.token_address = value;
    }
    if let Some(value) = lookup("MORALIS_API_KEY") {
        config.providers.moralis.api_key = value;
    }
    if let Some(value) = lookup("MORALIS_URL") {
        config.providers.moralis.base_url = value;
    }
    if let Some(value) = lookup("BIRDEYE_API_KEY") {
        config.providers.birdeye.api_key = value;
    }
    if let Some(value) = lookup("BIRDEYE_URL") {
        config.providers.birdeye.base_url = value;
    }
    if let Some(value) = lookup("REDIS_HOST") {
        config.cache.redis_host = value;
    }
    if let Some(value) = lookup("REDIS_PORT") {
        config.cache.redis_port = value
            .parse()
            .map_err(|e| format!("Invalid REDIS_PORT '{}': {}", value, e))?;
    }
    if let Some(value) = lookup("REDIS_PASSWORD") {
        config.cache.redis_password = value;
    }
    if let Some(value) = lookup("CACHE_BACKEND") {
        config.cache.backend = value;
    }
    // Applies to aggregated records as well as untimed writes
    if let Some(value) = lookup("CACHE_EXPIRATION_SECONDS") {
        let ttl: u64 = value
            .parse()
            .map_err(|e| format!("Invalid CACHE_EXPIRATION_SECONDS '{}': {}", value, e))?;
        config.cache.default_ttl_seconds = ttl;
        config.tokenomics.data_ttl_seconds = ttl;
    }

    Ok(())
}

/// Install a configuration as the global instance (replacing any previous one)
pub fn set_config(config: Config) {
    if let Some(lock) = CONFIG.get() {
        match lock.write() {
            Ok(mut current) => *current = config,
            Err(poisoned) => *poisoned.into_inner() = config,
        }
    } else if let Err(lock) = CONFIG.set(RwLock::new(config)) {
        // Lost an initialization race; overwrite the winner
        if let Ok(config) = lock.into_inner() {
            set_config(config);
        }
    }
}

/// Execute a function with read access to the configuration
///
/// Falls back to schema defaults when `load_config()` has not run yet.
///
/// # Example
/// ```
/// use tokenomics::config::with_config;
///
/// let ttl = with_config(|cfg| cfg.tokenomics.data_ttl_seconds);
/// ```
pub fn with_config<F, R>(f: F) -> R
where
    F: FnOnce(&Config) -> R,
{
    let lock = CONFIG.get_or_init(|| RwLock::new(Config::default()));
    match lock.read() {
        Ok(config) => f(&config),
        Err(poisoned) => f(&poisoned.into_inner()),
    }
}

/// Get a clone of the entire configuration
///
/// Useful when config values must be held across await points.
pub fn get_config_clone() -> Config {
    with_config(|cfg| cfg.clone())
}

/// Check if configuration has been initialized
pub fn is_config_initialized() -> bool {
    CONFIG.get().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.cache.namespace, "tokenomics");
        assert_eq!(config.cache.default_ttl_seconds, 300);
        assert_eq!(config.cache.stats_ttl_seconds, 3600);
        assert_eq!(config.cache.redis_port, 6379);
        assert_eq!(config.tokenomics.data_ttl_seconds, 300);
        assert_eq!(config.webserver.port, 8000);
        assert_eq!(config.providers.birdeye.chain, "solana");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[tokenomics]\ntoken_address = \"TOKEN123\"\n\n[cache]\nbackend = \"memory\"\nstats_ttl_seconds = 7200\n"
        )
        .unwrap();

        let config = read_config_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.cache.backend, "memory");
        assert_eq!(config.cache.stats_ttl_seconds, 7200);
        assert_eq!(config.cache.default_ttl_seconds, 300);
        assert_eq!(config.cache.namespace, "tokenomics");
    }

    #[test]
    fn test_invalid_toml_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[cache\nbackend = ").unwrap();

        let err = read_config_file(file.path().to_str().unwrap()).unwrap_err();
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn test_example_config_matches_defaults() {
        let config = read_config_file("data/config.example.toml").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = read_config_file("does/not/exist.toml").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        let lookup = lookup_from(&[
            ("TOKEN_ADDRESS", "TOKEN123"),
            ("MORALIS_API_KEY", "moralis-key"),
            ("BIRDEYE_URL", "http://localhost:9999"),
            ("REDIS_PORT", "6380"),
            ("CACHE_EXPIRATION_SECONDS", "60"),
        ]);

        apply_env_overrides(&mut config, lookup).unwrap();

        assert_eq!(config.tokenomics.token_address, "TOKEN123");
        assert_eq!(config.providers.moralis.api_key, "moralis-key");
        assert_eq!(config.providers.birdeye.base_url, "http://localhost:9999");
        assert_eq!(config.cache.redis_port, 6380);
        assert_eq!(config.cache.default_ttl_seconds, 60);
        assert_eq!(config.tokenomics.data_ttl_seconds, 60);
        assert_eq!(config.cache.stats_ttl_seconds, 3600);
        assert_eq!(config.cache.redis_host, "127.0.0.1");
    }

    #[test]
    fn test_invalid_numeric_override() {
        let mut config = Config::default();
        let err = apply_env_overrides(&mut config, lookup_from(&[("REDIS_PORT", "redis")]))
            .unwrap_err();
        assert!(err.contains("REDIS_PORT"));
    }
}
