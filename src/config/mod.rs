/// Configuration system for the tokenomics service
///
/// - `schemas`: configuration structures declared with `config_struct!`
/// - `utils`: loading, environment overrides and global access helpers
pub mod macros;
pub mod schemas;
pub mod utils;

pub use schemas::*;
pub use utils::{
    apply_env_overrides, get_config_clone, is_config_initialized, load_config,
    load_config_from_path, read_config_file, set_config, with_config, CONFIG, CONFIG_FILE_PATH,
};
