// src/config/mod.rs

//! Configuration: compile-time defaults, environment switches and the
//! optional `Executer.toml` file.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_for_source, load_from_path, resolve_config_path};
pub use model::{ConfigFile, ConfigSection, RawConfigFile};

/// Exit code used when a compile step fails, or before any step can start.
pub const EXIT_STATUS_WHEN_COMPILE_ERROR: i32 = 100;

/// Compile-time default for debug mode.
pub const IS_DEBUG_MODE_DEFAULT: bool = false;

/// Setting this to `1` forces debug mode on.
pub const DEBUG_ENV_VAR: &str = "EXECUTER_DEBUG";

/// Names a config file when `--config` is absent.
pub const CONFIG_ENV_VAR: &str = "EXECUTER_CONFIG";

/// Config file looked up next to the source file.
pub const DEFAULT_CONFIG_FILE_NAME: &str = "Executer.toml";

/// Whether debug mode (verbose trace) is on.
///
/// `env_value` is the value of [`DEBUG_ENV_VAR`], if set.
pub fn debug_mode(config: &ConfigFile, env_value: Option<&str>) -> bool {
    IS_DEBUG_MODE_DEFAULT || env_value.map(str::trim) == Some("1") || config.config.debug
}
