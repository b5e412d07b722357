// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::config::DEFAULT_CONFIG_FILE_NAME;
use crate::errors::Result;
use crate::fs::FileSystem;

/// Load a configuration file and return the raw, unvalidated `RawConfigFile`.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and validate it.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Pick the config file to use, if any.
///
/// Precedence: `cli_path`, then `env_path` (`EXECUTER_CONFIG`), then
/// `Executer.toml` in `source_dir` when it exists. An explicit path is
/// returned even if it does not exist, so loading it reports the error.
pub fn resolve_config_path(
    fs: &dyn FileSystem,
    cli_path: Option<&Path>,
    env_path: Option<&str>,
    source_dir: &Path,
) -> Option<PathBuf> {
    if let Some(path) = cli_path {
        return Some(path.to_path_buf());
    }
    if let Some(path) = env_path.filter(|p| !p.trim().is_empty()) {
        return Some(PathBuf::from(path));
    }
    let candidate = source_dir.join(DEFAULT_CONFIG_FILE_NAME);
    fs.is_file(&candidate).then_some(candidate)
}

/// Resolve and load the config for a source file, falling back to defaults
/// when no file applies.
pub fn load_for_source(
    fs: &dyn FileSystem,
    cli_path: Option<&Path>,
    env_path: Option<&str>,
    source_dir: &Path,
) -> Result<ConfigFile> {
    match resolve_config_path(fs, cli_path, env_path, source_dir) {
        Some(path) => {
            debug!(path = %path.display(), "loading config file");
            load_and_validate(path)
        }
        None => Ok(ConfigFile::default()),
    }
}
