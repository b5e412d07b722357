// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{ExecuterError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = ExecuterError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.config, raw.command))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_global_config(cfg)?;
    validate_commands(cfg)?;
    Ok(())
}

fn validate_global_config(cfg: &RawConfigFile) -> Result<()> {
    let code = cfg.config.exit_status_when_compile_error;
    if !(1..=255).contains(&code) {
        return Err(ExecuterError::ConfigError(format!(
            "[config].exit_status_when_compile_error must be within 1..=255 (got {code})"
        )));
    }
    Ok(())
}

fn validate_commands(cfg: &RawConfigFile) -> Result<()> {
    for (key, command) in cfg.command.iter() {
        if command.trim().is_empty() {
            return Err(ExecuterError::ConfigError(format!(
                "[command].{key} must not be empty"
            )));
        }
    }
    Ok(())
}
