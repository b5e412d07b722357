// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

use super::EXIT_STATUS_WHEN_COMPILE_ERROR;

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// [config]
/// debug = false
/// exit_status_when_compile_error = 100
///
/// [command]
/// py = "pypy3"
/// c = "clang"
/// ```
///
/// All sections are optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub config: ConfigSection,

    /// Toolchain command overrides keyed by file extension (or `cargo`).
    #[serde(default)]
    pub command: BTreeMap<String, String>,
}

/// `[config]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigSection {
    /// Turn on the verbose trace (same as `EXECUTER_DEBUG=1`).
    #[serde(default)]
    pub debug: bool,

    /// Exit code when a compile step fails without a child exit code.
    #[serde(default = "default_exit_status_when_compile_error")]
    pub exit_status_when_compile_error: i32,
}

fn default_exit_status_when_compile_error() -> i32 {
    EXIT_STATUS_WHEN_COMPILE_ERROR
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            debug: false,
            exit_status_when_compile_error: default_exit_status_when_compile_error(),
        }
    }
}

/// Validated configuration. Build it with `ConfigFile::try_from(raw)`.
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    pub config: ConfigSection,
    pub command: BTreeMap<String, String>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(config: ConfigSection, command: BTreeMap<String, String>) -> Self {
        Self { config, command }
    }

    /// The command configured for `key`, or `default`.
    pub fn command_for(&self, key: &str, default: &str) -> String {
        self.command
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }
}
