//! Configuration file loading with precedence handling.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, unreadable file).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/classi/config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Base URL of the classification service API.
    #[serde(default)]
    pub server_url: Option<String>,

    /// Support phone line shown in the widget header.
    #[serde(default)]
    pub support_phone: Option<String>,

    /// Start the widget minimized instead of closed.
    #[serde(default)]
    pub start_minimized: Option<bool>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Base URL of the classification service API.
    pub server_url: String,
    /// Support phone line shown in the widget header.
    pub support_phone: String,
    /// Start the widget minimized instead of closed.
    pub start_minimized: bool,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8001".to_string(),
            support_phone: "+1 (242) 325-6550".to_string(),
            start_minimized: false,
            log_file_path: default_log_path(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/classi/classi.log` on Unix-like systems, or the
/// platform's state directory elsewhere. Falls back to the current directory
/// if no state directory can be determined.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("classi").join("classi.log")
    } else {
        PathBuf::from("classi.log")
    }
}

/// Resolve default config file path.
///
/// Returns `~/.config/classi/config.toml` on Unix, the platform config dir
/// elsewhere. Returns `None` if no config directory can be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("classi").join("config.toml"))
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if the file doesn't exist (not an error - defaults are
/// used). Returns `Err` if the file exists but cannot be read or parsed.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `CLASSI_CONFIG` environment variable
/// 3. Default path `~/.config/classi/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    // 1. Explicit path (CLI --config)
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    // 2. CLASSI_CONFIG environment variable
    if let Ok(env_path) = std::env::var("CLASSI_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    // 3. Default path
    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge an optional config file over hardcoded defaults.
pub fn merge_config(file: Option<ConfigFile>) -> ResolvedConfig {
    let mut resolved = ResolvedConfig::default();

    if let Some(file) = file {
        if let Some(server_url) = file.server_url {
            resolved.server_url = server_url;
        }
        if let Some(support_phone) = file.support_phone {
            resolved.support_phone = support_phone;
        }
        if let Some(start_minimized) = file.start_minimized {
            resolved.start_minimized = start_minimized;
        }
        if let Some(log_file_path) = file.log_file_path {
            resolved.log_file_path = log_file_path;
        }
    }

    resolved
}

/// Apply environment variable overrides.
///
/// Recognized variables:
/// - `CLASSI_SERVER_URL` - overrides `server_url`
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(url) = std::env::var("CLASSI_SERVER_URL") {
        if !url.is_empty() {
            config.server_url = url;
        }
    }
    config
}

/// Apply CLI argument overrides (highest precedence).
///
/// Boolean flags only override when explicitly set (`Some(true)`); an unset
/// flag must not clobber a config-file value.
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    server_url: Option<String>,
    start_minimized: Option<bool>,
) -> ResolvedConfig {
    if let Some(url) = server_url {
        config.server_url = url;
    }
    if let Some(minimized) = start_minimized {
        config.start_minimized = minimized;
    }
    config
}

// ===== Tests =====
