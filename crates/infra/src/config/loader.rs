//! Configuration loader
//!
//! Loads the sync configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. URL and token both set in the environment: environment only
//! 2. Otherwise the first probed config file (JSON or TOML)
//! 3. No file either: defaults overlaid with whatever the environment sets
//!
//! ## Environment Variables
//! - `STOCKSYNC_MAGENTO_URL`: Magento base URL (required)
//! - `STOCKSYNC_MAGENTO_TOKEN`: integration access token (required)
//! - `STOCKSYNC_SYNC_ENABLED`: whether sync is enabled (default true)
//! - `STOCKSYNC_LOG_ONLY`: compute updates without writing (default false)
//! - `STOCKSYNC_TIMEOUT_SECS`: per-request timeout in seconds
//! - `STOCKSYNC_MAX_ATTEMPTS`: total attempts per catalog call
//! - `STOCKSYNC_CONFIG`: explicit config file path, checked before probing
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `$STOCKSYNC_CONFIG`
//! 2. `./stocksync.{json,toml}` then `./config.{json,toml}`
//! 3. The same names in the parent and grandparent directories
//! 4. The same names relative to the executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use stocksync_domain::{Result, SyncConfig, SyncError};

pub const ENV_URL: &str = "STOCKSYNC_MAGENTO_URL";
pub const ENV_TOKEN: &str = "STOCKSYNC_MAGENTO_TOKEN";
pub const ENV_ENABLED: &str = "STOCKSYNC_SYNC_ENABLED";
pub const ENV_LOG_ONLY: &str = "STOCKSYNC_LOG_ONLY";
pub const ENV_TIMEOUT_SECS: &str = "STOCKSYNC_TIMEOUT_SECS";
pub const ENV_MAX_ATTEMPTS: &str = "STOCKSYNC_MAX_ATTEMPTS";
pub const ENV_CONFIG_PATH: &str = "STOCKSYNC_CONFIG";

const FILE_NAMES: [&str; 4] = ["stocksync.json", "stocksync.toml", "config.json", "config.toml"];

/// Load configuration with automatic fallback strategy
///
/// When URL and token are both set in the environment, the environment is the
/// whole configuration. Otherwise the first probed config file is used. With
/// neither, defaults plus whatever the environment does set are returned, and
/// the missing credential is reported later as "not configured".
///
/// # Errors
/// Returns `SyncError::Configuration` if:
/// - An environment value does not parse
/// - The probed file cannot be read or its format is invalid
pub fn load() -> Result<SyncConfig> {
    if env_value(ENV_URL).is_some() && env_value(ENV_TOKEN).is_some() {
        tracing::debug!("Configuration loaded from environment variables");
        return load_from_env();
    }

    match probe_config_paths() {
        Some(path) => load_from_file(Some(path)),
        None => {
            tracing::debug!("No config file found, using defaults and environment");
            apply_env(SyncConfig::default())
        }
    }
}

/// Load configuration from environment variables
///
/// URL and token must be present; everything else falls back to defaults.
///
/// # Errors
/// Returns `SyncError::Configuration` if required variables are missing or
/// optional values do not parse.
pub fn load_from_env() -> Result<SyncConfig> {
    let mut config = apply_env(SyncConfig::default())?;
    config.base_url = env_var(ENV_URL)?;
    config.access_token = env_var(ENV_TOKEN)?;
    Ok(config)
}

/// Overlay every variable that is set onto `config`.
fn apply_env(mut config: SyncConfig) -> Result<SyncConfig> {
    if let Some(url) = env_value(ENV_URL) {
        config.base_url = url;
    }
    if let Some(token) = env_value(ENV_TOKEN) {
        config.access_token = token;
    }
    config.enabled = env_bool(ENV_ENABLED, config.enabled)?;
    config.log_only = env_bool(ENV_LOG_ONLY, config.log_only)?;
    config.timeout_secs = env_parse(ENV_TIMEOUT_SECS, config.timeout_secs)?;
    config.max_attempts = env_parse(ENV_MAX_ATTEMPTS, config.max_attempts)?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `SyncError::Configuration` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<SyncConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(SyncError::configuration(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            SyncError::configuration("No config file found in any of the standard locations")
        })?,
    };

    tracing::debug!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| SyncError::configuration(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
pub(crate) fn parse_config(contents: &str, path: &Path) -> Result<SyncConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| SyncError::configuration(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| SyncError::configuration(format!("Invalid JSON format: {e}"))),
        _ => Err(SyncError::configuration(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// Returns the first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(explicit) = std::env::var(ENV_CONFIG_PATH) {
        if !explicit.trim().is_empty() {
            candidates.push(PathBuf::from(explicit.trim()));
        }
    }

    let mut roots = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        roots.extend([cwd.clone(), cwd.join(".."), cwd.join("../..")]);
    }
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.extend([exe_dir.to_path_buf(), exe_dir.join(".."), exe_dir.join("../..")]);
        }
    }

    for root in roots {
        candidates.extend(FILE_NAMES.iter().map(|name| root.join(name)));
    }

    candidates.into_iter().find(|path| path.is_file())
}

/// Non-blank value of an environment variable.
fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Get required environment variable
///
/// Blank values count as missing.
fn env_var(key: &str) -> Result<String> {
    env_value(key).ok_or_else(|| {
        SyncError::configuration(format!("Missing required environment variable: {key}"))
    })
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive).
/// Unset or blank gives `default`; anything else is an error.
fn env_bool(key: &str, default: bool) -> Result<bool> {
    let Some(raw) = env_value(key) else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(SyncError::configuration(format!(
            "Invalid value for {key}: expected true/false, got '{other}'"
        ))),
    }
}

/// Parse an optional numeric environment variable.
fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| SyncError::configuration(format!("Invalid value for {key}: {e}"))),
        _ => Ok(default),
    }
}
