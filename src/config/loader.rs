//! Configuration file loading with precedence handling.

use crate::viewport::{ContentLoading, TilerOptions, DEFAULT_MAX_ZOOM_SCALE, DEFAULT_PAGE_PADDING};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "PAGESTRIP_CONFIG";

/// Environment variable overriding the page padding.
pub const PADDING_ENV_VAR: &str = "PAGESTRIP_PAGE_PADDING";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML or unknown keys.
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
/// Corresponds to `~/.config/pagestrip/config.toml`:
///
/// ```toml
/// page_padding = 10.0
/// max_zoom_scale = 2.0
/// content_loading = "deferred"
/// log_file_path = "/tmp/pagestrip.log"
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Gap on each side of every page, in points.
    #[serde(default)]
    pub page_padding: Option<f64>,

    /// Upper bound for page zoom.
    #[serde(default)]
    pub max_zoom_scale: Option<f64>,

    /// `"immediate"` or `"deferred"`.
    #[serde(default)]
    pub content_loading: Option<ContentLoading>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Page padding in points.
    pub page_padding: f64,
    /// Maximum zoom scale for pages.
    pub max_zoom_scale: f64,
    /// Content loading mode.
    pub content_loading: ContentLoading,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            page_padding: DEFAULT_PAGE_PADDING,
            max_zoom_scale: DEFAULT_MAX_ZOOM_SCALE,
            content_loading: ContentLoading::Immediate,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Tiler options derived from this config.
    pub fn tiler_options(&self) -> TilerOptions {
        TilerOptions {
            page_padding: self.page_padding,
            content_loading: self.content_loading,
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/pagestrip/pagestrip.log` on Linux, or the platform's
/// state directory elsewhere. Falls back to the current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("pagestrip").join("pagestrip.log")
    } else {
        PathBuf::from("pagestrip.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

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

/// Resolve default config file path (`~/.config/pagestrip/config.toml` on Linux).
///
/// Returns `None` if the config directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("pagestrip").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `PAGESTRIP_CONFIG` environment variable
/// 3. Default path `~/.config/pagestrip/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// Out-of-range numbers (negative or non-finite padding, non-positive zoom) are
/// replaced by their defaults with a warning.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        page_padding: validated_padding(config.page_padding).unwrap_or(defaults.page_padding),
        max_zoom_scale: validated_zoom(config.max_zoom_scale).unwrap_or(defaults.max_zoom_scale),
        content_loading: config.content_loading.unwrap_or(defaults.content_loading),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `PAGESTRIP_PAGE_PADDING`: Override page padding
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(raw) = std::env::var(PADDING_ENV_VAR) {
        match raw.trim().parse::<f64>() {
            Ok(value) => {
                if let Some(padding) = validated_padding(Some(value)) {
                    config.page_padding = padding;
                }
            }
            Err(_) => warn!(value = %raw, "Ignoring unparseable {}", PADDING_ENV_VAR),
        }
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence. Only flags the user set are applied.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    padding_override: Option<f64>,
    loading_override: Option<ContentLoading>,
) -> ResolvedConfig {
    if let Some(padding) = validated_padding(padding_override) {
        config.page_padding = padding;
    }

    if let Some(loading) = loading_override {
        config.content_loading = loading;
    }

    config
}

fn validated_padding(value: Option<f64>) -> Option<f64> {
    let value = value?;
    if value.is_finite() && value >= 0.0 {
        Some(value)
    } else {
        warn!(value, "Ignoring invalid page_padding");
        None
    }
}

fn validated_zoom(value: Option<f64>) -> Option<f64> {
    let value = value?;
    if value.is_finite() && value > 0.0 {
        Some(value)
    } else {
        warn!(value, "Ignoring invalid max_zoom_scale");
        None
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
