//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.callscope/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::clock::Clock;
use crate::core::geometry::CANVAS_WIDTH;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CallscopeConfig {
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DisplayConfig {
    pub canvas_width: Option<f64>,
    pub clock: Option<Clock>,
    pub data_file: Option<String>,
}

/// Values given on the command line. `None` means "not specified".
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub data_file: Option<PathBuf>,
    pub canvas_width: Option<f64>,
    pub clock: Option<Clock>,
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub canvas_width: f64,
    pub clock: Clock,
    /// `None` shows the bundled sample meeting.
    pub data_file: Option<PathBuf>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            clock: Clock::default(),
            data_file: None,
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.callscope/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".callscope"))
}

/// Returns the path to `~/.callscope/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.callscope/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `CallscopeConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<CallscopeConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(CallscopeConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(CallscopeConfig::default());
    }

    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<CallscopeConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: CallscopeConfig = toml::from_str(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

const DEFAULT_CONFIG: &str = r#"# Callscope Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [display]
# canvas_width = 1200                # logical width of the timeline axis
# clock = "source"                   # "source", "local" or "utc" (or CALLSCOPE_CLOCK)
# data_file = "meeting.json"         # relative to ~/.callscope/ (or CALLSCOPE_DATA)
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &CallscopeConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// [`resolve`] with an injectable environment lookup.
pub fn resolve_with_env(
    config: &CallscopeConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Data file: CLI → env → config (relative to ~/.callscope/) → sample
    let data_file = cli
        .data_file
        .clone()
        .or_else(|| env("CALLSCOPE_DATA").map(PathBuf::from))
        .or_else(|| config.display.data_file.as_deref().map(config_relative));

    // Clock: CLI → env → config → default
    let clock = cli
        .clock
        .or_else(|| env("CALLSCOPE_CLOCK").and_then(|v| parse_clock(&v)))
        .or(config.display.clock)
        .unwrap_or_default();

    // Canvas width: CLI → config → default, rejecting unusable values
    let canvas_width = match cli.canvas_width.or(config.display.canvas_width) {
        Some(width) if width.is_finite() && width > 0.0 => width,
        Some(width) => {
            warn!("Ignoring canvas width {}, using {}", width, CANVAS_WIDTH);
            CANVAS_WIDTH
        }
        None => CANVAS_WIDTH,
    };

    ResolvedConfig {
        canvas_width,
        clock,
        data_file,
    }
}

fn parse_clock(value: &str) -> Option<Clock> {
    match value.trim().to_ascii_lowercase().as_str() {
        "source" => Some(Clock::Source),
        "local" => Some(Clock::Local),
        "utc" => Some(Clock::Utc),
        other => {
            warn!("Unknown clock {:?} in CALLSCOPE_CLOCK, ignoring", other);
            None
        }
    }
}

fn config_relative(file: &str) -> PathBuf {
    let path = PathBuf::from(file);
    if path.is_absolute() {
        return path;
    }
    match config_dir() {
        Some(dir) => dir.join(path),
        None => path,
    }
}
