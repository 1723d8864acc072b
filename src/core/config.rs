//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.shelf/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::Credentials;
use crate::view::SectionDef;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ShelfConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub statuses: Vec<StatusEntry>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    pub base_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

/// One status section of the page, in display order.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StatusEntry {
    pub name: String,
    pub label: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// The statuses the stock page template ships with.
const DEFAULT_STATUSES: [(&str, &str); 3] = [
    ("now", "Reading Now"),
    ("next", "Up Next"),
    ("done", "Finished"),
];

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub credentials: Option<Credentials>,
    pub request_timeout: Duration,
    pub sections: Vec<SectionDef>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.shelf/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".shelf").join("config.toml"))
}

/// Load config from `~/.shelf/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ShelfConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<ShelfConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(ShelfConfig::default());
        }
    };
    load_config_from(&path)
}

/// Same as [`load_config`] but for an explicit path (`--config`).
pub fn load_config_from(path: &Path) -> Result<ShelfConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(ShelfConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ShelfConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    // Password deliberately left out of the log
    debug!(
        "Config: base_url={:?} username={:?} timeout={:?} statuses={:?}",
        config.server.base_url,
        config.server.username,
        config.server.request_timeout_secs,
        config.statuses
    );
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Shelf Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [server]
# base_url = "http://localhost:8080"   # Or set SHELF_BASE_URL
# username = "guest"                   # Or set SHELF_USERNAME
# password = "..."                     # Or set SHELF_PASSWORD
# request_timeout_secs = 15

# Status sections, in display order. Names must match the server's statuses.
# [[statuses]]
# name = "now"
# label = "Reading Now"

# [[statuses]]
# name = "next"
# label = "Up Next"

# [[statuses]]
# name = "done"
# label = "Finished"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Values given on the command line. `None` = not specified.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub username: Option<String>,
}

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &ShelfConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| std::env::var("SHELF_BASE_URL").ok())
        .or_else(|| config.server.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Username: CLI → env → config
    let username = cli
        .username
        .clone()
        .or_else(|| std::env::var("SHELF_USERNAME").ok())
        .or_else(|| config.server.username.clone());

    // Password: env → config (never on the command line)
    let password = std::env::var("SHELF_PASSWORD")
        .ok()
        .or_else(|| config.server.password.clone());

    let credentials = username.map(|username| Credentials { username, password });

    let request_timeout = Duration::from_secs(
        config
            .server
            .request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
    );

    ResolvedConfig {
        base_url,
        credentials,
        request_timeout,
        sections: resolve_sections(&config.statuses),
    }
}

/// Configured sections, or the stock now/next/done template if none are given.
fn resolve_sections(entries: &[StatusEntry]) -> Vec<SectionDef> {
    if entries.is_empty() {
        return DEFAULT_STATUSES
            .iter()
            .map(|(name, label)| SectionDef::new(*name, *label))
            .collect();
    }

    let mut sections: Vec<SectionDef> = Vec::with_capacity(entries.len());
    for entry in entries {
        if entry.name.is_empty() {
            warn!("Ignoring status entry with an empty name");
            continue;
        }
        if sections.iter().any(|s| s.status.as_str() == entry.name) {
            warn!("Ignoring duplicate status entry '{}'", entry.name);
            continue;
        }
        let label = entry.label.clone().unwrap_or_else(|| entry.name.clone());
        sections.push(SectionDef::new(entry.name.clone(), label));
    }
    sections
}
