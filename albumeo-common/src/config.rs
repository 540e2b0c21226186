//! Configuration loading and config-file resolution
//!
//! Albumeo reads a single TOML file. Every key has a built-in default, so a
//! missing file (or a file containing only some sections) is valid.
//!
//! # Config file priority
//!
//! 1. Command-line argument (highest priority)
//! 2. `ALBUMEO_CONFIG` environment variable
//! 3. Platform config directory: `<config_dir>/albumeo/config.toml`
//! 4. Built-in defaults (no file)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "ALBUMEO_CONFIG";

/// Root TOML configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TomlConfig {
    /// Metadata backend (MusicBrainz + Cover Art Archive)
    pub musicbrainz: MusicBrainzConfig,
    /// Query resolution tuning
    pub search: SearchConfig,
    /// HTTP service bind address
    pub server: ServerConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// MusicBrainz web service settings
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct MusicBrainzConfig {
    /// WS/2 base URL
    pub base_url: String,
    /// Cover Art Archive release base URL
    pub cover_art_base_url: String,
    /// Image shown when a release has no artwork reference
    pub placeholder_image_url: String,
    /// User-Agent override (defaults to [`get_user_agent`])
    pub user_agent: Option<String>,
    /// Total request timeout in seconds
    pub timeout_secs: u64,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
    /// Outbound request budget (MusicBrainz policy is 1 req/s)
    pub requests_per_second: u32,
}

impl Default for MusicBrainzConfig {
    fn default() -> Self {
        Self {
            base_url: "https://musicbrainz.org/ws/2".to_string(),
            cover_art_base_url: "https://coverartarchive.org/release".to_string(),
            placeholder_image_url:
                "https://images.unsplash.com/photo-1493225457124-a3eb161ffa5f?w=500&h=500&fit=crop"
                    .to_string(),
            user_agent: None,
            timeout_secs: 15,
            connect_timeout_secs: 5,
            requests_per_second: 1,
        }
    }
}

impl MusicBrainzConfig {
    /// User-Agent to send, honouring the override
    pub fn effective_user_agent(&self) -> String {
        self.user_agent.clone().unwrap_or_else(get_user_agent)
    }
}

/// Search orchestration settings
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SearchConfig {
    /// Result count used when the caller gives none
    pub default_limit: usize,
    /// Upper bound on caller-supplied limits
    pub max_limit: usize,
    /// Minimum strategy confidence that may stop iteration early
    pub early_stop_confidence: f64,
    /// Minimum candidate count that may stop iteration early
    pub early_stop_min_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: 25,
            max_limit: 100,
            early_stop_confidence: 0.8,
            early_stop_min_results: 5,
        }
    }
}

/// HTTP bind address
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5730,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error); `RUST_LOG` wins when set
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl TomlConfig {
    /// Reject values the pipeline cannot honour
    pub fn validate(&self) -> Result<()> {
        if self.musicbrainz.requests_per_second == 0 {
            return Err(Error::Config(
                "musicbrainz.requests_per_second must be at least 1".to_string(),
            ));
        }
        if self.search.default_limit > self.search.max_limit {
            return Err(Error::Config(format!(
                "search.default_limit ({}) exceeds search.max_limit ({})",
                self.search.default_limit, self.search.max_limit
            )));
        }
        if self.search.early_stop_min_results == 0 {
            return Err(Error::Config(
                "search.early_stop_min_results must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.search.early_stop_confidence) {
            return Err(Error::Config(format!(
                "search.early_stop_confidence must be within [0, 1], got {}",
                self.search.early_stop_confidence
            )));
        }
        Ok(())
    }
}

/// Standard User-Agent for outbound requests (MusicBrainz requires one)
pub fn get_user_agent() -> String {
    format!(
        "Albumeo/{} (https://albumeo.lovable.app)",
        env!("CARGO_PKG_VERSION")
    )
}

/// Resolve which config file to read, if any
///
/// Returns `None` when no candidate exists; callers then use defaults.
pub fn resolve_config_path(cli_arg: Option<&Path>) -> Option<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    // Priority 3: Platform config directory
    default_config_path().filter(|path| path.exists())
}

/// `<config_dir>/albumeo/config.toml` for the current platform
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("albumeo").join("config.toml"))
}

/// Parse and validate a TOML document
pub fn parse_config(content: &str) -> Result<TomlConfig> {
    let config: TomlConfig =
        toml::from_str(content).map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))?;
    config.validate()?;
    Ok(config)
}

/// Load configuration from a file
///
/// An explicitly named file that does not exist is an error; use
/// [`load_config`] for the full resolution chain.
pub fn load_config_file(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    let config = parse_config(&content)?;
    info!("Configuration loaded from {}", path.display());
    Ok(config)
}

/// Resolve and load configuration, falling back to built-in defaults
pub fn load_config(cli_arg: Option<&Path>) -> Result<TomlConfig> {
    match resolve_config_path(cli_arg) {
        Some(path) => load_config_file(&path),
        None => {
            debug!("No config file found, using built-in defaults");
            Ok(TomlConfig::default())
        }
    }
}
