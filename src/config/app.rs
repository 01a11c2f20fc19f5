//! Application configuration loading from config.toml
//!
//! Only non-secret settings live here. Every section and field has a
//! default, so an empty (or missing) file yields a working configuration.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::{path::Path, time::Duration};
use tracing::{info, warn};

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// Discord-side settings
    pub bot: BotConfig,
    /// Fortnite Tracker API settings
    pub fortnite: FortniteConfig,
    /// osu! API settings
    pub osu: OsuConfig,
    /// Riot API settings
    pub league: LeagueConfig,
}

/// `[bot]` section
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BotConfig {
    /// Prefix for text commands, e.g. `!` in `!fn Ninja`
    pub prefix: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            prefix: "!".to_string(),
        }
    }
}

/// `[fortnite]` section
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FortniteConfig {
    /// Profile endpoint; the platform and name are appended as path segments
    pub base_url: String,
    /// Minimum spacing between two requests, in milliseconds
    pub min_interval_ms: u64,
    /// Per-request timeout, in seconds
    pub timeout_secs: u64,
}

impl FortniteConfig {
    /// Minimum request spacing.
    #[must_use]
    pub const fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }

    /// Request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for FortniteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.fortnitetracker.com/v1/profile".to_string(),
            min_interval_ms: 2000,
            timeout_secs: 10,
        }
    }
}

/// `[osu]` section
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OsuConfig {
    /// API root; `get_user` is appended
    pub base_url: String,
    /// Minimum spacing between two requests, in milliseconds
    pub min_interval_ms: u64,
    /// Per-request timeout, in seconds
    pub timeout_secs: u64,
}

impl OsuConfig {
    /// Minimum request spacing.
    #[must_use]
    pub const fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }

    /// Request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for OsuConfig {
    fn default() -> Self {
        Self {
            base_url: "https://osu.ppy.sh/api".to_string(),
            min_interval_ms: 1000,
            timeout_secs: 10,
        }
    }
}

/// `[league]` section
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LeagueConfig {
    /// Riot API root with a `{host}` placeholder for the platform or routing host
    pub base_url: String,
    /// Static data root for champion names
    pub data_dragon_url: String,
    /// Minimum spacing between two Riot requests, in milliseconds
    pub min_interval_ms: u64,
    /// Per-request timeout, in seconds
    pub timeout_secs: u64,
}

impl LeagueConfig {
    /// Minimum request spacing.
    #[must_use]
    pub const fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }

    /// Request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for LeagueConfig {
    fn default() -> Self {
        Self {
            base_url: "https://{host}.api.riotgames.com".to_string(),
            data_dragon_url: "https://ddragon.leagueoflegends.com".to_string(),
            min_interval_ms: 1200,
            timeout_secs: 10,
        }
    }
}

/// Parses configuration from TOML text.
///
/// # Errors
/// Returns [`Error::Config`] if the TOML is invalid or the prefix is empty.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let config: AppConfig = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;

    if config.bot.prefix.trim().is_empty() {
        return Err(Error::Config {
            message: "bot.prefix must not be empty".to_string(),
        });
    }
    Ok(config)
}

/// Loads configuration from a TOML file.
///
/// A missing file is not an error: defaults are used and a warning logged.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    if !path.exists() {
        warn!(path = %path.display(), "Config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;
    let config = parse_config(&contents)?;
    info!(path = %path.display(), prefix = %config.bot.prefix, "Loaded configuration");
    Ok(config)
}

/// Loads configuration from the default location (./config.toml)
pub fn load_default_config() -> Result<AppConfig> {
    load_config(DEFAULT_CONFIG_PATH)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.bot.prefix, "!");
        assert_eq!(config.fortnite.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let toml_str = r#"
            [bot]
            prefix = "?"

            [fortnite]
            min_interval_ms = 500
        "#;

        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.bot.prefix, "?");
        assert_eq!(config.fortnite.min_interval(), Duration::from_millis(500));
        assert_eq!(
            config.fortnite.base_url,
            "https://api.fortnitetracker.com/v1/profile"
        );
        assert_eq!(config.osu, OsuConfig::default());
    }

    #[test]
    fn test_league_section() {
        let toml_str = r#"
            [league]
            base_url = "http://localhost:8080/{host}"
            min_interval_ms = 50
        "#;

        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.league.base_url, "http://localhost:8080/{host}");
        assert_eq!(config.league.min_interval(), Duration::from_millis(50));
        assert_eq!(
            config.league.data_dragon_url,
            "https://ddragon.leagueoflegends.com"
        );
        assert_eq!(config.league.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_empty_prefix_is_rejected() {
        let err = parse_config("[bot]\nprefix = \"  \"").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_invalid_toml_is_rejected() {
        let err = parse_config("[bot\nprefix = 1").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = load_config("does/not/exist/config.toml").unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
