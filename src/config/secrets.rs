//! Secrets loaded from the environment (or a `.env` file via `dotenvy`).
//!
//! These never go in config.toml.

use crate::errors::{Error, Result};
use std::env;
use tracing::warn;

/// Credentials the bot needs at startup.
#[derive(Clone)]
pub struct Secrets {
    /// Discord bot token (`DISCORD_BOT_TOKEN`)
    pub discord_token: String,
    /// Fortnite Tracker key (`FORTNITE_API_KEY`)
    pub fortnite_api_key: String,
    /// osu! key (`OSU_API_KEY`); osu! lookups are disabled without it
    pub osu_api_key: Option<String>,
    /// Riot key (`RIOT_API_KEY`); League lookups are disabled without it
    pub riot_api_key: Option<String>,
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secrets")
            .field("discord_token", &"<redacted>")
            .field("fortnite_api_key", &"<redacted>")
            .field("osu_api_key", &self.osu_api_key.as_ref().map(|_| "<redacted>"))
            .field("riot_api_key", &self.riot_api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Reads all secrets from the process environment.
///
/// # Errors
/// Returns [`Error::EnvVar`] when a required variable is missing.
pub fn load_secrets() -> Result<Secrets> {
    Ok(Secrets {
        discord_token: required("DISCORD_BOT_TOKEN")?,
        fortnite_api_key: required("FORTNITE_API_KEY")?,
        osu_api_key: optional("OSU_API_KEY"),
        riot_api_key: optional("RIOT_API_KEY"),
    })
}

fn required(key: &str) -> Result<String> {
    env::var(key)
        .inspect_err(|e| tracing::error!("{key} not found: {e}"))
        .map_err(Error::EnvVar)
}

fn optional(key: &str) -> Option<String> {
    let value = env::var(key).ok().filter(|v| !v.trim().is_empty());
    if value.is_none() {
        warn!("{key} is not set");
    }
    value
}
