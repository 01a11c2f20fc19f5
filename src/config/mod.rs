/// Application settings from config.toml
pub mod app;

/// Database configuration and connection management
pub mod database;

/// API keys and the bot token from environment variables
pub mod secrets;

pub use app::{AppConfig, load_config, load_default_config};
pub use secrets::{Secrets, load_secrets};
