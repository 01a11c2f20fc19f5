//! Unified error type for the bot, the stats clients and the usage store.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Player '{name}' not found")]
    PlayerNotFound { name: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    #[error("Upstream rate limit exceeded")]
    RateLimitExceeded,

    #[error("Upstream answered with status {status}")]
    UnexpectedStatus { status: u16 },

    #[error("Serenity/Poise framework error: {0}")]
    #[allow(clippy::enum_variant_names)]
    FrameworkError(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::FrameworkError(Box::new(value))
    }
}

impl Error {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Text shown in the channel when a command fails with this error.
    ///
    /// Only not-found and bad-input errors are specific; everything upstream
    /// collapses into one generic failure line.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::PlayerNotFound { name } => format!("**Could not find player '{name}'.**"),
            Self::InvalidArgument { message } => format!("**{message}**"),
            _ => "**Something went wrong while fetching stats. Please try again later.**"
                .to_string(),
        }
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
