//! Core logic - framework-agnostic command handling.
//!
//! Functions here take plain arguments and return the text to send, so the
//! bot layer only has to move strings between Discord and this module.

/// Fortnite stats commands
pub mod fortnite;
/// Utility commands with no external calls
pub mod general;
/// League of Legends summoner, rank and live-game lookups
pub mod league;
/// osu! profile lookup
pub mod osu;
/// Per-user command counters
pub mod usage;

use crate::errors::Error;
use tracing::{error, info};

/// The chat message a command produced, and whether it did what was asked.
///
/// Only [`Reply::Done`] counts as a use of the command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// The command succeeded
    Done(String),
    /// Usage line, unknown player or failed lookup
    Rejected(String),
}

impl Reply {
    /// Text to send.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Done(text) | Self::Rejected(text) => text,
        }
    }

    /// Whether the command succeeded.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }

    /// Consumes the reply, keeping only its text.
    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            Self::Done(text) | Self::Rejected(text) => text,
        }
    }
}

/// Logs a failed command and turns the error into its chat line.
///
/// Not-found players and bad input are expected and only logged at info.
pub(crate) fn rejected(command: &str, e: &Error) -> Reply {
    match e {
        Error::PlayerNotFound { .. } | Error::InvalidArgument { .. } => {
            info!(command, "Command rejected: {}", e);
        }
        _ => error!(command, "Command failed: {:?}", e),
    }
    Reply::Rejected(e.user_message())
}
