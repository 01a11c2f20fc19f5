//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Fortnite stats commands
pub mod fortnite;

/// General utility commands
pub mod general;

/// League of Legends commands
pub mod league;

/// osu! commands
pub mod osu;

use crate::{bot::BotData, errors::Error};

// Export commands
pub use fortnite::*;
pub use general::*;
pub use league::*;
pub use osu::*;

/// Every command registered with the framework.
#[must_use]
pub fn all() -> Vec<poise::Command<BotData, Error>> {
    vec![
        help(),
        ping(),
        buddy(),
        roll(),
        gimme(),
        reverse(),
        usage(),
        fortnite(),
        fnseason(),
        fncompare(),
        fnfavorite(),
        fnhelp(),
        lol(),
        lolregion(),
        lolranks(),
        lolranksregion(),
        lollive(),
        lolliveregion(),
        lolhelp(),
        osuplayer(),
    ]
}
