//! Player identities as typed by users: `name` or `name:platform`.

use crate::errors::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Platform a Fortnite account plays on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Platform {
    /// PC (Epic account)
    #[default]
    Pc,
    /// `PlayStation` Network
    Psn,
    /// Xbox Live
    Xbl,
}

impl Platform {
    /// Every platform, in the order favorite-platform lookups query them.
    pub const ALL: [Self; 3] = [Self::Pc, Self::Psn, Self::Xbl];

    /// Token used in URLs and accepted after the colon in user input.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Pc => "pc",
            Self::Psn => "psn",
            Self::Xbl => "xbl",
        }
    }

    /// Whether the upstream API uses the console path template for this platform.
    #[must_use]
    pub const fn is_console(self) -> bool {
        !matches!(self, Self::Pc)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token().to_uppercase())
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let token = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|platform| platform.token() == token)
            .ok_or_else(|| {
                Error::invalid_argument(format!(
                    "Unknown platform '{}'. Use pc, psn or xbl",
                    s.trim()
                ))
            })
    }
}

/// Who to look up.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerIdentity {
    /// In-game display name (may contain spaces)
    pub name: String,
    /// Platform the account plays on
    pub platform: Platform,
}

impl PlayerIdentity {
    /// Creates an identity from an already separated name and platform.
    #[must_use]
    pub fn new(name: impl Into<String>, platform: Platform) -> Self {
        Self {
            name: name.into(),
            platform,
        }
    }

    /// Parses user input, splitting off a `:platform` suffix when present.
    ///
    /// `"StankBank Frank:xbl"` becomes `StankBank Frank` on Xbox Live, while
    /// input without a colon defaults to PC.
    pub fn parse(input: &str) -> Result<Self> {
        let (name, platform) = match input.rsplit_once(':') {
            Some((name, token)) => (name, token.parse()?),
            None => (input, Platform::default()),
        };

        let name = name.trim();
        if name.is_empty() {
            return Err(Error::invalid_argument("Player name cannot be empty"));
        }

        Ok(Self::new(name, platform))
    }
}

impl fmt::Display for PlayerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.platform)
    }
}
