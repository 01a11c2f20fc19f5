//! League of Legends regions and summoner identities: `Name#TAG` on a region.

use crate::errors::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Server region a League account plays on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Region {
    /// North America
    #[default]
    Na,
    /// Brazil
    Br,
    /// Europe Nordic & East
    Eune,
    /// Europe West
    Euw,
    /// Japan
    Jp,
    /// Korea
    Kr,
    /// Latin America North
    Lan,
    /// Latin America South
    Las,
    /// Oceania
    Oce,
    /// Russia
    Ru,
    /// Turkey
    Tr,
}

impl Region {
    /// Every region, in the order the region options list them.
    pub const ALL: [Self; 11] = [
        Self::Na,
        Self::Eune,
        Self::Euw,
        Self::Br,
        Self::Jp,
        Self::Kr,
        Self::Lan,
        Self::Las,
        Self::Oce,
        Self::Ru,
        Self::Tr,
    ];

    /// Abbreviation accepted in commands, e.g. `EUW`.
    #[must_use]
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::Na => "NA",
            Self::Br => "BR",
            Self::Eune => "EUNE",
            Self::Euw => "EUW",
            Self::Jp => "JP",
            Self::Kr => "KR",
            Self::Lan => "LAN",
            Self::Las => "LAS",
            Self::Oce => "OCE",
            Self::Ru => "RU",
            Self::Tr => "TR",
        }
    }

    /// Readable server name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Na => "North America",
            Self::Br => "Brazil",
            Self::Eune => "Europe Nordic & East",
            Self::Euw => "Europe West",
            Self::Jp => "Japan",
            Self::Kr => "Korea",
            Self::Lan => "Latin America North",
            Self::Las => "Latin America South",
            Self::Oce => "Oceania",
            Self::Ru => "Russia",
            Self::Tr => "Turkey",
        }
    }

    /// Host prefix of the per-server endpoints (summoner, league, spectator).
    #[must_use]
    pub const fn platform_host(self) -> &'static str {
        match self {
            Self::Na => "na1",
            Self::Br => "br1",
            Self::Eune => "eun1",
            Self::Euw => "euw1",
            Self::Jp => "jp1",
            Self::Kr => "kr",
            Self::Lan => "la1",
            Self::Las => "la2",
            Self::Oce => "oc1",
            Self::Ru => "ru",
            Self::Tr => "tr1",
        }
    }

    /// Host prefix of the regional account endpoint.
    #[must_use]
    pub const fn routing_host(self) -> &'static str {
        match self {
            Self::Na | Self::Br | Self::Lan | Self::Las | Self::Oce => "americas",
            Self::Eune | Self::Euw | Self::Ru | Self::Tr => "europe",
            Self::Jp | Self::Kr => "asia",
        }
    }

    /// Tag line assumed when a name is typed without `#TAG`.
    #[must_use]
    pub const fn default_tag(self) -> &'static str {
        match self {
            Self::Na => "NA1",
            Self::Br => "BR1",
            Self::Eune => "EUNE",
            Self::Euw => "EUW",
            Self::Jp => "JP1",
            Self::Kr => "KR1",
            Self::Lan => "LAN",
            Self::Las => "LAS",
            Self::Oce => "OCE",
            Self::Ru => "RU",
            Self::Tr => "TR1",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

impl FromStr for Region {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let abbreviation = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|region| region.abbreviation() == abbreviation)
            .ok_or_else(|| Error::invalid_argument(format!("Unknown region '{}'", s.trim())))
    }
}

/// `__**Region Options**__` followed by one `**ABBR** - Name` line per region.
#[must_use]
pub fn region_options() -> String {
    let mut options = String::from("__**Region Options**__\n");
    for region in Region::ALL {
        options.push_str(&format!("**{}** - {}\n", region.abbreviation(), region.name()));
    }
    options
}

/// A Riot ID, `GameName#TagLine`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RiotId {
    /// Display name, may contain spaces
    pub game_name: String,
    /// Tag after the `#`
    pub tag_line: String,
}

impl fmt::Display for RiotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.game_name, self.tag_line)
    }
}

/// Which League account to look up, and on which server.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SummonerIdentity {
    /// Account name and tag
    pub riot_id: RiotId,
    /// Server the summoner plays on
    pub region: Region,
}

impl SummonerIdentity {
    /// Parses `Name#TAG`; without a tag the region's default one is used.
    pub fn parse(input: &str, region: Region) -> Result<Self> {
        let (name, tag) = match input.rsplit_once('#') {
            Some((name, tag)) if !tag.trim().is_empty() => (name, tag.trim()),
            Some((name, _)) => (name, region.default_tag()),
            None => (input, region.default_tag()),
        };

        let name = name.trim();
        if name.is_empty() {
            return Err(Error::invalid_argument("Summoner name cannot be empty"));
        }

        Ok(Self {
            riot_id: RiotId {
                game_name: name.to_string(),
                tag_line: tag.to_string(),
            },
            region,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_region_parse_is_case_insensitive() {
        assert_eq!("euw".parse::<Region>().unwrap(), Region::Euw);
        assert_eq!(" LAS ".parse::<Region>().unwrap(), Region::Las);
    }

    #[test]
    fn test_unknown_region_is_invalid_argument() {
        let err = "moon".parse::<Region>().unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { message } if message.contains("'moon'")));
    }

    #[test]
    fn test_region_options_lists_every_region() {
        let options = region_options();
        assert!(options.starts_with("__**Region Options**__\n**NA** - North America\n"));
        assert!(options.contains("**EUNE** - Europe Nordic & East\n"));
        assert_eq!(options.lines().count(), Region::ALL.len() + 1);
    }

    #[test]
    fn test_hosts() {
        assert_eq!(Region::Euw.platform_host(), "euw1");
        assert_eq!(Region::Euw.routing_host(), "europe");
        assert_eq!(Region::Kr.routing_host(), "asia");
        assert_eq!(Region::Oce.routing_host(), "americas");
    }

    #[test]
    fn test_summoner_parse_keeps_spaces_and_tag() {
        let identity = SummonerIdentity::parse("Hide on bush#KR1", Region::Kr).unwrap();
        assert_eq!(identity.riot_id.game_name, "Hide on bush");
        assert_eq!(identity.riot_id.tag_line, "KR1");
        assert_eq!(identity.riot_id.to_string(), "Hide on bush#KR1");
    }

    #[test]
    fn test_summoner_parse_defaults_tag_to_region() {
        let identity = SummonerIdentity::parse("Doublelift", Region::Na).unwrap();
        assert_eq!(identity.riot_id.tag_line, "NA1");
        let identity = SummonerIdentity::parse("Caps#", Region::Euw).unwrap();
        assert_eq!(identity.riot_id.tag_line, "EUW");
    }

    #[test]
    fn test_summoner_parse_rejects_empty_name() {
        let result = SummonerIdentity::parse("  #NA1", Region::Na);
        assert!(matches!(result, Err(Error::InvalidArgument { .. })));
    }
}
