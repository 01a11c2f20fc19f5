//! League of Legends command handling: summoner overview, ranked standings
//! and live games.
//!
//! Commands without a region look on NA. The `...region` variants take the
//! region abbreviation as their first argument.

use crate::{
    core::{Reply, rejected},
    errors::{Error, Result},
    stats::{
        LeagueClient, Region, SummonerIdentity,
        league::{
            ActiveGame, ChampionMastery, ChampionNames, LeagueEntry, Participant, Summoner,
            champion_name, display_name,
        },
        region::region_options,
    },
};
use std::{collections::HashMap, sync::Arc};
use tracing::{info, instrument, warn};

/// How many champions the summoner overview lists.
pub const TOP_MASTERIES: usize = 3;

/// Ranked queue shown for every player of a live game.
pub const SOLO_QUEUE: &str = "RANKED_SOLO_5x5";

const RANKED_QUEUES: [(&str, &str); 3] = [
    (SOLO_QUEUE, "Solo/Duo 5v5"),
    ("RANKED_FLEX_SR", "Flex 5v5"),
    ("RANKED_FLEX_TT", "Flex 3v3"),
];

const GAME_QUEUES: [(i64, &str); 14] = [
    (0, "Custom"),
    (400, "Normal Draft 5v5"),
    (420, "Solo/Duo 5v5"),
    (430, "Normal Blind 5v5"),
    (440, "Flex 5v5"),
    (450, "Howling Abyss ARAM 5v5"),
    (490, "Quickplay 5v5"),
    (700, "Clash 5v5"),
    (830, "Co-op vs AI Intro 5v5"),
    (840, "Co-op vs AI Beginner 5v5"),
    (850, "Co-op vs AI Intermediate 5v5"),
    (900, "ARURF 5v5"),
    (1700, "Arena"),
    (1900, "URF 5v5"),
];

const SPELLS: [(i64, &str); 11] = [
    (1, "Cleanse"),
    (3, "Exhaust"),
    (4, "Flash"),
    (6, "Ghost"),
    (7, "Heal"),
    (11, "Smite"),
    (12, "Teleport"),
    (13, "Clarity"),
    (14, "Ignite"),
    (21, "Barrier"),
    (32, "Mark"),
];

// API name, display name, live-game abbreviation
const TIERS: [(&str, &str, &str); 10] = [
    ("IRON", "Iron", "I"),
    ("BRONZE", "Bronze", "B"),
    ("SILVER", "Silver", "S"),
    ("GOLD", "Gold", "G"),
    ("PLATINUM", "Platinum", "P"),
    ("EMERALD", "Emerald", "E"),
    ("DIAMOND", "Diamond", "D"),
    ("MASTER", "Master", "M"),
    ("GRANDMASTER", "Grandmaster", "GM"),
    ("CHALLENGER", "Challenger", "C"),
];

const DIVISIONS: [(&str, u8); 5] = [("I", 1), ("II", 2), ("III", 3), ("IV", 4), ("V", 5)];

/// League commands understood by [`handle_league_command`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeagueCommand {
    /// Lists the League commands
    Help,
    /// Level, region and top masteries on NA
    Summoner,
    /// Level, region and top masteries on a given region
    SummonerRegion,
    /// Ranked standings on NA
    Ranks,
    /// Ranked standings on a given region
    RanksRegion,
    /// Live game on NA
    Live,
    /// Live game on a given region
    LiveRegion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lookup {
    Summoner,
    Ranks,
    Live,
}

impl LeagueCommand {
    /// Every command, in help order.
    pub const ALL: [Self; 7] = [
        Self::Help,
        Self::Summoner,
        Self::SummonerRegion,
        Self::Ranks,
        Self::RanksRegion,
        Self::Live,
        Self::LiveRegion,
    ];

    /// Command name as typed after the prefix.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Help => "lolhelp",
            Self::Summoner => "lol",
            Self::SummonerRegion => "lolregion",
            Self::Ranks => "lolranks",
            Self::RanksRegion => "lolranksregion",
            Self::Live => "lollive",
            Self::LiveRegion => "lolliveregion",
        }
    }

    const fn takes_region(self) -> bool {
        matches!(
            self,
            Self::SummonerRegion | Self::RanksRegion | Self::LiveRegion
        )
    }

    const fn lookup(self) -> Option<Lookup> {
        match self {
            Self::Help => None,
            Self::Summoner | Self::SummonerRegion => Some(Lookup::Summoner),
            Self::Ranks | Self::RanksRegion => Some(Lookup::Ranks),
            Self::Live | Self::LiveRegion => Some(Lookup::Live),
        }
    }

    const fn arguments(self) -> &'static str {
        if matches!(self, Self::Help) {
            ""
        } else if self.takes_region() {
            " <Region> <Summoner_Name[#TAG]>"
        } else {
            " <Summoner_Name[#TAG]>"
        }
    }

    const fn description(self) -> &'static str {
        match self {
            Self::Help => "Outputs info about the available League of Legends commands",
            Self::Summoner => "Level and top champions of the given summoner on NA",
            Self::SummonerRegion => "Level and top champions of the given summoner on a region",
            Self::Ranks => "The summoner's rank in each queue they are ranked in on NA",
            Self::RanksRegion => "The summoner's rank in each queue they are ranked in on a region",
            Self::Live => "The summoner's live game on NA, with every player's solo rank",
            Self::LiveRegion => "The summoner's live game on a region",
        }
    }

    fn usage(self, prefix: &str) -> String {
        let usage = format!("**Usage: {prefix}{}{}**", self.name(), self.arguments());
        if self.takes_region() {
            format!("{usage}\n{}", region_options())
        } else {
            usage
        }
    }
}

/// Runs one League command and renders the reply.
///
/// A missing name or unknown region answers with the usage line (and the
/// region options); an unknown summoner with a not-found line naming the
/// server. Both are [`Reply::Rejected`].
#[instrument(skip(client, prefix))]
pub async fn handle_league_command(
    client: Option<&LeagueClient>,
    prefix: &str,
    command: LeagueCommand,
    args: &[String],
) -> Reply {
    let Some(lookup) = command.lookup() else {
        return Reply::Done(help_text(prefix));
    };
    let Some(identity) = parse_target(command, args) else {
        return Reply::Rejected(command.usage(prefix));
    };
    let Some(client) = client else {
        return Reply::Rejected(
            "**League of Legends lookups are not configured on this bot.**".to_string(),
        );
    };

    let result = match lookup {
        Lookup::Summoner => summoner_overview(client, &identity).await,
        Lookup::Ranks => ranked_standings(client, &identity).await,
        Lookup::Live => live_game(client, &identity).await,
    };
    match result {
        Ok(text) => Reply::Done(text),
        Err(Error::PlayerNotFound { .. }) => {
            info!(summoner = %identity.riot_id, region = %identity.region, "Summoner not found");
            Reply::Rejected(not_found_message(&identity))
        }
        Err(e) => rejected(command.name(), &e),
    }
}

fn parse_target(command: LeagueCommand, args: &[String]) -> Option<SummonerIdentity> {
    let (region, name) = if command.takes_region() {
        let (region, rest) = args.split_first()?;
        (region.parse().ok()?, rest)
    } else {
        (Region::default(), args)
    };
    SummonerIdentity::parse(&name.join(" "), region).ok()
}

/// `**Name#TAG** does not exist on the **Region** server`
#[must_use]
pub fn not_found_message(identity: &SummonerIdentity) -> String {
    format!(
        "**{}** does not exist on the **{}** server",
        identity.riot_id,
        identity.region.name()
    )
}

async fn champions_or_empty(client: &LeagueClient) -> Arc<ChampionNames> {
    client.champion_names().await.unwrap_or_else(|e| {
        warn!("Champion names unavailable: {}", e);
        Arc::default()
    })
}

async fn summoner_overview(client: &LeagueClient, identity: &SummonerIdentity) -> Result<String> {
    let account = client.account(identity).await?;
    let summoner = client.summoner(identity.region, &account).await?;
    let masteries = client
        .top_masteries(identity.region, &account.puuid, TOP_MASTERIES)
        .await?;
    let champions = champions_or_empty(client).await;
    Ok(format_summoner(
        &display_name(&account),
        identity.region,
        summoner,
        &masteries,
        &champions,
    ))
}

async fn ranked_standings(client: &LeagueClient, identity: &SummonerIdentity) -> Result<String> {
    let account = client.account(identity).await?;
    client.summoner(identity.region, &account).await?;
    let entries = client.league_entries(identity.region, &account.puuid).await?;
    Ok(format_ranks(&display_name(&account), &entries))
}

async fn live_game(client: &LeagueClient, identity: &SummonerIdentity) -> Result<String> {
    let region = identity.region;
    let account = client.account(identity).await?;
    client.summoner(region, &account).await?;
    let name = display_name(&account);

    let Some(game) = client.active_game(region, &account.puuid).await? else {
        return Ok(format!(
            "**{name}** is not in game on the **{}** server",
            region.name()
        ));
    };

    let champions = champions_or_empty(client).await;
    let mut solo_ranks = HashMap::new();
    for puuid in game.participants.iter().filter_map(|p| p.puuid.as_deref()) {
        let entries = client.league_entries(region, puuid).await?;
        if let Some(solo) = entries.into_iter().find(|e| e.queue_type == SOLO_QUEUE) {
            solo_ranks.insert(puuid.to_string(), solo);
        }
    }

    format_live_game(&name, &account.puuid, region, &game, &champions, &solo_ranks)
}

/// League of Legends help text.
#[must_use]
pub fn help_text(prefix: &str) -> String {
    let mut help = String::from("__**League of Legends Commands**__\n");
    for command in LeagueCommand::ALL {
        help.push_str(&format!(
            "**{prefix}{}{}:** {}\n",
            command.name(),
            command.arguments(),
            command.description()
        ));
    }
    help.push_str("Names without a #TAG use the region's default tag, e.g. `Doublelift#NA1`");
    help
}

/// Rounded win rate in percent, 0 without games.
#[must_use]
pub fn win_rate(wins: u32, losses: u32) -> u64 {
    let games = u64::from(wins) + u64::from(losses);
    if games == 0 {
        return 0;
    }
    (u64::from(wins) * 200 + games) / (games * 2)
}

fn ranked_queue_name(queue_type: &str) -> &str {
    RANKED_QUEUES
        .iter()
        .find(|(key, _)| *key == queue_type)
        .map_or(queue_type, |(_, name)| *name)
}

fn game_queue_name(queue_id: Option<i64>) -> &'static str {
    let id = queue_id.unwrap_or(0);
    GAME_QUEUES
        .iter()
        .find(|(key, _)| *key == id)
        .map_or("Unknown Queue", |(_, name)| *name)
}

fn spell_name(id: i64) -> &'static str {
    SPELLS
        .iter()
        .find(|(key, _)| *key == id)
        .map_or("Unknown", |(_, name)| *name)
}

fn tier(api_name: &str) -> Option<(&'static str, &'static str)> {
    TIERS
        .iter()
        .find(|(key, _, _)| *key == api_name)
        .map(|(_, name, short)| (*name, *short))
}

fn division_number(rank: &str) -> Option<u8> {
    DIVISIONS
        .iter()
        .find(|(key, _)| *key == rank)
        .map(|(_, number)| *number)
}

fn team_name(team_id: i64) -> String {
    match team_id {
        100 => "Blue".to_string(),
        200 => "Red".to_string(),
        other => format!("Team {other}"),
    }
}

/// `m:ss`, or `Loading In!` before the game clock starts.
#[must_use]
pub fn format_duration(seconds: i64) -> String {
    if seconds <= 0 {
        return "Loading In!".to_string();
    }
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Level, region and the top champions by mastery.
#[must_use]
pub fn format_summoner(
    name: &str,
    region: Region,
    summoner: Summoner,
    masteries: &[ChampionMastery],
    champions: &ChampionNames,
) -> String {
    let mut text = format!(
        "__**{name}**__\n**Level:** {}\n**Region:** {}\n\n\
         __**Top {TOP_MASTERIES} Champs By Mastery:**__\n",
        summoner.summoner_level,
        region.name()
    );
    if masteries.is_empty() {
        text.push_str("No champion mastery yet");
    }
    let lines: Vec<String> = masteries
        .iter()
        .enumerate()
        .map(|(i, mastery)| {
            format!(
                "{}. {} - {} pts",
                i + 1,
                champion_name(champions, mastery.champion_id),
                mastery.champion_points
            )
        })
        .collect();
    text.push_str(&lines.join("\n"));
    text
}

/// One line per ranked queue, with promotion progress when in a series.
#[must_use]
pub fn format_ranks(name: &str, entries: &[LeagueEntry]) -> String {
    if entries.is_empty() {
        return format!("**{name}** is not ranked in any leagues!");
    }

    let mut lines = vec![format!("__**Leagues {name} is ranked in:**__")];
    for entry in entries {
        let tier_name = tier(&entry.tier).map_or(entry.tier.as_str(), |(display, _)| display);
        lines.push(format!(
            "**{}:** {tier_name} {} {}LP (W/L: {}/{} {}%)",
            ranked_queue_name(&entry.queue_type),
            entry.rank,
            entry.league_points,
            entry.wins,
            entry.losses,
            win_rate(entry.wins, entry.losses)
        ));
        if let Some(series) = &entry.mini_series {
            lines.push(format!(
                "| Promos progress: {} |",
                series.progress.replace('N', "-")
            ));
        }
    }
    lines.join("\n")
}

fn rank_columns(entry: Option<&LeagueEntry>) -> String {
    let Some(entry) = entry else {
        return "Unranked | N/A".to_string();
    };
    let short = tier(&entry.tier).map_or("?", |(_, short)| short);
    let division = division_number(&entry.rank).map_or_else(String::new, |n| n.to_string());
    format!(
        "{short}{division}({}LP) | {}%({}GP)",
        entry.league_points,
        win_rate(entry.wins, entry.losses),
        entry.wins + entry.losses
    )
}

fn participant_row(
    participant: &Participant,
    champions: &ChampionNames,
    solo_ranks: &HashMap<String, LeagueEntry>,
) -> String {
    let rank = participant
        .puuid
        .as_ref()
        .and_then(|puuid| solo_ranks.get(puuid));
    format!(
        "{} | {} | {}",
        participant.riot_id.as_deref().unwrap_or("Unknown"),
        champion_name(champions, participant.champion_id),
        rank_columns(rank)
    )
}

/// The player's side of a live game followed by every player's solo rank,
/// grouped by team.
///
/// # Errors
/// [`Error::MalformedResponse`] when the player is not among the participants.
pub fn format_live_game(
    name: &str,
    puuid: &str,
    region: Region,
    game: &ActiveGame,
    champions: &ChampionNames,
    solo_ranks: &HashMap<String, LeagueEntry>,
) -> Result<String> {
    let player = game
        .participants
        .iter()
        .find(|p| p.puuid.as_deref() == Some(puuid))
        .ok_or_else(|| Error::malformed("live game does not list the player"))?;

    let mut text = format!(
        "__**{name}**__ is in a __**{}**__ game!\n\
         **Server:** {}\n\
         **Champion:** {}\n\
         **Spells:** {}/{}\n\
         **Duration:** {}\n\
         **Team Side:** {}\n\n\
         __**Solo/Duo 5v5 Stats**__\n\
         Name | Champ | Rank | Ranked WR\n",
        game_queue_name(game.game_queue_config_id),
        region.name(),
        champion_name(champions, player.champion_id),
        spell_name(player.spell1_id),
        spell_name(player.spell2_id),
        format_duration(game.game_length),
        team_name(player.team_id)
    );

    let mut teams: Vec<i64> = Vec::new();
    for participant in &game.participants {
        if !teams.contains(&participant.team_id) {
            teams.push(participant.team_id);
        }
    }
    for team in teams {
        text.push_str(&format!("\n__**{} Team**__\n", team_name(team)));
        for participant in game.participants.iter().filter(|p| p.team_id == team) {
            text.push_str(&participant_row(participant, champions, solo_ranks));
            text.push('\n');
        }
    }
    Ok(text.trim_end().to_string())
}
