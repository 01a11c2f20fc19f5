//! Normalized Fortnite statistics: categories, metric bundles and player records.

use crate::errors::{Error, Result};
use crate::stats::identity::PlayerIdentity;
use std::collections::{BTreeMap, BTreeSet};

/// A slice of a player's history that gets its own metric bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StatCategory {
    /// All modes, whole account history
    TotalLifetime,
    /// Solo queue, whole account history
    SoloLifetime,
    /// Duo queue, whole account history
    DuoLifetime,
    /// Squad queue, whole account history
    SquadLifetime,
    /// Solo queue, current season
    CurrentSoloSeason,
    /// Duo queue, current season
    CurrentDuoSeason,
    /// Squad queue, current season
    CurrentSquadSeason,
    /// Sum of the three current-season modes
    CurrentSeasonTotal,
}

impl StatCategory {
    /// Categories shown by the profile command.
    pub const LIFETIME: [Self; 4] = [
        Self::TotalLifetime,
        Self::SoloLifetime,
        Self::DuoLifetime,
        Self::SquadLifetime,
    ];

    /// Categories shown by the season command.
    pub const SEASON: [Self; 4] = [
        Self::CurrentSeasonTotal,
        Self::CurrentSoloSeason,
        Self::CurrentDuoSeason,
        Self::CurrentSquadSeason,
    ];

    /// Upstream mode code under `stats`, for categories read from a single mode.
    #[must_use]
    pub const fn mode_code(self) -> Option<&'static str> {
        match self {
            Self::SoloLifetime => Some("p2"),
            Self::DuoLifetime => Some("p10"),
            Self::SquadLifetime => Some("p9"),
            Self::CurrentSoloSeason => Some("curr_p2"),
            Self::CurrentDuoSeason => Some("curr_p10"),
            Self::CurrentSquadSeason => Some("curr_p9"),
            Self::TotalLifetime | Self::CurrentSeasonTotal => None,
        }
    }

    /// Section heading used in chat output.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::TotalLifetime => "Lifetime",
            Self::SoloLifetime => "Overall Solos",
            Self::DuoLifetime => "Overall Duos",
            Self::SquadLifetime => "Overall Squads",
            Self::CurrentSoloSeason => "Season Solos",
            Self::CurrentDuoSeason => "Season Duos",
            Self::CurrentSquadSeason => "Season Squads",
            Self::CurrentSeasonTotal => "Current Season",
        }
    }
}

/// One displayed statistic of a bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Metric {
    /// Matches played
    GamesPlayed,
    /// Matches won
    Wins,
    /// Share of matches won
    WinPercent,
    /// Eliminations
    Kills,
    /// Kills per death
    KillDeath,
}

impl Metric {
    /// All metrics in display order.
    pub const ALL: [Self; 5] = [
        Self::GamesPlayed,
        Self::Wins,
        Self::WinPercent,
        Self::Kills,
        Self::KillDeath,
    ];

    /// Label used in chat output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::GamesPlayed => "Games Played",
            Self::Wins => "Wins",
            Self::WinPercent => "Win %",
            Self::Kills => "Kills",
            Self::KillDeath => "K/D",
        }
    }
}

/// Games, wins and kills for one category, with the ratios derived from them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricBundle {
    /// Matches played
    pub games_played: u64,
    /// Matches won, never more than `games_played`
    pub wins: u64,
    /// `100 * wins / games_played`, 0 when nothing was played
    pub win_percent: f64,
    /// Eliminations
    pub kills: u64,
    /// `kills / (games_played - wins)`; `None` when every match was won
    pub kill_death_ratio: Option<f64>,
}

impl MetricBundle {
    /// Builds a bundle from raw counts, deriving both ratios.
    ///
    /// Every match that is not a win ends in exactly one death, so deaths are
    /// `games_played - wins`.
    #[allow(clippy::cast_precision_loss)] // Match and kill counts stay far below 2^52
    pub fn from_counts(games_played: u64, wins: u64, kills: u64) -> Result<Self> {
        if wins > games_played {
            return Err(Error::malformed(format!(
                "{wins} wins reported for {games_played} games played"
            )));
        }

        let win_percent = if games_played == 0 {
            0.0
        } else {
            100.0 * wins as f64 / games_played as f64
        };
        let deaths = games_played - wins;
        let kill_death_ratio = (deaths > 0).then(|| kills as f64 / deaths as f64);

        Ok(Self {
            games_played,
            wins,
            win_percent,
            kills,
            kill_death_ratio,
        })
    }

    /// Win percentage rounded to the nearest whole number.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // Always within 0..=100
    pub fn rounded_win_percent(&self) -> u64 {
        self.win_percent.round() as u64
    }

    /// Chat rendering of one metric, without emphasis. Win % is shown as a
    /// whole number.
    #[must_use]
    pub fn display_value(&self, metric: Metric) -> String {
        match metric {
            Metric::GamesPlayed => self.games_played.to_string(),
            Metric::Wins => self.wins.to_string(),
            Metric::WinPercent => format!("{}%", self.rounded_win_percent()),
            Metric::Kills => self.kills.to_string(),
            Metric::KillDeath => self
                .kill_death_ratio
                .map_or_else(|| "N/A".to_string(), |kd| format!("{kd:.2}")),
        }
    }
}

/// What a record holds for one category.
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryStats {
    /// The player has not played this mode; not an error
    NoData,
    /// Normalized metrics
    Metrics(MetricBundle),
}

impl CategoryStats {
    /// The bundle, if the player has data for this category.
    #[must_use]
    pub const fn bundle(&self) -> Option<&MetricBundle> {
        match self {
            Self::NoData => None,
            Self::Metrics(bundle) => Some(bundle),
        }
    }
}

/// Normalized stats of one player on one platform, built fresh per request.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRecord {
    /// Who the stats belong to
    pub identity: PlayerIdentity,
    bundles: BTreeMap<StatCategory, CategoryStats>,
    emphasis: BTreeSet<(StatCategory, Metric)>,
}

impl PlayerRecord {
    /// Creates a record with no categories filled in.
    #[must_use]
    pub const fn new(identity: PlayerIdentity) -> Self {
        Self {
            identity,
            bundles: BTreeMap::new(),
            emphasis: BTreeSet::new(),
        }
    }

    /// Stores the stats of one category, replacing earlier ones.
    pub fn insert(&mut self, category: StatCategory, stats: CategoryStats) {
        self.bundles.insert(category, stats);
    }

    /// Stats of `category`, or `None` if the category was never requested.
    #[must_use]
    pub fn stats(&self, category: StatCategory) -> Option<&CategoryStats> {
        self.bundles.get(&category)
    }

    /// Metric bundle of `category`, if requested and not empty.
    #[must_use]
    pub fn bundle(&self, category: StatCategory) -> Option<&MetricBundle> {
        self.stats(category).and_then(CategoryStats::bundle)
    }

    /// Games played in `category`, counting missing data as zero.
    #[must_use]
    pub fn games_played(&self, category: StatCategory) -> u64 {
        self.bundle(category).map_or(0, |bundle| bundle.games_played)
    }

    /// Marks a metric of a category for emphasis (bold in chat).
    pub fn emphasize(&mut self, category: StatCategory, metric: Metric) {
        self.emphasis.insert((category, metric));
    }

    /// Whether a metric of a category was marked for emphasis.
    #[must_use]
    pub fn is_emphasized(&self, category: StatCategory, metric: Metric) -> bool {
        self.emphasis.contains(&(category, metric))
    }
}
