//! Turns raw Fortnite Tracker profile JSON into a [`PlayerRecord`].
//!
//! Lifetime totals live in the `lifeTimeStats` array and are addressed by
//! position, not by name. That coupling is an upstream contract: every
//! position is declared once in [`LifetimeField`] and the array is checked
//! when parsed, so an upstream reshuffle surfaces as an error or a warning
//! instead of silently wrong numbers.
//!
//! Per-mode stats live under `stats.<mode code>`. A missing mode only means
//! the player never played it.

use crate::errors::{Error, Result};
use crate::stats::client::RawResponse;
use crate::stats::record::{CategoryStats, MetricBundle, PlayerRecord, StatCategory};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, instrument, warn};

/// The `lifeTimeStats` array must reach at least this many entries.
pub const LIFETIME_MIN_LEN: usize = 12;

/// Named positions inside the `lifeTimeStats` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifetimeField {
    /// Matches played
    GamesPlayed,
    /// Matches won
    Wins,
    /// Upstream-formatted win percentage
    WinPercent,
    /// Eliminations
    Kills,
    /// Upstream-formatted kill/death ratio
    KillDeath,
}

impl LifetimeField {
    /// Every positional field.
    pub const ALL: [Self; 5] = [
        Self::GamesPlayed,
        Self::Wins,
        Self::WinPercent,
        Self::Kills,
        Self::KillDeath,
    ];

    /// Position of the field in `lifeTimeStats`.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::GamesPlayed => 7,
            Self::Wins => 8,
            Self::WinPercent => 9,
            Self::Kills => 10,
            Self::KillDeath => 11,
        }
    }

    /// Label upstream puts in the entry's `key` at that position.
    #[must_use]
    pub const fn expected_key(self) -> &'static str {
        match self {
            Self::GamesPlayed => "Matches Played",
            Self::Wins => "Wins",
            Self::WinPercent => "Win%",
            Self::Kills => "Kills",
            Self::KillDeath => "K/d",
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProfilePayload {
    #[serde(rename = "lifeTimeStats")]
    lifetime_stats: Vec<LifetimeEntry>,
    stats: HashMap<String, ModePayload>,
}

#[derive(Debug, Deserialize)]
struct LifetimeEntry {
    key: String,
    value: String,
}

/// One mode's entries, kept loose so unknown fields cannot fail the document.
type ModePayload = HashMap<String, serde_json::Value>;

/// Validated view over the positional `lifeTimeStats` array.
struct LifetimeStats<'a> {
    entries: &'a [LifetimeEntry],
}

impl<'a> LifetimeStats<'a> {
    fn new(entries: &'a [LifetimeEntry]) -> Result<Self> {
        if entries.len() < LIFETIME_MIN_LEN {
            return Err(Error::malformed(format!(
                "lifeTimeStats has {} entries, expected at least {LIFETIME_MIN_LEN}",
                entries.len()
            )));
        }

        let stats = Self { entries };
        for field in LifetimeField::ALL {
            let key = &stats.entry(field).key;
            if !key.eq_ignore_ascii_case(field.expected_key()) {
                warn!(
                    index = field.index(),
                    found = %key,
                    expected = field.expected_key(),
                    "lifeTimeStats layout looks shifted"
                );
            }
        }
        Ok(stats)
    }

    fn entry(&self, field: LifetimeField) -> &LifetimeEntry {
        &self.entries[field.index()]
    }

    fn count(&self, field: LifetimeField) -> Result<u64> {
        parse_count(&self.entry(field).value)
    }

    fn bundle(&self) -> Result<MetricBundle> {
        MetricBundle::from_counts(
            self.count(LifetimeField::GamesPlayed)?,
            self.count(LifetimeField::Wins)?,
            self.count(LifetimeField::Kills)?,
        )
    }
}

/// Parses an upstream display count such as `"1,234"`.
pub fn parse_count(raw: &str) -> Result<u64> {
    raw.trim()
        .replace(',', "")
        .parse()
        .map_err(|e| Error::malformed(format!("'{raw}' is not a count: {e}")))
}

/// Normalizes `raw` into a record holding exactly the `wanted` categories.
///
/// Missing modes become [`CategoryStats::NoData`]. Only an unusable document
/// (no `lifeTimeStats`/`stats`, or an unreadable lifetime array) is an error.
#[instrument(skip(raw), fields(player = %raw.identity))]
pub fn normalize(raw: &RawResponse, wanted: &[StatCategory]) -> Result<PlayerRecord> {
    let payload: ProfilePayload = serde_json::from_slice(&raw.body)
        .map_err(|e| Error::malformed(format!("unexpected profile layout: {e}")))?;
    let lifetime = LifetimeStats::new(&payload.lifetime_stats)?;

    let mut record = PlayerRecord::new(raw.identity.clone());
    for &category in wanted {
        let stats = match category {
            StatCategory::TotalLifetime => CategoryStats::Metrics(lifetime.bundle()?),
            StatCategory::CurrentSeasonTotal => season_total(&payload.stats),
            _ => category
                .mode_code()
                .map_or(CategoryStats::NoData, |code| mode_stats(&payload.stats, code)),
        };
        record.insert(category, stats);
    }
    Ok(record)
}

fn mode_stats(stats: &HashMap<String, ModePayload>, code: &str) -> CategoryStats {
    let Some(mode) = stats.get(code) else {
        debug!(mode = code, "Mode absent from payload");
        return CategoryStats::NoData;
    };

    match read_mode(mode) {
        Ok(bundle) => CategoryStats::Metrics(bundle),
        Err(e) => {
            warn!(mode = code, "Treating mode as empty: {}", e);
            CategoryStats::NoData
        }
    }
}

fn read_mode(mode: &ModePayload) -> Result<MetricBundle> {
    let count = |key: &str| {
        mode.get(key)
            .and_then(|value| value.get("displayValue"))
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| Error::malformed(format!("mode has no '{key}' value")))
            .and_then(parse_count)
    };
    MetricBundle::from_counts(count("matches")?, count("top1")?, count("kills")?)
}

/// Current-season totals: raw counts are summed across modes first and the
/// ratios derived from the sums, so a mode with few games cannot skew them.
fn season_total(stats: &HashMap<String, ModePayload>) -> CategoryStats {
    let modes: Vec<MetricBundle> = [
        StatCategory::CurrentSoloSeason,
        StatCategory::CurrentDuoSeason,
        StatCategory::CurrentSquadSeason,
    ]
    .into_iter()
    .filter_map(StatCategory::mode_code)
    .filter_map(|code| mode_stats(stats, code).bundle().copied())
    .collect();

    if modes.is_empty() {
        return CategoryStats::NoData;
    }

    let totals = modes.iter().try_fold((0_u64, 0_u64, 0_u64), |(g, w, k), bundle| {
        Some((
            g.checked_add(bundle.games_played)?,
            w.checked_add(bundle.wins)?,
            k.checked_add(bundle.kills)?,
        ))
    });
    let Some((games, wins, kills)) = totals else {
        warn!("Season counts overflow when summed, treating total as empty");
        return CategoryStats::NoData;
    };
    match MetricBundle::from_counts(games, wins, kills) {
        Ok(bundle) => CategoryStats::Metrics(bundle),
        Err(e) => {
            warn!("Treating season total as empty: {}", e);
            CategoryStats::NoData
        }
    }
}
