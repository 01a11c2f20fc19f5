//! Fortnite command handling - framework-agnostic.
//!
//! [`handle_stats_command`] is the single entry point: it takes a command and
//! its arguments and always produces exactly one chat message, turning every
//! failure into user-facing text. Each formatting step builds and returns its
//! own `String`.

use crate::{
    core::{Reply, rejected},
    errors::{Error, Result},
    stats::{
        CategoryStats, Metric, Platform, PlayerIdentity, PlayerRecord, ProfileSource,
        StatCategory, compare::compare_all, favorite::pick_favorite, normalizer::normalize,
    },
};
use tracing::{info, instrument};

/// Fortnite commands understood by [`handle_stats_command`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsCommand {
    /// Lists the Fortnite commands
    Help,
    /// Lifetime and overall per-mode stats
    Profile,
    /// Current-season stats
    Season,
    /// Head-to-head lifetime comparison of two players
    Compare,
    /// Stats on the platform with the most games
    Favorite,
}

impl StatsCommand {
    /// Command name as typed after the prefix.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Help => "fnhelp",
            Self::Profile => "fn",
            Self::Season => "fnseason",
            Self::Compare => "fncompare",
            Self::Favorite => "fnfavorite",
        }
    }

    const fn arguments(self) -> &'static str {
        match self {
            Self::Help => "",
            Self::Profile | Self::Season => " <Epic_Name[:platform]>",
            Self::Compare => " <Epic_Name[:platform]> <Epic_Name[:platform]>",
            Self::Favorite => " <Epic_Name>",
        }
    }

    const fn description(self) -> &'static str {
        match self {
            Self::Help => "Outputs info about the available Fortnite commands",
            Self::Profile => "Lifetime and overall solo/duo/squad stats (platform defaults to pc)",
            Self::Season => "Current season stats, in total and per mode",
            Self::Compare => {
                "Compares two players, the better value of each stat in bold \
                 (quote names with spaces)"
            }
            Self::Favorite => {
                "Finds the platform the player plays most and shows its lifetime stats"
            }
        }
    }

    fn usage(self, prefix: &str) -> String {
        format!("**Usage: {prefix}{}{}**", self.name(), self.arguments())
    }
}

/// Runs one Fortnite command against `source` and renders the reply.
///
/// Never fails: not-found players and bad input get a specific message, any
/// other failure is logged and answered with a generic one. Both come back
/// as [`Reply::Rejected`].
#[instrument(skip(source, prefix))]
pub async fn handle_stats_command<S: ProfileSource>(
    source: &S,
    prefix: &str,
    command: StatsCommand,
    args: &[String],
) -> Reply {
    let result = match command {
        StatsCommand::Help => Ok(Reply::Done(help_text(prefix))),
        StatsCommand::Profile => {
            single_player(source, prefix, command, args, &StatCategory::LIFETIME).await
        }
        StatsCommand::Season => {
            single_player(source, prefix, command, args, &StatCategory::SEASON).await
        }
        StatsCommand::Compare => head_to_head(source, prefix, args).await,
        StatsCommand::Favorite => favorite_platform(source, prefix, args).await,
    };

    result.unwrap_or_else(|e| rejected(command.name(), &e))
}

/// Fetches and normalizes one player's record.
pub async fn fetch_record<S: ProfileSource>(
    source: &S,
    identity: &PlayerIdentity,
    wanted: &[StatCategory],
) -> Result<PlayerRecord> {
    let raw = source.fetch(identity).await?;
    normalize(&raw, wanted)
}

async fn single_player<S: ProfileSource>(
    source: &S,
    prefix: &str,
    command: StatsCommand,
    args: &[String],
    categories: &[StatCategory],
) -> Result<Reply> {
    let input = args.join(" ");
    if input.trim().is_empty() {
        return Ok(Reply::Rejected(command.usage(prefix)));
    }

    let identity = PlayerIdentity::parse(&input)?;
    let record = fetch_record(source, &identity, categories).await?;
    Ok(Reply::Done(format_record(&record, categories)))
}

async fn head_to_head<S: ProfileSource>(
    source: &S,
    prefix: &str,
    args: &[String],
) -> Result<Reply> {
    let [first, second] = args else {
        return Ok(Reply::Rejected(StatsCommand::Compare.usage(prefix)));
    };

    let first = PlayerIdentity::parse(first)?;
    let second = PlayerIdentity::parse(second)?;
    let first = fetch_record(source, &first, &StatCategory::LIFETIME).await?;
    let second = fetch_record(source, &second, &StatCategory::LIFETIME).await?;

    let (first, second) = compare_all(&first, &second, &StatCategory::LIFETIME);
    Ok(Reply::Done(format_comparison(&first, &second, &StatCategory::LIFETIME)))
}

async fn favorite_platform<S: ProfileSource>(
    source: &S,
    prefix: &str,
    args: &[String],
) -> Result<Reply> {
    let input = args.join(" ");
    if input.trim().is_empty() {
        return Ok(Reply::Rejected(StatsCommand::Favorite.usage(prefix)));
    }
    // Every platform gets queried, so a typed suffix only selects the name.
    let name = PlayerIdentity::parse(&input)?.name;

    let mut records = Vec::new();
    for platform in Platform::ALL {
        let identity = PlayerIdentity::new(name.clone(), platform);
        match fetch_record(source, &identity, &[StatCategory::TotalLifetime]).await {
            Ok(record) => records.push(record),
            Err(Error::PlayerNotFound { .. }) => {
                info!(player = %identity, "No account on platform");
            }
            Err(e) => return Err(e),
        }
    }

    let favorite = pick_favorite(&records).ok_or(Error::PlayerNotFound { name })?;
    Ok(Reply::Done(format!(
        "{}\n\n**Favorite platform:** {} ({} games)\n\n{}",
        header(&favorite.identity.name),
        favorite.identity.platform,
        favorite.games_played(StatCategory::TotalLifetime),
        format_section(favorite, StatCategory::TotalLifetime)
    )))
}

/// Fortnite help text.
#[must_use]
pub fn help_text(prefix: &str) -> String {
    let mut help = String::from("__**Fortnite Commands**__\n");
    for command in [
        StatsCommand::Help,
        StatsCommand::Profile,
        StatsCommand::Season,
        StatsCommand::Compare,
        StatsCommand::Favorite,
    ] {
        help.push_str(&format!(
            "**{prefix}{}{}:** {}\n",
            command.name(),
            command.arguments(),
            command.description()
        ));
    }
    help.push_str("Platforms: pc, psn, xbl (e.g. `StankBank Frank:xbl`)");
    help
}

fn header(title: &str) -> String {
    format!("__**~ {title} ~**__")
}

fn emphasized(
    record: &PlayerRecord,
    category: StatCategory,
    metric: Metric,
    value: String,
) -> String {
    if record.is_emphasized(category, metric) {
        format!("**{value}**")
    } else {
        value
    }
}

/// One titled block of metrics for a category.
#[must_use]
pub fn format_section(record: &PlayerRecord, category: StatCategory) -> String {
    let title = format!("__***{}***__", category.title());
    let Some(CategoryStats::Metrics(bundle)) = record.stats(category) else {
        return format!("{title}\nNo games played");
    };

    let lines: Vec<String> = Metric::ALL
        .into_iter()
        .map(|metric| {
            let value = emphasized(record, category, metric, bundle.display_value(metric));
            format!("**{}:** {value}", metric.label())
        })
        .collect();
    format!("{title}\n{}", lines.join("\n"))
}

/// A player header followed by one section per category.
#[must_use]
pub fn format_record(record: &PlayerRecord, categories: &[StatCategory]) -> String {
    let mut sections = vec![header(&record.identity.to_string())];
    sections.extend(
        categories
            .iter()
            .map(|&category| format_section(record, category)),
    );
    sections.join("\n\n")
}

/// Side-by-side rendering of two compared records, `left | right` per metric.
#[must_use]
pub fn format_comparison(
    left: &PlayerRecord,
    right: &PlayerRecord,
    categories: &[StatCategory],
) -> String {
    let mut sections = vec![header(&format!("{} vs {}", left.identity, right.identity))];

    for &category in categories {
        let title = format!("__***{}***__", category.title());
        let (left_bundle, right_bundle) = (left.bundle(category), right.bundle(category));
        if left_bundle.is_none() && right_bundle.is_none() {
            sections.push(format!("{title}\nNo games played"));
            continue;
        }

        let side = |record: &PlayerRecord, metric: Metric| {
            record.bundle(category).map_or_else(
                || "-".to_string(),
                |bundle| emphasized(record, category, metric, bundle.display_value(metric)),
            )
        };
        let lines: Vec<String> = Metric::ALL
            .into_iter()
            .map(|metric| {
                format!(
                    "**{}:** {} | {}",
                    metric.label(),
                    side(left, metric),
                    side(right, metric)
                )
            })
            .collect();
        sections.push(format!("{title}\n{}", lines.join("\n")));
    }

    sections.join("\n\n")
}
