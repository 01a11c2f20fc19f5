//! Head-to-head comparison of two player records.

use crate::stats::record::{Metric, MetricBundle, PlayerRecord, StatCategory};
use std::cmp::Ordering;

/// Returns copies of `a` and `b` where, for every metric of `category`, the
/// better value is marked for emphasis.
///
/// Ties go to `a`. A side without data loses every metric; when neither side
/// has data nothing is emphasized.
#[must_use]
pub fn compare(
    a: &PlayerRecord,
    b: &PlayerRecord,
    category: StatCategory,
) -> (PlayerRecord, PlayerRecord) {
    let mut first = a.clone();
    let mut second = b.clone();

    match (a.bundle(category), b.bundle(category)) {
        (Some(left), Some(right)) => {
            for metric in Metric::ALL {
                if metric_cmp(metric, left, right) == Ordering::Less {
                    second.emphasize(category, metric);
                } else {
                    first.emphasize(category, metric);
                }
            }
        }
        (Some(_), None) => {
            for metric in Metric::ALL {
                first.emphasize(category, metric);
            }
        }
        (None, Some(_)) => {
            for metric in Metric::ALL {
                second.emphasize(category, metric);
            }
        }
        (None, None) => {}
    }

    (first, second)
}

/// Applies [`compare`] to each category in turn.
#[must_use]
pub fn compare_all(
    a: &PlayerRecord,
    b: &PlayerRecord,
    categories: &[StatCategory],
) -> (PlayerRecord, PlayerRecord) {
    categories
        .iter()
        .fold((a.clone(), b.clone()), |(first, second), &category| {
            compare(&first, &second, category)
        })
}

/// A K/D of `None` (never died) ranks above every finite ratio.
fn metric_cmp(metric: Metric, left: &MetricBundle, right: &MetricBundle) -> Ordering {
    match metric {
        Metric::GamesPlayed => left.games_played.cmp(&right.games_played),
        Metric::Wins => left.wins.cmp(&right.wins),
        Metric::Kills => left.kills.cmp(&right.kills),
        Metric::WinPercent => left.win_percent.total_cmp(&right.win_percent),
        Metric::KillDeath => {
            let kd = |bundle: &MetricBundle| bundle.kill_death_ratio.unwrap_or(f64::INFINITY);
            kd(left).total_cmp(&kd(right))
        }
    }
}
