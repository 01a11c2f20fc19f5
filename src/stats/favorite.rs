//! Picks the platform a player plays most.

use crate::stats::record::{PlayerRecord, StatCategory};

/// The record with the strictly greatest lifetime games played.
///
/// Earlier records win ties, so with all-zero counts the first record is
/// returned. `None` only for an empty slice; callers drop platforms without
/// data before asking.
#[must_use]
pub fn pick_favorite(records: &[PlayerRecord]) -> Option<&PlayerRecord> {
    let (first, rest) = records.split_first()?;
    let favorite = rest.iter().fold(first, |best, candidate| {
        if candidate.games_played(StatCategory::TotalLifetime)
            > best.games_played(StatCategory::TotalLifetime)
        {
            candidate
        } else {
            best
        }
    });
    Some(favorite)
}
