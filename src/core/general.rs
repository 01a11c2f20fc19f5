//! Small non-game commands: roll, reverse, gimme and the main help text.

use crate::core::Reply;
use rand::Rng;

/// Upper bound used when `roll` gets no usable argument.
pub const DEFAULT_ROLL_MAX: u32 = 100;

/// Reads the optional `roll` bound.
///
/// Minus signs are dropped, and anything non-numeric, zero or ten digits
/// and longer falls back to [`DEFAULT_ROLL_MAX`].
#[must_use]
pub fn roll_max(arg: Option<&str>) -> u32 {
    arg.map(|raw| raw.replace('-', ""))
        .filter(|digits| !digits.is_empty() && digits.len() < 10)
        .and_then(|digits| digits.parse::<u32>().ok())
        .filter(|&max| max > 0)
        .unwrap_or(DEFAULT_ROLL_MAX)
}

/// Rolls a number in `1..=max`.
#[must_use]
pub fn roll<R: Rng + ?Sized>(rng: &mut R, max: u32) -> u32 {
    rng.gen_range(1..=max.max(1))
}

/// Reverses text character by character.
#[must_use]
pub fn reverse(text: &str) -> String {
    text.chars().rev().collect()
}

/// `Gimme dat <noun>!`
#[must_use]
pub fn gimme(noun: &str) -> String {
    format!("Gimme dat {noun}!")
}

/// `gimme` with its usage line when no noun was given.
#[must_use]
pub fn handle_gimme(prefix: &str, noun: Option<&str>) -> Reply {
    match noun.map(str::trim) {
        Some(noun) if !noun.is_empty() => Reply::Done(gimme(noun)),
        _ => Reply::Rejected(format!("**Usage: {prefix}gimme <noun>**")),
    }
}

/// `reverse` with its usage line when no sentence was given.
#[must_use]
pub fn handle_reverse(prefix: &str, sentence: Option<&str>) -> Reply {
    match sentence.map(str::trim) {
        Some(sentence) if !sentence.is_empty() => Reply::Done(reverse(sentence)),
        _ => Reply::Rejected(format!("**Usage: {prefix}reverse <sentence>**")),
    }
}

/// Main help text with the configured prefix.
#[must_use]
pub fn help_text(prefix: &str) -> String {
    [
        "__**Commands**__".to_string(),
        format!("**{prefix}ping:** responds with pong!"),
        format!("**{prefix}buddy:** responds with guy!"),
        format!(
            "**{prefix}roll [number]:** Randomly gets a value up to the selected ***number*** \
             (Max 9 digits | default is {DEFAULT_ROLL_MAX})"
        ),
        format!("**{prefix}gimme <noun>:** Inputs ***noun*** into a static sentence"),
        format!("**{prefix}reverse <sentence>:** Responds with the given ***sentence*** reversed"),
        format!("**{prefix}usage:** Shows how often you have used each command"),
        format!("**{prefix}osuplayer <osu!_name>:** Outputs info about the given osu! player"),
        format!("**{prefix}fnhelp:** Outputs info about the available Fortnite commands"),
        format!("**{prefix}lolhelp:** Outputs info about the available League of Legends commands"),
    ]
    .join("\n")
}
