//! osu! profile command handling.

use crate::{
    core::{Reply, rejected},
    stats::{OsuClient, OsuProfile},
};

/// Looks up `name` and renders the profile, or an error line.
pub async fn handle_osu_command(client: Option<&OsuClient>, prefix: &str, name: &str) -> Reply {
    let name = name.trim();
    if name.is_empty() {
        return Reply::Rejected(format!("**Usage: {prefix}osuplayer <osu!_Name>**"));
    }
    let Some(client) = client else {
        return Reply::Rejected("**osu! lookups are not configured on this bot.**".to_string());
    };

    match client.fetch_user(name).await {
        Ok(profile) => Reply::Done(format_profile(&profile)),
        Err(e) => rejected("osuplayer", &e),
    }
}

/// Renders an osu! profile: whole level, accuracy cut to two decimals.
#[must_use]
pub fn format_profile(profile: &OsuProfile) -> String {
    let or_dash = |value: Option<&str>| value.unwrap_or("-").to_string();
    let level = profile
        .level
        .as_deref()
        .map(|level| truncate_decimals(level, 0));
    let accuracy = profile
        .accuracy
        .as_deref()
        .map(|accuracy| format!("{}%", truncate_decimals(accuracy, 2)));

    [
        format!("__**~ {} ~**__\n", profile.username),
        format!("**Level:** {}", or_dash(level.as_deref())),
        format!("**Play Count:** {}", or_dash(profile.play_count.as_deref())),
        format!("**Global Rank:** {}", or_dash(profile.global_rank.as_deref())),
        format!(
            "**Performance Points:** {}",
            or_dash(profile.performance_points.as_deref())
        ),
        format!("**Accuracy:** {}", or_dash(accuracy.as_deref())),
    ]
    .join("\n")
}

/// Cuts a decimal string after `places` fractional digits, without rounding.
#[must_use]
pub fn truncate_decimals(value: &str, places: usize) -> String {
    match value.split_once('.') {
        Some((whole, _)) if places == 0 => whole.to_string(),
        Some((whole, fraction)) => {
            let fraction: String = fraction.chars().take(places).collect();
            format!("{whole}.{fraction}")
        }
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::stats::{RateLimiter, http::build_http_client};
    use crate::test_utils::TestServer;
    use std::{sync::Arc, time::Duration};

    fn profile() -> OsuProfile {
        OsuProfile {
            username: "WhiteCat".to_string(),
            level: Some("102.417".to_string()),
            play_count: Some("72415".to_string()),
            global_rank: Some("12".to_string()),
            performance_points: Some("14932.3".to_string()),
            accuracy: Some("98.94513702392578".to_string()),
        }
    }

    #[test]
    fn test_truncate_decimals() {
        assert_eq!(truncate_decimals("98.94513702392578", 2), "98.94");
        assert_eq!(truncate_decimals("102.999", 0), "102");
        assert_eq!(truncate_decimals("97.5", 2), "97.5");
        assert_eq!(truncate_decimals("100", 2), "100");
    }

    #[test]
    fn test_format_profile() {
        let text = format_profile(&profile());
        assert_eq!(
            text,
            "__**~ WhiteCat ~**__\n\n**Level:** 102\n**Play Count:** 72415\n**Global Rank:** 12\n\
             **Performance Points:** 14932.3\n**Accuracy:** 98.94%"
        );
    }

    #[test]
    fn test_format_profile_without_plays() {
        let profile = OsuProfile {
            level: None,
            accuracy: None,
            ..profile()
        };
        let text = format_profile(&profile);
        assert!(text.contains("**Level:** -"));
        assert!(text.contains("**Accuracy:** -"));
    }

    #[tokio::test]
    async fn test_missing_name_is_rejected_with_usage() {
        let reply = handle_osu_command(None, "!", "  ").await;
        assert_eq!(reply, Reply::Rejected("**Usage: !osuplayer <osu!_Name>**".to_string()));
    }

    #[tokio::test]
    async fn test_unconfigured_client_is_rejected() {
        let reply = handle_osu_command(None, "!", "WhiteCat").await;
        assert!(!reply.is_done());
        assert!(reply.text().contains("not configured"));
    }

    #[tokio::test]
    async fn test_unknown_player_is_rejected() {
        let server = TestServer::start(|_| Some((200, "[]".to_string()))).await;
        let client = OsuClient::new(
            build_http_client(Duration::from_secs(5)).unwrap(),
            &format!("{}/api", server.url()),
            "secret",
            Arc::new(RateLimiter::new(Duration::ZERO)),
        )
        .unwrap();

        let reply = handle_osu_command(Some(&client), "!", "ghost").await;
        assert_eq!(reply, Reply::Rejected("**Could not find player 'ghost'.**".to_string()));
    }
}
