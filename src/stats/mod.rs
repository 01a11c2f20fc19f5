//! Stats layer - rate-limited API clients and response normalization.
//!
//! Nothing in here knows about Discord. Callers hand in a player identity and
//! get back typed records, or an [`crate::errors::Error`] to turn into a chat line.

/// Fortnite Tracker profile client
pub mod client;
/// Head-to-head comparison
pub mod compare;
/// Favorite-platform selection
pub mod favorite;
/// Shared HTTP client construction
pub mod http;
/// Player identities and platforms
pub mod identity;
/// Riot API client for League of Legends
pub mod league;
/// Fortnite JSON to typed records
pub mod normalizer;
/// osu! profile client
pub mod osu;
/// Per-API request spacing
pub mod rate_limiter;
/// Categories, metric bundles and player records
pub mod record;
/// League regions and Riot IDs
pub mod region;

pub use client::{FortniteClient, ProfileSource, RawResponse};
pub use identity::{Platform, PlayerIdentity};
pub use league::LeagueClient;
pub use osu::{OsuClient, OsuProfile};
pub use rate_limiter::RateLimiter;
pub use record::{CategoryStats, Metric, MetricBundle, PlayerRecord, StatCategory};
pub use region::{Region, SummonerIdentity};
