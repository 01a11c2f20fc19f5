//! Riot Games API client for League of Legends lookups.
//!
//! The account, summoner, mastery, league and spectator endpoints share one
//! [`RateLimiter`] and the `X-Riot-Token` key. Champion names come from Data
//! Dragon, which needs neither; they are fetched once and kept for the
//! lifetime of the client.

use crate::errors::{Error, Result};
use crate::stats::rate_limiter::RateLimiter;
use crate::stats::region::{Region, SummonerIdentity};
use reqwest::header::ACCEPT;
use reqwest::{RequestBuilder, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument, warn};

/// Header carrying the Riot API key.
pub const RIOT_TOKEN_HEADER: &str = "X-Riot-Token";

/// Replaced by a platform or routing host in the configured base URL.
pub const HOST_PLACEHOLDER: &str = "{host}";

/// Champion id to display name.
pub type ChampionNames = HashMap<i64, String>;

/// Riot account behind a Riot ID.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Stable id used by every other endpoint
    pub puuid: String,
    /// Name as the player spelled it
    pub game_name: Option<String>,
    /// Tag as the player spelled it
    pub tag_line: Option<String>,
}

/// Summoner profile on one server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summoner {
    /// Account level
    pub summoner_level: i64,
}

/// Mastery of one champion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChampionMastery {
    /// Champion id, resolved through [`ChampionNames`]
    pub champion_id: i64,
    /// Total mastery points
    pub champion_points: i64,
}

/// Standing in one ranked queue.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueEntry {
    /// e.g. `RANKED_SOLO_5x5`
    pub queue_type: String,
    /// e.g. `GOLD`
    pub tier: String,
    /// Division as a roman numeral, `I` to `IV`
    pub rank: String,
    /// League points
    pub league_points: i64,
    /// Ranked wins this split
    pub wins: u32,
    /// Ranked losses this split
    pub losses: u32,
    /// Present while in a promotion series
    pub mini_series: Option<MiniSeries>,
}

/// Promotion series progress.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MiniSeries {
    /// One character per game: `W`, `L`, or `N` for not played
    pub progress: String,
}

/// A game in progress.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveGame {
    /// Seconds since the game started; 0 while players are loading
    #[serde(default)]
    pub game_length: i64,
    /// Queue id, absent for custom games
    pub game_queue_config_id: Option<i64>,
    /// All ten (or fewer) players
    pub participants: Vec<Participant>,
}

/// One player in an [`ActiveGame`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    /// Absent for bots and hidden players
    pub puuid: Option<String>,
    /// Riot ID as `Name#TAG`
    pub riot_id: Option<String>,
    /// Champion being played
    pub champion_id: i64,
    /// First summoner spell (D)
    pub spell1_id: i64,
    /// Second summoner spell (F)
    pub spell2_id: i64,
    /// 100 for blue side, 200 for red side
    pub team_id: i64,
}

#[derive(Debug, Deserialize)]
struct ChampionList {
    data: HashMap<String, ChampionEntry>,
}

#[derive(Debug, Deserialize)]
struct ChampionEntry {
    key: String,
    name: String,
}

/// Rate-limited client for the Riot API, plus the Data Dragon champion list.
#[derive(Debug, Clone)]
pub struct LeagueClient {
    http: reqwest::Client,
    base_url: String,
    data_dragon_url: Url,
    api_key: String,
    limiter: Arc<RateLimiter>,
    champions: Arc<OnceCell<Arc<ChampionNames>>>,
}

impl LeagueClient {
    /// Creates a client.
    ///
    /// `base_url` is a template such as `https://{host}.api.riotgames.com`;
    /// `{host}` is replaced per request by the region's platform or routing
    /// host. `data_dragon_url` is the static data root.
    pub fn new(
        http: reqwest::Client,
        base_url: &str,
        data_dragon_url: &str,
        api_key: impl Into<String>,
        limiter: Arc<RateLimiter>,
    ) -> Result<Self> {
        let sample = base_url.replace(HOST_PLACEHOLDER, Region::default().platform_host());
        Url::parse(&sample).map_err(|e| Error::Config {
            message: format!("Invalid League base URL '{base_url}': {e}"),
        })?;
        let data_dragon_url = Url::parse(data_dragon_url).map_err(|e| Error::Config {
            message: format!("Invalid Data Dragon URL '{data_dragon_url}': {e}"),
        })?;

        Ok(Self {
            http,
            base_url: base_url.to_string(),
            data_dragon_url,
            api_key: api_key.into(),
            limiter,
            champions: Arc::default(),
        })
    }

    /// `{base}/{segments}` on `host`; each segment is percent-encoded.
    pub fn api_url(&self, host: &str, segments: &[&str]) -> Result<Url> {
        let root = self.base_url.replace(HOST_PLACEHOLDER, host);
        let mut url = Url::parse(&root).map_err(|e| Error::Config {
            message: format!("Invalid League base URL '{root}': {e}"),
        })?;
        push_segments(&mut url, segments)?;
        Ok(url)
    }

    /// Resolves a Riot ID to its account.
    ///
    /// # Errors
    /// [`Error::PlayerNotFound`] when no account has that name and tag.
    #[instrument(
        skip(self, identity),
        fields(riot_id = %identity.riot_id, region = %identity.region)
    )]
    pub async fn account(&self, identity: &SummonerIdentity) -> Result<Account> {
        let riot_id = &identity.riot_id;
        let url = self.api_url(
            identity.region.routing_host(),
            &[
                "riot",
                "account",
                "v1",
                "accounts",
                "by-riot-id",
                &riot_id.game_name,
                &riot_id.tag_line,
            ],
        )?;
        self.riot_get(url)
            .await?
            .ok_or_else(|| Error::PlayerNotFound {
                name: riot_id.to_string(),
            })
    }

    /// Summoner profile of an account on `region`.
    ///
    /// # Errors
    /// [`Error::PlayerNotFound`] when the account never played on that server.
    #[instrument(skip(self, account), fields(region = %region))]
    pub async fn summoner(&self, region: Region, account: &Account) -> Result<Summoner> {
        let url = self.api_url(
            region.platform_host(),
            &["lol", "summoner", "v4", "summoners", "by-puuid", &account.puuid],
        )?;
        self.riot_get(url)
            .await?
            .ok_or_else(|| Error::PlayerNotFound {
                name: display_name(account),
            })
    }

    /// The `count` champions with the most mastery points, best first.
    #[instrument(skip(self, puuid), fields(region = %region))]
    pub async fn top_masteries(
        &self,
        region: Region,
        puuid: &str,
        count: usize,
    ) -> Result<Vec<ChampionMastery>> {
        let mut url = self.api_url(
            region.platform_host(),
            &[
                "lol",
                "champion-mastery",
                "v4",
                "champion-masteries",
                "by-puuid",
                puuid,
                "top",
            ],
        )?;
        url.query_pairs_mut().append_pair("count", &count.to_string());
        Ok(self.riot_get(url).await?.unwrap_or_default())
    }

    /// Every ranked queue the player has a standing in; empty when unranked.
    #[instrument(skip(self, puuid), fields(region = %region))]
    pub async fn league_entries(&self, region: Region, puuid: &str) -> Result<Vec<LeagueEntry>> {
        let url = self.api_url(
            region.platform_host(),
            &["lol", "league", "v4", "entries", "by-puuid", puuid],
        )?;
        Ok(self.riot_get(url).await?.unwrap_or_default())
    }

    /// The game the player is in right now, if any.
    #[instrument(skip(self, puuid), fields(region = %region))]
    pub async fn active_game(&self, region: Region, puuid: &str) -> Result<Option<ActiveGame>> {
        let url = self.api_url(
            region.platform_host(),
            &["lol", "spectator", "v5", "active-games", "by-summoner", puuid],
        )?;
        self.riot_get(url).await
    }

    /// Champion names of the latest patch, loaded on first use.
    pub async fn champion_names(&self) -> Result<Arc<ChampionNames>> {
        self.champions
            .get_or_try_init(|| self.load_champion_names())
            .await
            .map(Arc::clone)
    }

    #[instrument(skip(self))]
    async fn load_champion_names(&self) -> Result<Arc<ChampionNames>> {
        let versions: Vec<String> = self.data_dragon_get(&["api", "versions.json"]).await?;
        let latest = versions
            .first()
            .ok_or_else(|| Error::malformed("Data Dragon lists no versions"))?;

        let list: ChampionList = self
            .data_dragon_get(&["cdn", latest, "data", "en_US", "champion.json"])
            .await?;
        let names = champion_names_from(list);
        info!(version = %latest, champions = names.len(), "Loaded champion names");
        Ok(Arc::new(names))
    }

    async fn riot_get<T: DeserializeOwned>(&self, url: Url) -> Result<Option<T>> {
        self.limiter.acquire().await;
        debug!(%url, "Sending GET request");
        let request = self.http.get(url).header(RIOT_TOKEN_HEADER, &self.api_key);
        read_json(request).await
    }

    async fn data_dragon_get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let mut url = self.data_dragon_url.clone();
        push_segments(&mut url, segments)?;
        debug!(%url, "Sending GET request");
        read_json(self.http.get(url))
            .await?
            .ok_or_else(|| Error::malformed(format!("Data Dragon has no {}", segments.join("/"))))
    }
}

fn push_segments(url: &mut Url, segments: &[&str]) -> Result<()> {
    let base = url.to_string();
    url.path_segments_mut()
        .map_err(|()| Error::Config {
            message: format!("Base URL '{base}' cannot carry a path"),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(())
}

/// Sends `request` and decodes the JSON answer.
///
/// 404 is `Ok(None)`; 429 is [`Error::RateLimitExceeded`]; any other failure
/// status is [`Error::UnexpectedStatus`].
async fn read_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<Option<T>> {
    let response = request
        .header(ACCEPT, "application/json")
        .send()
        .await
        .inspect_err(|e| warn!("League request failed: {}", e))?;

    let status = response.status();
    info!(status = status.as_u16(), "Received League response");
    match status {
        StatusCode::NOT_FOUND => return Ok(None),
        StatusCode::TOO_MANY_REQUESTS => {
            warn!("Upstream reported a rate limit violation");
            return Err(Error::RateLimitExceeded);
        }
        status if !status.is_success() => {
            return Err(Error::UnexpectedStatus {
                status: status.as_u16(),
            });
        }
        _ => {}
    }

    let body = response.bytes().await?;
    serde_json::from_slice(&body)
        .map(Some)
        .map_err(|e| Error::malformed(format!("unexpected League payload: {e}")))
}

fn champion_names_from(list: ChampionList) -> ChampionNames {
    list.data
        .into_values()
        .filter_map(|entry| match entry.key.parse() {
            Ok(id) => Some((id, entry.name)),
            Err(_) => {
                warn!(key = %entry.key, "Skipping champion with a non-numeric key");
                None
            }
        })
        .collect()
}

/// `Name#TAG` as the account spells it.
#[must_use]
pub fn display_name(account: &Account) -> String {
    match (&account.game_name, &account.tag_line) {
        (Some(name), Some(tag)) => format!("{name}#{tag}"),
        (Some(name), None) => name.clone(),
        _ => "Unknown".to_string(),
    }
}

/// Display name of a champion id, `Unknown` when not in the list.
#[must_use]
pub fn champion_name(names: &ChampionNames, id: i64) -> &str {
    names.get(&id).map_or("Unknown", String::as_str)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::stats::http::{BROWSER_USER_AGENT, build_http_client};
    use crate::test_utils::{FAKER_PUUID, TestServer, init_test_tracing, league_route};
    use std::time::{Duration, Instant};

    fn client_for(base_url: &str, data_dragon_url: &str, interval: Duration) -> LeagueClient {
        LeagueClient::new(
            build_http_client(Duration::from_secs(5)).unwrap(),
            base_url,
            data_dragon_url,
            "riot-secret",
            Arc::new(RateLimiter::new(interval)),
        )
        .unwrap()
    }

    fn local_client(server: &TestServer, interval: Duration) -> LeagueClient {
        client_for(server.url(), server.url(), interval)
    }

    fn faker() -> SummonerIdentity {
        SummonerIdentity::parse("Hide on bush#KR1", Region::Kr).unwrap()
    }

    #[test]
    fn test_api_url_substitutes_host_and_encodes_segments() {
        let client = client_for(
            "https://{host}.api.riotgames.com",
            "https://ddragon.leagueoflegends.com",
            Duration::ZERO,
        );
        let segments = ["riot", "account", "v1", "accounts", "by-riot-id", "Hide on bush", "KR1"];
        let url = client.api_url("asia", &segments).unwrap();
        assert_eq!(
            url.as_str(),
            "https://asia.api.riotgames.com/riot/account/v1/accounts/by-riot-id/\
             Hide%20on%20bush/KR1"
        );
    }

    #[test]
    fn test_invalid_urls_are_config_errors() {
        let http = reqwest::Client::new();
        let limiter = Arc::new(RateLimiter::new(Duration::ZERO));
        let bad_base =
            LeagueClient::new(http.clone(), "not a url", "https://x", "k", Arc::clone(&limiter));
        assert!(matches!(bad_base, Err(Error::Config { .. })));
        let bad_dragon = LeagueClient::new(http, "https://{host}.x", "::", "k", limiter);
        assert!(matches!(bad_dragon, Err(Error::Config { .. })));
    }

    #[test]
    fn test_display_name() {
        let account = Account {
            puuid: "p".to_string(),
            game_name: Some("Hide on bush".to_string()),
            tag_line: Some("KR1".to_string()),
        };
        assert_eq!(display_name(&account), "Hide on bush#KR1");
        let hidden = Account {
            game_name: None,
            tag_line: None,
            ..account
        };
        assert_eq!(display_name(&hidden), "Unknown");
    }

    #[tokio::test]
    async fn test_account_sends_key_and_headers() {
        init_test_tracing();
        let server = TestServer::start(league_route).await;
        let client = local_client(&server, Duration::ZERO);

        let account = client.account(&faker()).await.unwrap();
        assert_eq!(account.puuid, FAKER_PUUID);

        let requests = server.requests();
        let request = &requests[0];
        assert_eq!(
            request.target(),
            "/riot/account/v1/accounts/by-riot-id/Hide%20on%20bush/KR1"
        );
        assert_eq!(request.header(RIOT_TOKEN_HEADER), Some("riot-secret"));
        assert_eq!(request.header("accept"), Some("application/json"));
        assert_eq!(request.header("user-agent"), Some(BROWSER_USER_AGENT));
    }

    #[tokio::test]
    async fn test_unknown_account_is_player_not_found() {
        let server = TestServer::start(league_route).await;
        let client = local_client(&server, Duration::ZERO);
        let identity = SummonerIdentity::parse("nobody", Region::Euw).unwrap();

        let result = client.account(&identity).await;
        assert!(matches!(result, Err(Error::PlayerNotFound { name }) if name == "nobody#EUW"));
    }

    #[tokio::test]
    async fn test_league_entries_and_masteries_are_parsed() {
        let server = TestServer::start(league_route).await;
        let client = local_client(&server, Duration::ZERO);

        let entries = client.league_entries(Region::Kr, FAKER_PUUID).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].queue_type, "RANKED_SOLO_5x5");
        assert_eq!(entries[1].mini_series.as_ref().unwrap().progress, "WLN");

        let masteries = client.top_masteries(Region::Kr, FAKER_PUUID, 3).await.unwrap();
        assert_eq!(masteries.len(), 3);
        assert_eq!(masteries[0].champion_id, 7);
        let requests = server.requests();
        assert!(requests.iter().any(|r| r.target().ends_with("/top?count=3")));
    }

    #[tokio::test]
    async fn test_player_not_in_game_is_none() {
        let server = TestServer::start(league_route).await;
        let client = local_client(&server, Duration::ZERO);
        assert!(client.active_game(Region::Na, "nobody-puuid").await.unwrap().is_none());
        assert!(client.active_game(Region::Kr, FAKER_PUUID).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_failure_statuses_are_classified() {
        let server = TestServer::start(|target| {
            if target.contains("busy") {
                Some((429, String::new()))
            } else {
                Some((403, r#"{"status":{"message":"Forbidden"}}"#.to_string()))
            }
        })
        .await;
        let client = local_client(&server, Duration::ZERO);

        let busy = client.league_entries(Region::Na, "busy").await;
        assert!(matches!(busy, Err(Error::RateLimitExceeded)));
        let forbidden = client.league_entries(Region::Na, "other").await;
        assert!(matches!(forbidden, Err(Error::UnexpectedStatus { status: 403 })));
    }

    #[tokio::test]
    async fn test_riot_requests_wait_on_limiter() {
        let server = TestServer::start(league_route).await;
        let interval = Duration::from_millis(300);
        let client = local_client(&server, interval);

        let start = Instant::now();
        client.league_entries(Region::Kr, FAKER_PUUID).await.unwrap();
        client.league_entries(Region::Kr, FAKER_PUUID).await.unwrap();

        let requests = server.requests();
        assert_eq!(requests.len(), 2);
        assert!(requests[1].received_at.duration_since(start) >= interval);
    }

    #[tokio::test]
    async fn test_champion_names_are_loaded_once_without_key() {
        let server = TestServer::start(league_route).await;
        let client = local_client(&server, Duration::ZERO);

        let names = client.champion_names().await.unwrap();
        assert_eq!(champion_name(&names, 7), "LeBlanc");
        assert_eq!(champion_name(&names, 9999), "Unknown");
        client.champion_names().await.unwrap();

        let requests = server.requests();
        let targets: Vec<&str> = requests.iter().map(|r| r.target()).collect();
        assert_eq!(
            targets,
            ["/api/versions.json", "/cdn/14.1.1/data/en_US/champion.json"]
        );
        assert!(requests.iter().all(|r| r.header(RIOT_TOKEN_HEADER).is_none()));
    }
}
