//! osu! v1 API client for player profiles.

use crate::errors::{Error, Result};
use crate::stats::rate_limiter::RateLimiter;
use reqwest::header::ACCEPT;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Profile fields shown in chat, kept as the strings upstream sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsuProfile {
    /// Display name
    pub username: String,
    /// Level with fractional progress, e.g. `"100.5432"`
    pub level: Option<String>,
    /// Number of plays
    pub play_count: Option<String>,
    /// Global performance rank
    pub global_rank: Option<String>,
    /// Raw performance points
    pub performance_points: Option<String>,
    /// Accuracy in percent with many decimals
    pub accuracy: Option<String>,
}

// osu! sends null for every statistic of accounts that never played.
#[derive(Debug, Deserialize)]
struct UserPayload {
    username: String,
    level: Option<String>,
    playcount: Option<String>,
    pp_rank: Option<String>,
    pp_raw: Option<String>,
    accuracy: Option<String>,
}

impl From<UserPayload> for OsuProfile {
    fn from(user: UserPayload) -> Self {
        Self {
            username: user.username,
            level: user.level,
            play_count: user.playcount,
            global_rank: user.pp_rank,
            performance_points: user.pp_raw,
            accuracy: user.accuracy,
        }
    }
}

/// Rate-limited client for `get_user`.
#[derive(Debug, Clone)]
pub struct OsuClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
    limiter: Arc<RateLimiter>,
}

impl OsuClient {
    /// Creates a client rooted at `base_url` (e.g. `https://osu.ppy.sh/api`).
    pub fn new(
        http: reqwest::Client,
        base_url: &str,
        api_key: impl Into<String>,
        limiter: Arc<RateLimiter>,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| Error::Config {
            message: format!("Invalid osu! base URL '{base_url}': {e}"),
        })?;
        Ok(Self {
            http,
            base_url,
            api_key: api_key.into(),
            limiter,
        })
    }

    /// `{base}/get_user?u={name}&k={key}`
    pub fn user_url(&self, name: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::Config {
                message: format!("Base URL '{}' cannot carry a path", self.base_url),
            })?
            .pop_if_empty()
            .push("get_user");
        url.query_pairs_mut()
            .append_pair("u", name)
            .append_pair("k", &self.api_key);
        Ok(url)
    }

    /// Looks up one player by name.
    #[instrument(skip(self))]
    pub async fn fetch_user(&self, name: &str) -> Result<OsuProfile> {
        let url = self.user_url(name)?;

        self.limiter.acquire().await;
        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            // The URL carries the API key
            .map_err(reqwest::Error::without_url)
            .inspect_err(|e| warn!("osu! request failed: {}", e))?;

        let status = response.status();
        info!(status = status.as_u16(), "Received osu! response");
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::RateLimitExceeded);
        }
        if !status.is_success() {
            return Err(Error::PlayerNotFound {
                name: name.to_string(),
            });
        }

        let body = response.bytes().await.map_err(reqwest::Error::without_url)?;
        parse_user(name, &body)
    }
}

/// Reads the first user of a `get_user` answer; an empty array means no such player.
pub fn parse_user(name: &str, body: &[u8]) -> Result<OsuProfile> {
    let users: Vec<UserPayload> = serde_json::from_slice(body)
        .map_err(|e| Error::malformed(format!("unexpected osu! user layout: {e}")))?;
    users
        .into_iter()
        .next()
        .map(OsuProfile::from)
        .ok_or_else(|| Error::PlayerNotFound {
            name: name.to_string(),
        })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::stats::http::{BROWSER_USER_AGENT, build_http_client};
    use crate::test_utils::{TestServer, init_test_tracing};
    use std::time::{Duration, Instant};

    fn client() -> OsuClient {
        OsuClient::new(
            reqwest::Client::new(),
            "https://osu.ppy.sh/api",
            "secret",
            Arc::new(RateLimiter::new(Duration::from_secs(1))),
        )
        .unwrap()
    }

    #[test]
    fn test_user_url_encodes_name_and_key() {
        let url = client().user_url("Cookiezi Fan").unwrap();
        assert_eq!(
            url.as_str(),
            "https://osu.ppy.sh/api/get_user?u=Cookiezi+Fan&k=secret"
        );
    }

    const WHITECAT: &str = r#"[{"user_id":"124493","username":"WhiteCat","level":"102.417",
        "playcount":"72415","pp_rank":"12","pp_raw":"14932.3",
        "accuracy":"98.94513702392578","count300":"1"}]"#;

    #[test]
    fn test_parse_user_reads_first_entry() {
        let profile = parse_user("whitecat", WHITECAT.as_bytes()).unwrap();
        assert_eq!(profile.username, "WhiteCat");
        assert_eq!(profile.play_count.as_deref(), Some("72415"));
        assert_eq!(profile.global_rank.as_deref(), Some("12"));
        assert_eq!(profile.accuracy.as_deref(), Some("98.94513702392578"));
    }

    #[test]
    fn test_parse_user_handles_null_statistics() {
        let body = br#"[{"username":"fresh","level":null,"playcount":null,
            "pp_rank":null,"pp_raw":null,"accuracy":null}]"#;
        let profile = parse_user("fresh", body).unwrap();
        assert!(profile.level.is_none());
        assert!(profile.performance_points.is_none());
    }

    #[test]
    fn test_empty_array_is_player_not_found() {
        let result = parse_user("ghost", b"[]");
        assert!(matches!(result, Err(Error::PlayerNotFound { name }) if name == "ghost"));
    }

    #[test]
    fn test_error_object_is_malformed() {
        let result = parse_user("x", br#"{"error":"Please provide a valid API key."}"#);
        assert!(matches!(result, Err(Error::MalformedResponse { .. })));
    }

    fn local_client(server: &TestServer, interval: Duration) -> OsuClient {
        OsuClient::new(
            build_http_client(Duration::from_secs(5)).unwrap(),
            &format!("{}/api", server.url()),
            "secret",
            Arc::new(RateLimiter::new(interval)),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_user_sends_query_and_headers() {
        init_test_tracing();
        let server = TestServer::start(|_| Some((200, WHITECAT.to_string()))).await;
        let client = local_client(&server, Duration::ZERO);

        let profile = client.fetch_user("White Cat").await.unwrap();
        assert_eq!(profile.username, "WhiteCat");

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.request_line, "GET /api/get_user?u=White+Cat&k=secret HTTP/1.1");
        assert_eq!(request.header("accept"), Some("application/json"));
        assert_eq!(request.header("user-agent"), Some(BROWSER_USER_AGENT));
    }

    #[tokio::test]
    async fn test_back_to_back_lookups_wait_on_limiter() {
        let server = TestServer::start(|_| Some((200, WHITECAT.to_string()))).await;
        let interval = Duration::from_millis(300);
        let client = local_client(&server, interval);

        let start = Instant::now();
        client.fetch_user("WhiteCat").await.unwrap();
        client.fetch_user("WhiteCat").await.unwrap();

        let requests = server.requests();
        assert_eq!(requests.len(), 2);
        assert!(requests[1].received_at.duration_since(start) >= interval);
    }

    #[tokio::test]
    async fn test_fetch_user_classifies_upstream_answers() {
        let server = TestServer::start(|target| {
            if target.contains("u=ghost") {
                Some((200, "[]".to_string()))
            } else if target.contains("u=busy") {
                Some((429, String::new()))
            } else {
                Some((500, String::new()))
            }
        })
        .await;
        let client = local_client(&server, Duration::ZERO);

        let ghost = client.fetch_user("ghost").await;
        assert!(matches!(ghost, Err(Error::PlayerNotFound { name }) if name == "ghost"));
        assert!(matches!(client.fetch_user("busy").await, Err(Error::RateLimitExceeded)));
        assert!(matches!(client.fetch_user("down").await, Err(Error::PlayerNotFound { .. })));
    }
}
