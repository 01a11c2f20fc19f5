//! Shared test utilities for `GameBot`.
//!
//! Helpers for in-memory databases, canned Fortnite payloads, an offline
//! [`ProfileSource`] and a local HTTP server for the API clients.

#![allow(clippy::unwrap_used)]

use crate::{
    errors::{Error, Result},
    stats::{PlayerIdentity, ProfileSource, RawResponse},
};
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tracing_subscriber::EnvFilter;

/// Routes tracing output through the test harness; safe to call repeatedly.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Formats a count the way the tracker displays it, e.g. `1,234`.
fn with_separators(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::new();
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    out
}

fn display(value: u64) -> Value {
    json!({ "value": value.to_string(), "displayValue": with_separators(value) })
}

/// Builds a profile document shaped like the tracker's.
///
/// `lifetime` is `(games, wins, kills)`; each mode is `(code, games, wins, kills)`.
/// Counts are rendered with thousands separators.
pub fn profile_json(lifetime: (u64, u64, u64), modes: &[(&str, u64, u64, u64)]) -> Value {
    let (games, wins, kills) = lifetime;
    let filler = [
        "Top 5s", "Top 3s", "Top 6s", "Top 10", "Top 12s", "Top 25s", "Score",
    ];
    let mut lifetime_stats: Vec<Value> = filler
        .iter()
        .map(|key| json!({ "key": key, "value": "0" }))
        .collect();
    lifetime_stats.extend([
        json!({ "key": "Matches Played", "value": with_separators(games) }),
        json!({ "key": "Wins", "value": with_separators(wins) }),
        json!({ "key": "Win%", "value": "0%" }),
        json!({ "key": "Kills", "value": with_separators(kills) }),
        json!({ "key": "K/d", "value": "0" }),
    ]);

    let stats: serde_json::Map<String, Value> = modes
        .iter()
        .map(|&(code, games, wins, kills)| {
            (
                code.to_string(),
                json!({
                    "matches": display(games),
                    "top1": display(wins),
                    "kills": display(kills),
                    "winRatio": { "value": "0", "displayValue": "0" },
                    "kd": { "value": "0", "displayValue": "0" },
                }),
            )
        })
        .collect();

    json!({
        "accountId": "test-account",
        "lifeTimeStats": lifetime_stats,
        "stats": stats,
    })
}

/// Wraps a JSON document as a fetched profile.
pub fn raw_response(identity: PlayerIdentity, body: &Value) -> RawResponse {
    RawResponse {
        identity,
        body: serde_json::to_vec(body).unwrap(),
    }
}

/// Offline profile source; identities without a stored body are not found.
#[derive(Debug, Default)]
pub struct FakeProfiles {
    bodies: HashMap<PlayerIdentity, Vec<u8>>,
}

impl FakeProfiles {
    /// Adds a JSON profile for `identity`.
    pub fn with(self, identity: PlayerIdentity, body: &Value) -> Self {
        self.with_body(identity, serde_json::to_vec(body).unwrap())
    }

    /// Adds raw body bytes for `identity`.
    pub fn with_body(mut self, identity: PlayerIdentity, body: Vec<u8>) -> Self {
        self.bodies.insert(identity, body);
        self
    }
}

impl ProfileSource for FakeProfiles {
    async fn fetch(&self, identity: &PlayerIdentity) -> Result<RawResponse> {
        self.bodies
            .get(identity)
            .map(|body| RawResponse {
                identity: identity.clone(),
                body: body.clone(),
            })
            .ok_or_else(|| Error::PlayerNotFound {
                name: identity.name.clone(),
            })
    }
}

/// One request as [`TestServer`] received it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// e.g. `GET /v1/profile/pc/Ninja HTTP/1.1`
    pub request_line: String,
    headers: Vec<(String, String)>,
    /// When the request head was fully read
    pub received_at: Instant,
}

impl RecordedRequest {
    /// Request target: path plus query.
    pub fn target(&self) -> &str {
        self.request_line.split(' ').nth(1).unwrap_or_default()
    }

    /// First header called `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Minimal HTTP/1.1 server on `127.0.0.1` answering from a routing closure.
///
/// The route gets the request target and returns `(status, body)`; `None`
/// keeps the connection open without ever answering. Connections are served
/// one at a time and closed after each response. The server stops on drop.
pub struct TestServer {
    url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    task: JoinHandle<()>,
}

impl TestServer {
    /// Binds an ephemeral port and starts serving.
    pub async fn start<F>(route: F) -> Self
    where
        F: Fn(&str) -> Option<(u16, String)> + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);

        let task = tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let Some(request) = read_request(&mut stream).await else {
                    continue;
                };
                let answer = route(request.target());
                recorded.lock().unwrap().push(request);
                match answer {
                    Some((status, body)) => {
                        let _ = write_response(&mut stream, status, &body).await;
                    }
                    None => std::future::pending::<()>().await,
                }
            }
        });

        Self {
            url,
            requests,
            task,
        }
    }

    /// `http://127.0.0.1:<port>`
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Everything received so far, in arrival order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn read_request(stream: &mut TcpStream) -> Option<RecordedRequest> {
    let mut buffer = Vec::new();
    let mut chunk = [0_u8; 1024];
    while !buffer.windows(4).any(|window| window == b"\r\n\r\n") {
        let read = stream.read(&mut chunk).await.ok()?;
        if read == 0 {
            return None;
        }
        buffer.extend_from_slice(&chunk[..read]);
    }

    let head = String::from_utf8_lossy(&buffer);
    let mut lines = head.split("\r\n");
    let request_line = lines.next()?.to_string();
    let headers = lines
        .take_while(|line| !line.is_empty())
        .filter_map(|line| line.split_once(':'))
        .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
        .collect();

    Some(RecordedRequest {
        request_line,
        headers,
        received_at: Instant::now(),
    })
}

async fn write_response(stream: &mut TcpStream, status: u16, body: &str) -> std::io::Result<()> {
    let response = format!(
        "HTTP/1.1 {status} Test\r\nContent-Type: application/json\r\n\
         Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}

/// Riot account id of `Hide on bush#KR1` in [`league_route`].
pub const FAKER_PUUID: &str = "faker-puuid";

fn live_game() -> Value {
    let player = |puuid: Option<&str>, riot_id: Option<&str>, champion, spells: (i64, i64), team| {
        json!({
            "puuid": puuid,
            "riotId": riot_id,
            "championId": champion,
            "spell1Id": spells.0,
            "spell2Id": spells.1,
            "teamId": team,
        })
    };
    json!({
        "gameLength": 754,
        "gameQueueConfigId": 420,
        "participants": [
            player(Some(FAKER_PUUID), Some("Hide on bush#KR1"), 7, (4, 14), 100),
            player(Some("mate-puuid"), Some("Teammate#KR1"), 103, (4, 12), 100),
            player(Some("enemy-puuid"), Some("Enemy#KR1"), 81, (4, 7), 200),
            player(None, None, 4, (4, 6), 200),
        ],
    })
}

/// Canned Riot API and Data Dragon for [`TestServer`].
///
/// `Hide on bush#KR1` is ranked and in a live game; `Doublelift#NA1` exists
/// but is unranked, has no masteries and is not playing. Every other account
/// is unknown.
pub fn league_route(target: &str) -> Option<(u16, String)> {
    const ACCOUNTS: &str = "/riot/account/v1/accounts/by-riot-id/";
    const SUMMONERS: &str = "/lol/summoner/v4/summoners/by-puuid/";
    const MASTERIES: &str = "/lol/champion-mastery/v4/champion-masteries/by-puuid/";
    const ENTRIES: &str = "/lol/league/v4/entries/by-puuid/";
    const SPECTATOR: &str = "/lol/spectator/v5/active-games/by-summoner/";

    let body = match target {
        t if t == format!("{ACCOUNTS}Hide%20on%20bush/KR1") => json!({
            "puuid": FAKER_PUUID, "gameName": "Hide on bush", "tagLine": "KR1",
        }),
        t if t == format!("{ACCOUNTS}Doublelift/NA1") => json!({
            "puuid": "doublelift-puuid", "gameName": "Doublelift", "tagLine": "NA1",
        }),
        t if t == format!("{SUMMONERS}{FAKER_PUUID}") => json!({ "summonerLevel": 742 }),
        t if t == format!("{SUMMONERS}doublelift-puuid") => json!({ "summonerLevel": 512 }),
        t if t == format!("{MASTERIES}{FAKER_PUUID}/top?count=3") => json!([
            { "championId": 7, "championPoints": 1_250_000 },
            { "championId": 4, "championPoints": 980_000 },
            { "championId": 103, "championPoints": 75_000 },
        ]),
        t if t.starts_with(MASTERIES) => json!([]),
        t if t == format!("{ENTRIES}{FAKER_PUUID}") => json!([
            {
                "queueType": "RANKED_SOLO_5x5", "tier": "CHALLENGER", "rank": "I",
                "leaguePoints": 1500, "wins": 300, "losses": 200,
            },
            {
                "queueType": "RANKED_FLEX_SR", "tier": "GOLD", "rank": "II",
                "leaguePoints": 100, "wins": 6, "losses": 4,
                "miniSeries": { "progress": "WLN", "target": 2, "wins": 1, "losses": 1 },
            },
        ]),
        t if t == format!("{ENTRIES}mate-puuid") => json!([{
            "queueType": "RANKED_SOLO_5x5", "tier": "GRANDMASTER", "rank": "I",
            "leaguePoints": 820, "wins": 111, "losses": 100,
        }]),
        t if t.starts_with(ENTRIES) => json!([]),
        t if t == format!("{SPECTATOR}{FAKER_PUUID}") => live_game(),
        "/api/versions.json" => json!(["14.1.1", "14.0.1"]),
        "/cdn/14.1.1/data/en_US/champion.json" => json!({
            "type": "champion",
            "data": {
                "LeBlanc": { "key": "7", "name": "LeBlanc" },
                "TwistedFate": { "key": "4", "name": "Twisted Fate" },
                "Ahri": { "key": "103", "name": "Ahri" },
                "Ezreal": { "key": "81", "name": "Ezreal" },
            },
        }),
        _ => return Some((404, json!({ "status": { "status_code": 404 } }).to_string())),
    };
    Some((200, body.to_string()))
}

#[test]
fn test_with_separators() {
    assert_eq!(with_separators(7), "7");
    assert_eq!(with_separators(1234), "1,234");
    assert_eq!(with_separators(12_345_678), "12,345,678");
}
