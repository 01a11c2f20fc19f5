//! Fortnite Tracker profile client.
//!
//! Builds the platform-specific profile URL, waits on the shared rate limiter
//! and classifies the upstream answer. Parsing the payload is left to
//! [`crate::stats::normalizer`].

use crate::errors::{Error, Result};
use crate::stats::identity::PlayerIdentity;
use crate::stats::rate_limiter::RateLimiter;
use reqwest::header::ACCEPT;
use reqwest::{StatusCode, Url};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Header carrying the Tracker Network API key.
pub const API_KEY_HEADER: &str = "TRN-Api-Key";

/// Undecoded profile payload for one player, known to be a JSON document
/// that is not an upstream error object.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// Who the payload belongs to
    pub identity: PlayerIdentity,
    /// Response body bytes
    pub body: Vec<u8>,
}

/// Anything that can produce a raw Fortnite profile for an identity.
///
/// The command layer is written against this trait so it can run without
/// network access in tests.
pub trait ProfileSource {
    /// Fetches the raw profile payload of `identity`.
    fn fetch(
        &self,
        identity: &PlayerIdentity,
    ) -> impl Future<Output = Result<RawResponse>> + Send;
}

/// Rate-limited HTTP client for the Fortnite Tracker profile endpoint.
#[derive(Debug, Clone)]
pub struct FortniteClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
    limiter: Arc<RateLimiter>,
}

impl FortniteClient {
    /// Creates a client rooted at `base_url` (e.g. `https://api.fortnitetracker.com/v1/profile`).
    ///
    /// Clones share the same `limiter`, which is what keeps every request to
    /// the API spaced out regardless of which command issued it.
    pub fn new(
        http: reqwest::Client,
        base_url: &str,
        api_key: impl Into<String>,
        limiter: Arc<RateLimiter>,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| Error::Config {
            message: format!("Invalid Fortnite base URL '{base_url}': {e}"),
        })?;
        Ok(Self {
            http,
            base_url,
            api_key: api_key.into(),
            limiter,
        })
    }

    /// Profile URL for `identity` under this client's base URL.
    pub fn profile_url(&self, identity: &PlayerIdentity) -> Result<Url> {
        profile_url(&self.base_url, identity)
    }
}

impl ProfileSource for FortniteClient {
    #[instrument(skip(self, identity), fields(player = %identity))]
    async fn fetch(&self, identity: &PlayerIdentity) -> Result<RawResponse> {
        let url = self.profile_url(identity)?;

        self.limiter.acquire().await;
        debug!(%url, "Sending GET request");

        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .inspect_err(|e| warn!("Profile request failed: {}", e))?;

        let status = response.status();
        info!(status = status.as_u16(), "Received profile response");
        let body = response.bytes().await?;

        interpret_response(identity, status, body.to_vec())
    }
}

/// Builds `{base}/{platform}/{name}`.
///
/// Console accounts are addressed as `({platform}) {name}` in the last
/// segment. Segments are percent-encoded, so spaces become `%20`.
pub fn profile_url(base: &Url, identity: &PlayerIdentity) -> Result<Url> {
    let token = identity.platform.token();
    let name_segment = if identity.platform.is_console() {
        format!("({token}) {}", identity.name)
    } else {
        identity.name.clone()
    };

    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| Error::Config {
            message: format!("Base URL '{base}' cannot carry a path"),
        })?
        .pop_if_empty()
        .push(token)
        .push(&name_segment);
    Ok(url)
}

/// Classifies an upstream answer.
///
/// 429 means the limiter was bypassed or misconfigured; any other failure
/// status, or a JSON body with an `error` field, means the player does not exist.
pub fn interpret_response(
    identity: &PlayerIdentity,
    status: StatusCode,
    body: Vec<u8>,
) -> Result<RawResponse> {
    if status == StatusCode::TOO_MANY_REQUESTS {
        warn!("Upstream reported a rate limit violation");
        return Err(Error::RateLimitExceeded);
    }

    let not_found = || Error::PlayerNotFound {
        name: identity.name.clone(),
    };

    if !status.is_success() {
        return Err(not_found());
    }

    let document: serde_json::Value = serde_json::from_slice(&body)
        .map_err(|e| Error::malformed(format!("profile body is not JSON: {e}")))?;
    if let Some(error) = document.get("error") {
        debug!(%error, "Upstream reported an error for the profile");
        return Err(not_found());
    }

    Ok(RawResponse {
        identity: identity.clone(),
        body,
    })
}
