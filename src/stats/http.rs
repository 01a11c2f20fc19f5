//! Shared `reqwest` setup for the stats APIs.

use crate::errors::Result;
use std::time::Duration;

/// Some stats APIs reject default HTTP client identifiers, so requests
/// present themselves as a desktop browser.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 6.1; WOW64) AppleWebKit/537.11 \
     (KHTML, like Gecko) Chrome/23.0.1271.95 Safari/537.11";

/// Builds the HTTP client used for one external API.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(BROWSER_USER_AGENT)
        .timeout(timeout)
        .build()?;
    Ok(client)
}
