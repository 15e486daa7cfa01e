//! Content fetching from URLs, files, and stdin.
//!
//! [`fetch_url`] makes a fixed number of attempts at a page, waiting between
//! failures and backing off a little longer when the response is a bot
//! challenge interstitial rather than the page itself.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

#[cfg(feature = "fetch")]
use reqwest::Client;
#[cfg(feature = "fetch")]
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE};
#[cfg(feature = "fetch")]
use url::Url;

use crate::{DocsplitError, Result};

/// Browser-like User-Agent; several documentation hosts reject obvious bots.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// HTTP client configuration for fetching documentation pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
    /// Total number of attempts before giving up.
    pub max_attempts: u32,
    /// Pause after a failed attempt.
    pub retry_delay: Duration,
    /// Pause after receiving a bot challenge page.
    pub challenge_delay: Duration,
    /// Lowercase substrings that identify a bot challenge page.
    pub challenge_markers: Vec<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_attempts: 3,
            retry_delay: Duration::from_secs(3),
            challenge_delay: Duration::from_secs(5),
            challenge_markers: vec![
                "just a moment".to_string(),
                "challenge-platform".to_string(),
                "cf-chl-".to_string(),
            ],
        }
    }
}

/// Returns the first challenge marker found in `body`, if any.
pub fn challenge_marker<'a>(body: &str, markers: &'a [String]) -> Option<&'a str> {
    let lowered = body.to_lowercase();
    markers
        .iter()
        .find(|marker| !marker.is_empty() && lowered.contains(marker.as_str()))
        .map(String::as_str)
}

/// Fetches HTML content from a URL.
///
/// Makes up to `config.max_attempts` GET requests. Transport errors and
/// non-success statuses are retried after `retry_delay`; challenge pages are
/// retried after `challenge_delay`. An invalid URL fails immediately.
#[cfg(feature = "fetch")]
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<String> {
    let parsed_url = Url::parse(url).map_err(|e| DocsplitError::InvalidUrl(e.to_string()))?;

    if !matches!(parsed_url.scheme(), "http" | "https") {
        return Err(DocsplitError::InvalidUrl(format!(
            "{url}: URL must use http:// or https://"
        )));
    }

    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .user_agent(config.user_agent.as_str())
        .build()?;

    let attempts = config.max_attempts.max(1);
    let mut last_error = String::from("no attempt made");
    let mut timed_out = false;

    for attempt in 1..=attempts {
        tracing::debug!(url = %parsed_url, attempt, "Fetching page");

        match fetch_once(&client, &parsed_url).await {
            Ok(body) => {
                if let Some(marker) = challenge_marker(&body, &config.challenge_markers) {
                    tracing::warn!(
                        url = %parsed_url,
                        attempt,
                        max_attempts = attempts,
                        marker,
                        "Bot challenge page detected, waiting longer"
                    );
                    last_error = format!("bot challenge page detected ({marker})");
                    timed_out = false;
                    if attempt < attempts {
                        tokio::time::sleep(config.challenge_delay).await;
                    }
                    continue;
                }

                tracing::debug!(url = %parsed_url, bytes = body.len(), "Fetched page");
                return Ok(body);
            }
            Err(e) => {
                tracing::warn!(
                    url = %parsed_url,
                    error = %e,
                    attempt,
                    max_attempts = attempts,
                    "Fetch attempt failed"
                );
                timed_out = e.is_timeout();
                last_error = e.to_string();
                if attempt < attempts {
                    tokio::time::sleep(config.retry_delay).await;
                }
            }
        }
    }

    if timed_out {
        Err(DocsplitError::Timeout { timeout: config.timeout })
    } else {
        Err(DocsplitError::RetriesExhausted { attempts, message: last_error })
    }
}

#[cfg(feature = "fetch")]
async fn fetch_once(client: &Client, url: &Url) -> reqwest::Result<String> {
    client
        .get(url.clone())
        .header(ACCEPT, "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
        .header(ACCEPT_LANGUAGE, "en-US,en;q=0.9")
        .send()
        .await?
        .error_for_status()?
        .text()
        .await
}

/// Reads content from a local file.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        Err(DocsplitError::FileNotFound(path_buf))
    } else {
        fs::read_to_string(&path_buf).map_err(DocsplitError::from)
    }
}

/// Reads content from standard input until EOF.
pub fn fetch_stdin() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(DocsplitError::from)?;

    Ok(buffer)
}
