//! Outbound fetch capability.
//!
//! Extractors talk to the source site through the [`Fetcher`] trait so tests
//! can swap in canned pages. [`HttpFetcher`] is the production implementation
//! on top of `reqwest`.
//!
//! Features of [`HttpFetcher`]:
//! - Per-request timeout; expiry surfaces as [`Error::Timeout`].
//! - Optional token-bucket rate limiting via [`governor`].
//! - No retries. One call, one request.

use std::num::NonZeroU32;
use std::time::Duration;

use async_trait::async_trait;
use governor::{Quota, RateLimiter};
use greekmovies_common::{Error, Result};
use tracing::debug;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Default time budget for one outbound request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Default User-Agent sent to the source site.
pub const DEFAULT_USER_AGENT: &str =
    concat!("greekmovies/", env!("CARGO_PKG_VERSION"), " (+catalog add-on)");

// ---------------------------------------------------------------------------
// Fetcher trait
// ---------------------------------------------------------------------------

/// Status and body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Fetch an absolute URL and return its status and body.
///
/// Implementations return `Err` only for transport-level failures; any HTTP
/// status, including errors, comes back as a [`FetchResponse`].
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchResponse>;
}

/// Fetch `url` and return its body, treating non-2xx statuses as failures.
pub(crate) async fn fetch_page(fetcher: &dyn Fetcher, url: &str) -> Result<String> {
    debug!(url = %url, "Fetching source page");
    let response = fetcher.fetch(url).await?;
    if !response.is_success() {
        return Err(Error::Status {
            url: url.to_string(),
            status: response.status,
        });
    }
    Ok(response.body)
}

// ---------------------------------------------------------------------------
// HTTP implementation
// ---------------------------------------------------------------------------

/// Settings for [`HttpFetcher`].
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub timeout: Duration,
    pub user_agent: String,
    /// `None` disables rate limiting.
    pub requests_per_second: Option<NonZeroU32>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            requests_per_second: None,
        }
    }
}

/// [`Fetcher`] backed by a shared `reqwest` client.
///
/// # Examples
///
/// ```no_run
/// use greekmovies_scraper::fetch::{FetchConfig, HttpFetcher};
///
/// let fetcher = HttpFetcher::new(&FetchConfig::default()).unwrap();
/// ```
pub struct HttpFetcher {
    client: reqwest::Client,
    rate_limiter: Option<
        RateLimiter<
            governor::state::NotKeyed,
            governor::state::InMemoryState,
            governor::clock::DefaultClock,
        >,
    >,
}

impl HttpFetcher {
    /// Build a fetcher from `config`.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| Error::Internal(format!("failed to build HTTP client: {e}")))?;

        let rate_limiter = config
            .requests_per_second
            .map(|rps| RateLimiter::direct(Quota::per_second(rps)));

        Ok(Self {
            client,
            rate_limiter,
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResponse> {
        if let Some(limiter) = &self.rate_limiter {
            limiter.until_ready().await;
        }

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| map_reqwest_error(url, e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| map_reqwest_error(url, e))?;

        debug!(url = %url, status, bytes = body.len(), "Source page fetched");
        Ok(FetchResponse { status, body })
    }
}

fn map_reqwest_error(url: &str, e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Timeout {
            url: url.to_string(),
        }
    } else {
        Error::fetch(url, e)
    }
}
