//! Playable stream extraction.
//!
//! The source pages embed their players through iframes, next to ad and
//! tracking frames. Only frames pointing at a known video host are offered.

use std::sync::Arc;

use greekmovies_common::{ContentId, IdCodec, Result, StreamDescriptor};
use scraper::Html;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::fetch::{fetch_page, Fetcher};
use crate::selectors::CompiledProfile;

pub const DEFAULT_STREAM_LABEL: &str = "Greek Movies Stream";

/// Video hosts whose players are accepted by default.
pub const DEFAULT_ALLOWED_HOSTS: &[&str] = &[
    "ok.ru",
    "youtube.com",
    "youtube-nocookie.com",
    "youtu.be",
    "vimeo.com",
    "dailymotion.com",
];

/// Which embedded players become streams, and how they are labelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamPolicy {
    pub label: String,
    /// Accepted hosts; subdomains match too. Empty accepts any host.
    pub allowed_hosts: Vec<String>,
}

impl Default for StreamPolicy {
    fn default() -> Self {
        Self {
            label: DEFAULT_STREAM_LABEL.to_string(),
            allowed_hosts: DEFAULT_ALLOWED_HOSTS.iter().map(|h| h.to_string()).collect(),
        }
    }
}

impl StreamPolicy {
    /// Whether `url` is an absolute http(s) URL on an accepted host.
    pub fn allows(&self, url: &str) -> bool {
        let Ok(parsed) = Url::parse(url) else {
            return false;
        };
        if !matches!(parsed.scheme(), "http" | "https") {
            return false;
        }
        let Some(host) = parsed.host_str() else {
            return false;
        };
        if self.allowed_hosts.is_empty() {
            return true;
        }

        let host = host.to_ascii_lowercase();
        self.allowed_hosts.iter().any(|allowed| {
            let allowed = allowed.trim().to_ascii_lowercase();
            host == allowed || host.ends_with(&format!(".{allowed}"))
        })
    }
}

pub struct StreamExtractor {
    fetcher: Arc<dyn Fetcher>,
    codec: IdCodec,
    rules: Arc<CompiledProfile>,
    policy: StreamPolicy,
}

impl StreamExtractor {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        codec: IdCodec,
        rules: Arc<CompiledProfile>,
        policy: StreamPolicy,
    ) -> Self {
        Self {
            fetcher,
            codec,
            rules,
            policy,
        }
    }

    /// Fetch the page behind `id` and return at most one playable stream.
    pub async fn get_streams(&self, id: &ContentId) -> Result<Vec<StreamDescriptor>> {
        let url = self.codec.resolve(id)?;
        let html = fetch_page(self.fetcher.as_ref(), &url).await?;
        let streams = self.extract(&html);
        debug!(url = %url, count = streams.len(), "Streams extracted");
        Ok(streams)
    }

    /// First accepted player on the page, as a single-element list.
    pub fn extract(&self, html: &str) -> Vec<StreamDescriptor> {
        let document = Html::parse_document(html);

        self.rules
            .stream
            .player
            .per_node(document.root_element())
            .into_iter()
            .map(|src| self.codec.to_absolute(&src))
            .find(|src| self.policy.allows(src))
            .map(|playback_url| StreamDescriptor {
                label: self.policy.label.clone(),
                playback_url,
                is_free: true,
            })
            .into_iter()
            .collect()
    }
}
