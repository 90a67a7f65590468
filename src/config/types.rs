use std::num::NonZeroU32;
use std::time::Duration;

use greekmovies_common::{IdCodec, DEFAULT_PLACEHOLDER_TITLE};
use greekmovies_scraper::coordinator::DEFAULT_CATALOG_ID;
use greekmovies_scraper::fetch::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
use greekmovies_scraper::listing::{DEFAULT_LISTING_PATH, DEFAULT_MAX_RESULTS};
use greekmovies_scraper::stream::{DEFAULT_ALLOWED_HOSTS, DEFAULT_STREAM_LABEL};
use greekmovies_scraper::{
    ExtractionSettings, FetchConfig, ListingConfig, SearchMode, SelectorProfile, StreamPolicy,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub addon: AddonConfig,

    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub selectors: SelectorProfile,

    #[serde(default)]
    pub streams: StreamsConfig,
}

impl Config {
    /// The codec for IDs handed out by this add-on.
    pub fn codec(&self) -> IdCodec {
        IdCodec::new(self.addon.id_prefix.as_str(), self.source.origin.as_str())
    }

    /// Extractor settings derived from the `[addon]`, `[source]`,
    /// `[selectors]` and `[streams]` sections.
    pub fn extraction_settings(&self) -> ExtractionSettings {
        ExtractionSettings {
            codec: self.codec(),
            catalog_id: self.addon.catalog_id.clone(),
            listing: ListingConfig {
                listing_path: self.source.listing_path.clone(),
                search: self.source.search.clone(),
                max_results: self.source.max_results,
            },
            selectors: self.selectors.clone(),
            placeholder_title: self.addon.placeholder_title.clone(),
            stream: StreamPolicy {
                label: self.addon.stream_label.clone(),
                allowed_hosts: self.streams.allowed_hosts.clone(),
            },
        }
    }

    /// Outbound HTTP settings from the `[source]` section.
    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            timeout: Duration::from_secs(self.source.timeout_secs),
            user_agent: self.source.user_agent.clone(),
            requests_per_second: self.source.requests_per_second.and_then(NonZeroU32::new),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    7000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Identity of the add-on as announced in its manifest, plus the ID scheme.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AddonConfig {
    pub id: String,
    pub version: String,
    pub name: String,
    pub description: String,

    /// Namespace prefix of every content ID. Changing it invalidates IDs
    /// already handed out to clients.
    pub id_prefix: String,

    pub catalog_id: String,
    pub catalog_name: String,

    /// Label shown on the single stream offered per title.
    pub stream_label: String,

    /// Title used when a page offers none.
    pub placeholder_title: String,
}

impl Default for AddonConfig {
    fn default() -> Self {
        Self {
            id: "org.greekmovies.addon".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            name: "Greek Movies".to_string(),
            description: "Δες ελληνικές ταινίες από το greek-movies.com".to_string(),
            id_prefix: "greekm:".to_string(),
            catalog_id: DEFAULT_CATALOG_ID.to_string(),
            catalog_name: "Greek Movies".to_string(),
            stream_label: DEFAULT_STREAM_LABEL.to_string(),
            placeholder_title: DEFAULT_PLACEHOLDER_TITLE.to_string(),
        }
    }
}

/// The site being scraped.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Absolute origin every relative locator resolves against.
    pub origin: String,

    pub listing_path: String,

    pub search: SearchMode,

    pub max_results: usize,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// Outbound request budget; unset or 0 disables limiting.
    pub requests_per_second: Option<u32>,

    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            origin: "https://greek-movies.com".to_string(),
            listing_path: DEFAULT_LISTING_PATH.to_string(),
            search: SearchMode::default(),
            max_results: DEFAULT_MAX_RESULTS,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            requests_per_second: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct StreamsConfig {
    /// Video hosts accepted as stream targets. Empty accepts any host.
    pub allowed_hosts: Vec<String>,
}

impl Default for StreamsConfig {
    fn default() -> Self {
        Self {
            allowed_hosts: DEFAULT_ALLOWED_HOSTS.iter().map(|h| h.to_string()).collect(),
        }
    }
}
