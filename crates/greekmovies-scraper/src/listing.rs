//! Catalog listing extraction.
//!
//! Turns the source site's listing page into an ordered list of
//! [`ContentSummary`] values. Entries without a link are dropped; a missing
//! title becomes the placeholder; a missing poster is simply omitted.

use std::sync::Arc;

use greekmovies_common::{ContentKind, ContentSummary, IdCodec, Result};
use scraper::Html;
use tracing::debug;

use crate::fetch::{fetch_page, Fetcher};
use crate::search::{matches_query, search_path, SearchMode};
use crate::selectors::{CompiledListing, CompiledProfile};

/// Default cap on catalog results.
pub const DEFAULT_MAX_RESULTS: usize = 30;

/// Default listing page, relative to the source origin.
pub const DEFAULT_LISTING_PATH: &str = "/movies.php";

/// Where and how the catalog is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingConfig {
    pub listing_path: String,
    pub search: SearchMode,
    pub max_results: usize,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            listing_path: DEFAULT_LISTING_PATH.to_string(),
            search: SearchMode::default(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

pub struct ListingExtractor {
    fetcher: Arc<dyn Fetcher>,
    codec: IdCodec,
    rules: Arc<CompiledProfile>,
    config: ListingConfig,
    placeholder_title: String,
}

impl ListingExtractor {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        codec: IdCodec,
        rules: Arc<CompiledProfile>,
        config: ListingConfig,
        placeholder_title: String,
    ) -> Self {
        Self {
            fetcher,
            codec,
            rules,
            config,
            placeholder_title,
        }
    }

    /// Absolute URL of the page to fetch for `query`.
    pub fn listing_url(&self, query: Option<&str>) -> String {
        match (query, &self.config.search) {
            (Some(term), SearchMode::Server { path }) => {
                self.codec.to_absolute(&search_path(path, term))
            }
            _ => self.codec.to_absolute(&self.config.listing_path),
        }
    }

    /// Fetch and extract the catalog, optionally narrowed by `query`.
    ///
    /// Fails only when the page cannot be fetched.
    pub async fn list_catalog(&self, query: Option<&str>) -> Result<Vec<ContentSummary>> {
        let url = self.listing_url(query);
        let html = fetch_page(self.fetcher.as_ref(), &url).await?;

        let mut summaries = self.extract(&html);
        if let (Some(term), SearchMode::ClientFilter) = (query, &self.config.search) {
            summaries.retain(|s| matches_query(&s.title, term));
        }

        debug!(url = %url, count = summaries.len(), "Catalog extracted");
        Ok(summaries)
    }

    /// Extract capped summaries from a listing page, in document order.
    pub fn extract(&self, html: &str) -> Vec<ContentSummary> {
        let document = Html::parse_document(html);
        let rules: &CompiledListing = &self.rules.listing;

        rules
            .entry
            .select(&document)
            .into_iter()
            .filter_map(|entry| {
                let locator = rules.link.first(entry)?;
                let title = rules
                    .title
                    .first(entry)
                    .unwrap_or_else(|| self.placeholder_title.clone());
                let poster_url = rules
                    .poster
                    .first(entry)
                    .map(|src| self.codec.to_absolute(&src));

                Some(ContentSummary {
                    id: self.codec.encode(&locator),
                    kind: ContentKind::Movie,
                    title,
                    poster_url,
                })
            })
            .take(self.config.max_results)
            .collect()
    }
}
