//! Content detail extraction.
//!
//! A page that loads always produces a record: layout mismatches degrade to
//! the placeholder title, no poster, and an empty synopsis. Only a failed
//! fetch (or an ID we cannot resolve) yields an error.

use std::sync::Arc;

use greekmovies_common::{ContentDetail, ContentId, ContentKind, IdCodec, Result};
use scraper::Html;
use tracing::debug;

use crate::fetch::{fetch_page, Fetcher};
use crate::selectors::CompiledProfile;

pub struct DetailExtractor {
    fetcher: Arc<dyn Fetcher>,
    codec: IdCodec,
    rules: Arc<CompiledProfile>,
    placeholder_title: String,
}

impl DetailExtractor {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        codec: IdCodec,
        rules: Arc<CompiledProfile>,
        placeholder_title: String,
    ) -> Self {
        Self {
            fetcher,
            codec,
            rules,
            placeholder_title,
        }
    }

    /// Fetch the source page behind `id` and extract its detail record.
    pub async fn get_detail(&self, id: &ContentId) -> Result<ContentDetail> {
        let url = self.codec.resolve(id)?;
        let html = fetch_page(self.fetcher.as_ref(), &url).await?;
        let detail = self.extract(id, &html);
        debug!(url = %url, title = %detail.title, "Detail extracted");
        Ok(detail)
    }

    /// Build the detail record for `id` from its page markup.
    pub fn extract(&self, id: &ContentId, html: &str) -> ContentDetail {
        let document = Html::parse_document(html);
        let root = document.root_element();
        let rules = &self.rules.detail;

        ContentDetail {
            id: id.clone(),
            kind: ContentKind::Movie,
            title: rules
                .title
                .first(root)
                .unwrap_or_else(|| self.placeholder_title.clone()),
            poster_url: rules
                .poster
                .first(root)
                .map(|src| self.codec.to_absolute(&src)),
            synopsis: rules.synopsis.first(root).unwrap_or_default(),
        }
    }
}
