//! Request dispatch and the empty-result policy.
//!
//! The [`Coordinator`] owns one extractor per resource kind and is the only
//! place where extraction errors are dropped. Every failure is logged by its
//! [`FailureKind`] and replaced with the empty value for the requested
//! resource, so callers always receive a well-formed [`AddonResponse`].

use std::sync::Arc;

use greekmovies_common::{
    ContentDetail, ContentId, ContentKind, ContentSummary, Error, ExtraArgs, FailureKind,
    IdCodec, ResourceKind, Result, StreamDescriptor, DEFAULT_PLACEHOLDER_TITLE,
};
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::detail::DetailExtractor;
use crate::fetch::Fetcher;
use crate::listing::{ListingConfig, ListingExtractor};
use crate::selectors::SelectorProfile;
use crate::stream::{StreamExtractor, StreamPolicy};

/// Default catalog id announced in the manifest.
pub const DEFAULT_CATALOG_ID: &str = "greek-movies";

// ---------------------------------------------------------------------------
// Request / response
// ---------------------------------------------------------------------------

/// One inbound add-on request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddonRequest {
    /// Raw resource name; unknown names are answered with
    /// [`AddonResponse::Unsupported`].
    pub resource: String,
    pub content_type: String,
    /// Catalog id for catalog requests, content id otherwise.
    pub id: String,
    pub extra: ExtraArgs,
}

impl AddonRequest {
    pub fn new(
        resource: impl Into<String>,
        content_type: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self {
            resource: resource.into(),
            content_type: content_type.into(),
            id: id.into(),
            extra: ExtraArgs::default(),
        }
    }

    pub fn with_extra(mut self, extra: ExtraArgs) -> Self {
        self.extra = extra;
        self
    }
}

/// Response body for each resource kind, in wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AddonResponse {
    Catalog { metas: Vec<ContentSummary> },
    Meta { meta: Option<ContentDetail> },
    Stream { streams: Vec<StreamDescriptor> },
    /// The resource kind is not one we serve.
    Unsupported {},
}

impl AddonResponse {
    /// The value returned for `kind` whenever extraction cannot produce one.
    pub fn empty(kind: ResourceKind) -> Self {
        match kind {
            ResourceKind::Catalog => AddonResponse::Catalog { metas: Vec::new() },
            ResourceKind::Meta => AddonResponse::Meta { meta: None },
            ResourceKind::Stream => AddonResponse::Stream {
                streams: Vec::new(),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Everything the extractors need besides the fetcher.
#[derive(Debug, Clone)]
pub struct ExtractionSettings {
    pub codec: IdCodec,
    pub catalog_id: String,
    pub listing: ListingConfig,
    pub selectors: SelectorProfile,
    pub placeholder_title: String,
    pub stream: StreamPolicy,
}

impl ExtractionSettings {
    pub fn new(codec: IdCodec) -> Self {
        Self {
            codec,
            catalog_id: DEFAULT_CATALOG_ID.to_string(),
            listing: ListingConfig::default(),
            selectors: SelectorProfile::default(),
            placeholder_title: DEFAULT_PLACEHOLDER_TITLE.to_string(),
            stream: StreamPolicy::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Coordinator
// ---------------------------------------------------------------------------

pub struct Coordinator {
    codec: IdCodec,
    catalog_id: String,
    listing: ListingExtractor,
    detail: DetailExtractor,
    stream: StreamExtractor,
}

impl Coordinator {
    /// Build the extractors. Fails only if a configured selector does not
    /// compile.
    pub fn new(fetcher: Arc<dyn Fetcher>, settings: ExtractionSettings) -> Result<Self> {
        let rules = Arc::new(settings.selectors.compile()?);

        Ok(Self {
            listing: ListingExtractor::new(
                fetcher.clone(),
                settings.codec.clone(),
                rules.clone(),
                settings.listing,
                settings.placeholder_title.clone(),
            ),
            detail: DetailExtractor::new(
                fetcher.clone(),
                settings.codec.clone(),
                rules.clone(),
                settings.placeholder_title,
            ),
            stream: StreamExtractor::new(fetcher, settings.codec.clone(), rules, settings.stream),
            codec: settings.codec,
            catalog_id: settings.catalog_id,
        })
    }

    /// Catalog entries, empty on any failure.
    pub async fn list_catalog(&self, query: Option<&str>) -> Vec<ContentSummary> {
        match self.listing.list_catalog(query).await {
            Ok(items) => items,
            Err(e) => {
                report(ResourceKind::Catalog, &e);
                Vec::new()
            }
        }
    }

    /// Detail record, `None` on any failure.
    pub async fn get_detail(&self, id: &ContentId) -> Option<ContentDetail> {
        match self.detail.get_detail(id).await {
            Ok(detail) => Some(detail),
            Err(e) => {
                report(ResourceKind::Meta, &e);
                None
            }
        }
    }

    /// Streams for `id`, empty on any failure.
    pub async fn get_streams(&self, id: &ContentId) -> Vec<StreamDescriptor> {
        match self.stream.get_streams(id).await {
            Ok(streams) => streams,
            Err(e) => {
                report(ResourceKind::Stream, &e);
                Vec::new()
            }
        }
    }

    /// Dispatch a request to its extractor.
    pub async fn handle(&self, request: &AddonRequest) -> AddonResponse {
        let Ok(kind) = request.resource.parse::<ResourceKind>() else {
            debug!(resource = %request.resource, "Unsupported resource requested");
            return AddonResponse::Unsupported {};
        };

        if request.content_type.parse::<ContentKind>().is_err() {
            debug!(resource = %kind, content_type = %request.content_type, "Unsupported content type");
            return AddonResponse::empty(kind);
        }

        if kind == ResourceKind::Catalog {
            if request.id != self.catalog_id {
                debug!(catalog = %request.id, "Unknown catalog requested");
                return AddonResponse::empty(kind);
            }
            return AddonResponse::Catalog {
                metas: self.list_catalog(request.extra.search_term()).await,
            };
        }

        let id = ContentId::from(request.id.as_str());
        if !self.codec.owns(&id) {
            debug!(resource = %kind, id = %id, "Content id outside our namespace");
            return AddonResponse::empty(kind);
        }

        match kind {
            ResourceKind::Meta => AddonResponse::Meta {
                meta: self.get_detail(&id).await,
            },
            ResourceKind::Stream => AddonResponse::Stream {
                streams: self.get_streams(&id).await,
            },
            ResourceKind::Catalog => AddonResponse::empty(kind),
        }
    }
}

fn report(resource: ResourceKind, e: &Error) {
    match e.kind() {
        FailureKind::FetchFailure => warn!(resource = %resource, error = %e, "Source fetch failed"),
        FailureKind::NamespaceMismatch => {
            debug!(resource = %resource, error = %e, "Content id not served here")
        }
        FailureKind::Configuration => error!(resource = %resource, error = %e, "Extraction failed"),
    }
}
