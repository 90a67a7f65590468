//! Extraction engine for the greekmovies catalog add-on.
//!
//! Three extractors read the source site's HTML:
//!
//! - [`listing::ListingExtractor`] turns the listing page into catalog entries,
//! - [`detail::DetailExtractor`] reads one content page into a detail record,
//! - [`stream::StreamExtractor`] finds the embedded player on a content page.
//!
//! They share a [`fetch::Fetcher`] and a compiled
//! [`selectors::SelectorProfile`]. The [`coordinator::Coordinator`] sits in
//! front of them, dispatches add-on requests and turns every failure into an
//! empty response.

pub mod coordinator;
pub mod detail;
pub mod fetch;
pub mod listing;
pub mod search;
pub mod selectors;
pub mod stream;

pub use coordinator::{AddonRequest, AddonResponse, Coordinator, ExtractionSettings};
pub use fetch::{FetchConfig, FetchResponse, Fetcher, HttpFetcher};
pub use listing::ListingConfig;
pub use search::SearchMode;
pub use selectors::SelectorProfile;
pub use stream::StreamPolicy;

#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use greekmovies_common::{Error, Result};

    use crate::fetch::{FetchResponse, Fetcher};

    /// Serves fixed bodies by URL; anything else is a 404.
    #[derive(Default)]
    pub struct PageFetcher {
        pages: HashMap<String, String>,
        requests: AtomicUsize,
    }

    impl PageFetcher {
        pub fn single(url: &str, body: &str) -> Self {
            Self::default().with_page(url, body)
        }

        pub fn with_page(mut self, url: &str, body: &str) -> Self {
            self.pages.insert(url.to_string(), body.to_string());
            self
        }

        pub fn requests(&self) -> usize {
            self.requests.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Fetcher for PageFetcher {
        async fn fetch(&self, url: &str) -> Result<FetchResponse> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            Ok(match self.pages.get(url) {
                Some(body) => FetchResponse {
                    status: 200,
                    body: body.clone(),
                },
                None => FetchResponse {
                    status: 404,
                    body: String::new(),
                },
            })
        }
    }

    /// Fails every request at the transport level.
    pub struct FailingFetcher;

    #[async_trait]
    impl Fetcher for FailingFetcher {
        async fn fetch(&self, url: &str) -> Result<FetchResponse> {
            Err(Error::fetch(url, "connection refused"))
        }
    }
}
