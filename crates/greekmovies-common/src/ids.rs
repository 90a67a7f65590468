//! Content identifiers and the codec that produces them.
//!
//! A [`ContentId`] is the namespace prefix glued to a source-site locator with
//! no escaping. Decoding strips the prefix again, so the mapping is exactly
//! invertible as long as nobody changes the prefix after IDs are handed out.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Opaque, namespace-prefixed identifier for one piece of content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentId(String);

impl ContentId {
    /// Wrap a raw identifier string as received from a client.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ContentId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<String> for ContentId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<ContentId> for String {
    fn from(id: ContentId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ContentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Bidirectional mapping between source-site locators and [`ContentId`]s.
///
/// Holds the two process-wide constants the mapping depends on: the
/// namespace prefix and the source-site origin (scheme and host, no trailing
/// slash).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdCodec {
    prefix: String,
    origin: String,
}

impl IdCodec {
    /// Create a codec for `prefix` IDs resolving against `origin`.
    pub fn new(prefix: impl Into<String>, origin: impl Into<String>) -> Self {
        let origin: String = origin.into();
        Self {
            prefix: prefix.into(),
            origin: origin.trim_end_matches('/').to_string(),
        }
    }

    /// The namespace prefix every encoded ID starts with.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The source-site origin relative locators resolve against.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Prepend the namespace prefix to `locator`, unmodified.
    pub fn encode(&self, locator: &str) -> ContentId {
        ContentId(format!("{}{}", self.prefix, locator))
    }

    /// Strip the namespace prefix from `id`.
    ///
    /// Returns [`Error::NamespaceMismatch`] if the ID belongs to someone else.
    pub fn decode<'a>(&self, id: &'a ContentId) -> Result<&'a str> {
        id.as_str()
            .strip_prefix(self.prefix.as_str())
            .ok_or_else(|| Error::NamespaceMismatch(id.to_string()))
    }

    /// Returns `true` when `id` carries this codec's namespace prefix.
    pub fn owns(&self, id: &ContentId) -> bool {
        id.as_str().starts_with(self.prefix.as_str())
    }

    /// Resolve `locator` to an absolute URL.
    ///
    /// `http`/`https` URLs pass through unchanged; scheme-relative references
    /// (`//host/path`) get `https:`; anything else is joined onto the origin.
    /// The result is always absolute, so applying this twice is a no-op.
    pub fn to_absolute(&self, locator: &str) -> String {
        if has_http_scheme(locator) {
            return locator.to_string();
        }
        if let Some(rest) = locator.strip_prefix("//") {
            return format!("https://{rest}");
        }
        if locator.starts_with('/') {
            format!("{}{}", self.origin, locator)
        } else {
            format!("{}/{}", self.origin, locator)
        }
    }

    /// Decode `id` and resolve it to the absolute URL of its source page.
    ///
    /// An empty locator is rejected with [`Error::EmptyLocator`] so callers
    /// never issue a request against the bare origin by accident.
    pub fn resolve(&self, id: &ContentId) -> Result<String> {
        let locator = self.decode(id)?;
        if locator.trim().is_empty() {
            return Err(Error::EmptyLocator(id.to_string()));
        }
        Ok(self.to_absolute(locator))
    }
}

fn has_http_scheme(s: &str) -> bool {
    let lower = s.get(..8).unwrap_or(s).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
