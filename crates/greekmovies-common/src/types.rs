//! Content model shared by the extractors and the HTTP layer.
//!
//! Field names follow the add-on wire format (`type`, `name`, `poster`,
//! `description`), so these records serialize straight into responses.

use serde::{Deserialize, Serialize};

use crate::ids::ContentId;

/// Placeholder title used when a page offers no usable title.
pub const DEFAULT_PLACEHOLDER_TITLE: &str = "Untitled";

/// Kind of content exposed by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// A feature film.
    #[default]
    Movie,
}

impl ContentKind {
    /// The wire name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Movie => "movie",
        }
    }
}

impl std::str::FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" => Ok(ContentKind::Movie),
            other => Err(format!("unsupported content type: {other}")),
        }
    }
}

/// Resource kinds an add-on client can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// Catalog listing, optionally filtered by a search term.
    Catalog,
    /// Metadata for one content item.
    Meta,
    /// Playable streams for one content item.
    Stream,
}

impl ResourceKind {
    /// All resource kinds, in manifest order.
    pub const ALL: [ResourceKind; 3] = [ResourceKind::Catalog, ResourceKind::Stream, ResourceKind::Meta];

    /// The wire name of this resource.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Catalog => "catalog",
            ResourceKind::Meta => "meta",
            ResourceKind::Stream => "stream",
        }
    }
}

impl std::str::FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "catalog" => Ok(ResourceKind::Catalog),
            "meta" => Ok(ResourceKind::Meta),
            "stream" => Ok(ResourceKind::Stream),
            other => Err(format!("unknown resource: {other}")),
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lightweight catalog entry produced by the listing extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSummary {
    pub id: ContentId,
    #[serde(rename = "type")]
    pub kind: ContentKind,
    #[serde(rename = "name")]
    pub title: String,
    #[serde(rename = "poster", default, skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
}

/// Full record for one content item, produced by the detail extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDetail {
    /// Always the ID the lookup was made with.
    pub id: ContentId,
    #[serde(rename = "type")]
    pub kind: ContentKind,
    #[serde(rename = "name")]
    pub title: String,
    #[serde(rename = "poster", default, skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    /// Empty when the page has no synopsis.
    #[serde(rename = "description", default)]
    pub synopsis: String,
}

/// One playable target for a content item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamDescriptor {
    #[serde(rename = "title")]
    pub label: String,
    #[serde(rename = "url")]
    pub playback_url: String,
    #[serde(rename = "isFree")]
    pub is_free: bool,
}

/// Optional request parameters beyond the resource triple.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraArgs {
    /// Search term for catalog requests.
    #[serde(default)]
    pub search: Option<String>,
}

impl ExtraArgs {
    /// Extra arguments carrying only a search term.
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
        }
    }

    /// The search term, if present and not blank.
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn summary_wire_shape() {
        let summary = ContentSummary {
            id: ContentId::from("greekm:/m/1"),
            kind: ContentKind::Movie,
            title: "Α".into(),
            poster_url: Some("https://greek-movies.com/img/a.jpg".into()),
        };
        assert_eq!(
            serde_json::to_value(&summary).unwrap(),
            json!({
                "id": "greekm:/m/1",
                "type": "movie",
                "name": "Α",
                "poster": "https://greek-movies.com/img/a.jpg"
            })
        );
    }

    #[test]
    fn summary_without_poster_omits_field() {
        let summary = ContentSummary {
            id: ContentId::from("greekm:/m/2"),
            kind: ContentKind::Movie,
            title: "Β".into(),
            poster_url: None,
        };
        let value = serde_json::to_value(&summary).unwrap();
        assert!(value.get("poster").is_none());
    }

    #[test]
    fn detail_wire_shape() {
        let detail = ContentDetail {
            id: ContentId::from("greekm:/m/1"),
            kind: ContentKind::Movie,
            title: "Η Καλή Ταινία".into(),
            poster_url: None,
            synopsis: String::new(),
        };
        assert_eq!(
            serde_json::to_value(&detail).unwrap(),
            json!({
                "id": "greekm:/m/1",
                "type": "movie",
                "name": "Η Καλή Ταινία",
                "description": ""
            })
        );
    }

    #[test]
    fn stream_wire_shape() {
        let stream = StreamDescriptor {
            label: "Greek Movies Stream".into(),
            playback_url: "https://ok.ru/videoembed/1".into(),
            is_free: true,
        };
        assert_eq!(
            serde_json::to_value(&stream).unwrap(),
            json!({
                "title": "Greek Movies Stream",
                "url": "https://ok.ru/videoembed/1",
                "isFree": true
            })
        );
    }

    #[test]
    fn resource_kind_parsing() {
        assert_eq!("catalog".parse::<ResourceKind>().unwrap(), ResourceKind::Catalog);
        assert_eq!("meta".parse::<ResourceKind>().unwrap(), ResourceKind::Meta);
        assert_eq!("stream".parse::<ResourceKind>().unwrap(), ResourceKind::Stream);
        assert!("subtitles".parse::<ResourceKind>().is_err());
    }

    #[test]
    fn content_kind_parsing() {
        assert_eq!("movie".parse::<ContentKind>().unwrap(), ContentKind::Movie);
        assert!("series".parse::<ContentKind>().is_err());
    }

    #[test]
    fn blank_search_is_no_search() {
        assert_eq!(ExtraArgs::default().search_term(), None);
        assert_eq!(ExtraArgs::search("   ").search_term(), None);
        assert_eq!(ExtraArgs::search(" καλη ").search_term(), Some("καλη"));
    }
}
