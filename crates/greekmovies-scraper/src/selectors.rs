//! Selector strategy table.
//!
//! Every piece of site-specific markup knowledge lives here. Each field an
//! extractor needs is described by an ordered list of candidate rules; the
//! first rule that yields a non-empty value wins. Catalog entries work the
//! same way at node level: the first entry selector that matches anything
//! decides the markup shape for the whole page.
//!
//! [`SelectorProfile`] is the serializable form loaded from configuration;
//! [`CompiledProfile`] holds the parsed [`scraper::Selector`]s the
//! extractors actually run.

use greekmovies_common::{Error, Result};
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Configuration form
// ---------------------------------------------------------------------------

/// One way of reading a value out of the markup.
///
/// `selector` picks descendant nodes of the current scope; when absent the
/// scope node itself is read. `attr` names the attribute to read; when absent
/// the node's whitespace-normalized text is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attr: Option<String>,
}

impl FieldRule {
    /// Text content of the first node matching `selector`.
    pub fn text(selector: &str) -> Self {
        Self {
            selector: Some(selector.to_string()),
            attr: None,
        }
    }

    /// Attribute `attr` of nodes matching `selector`.
    pub fn attr(selector: &str, attr: &str) -> Self {
        Self {
            selector: Some(selector.to_string()),
            attr: Some(attr.to_string()),
        }
    }

    /// Attribute `attr` of the scope node itself.
    pub fn own_attr(attr: &str) -> Self {
        Self {
            selector: None,
            attr: Some(attr.to_string()),
        }
    }
}

/// Rules for the catalog listing page. Link, title, and poster rules are
/// evaluated relative to each entry node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingSelectors {
    pub entry: Vec<String>,
    pub link: Vec<FieldRule>,
    pub title: Vec<FieldRule>,
    pub poster: Vec<FieldRule>,
}

impl Default for ListingSelectors {
    fn default() -> Self {
        Self {
            entry: vec![
                ".poster a".to_string(),
                "div.movie-item".to_string(),
                "div.folder".to_string(),
            ],
            link: vec![FieldRule::own_attr("href"), FieldRule::attr("a[href]", "href")],
            title: vec![
                FieldRule::own_attr("title"),
                FieldRule::attr("a[title]", "title"),
                FieldRule::text(".title"),
                FieldRule::text("h2"),
                FieldRule::text("h3"),
                FieldRule::attr("img[alt]", "alt"),
            ],
            poster: vec![
                FieldRule::attr("img[data-src]", "data-src"),
                FieldRule::attr("img[src]", "src"),
            ],
        }
    }
}

/// Rules for a content detail page, evaluated against the whole document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailSelectors {
    pub title: Vec<FieldRule>,
    pub poster: Vec<FieldRule>,
    pub synopsis: Vec<FieldRule>,
}

impl Default for DetailSelectors {
    fn default() -> Self {
        Self {
            title: vec![
                FieldRule::text(".title a"),
                FieldRule::text("h1"),
                FieldRule::attr("meta[property='og:title']", "content"),
            ],
            poster: vec![
                FieldRule::attr("img[src*='/posters']", "src"),
                FieldRule::attr("meta[property='og:image']", "content"),
                FieldRule::attr(".poster img", "src"),
            ],
            synopsis: vec![
                FieldRule::text(".description"),
                FieldRule::text(".synopsis"),
                FieldRule::attr("meta[property='og:description']", "content"),
                FieldRule::attr("meta[name='description']", "content"),
            ],
        }
    }
}

/// Rules for locating embedded-player references on a content page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamSelectors {
    pub player: Vec<FieldRule>,
}

impl Default for StreamSelectors {
    fn default() -> Self {
        Self {
            player: vec![
                FieldRule::attr("iframe[src]", "src"),
                FieldRule::attr("iframe[data-src]", "data-src"),
            ],
        }
    }
}

/// Complete selector table for one source site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorProfile {
    pub listing: ListingSelectors,
    pub detail: DetailSelectors,
    pub stream: StreamSelectors,
}

impl SelectorProfile {
    /// Parse every selector in the table.
    pub fn compile(&self) -> Result<CompiledProfile> {
        Ok(CompiledProfile {
            listing: CompiledListing {
                entry: EntryChain::compile(&self.listing.entry)?,
                link: RuleChain::compile(&self.listing.link)?,
                title: RuleChain::compile(&self.listing.title)?,
                poster: RuleChain::compile(&self.listing.poster)?,
            },
            detail: CompiledDetail {
                title: RuleChain::compile(&self.detail.title)?,
                poster: RuleChain::compile(&self.detail.poster)?,
                synopsis: RuleChain::compile(&self.detail.synopsis)?,
            },
            stream: CompiledStream {
                player: RuleChain::compile(&self.stream.player)?,
            },
        })
    }
}

// ---------------------------------------------------------------------------
// Compiled form
// ---------------------------------------------------------------------------

fn parse_selector(raw: &str) -> Result<Selector> {
    Selector::parse(raw).map_err(|e| Error::selector(raw, format!("{e:?}")))
}

/// A compiled [`FieldRule`].
#[derive(Debug)]
struct CompiledRule {
    selector: Option<Selector>,
    attr: Option<String>,
}

impl CompiledRule {
    fn read(&self, node: ElementRef<'_>) -> Option<String> {
        let raw = match &self.attr {
            Some(attr) => node.value().attr(attr)?.trim().to_string(),
            None => normalize_text(node),
        };
        (!raw.is_empty()).then_some(raw)
    }

    /// Value of `node` if this rule selects it within `scope`.
    fn read_node(&self, node: ElementRef<'_>, scope: ElementRef<'_>) -> Option<String> {
        let is_scope = node.id() == scope.id();
        match &self.selector {
            Some(selector) if !is_scope && selector.matches(&node) => self.read(node),
            None if is_scope => self.read(node),
            _ => None,
        }
    }

    /// Every non-empty value this rule yields within `scope`, in document order.
    fn values(&self, scope: ElementRef<'_>) -> Vec<String> {
        match &self.selector {
            Some(selector) => scope
                .select(selector)
                .filter_map(|node| self.read(node))
                .collect(),
            None => self.read(scope).into_iter().collect(),
        }
    }
}

fn normalize_text(node: ElementRef<'_>) -> String {
    node.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Ordered candidate rules for one field.
#[derive(Debug)]
pub struct RuleChain(Vec<CompiledRule>);

impl RuleChain {
    pub fn compile(rules: &[FieldRule]) -> Result<Self> {
        rules
            .iter()
            .map(|rule| {
                Ok(CompiledRule {
                    selector: rule.selector.as_deref().map(parse_selector).transpose()?,
                    attr: rule.attr.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }

    /// The first non-empty value, trying rules in order.
    pub fn first(&self, scope: ElementRef<'_>) -> Option<String> {
        self.0
            .iter()
            .find_map(|rule| rule.values(scope).into_iter().next())
    }

    /// One value per node in document order. Each node is read by the first
    /// rule that selects it and yields a value.
    pub fn per_node(&self, scope: ElementRef<'_>) -> Vec<String> {
        scope
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter_map(|node| self.0.iter().find_map(|rule| rule.read_node(node, scope)))
            .collect()
    }
}

/// Ordered candidate selectors for catalog entry nodes.
#[derive(Debug)]
pub struct EntryChain(Vec<Selector>);

impl EntryChain {
    pub fn compile(selectors: &[String]) -> Result<Self> {
        selectors
            .iter()
            .map(|s| parse_selector(s))
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }

    /// Nodes matched by the first selector that matches anything.
    pub fn select<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        self.0
            .iter()
            .map(|selector| document.select(selector).collect::<Vec<_>>())
            .find(|nodes| !nodes.is_empty())
            .unwrap_or_default()
    }
}

#[derive(Debug)]
pub struct CompiledListing {
    pub entry: EntryChain,
    pub link: RuleChain,
    pub title: RuleChain,
    pub poster: RuleChain,
}

#[derive(Debug)]
pub struct CompiledDetail {
    pub title: RuleChain,
    pub poster: RuleChain,
    pub synopsis: RuleChain,
}

#[derive(Debug)]
pub struct CompiledStream {
    pub player: RuleChain,
}

/// Parsed selector table, shared by the extractors.
#[derive(Debug)]
pub struct CompiledProfile {
    pub listing: CompiledListing,
    pub detail: CompiledDetail,
    pub stream: CompiledStream,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_compiles() {
        assert!(SelectorProfile::default().compile().is_ok());
    }

    #[test]
    fn invalid_selector_is_reported() {
        let mut profile = SelectorProfile::default();
        profile.listing.entry = vec!["div[".to_string()];
        let err = profile.compile().unwrap_err();
        assert!(matches!(err, Error::Selector { ref selector, .. } if selector == "div["));
    }

    #[test]
    fn first_rule_with_value_wins() {
        let doc = Html::parse_document(
            r#"<div><h1>  Heading
                 text </h1><meta property="og:title" content="Meta title"></div>"#,
        );
        let chain = RuleChain::compile(&[
            FieldRule::text(".missing"),
            FieldRule::text("h1"),
            FieldRule::attr("meta[property='og:title']", "content"),
        ])
        .unwrap();
        assert_eq!(chain.first(doc.root_element()).as_deref(), Some("Heading text"));
    }

    #[test]
    fn empty_values_fall_through() {
        let doc = Html::parse_document(r#"<h1>   </h1><h2>Fallback</h2>"#);
        let chain = RuleChain::compile(&[FieldRule::text("h1"), FieldRule::text("h2")]).unwrap();
        assert_eq!(chain.first(doc.root_element()).as_deref(), Some("Fallback"));
    }

    #[test]
    fn own_attr_reads_scope_node() {
        let doc = Html::parse_document(r#"<a class="x" href="/m/9" title="Nine">n</a>"#);
        let selector = Selector::parse("a.x").unwrap();
        let node = doc.select(&selector).next().unwrap();
        let chain = RuleChain::compile(&[FieldRule::own_attr("href")]).unwrap();
        assert_eq!(chain.first(node).as_deref(), Some("/m/9"));
    }

    #[test]
    fn per_node_follows_document_order_across_rules() {
        let doc = Html::parse_document(
            r#"<iframe data-src="https://a.example/1"></iframe>
               <iframe src="https://b.example/2"></iframe>
               <iframe src="https://c.example/3" data-src="https://c.example/lazy"></iframe>"#,
        );
        let chain = RuleChain::compile(&[
            FieldRule::attr("iframe[src]", "src"),
            FieldRule::attr("iframe[data-src]", "data-src"),
        ])
        .unwrap();
        assert_eq!(
            chain.per_node(doc.root_element()),
            vec!["https://a.example/1", "https://b.example/2", "https://c.example/3"]
        );
    }

    #[test]
    fn per_node_reads_scope_for_own_attr_rules() {
        let doc = Html::parse_document(r#"<a class="x" href="/m/9"><span>n</span></a>"#);
        let selector = Selector::parse("a.x").unwrap();
        let node = doc.select(&selector).next().unwrap();
        let chain = RuleChain::compile(&[FieldRule::own_attr("href")]).unwrap();
        assert_eq!(chain.per_node(node), vec!["/m/9"]);
    }

    #[test]
    fn entry_chain_falls_back_to_next_shape() {
        let doc = Html::parse_document(
            r#"<div class="folder"><a href="/m/1">One</a></div>
               <div class="folder"><a href="/m/2">Two</a></div>"#,
        );
        let chain = EntryChain::compile(&[
            "div.movie-item".to_string(),
            "div.folder".to_string(),
        ])
        .unwrap();
        assert_eq!(chain.select(&doc).len(), 2);
    }

    #[test]
    fn entry_chain_empty_when_nothing_matches() {
        let doc = Html::parse_document("<p>maintenance</p>");
        let chain = EntryChain::compile(&["div.movie-item".to_string()]).unwrap();
        assert!(chain.select(&doc).is_empty());
    }

    #[test]
    fn profile_deserializes_partial_tables() {
        let json = r#"{ "listing": { "entry": ["li.film"] } }"#;
        let profile: SelectorProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.listing.entry, vec!["li.film"]);
        assert_eq!(profile.listing.link, ListingSelectors::default().link);
        assert_eq!(profile.detail, DetailSelectors::default());
    }
}
