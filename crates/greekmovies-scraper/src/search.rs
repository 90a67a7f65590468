//! Search term handling for the catalog.
//!
//! Titles on the source site are Greek, and users type queries without
//! accents more often than not. Both sides are folded to lowercase with
//! tonos and dialytika removed before the substring test.

use serde::{Deserialize, Serialize};

/// How a catalog search term reaches the source site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SearchMode {
    /// Fetch the regular listing page and filter titles locally.
    #[default]
    ClientFilter,
    /// Fetch a search page; `path` contains a `{query}` placeholder that is
    /// replaced with the form-encoded term.
    Server { path: String },
}

/// Placeholder substituted in [`SearchMode::Server`] paths.
pub const QUERY_PLACEHOLDER: &str = "{query}";

/// Substitute the form-encoded `term` into a search path template.
pub fn search_path(template: &str, term: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(term.as_bytes()).collect();
    template.replace(QUERY_PLACEHOLDER, &encoded)
}

/// Lowercase `s` and strip Greek accents so comparisons ignore both.
pub fn fold(s: &str) -> String {
    s.chars().flat_map(char::to_lowercase).map(strip_accent).collect()
}

fn strip_accent(c: char) -> char {
    match c {
        'ά' => 'α',
        'έ' => 'ε',
        'ή' => 'η',
        'ί' | 'ϊ' | 'ΐ' => 'ι',
        'ό' => 'ο',
        'ύ' | 'ϋ' | 'ΰ' => 'υ',
        'ώ' => 'ω',
        'ς' => 'σ',
        other => other,
    }
}

/// Case- and accent-insensitive substring match of `query` in `title`.
pub fn matches_query(title: &str, query: &str) -> bool {
    fold(title).contains(&fold(query))
}
