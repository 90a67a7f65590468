//! Add-on manifest served at `/manifest.json`.

use greekmovies_common::{ContentKind, ResourceKind};
use serde::Serialize;

use crate::config::Config;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub id: String,
    pub version: String,
    pub name: String,
    pub description: String,
    pub types: Vec<String>,
    pub catalogs: Vec<CatalogDescriptor>,
    pub resources: Vec<String>,
    pub id_prefixes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogDescriptor {
    #[serde(rename = "type")]
    pub content_type: String,
    pub id: String,
    pub name: String,
    pub extra: Vec<ExtraDescriptor>,
}

/// An extra argument a catalog accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtraDescriptor {
    pub name: String,
}

impl Manifest {
    pub fn from_config(config: &Config) -> Self {
        let addon = &config.addon;
        let movie = ContentKind::Movie.as_str().to_string();

        Self {
            id: addon.id.clone(),
            version: addon.version.clone(),
            name: addon.name.clone(),
            description: addon.description.clone(),
            types: vec![movie.clone()],
            catalogs: vec![CatalogDescriptor {
                content_type: movie,
                id: addon.catalog_id.clone(),
                name: addon.catalog_name.clone(),
                extra: vec![ExtraDescriptor {
                    name: "search".to_string(),
                }],
            }],
            resources: ResourceKind::ALL
                .iter()
                .map(|r| r.as_str().to_string())
                .collect(),
            id_prefixes: vec![addon.id_prefix.clone()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_manifest() {
        let manifest = Manifest::from_config(&Config::default());
        let value = serde_json::to_value(&manifest).unwrap();

        assert_eq!(value["id"], "org.greekmovies.addon");
        assert_eq!(value["types"], json!(["movie"]));
        assert_eq!(value["resources"], json!(["catalog", "stream", "meta"]));
        assert_eq!(value["idPrefixes"], json!(["greekm:"]));
        assert_eq!(
            value["catalogs"],
            json!([{
                "type": "movie",
                "id": "greek-movies",
                "name": "Greek Movies",
                "extra": [{ "name": "search" }]
            }])
        );
    }

    #[test]
    fn follows_configured_prefix() {
        let mut config = Config::default();
        config.addon.id_prefix = "greekmovies_".to_string();
        config.addon.catalog_id = "all_greek_movies".to_string();

        let manifest = Manifest::from_config(&config);
        assert_eq!(manifest.id_prefixes, vec!["greekmovies_"]);
        assert_eq!(manifest.catalogs[0].id, "all_greek_movies");
    }
}
