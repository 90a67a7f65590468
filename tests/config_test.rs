//! Integration tests for configuration loading and validation.

use greekmovies::config::{load_config, load_config_or_default, validate_config, Config};
use greekmovies_scraper::SearchMode;
use serial_test::serial;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

fn clear_port_env() {
    std::env::remove_var("GREEKMOVIES_PORT");
    std::env::remove_var("PORT");
}

fn write_config(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let temp = tempdir().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(&path, contents).unwrap();
    (temp, path)
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

#[test]
#[serial]
fn empty_file_yields_defaults() {
    clear_port_env();
    let (_temp, path) = write_config("");
    let config = load_config(&path).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.server.port, 7000);
    assert_eq!(config.addon.id_prefix, "greekm:");
    assert_eq!(config.source.max_results, 30);
}

#[test]
#[serial]
fn full_config_round_trips_into_settings() {
    clear_port_env();
    let (_temp, path) = write_config(
        r#"
[server]
host = "127.0.0.1"
port = 7100

[addon]
id_prefix = "greekmovies_"
catalog_id = "greekmovies_catalog"
stream_label = "Προβολή"
placeholder_title = "Χωρίς τίτλο"

[source]
origin = "https://mirror.example/"
listing_path = "/list.php"
max_results = 12
timeout_secs = 5
requests_per_second = 2
user_agent = "test-agent"

[source.search]
mode = "server"
path = "/search.php?q={query}"

[selectors.listing]
entry = ["div.folder"]

[[selectors.listing.title]]
selector = "span.name"

[streams]
allowed_hosts = ["ok.ru"]
"#,
    );

    let config = load_config(&path).unwrap();
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(
        config.source.search,
        SearchMode::Server {
            path: "/search.php?q={query}".to_string()
        }
    );
    assert_eq!(config.selectors.listing.entry, vec!["div.folder"]);
    // Sections not mentioned keep their defaults.
    assert!(!config.selectors.detail.title.is_empty());

    let settings = config.extraction_settings();
    assert_eq!(settings.codec.prefix(), "greekmovies_");
    assert_eq!(settings.codec.origin(), "https://mirror.example");
    assert_eq!(settings.catalog_id, "greekmovies_catalog");
    assert_eq!(settings.listing.listing_path, "/list.php");
    assert_eq!(settings.listing.max_results, 12);
    assert_eq!(settings.placeholder_title, "Χωρίς τίτλο");
    assert_eq!(settings.stream.label, "Προβολή");
    assert_eq!(settings.stream.allowed_hosts, vec!["ok.ru"]);

    let fetch = config.fetch_config();
    assert_eq!(fetch.timeout, Duration::from_secs(5));
    assert_eq!(fetch.user_agent, "test-agent");
    assert_eq!(fetch.requests_per_second.map(|n| n.get()), Some(2));
}

#[test]
#[serial]
fn example_config_matches_defaults() {
    clear_port_env();
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("config.example.toml");
    let config = load_config(&path).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
#[serial]
fn addon_version_defaults_to_crate_version() {
    clear_port_env();
    assert_eq!(Config::default().addon.version, env!("CARGO_PKG_VERSION"));

    let (_temp, path) = write_config("[addon]\nversion = \"1.0.0\"\n");
    let config = load_config(&path).unwrap();
    assert_eq!(config.addon.version, "1.0.0");
}

#[test]
#[serial]
fn zero_rate_disables_limiting() {
    clear_port_env();
    let (_temp, path) = write_config("[source]\nrequests_per_second = 0\n");
    let config = load_config(&path).unwrap();
    assert!(config.fetch_config().requests_per_second.is_none());
}

#[test]
#[serial]
fn explicit_path_must_exist() {
    let err = load_config_or_default(Some(std::path::Path::new("/nonexistent/config.toml")))
        .unwrap_err();
    assert!(format!("{err:#}").contains("Failed to read config file"));
}

#[test]
#[serial]
fn malformed_toml_is_rejected() {
    let (_temp, path) = write_config("[server\nport = 1");
    let err = load_config(&path).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to parse config file"));
}

// ---------------------------------------------------------------------------
// Environment overrides
// ---------------------------------------------------------------------------

#[test]
#[serial]
fn port_env_overrides_file() {
    clear_port_env();
    std::env::set_var("PORT", "7300");
    let (_temp, path) = write_config("[server]\nport = 7100\n");
    let config = load_config(&path).unwrap();
    clear_port_env();
    assert_eq!(config.server.port, 7300);
}

#[test]
#[serial]
fn namespaced_port_env_wins() {
    clear_port_env();
    std::env::set_var("PORT", "7300");
    std::env::set_var("GREEKMOVIES_PORT", "7400");
    let (_temp, path) = write_config("");
    let config = load_config(&path).unwrap();
    clear_port_env();
    assert_eq!(config.server.port, 7400);
}

#[test]
#[serial]
fn invalid_port_env_is_an_error() {
    clear_port_env();
    std::env::set_var("PORT", "seven thousand");
    let (_temp, path) = write_config("");
    let result = load_config(&path);
    clear_port_env();
    assert!(format!("{:#}", result.unwrap_err()).contains("PORT"));
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn default_config_is_valid() {
    validate_config(&Config::default()).unwrap();
}

#[test]
fn rejects_zero_port() {
    let mut config = Config::default();
    config.server.port = 0;
    assert!(validate_config(&config).is_err());
}

#[test]
fn rejects_empty_prefix() {
    let mut config = Config::default();
    config.addon.id_prefix = String::new();
    assert!(validate_config(&config).is_err());
}

#[test]
fn rejects_non_http_origin() {
    let mut config = Config::default();
    config.source.origin = "ftp://greek-movies.com".to_string();
    assert!(validate_config(&config).is_err());

    config.source.origin = "/movies".to_string();
    assert!(validate_config(&config).is_err());
}

#[test]
fn rejects_zero_cap_and_timeout() {
    let mut config = Config::default();
    config.source.max_results = 0;
    assert!(validate_config(&config).is_err());

    let mut config = Config::default();
    config.source.timeout_secs = 0;
    assert!(validate_config(&config).is_err());
}

#[test]
fn rejects_search_path_without_placeholder() {
    let mut config = Config::default();
    config.source.search = SearchMode::Server {
        path: "/search.php".to_string(),
    };
    assert!(validate_config(&config).is_err());
}

#[test]
fn rejects_uncompilable_selector() {
    let mut config = Config::default();
    config.selectors.detail.title[0].selector = Some(":::".to_string());
    let err = validate_config(&config).unwrap_err();
    assert!(format!("{err:#}").contains("selector"));
}

#[test]
fn empty_allow_list_is_accepted() {
    let mut config = Config::default();
    config.streams.allowed_hosts.clear();
    validate_config(&config).unwrap();
}
