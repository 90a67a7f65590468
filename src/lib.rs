//! Greekmovies - catalog add-on for greek-movies.com
//!
//! This library crate exposes configuration and the HTTP layer for
//! integration testing. Extraction lives in `greekmovies-scraper`.

pub mod config;
pub mod server;
