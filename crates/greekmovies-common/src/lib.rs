//! Greekmovies-Common: shared content model, identifiers, and errors.
//!
//! This crate provides the types every other greekmovies crate speaks:
//!
//! - **Content IDs**: the [`IdCodec`] that turns a source-site locator into a
//!   namespace-prefixed [`ContentId`] and back
//! - **Content model**: catalog summaries, detail records, and stream
//!   descriptors in the shape add-on clients expect on the wire
//! - **Error Handling**: the unified [`Error`] type and its [`FailureKind`]
//!   classification
//!
//! # Examples
//!
//! ```
//! use greekmovies_common::IdCodec;
//!
//! let codec = IdCodec::new("greekm:", "https://greek-movies.com");
//! let id = codec.encode("/m/1");
//! assert_eq!(id.as_str(), "greekm:/m/1");
//! assert_eq!(codec.decode(&id).unwrap(), "/m/1");
//! assert_eq!(codec.to_absolute("/m/1"), "https://greek-movies.com/m/1");
//! ```

pub mod error;
pub mod ids;
pub mod types;

pub use error::{Error, FailureKind, Result};
pub use ids::*;
pub use types::*;
