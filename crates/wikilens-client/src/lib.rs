//! Wikidata retrieval for wikilens.
//!
//! Wraps the two public Wikidata endpoints the explorer needs: the
//! `wbsearchentities` action for text search and `Special:EntityData` for
//! full entity documents, which are handed to `wikilens-core` for
//! normalization.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod error;
pub mod resilience;
pub mod search;
pub mod wikidata;

pub use config::Config;
pub use error::{ClientError, ClientResult};
pub use search::SearchResult;
pub use wikidata::WikidataClient;
