//! Core entity model for wikilens.
//!
//! This crate turns a raw Wikidata entity document into a flat, typed shape:
//! label, description, alias and sitelink maps plus claims sorted into basic
//! properties, external identifiers and other statements. It performs no I/O;
//! retrieval lives in `wikilens-client`.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod error;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod properties;
pub mod snak;
pub mod time;

pub use error::{Error, Result};
pub use model::{
    CategorizedProperties, EntityId, EntityRef, ExtractedValue, GlobeCoordinate,
    MonolingualText, NormalizedEntity, ProcessedClaim, QuantityValue, ReferenceKind, Scalar,
    Sitelink, TimeValue,
};
pub use pipeline::{normalize_bare_entity, normalize_entity, normalize_entity_json};
pub use properties::{categorize_claims, classify, property_label, Category};
pub use snak::extract_snak_value;
