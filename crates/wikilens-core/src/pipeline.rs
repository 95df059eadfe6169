//! Entity normalization entry points.
//!
//! [`normalize_entity`] takes the document returned by
//! `Special:EntityData/{id}.json`:
//!
//! ```json
//! {"entities": {"Q42": {"id": "Q42", "labels": {...}, "claims": {...}}}}
//! ```
//!
//! and produces a [`NormalizedEntity`]. Only whole-document problems are
//! errors: a document that is not an object, or one that lacks the requested
//! entity. Everything below the entity level is recovered locally.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::NormalizedEntity;
use crate::normalize::{normalize_aliases, normalize_labels, normalize_sitelinks};
use crate::properties::categorize_claims;

/// Normalize the entity `entity_id` from an `EntityData` document.
///
/// # Errors
/// [`Error::InvalidDocument`] when `document` is not a JSON object, and
/// [`Error::NotFound`] when it carries no entity under `entity_id`.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use wikilens_core::normalize_entity;
///
/// let document = json!({"entities": {"Q64": {
///     "id": "Q64",
///     "labels": {"en": {"language": "en", "value": "Berlin"}},
///     "sitelinks": {"enwiki": {"site": "enwiki", "title": "Berlin"}}
/// }}});
/// let entity = normalize_entity(&document, "Q64")?;
/// assert_eq!(entity.labels["en"], "Berlin");
/// assert_eq!(entity.sitelinks["enwiki"].url, "https://en.wikipedia.org/wiki/Berlin");
/// # Ok::<(), wikilens_core::Error>(())
/// ```
pub fn normalize_entity(document: &Value, entity_id: &str) -> Result<NormalizedEntity> {
    if !document.is_object() {
        return Err(Error::InvalidDocument(format!(
            "expected a JSON object, got {}",
            json_kind(document)
        )));
    }

    let entity = document
        .get("entities")
        .and_then(|entities| entities.get(entity_id))
        .filter(|entity| entity.is_object())
        .ok_or_else(|| Error::NotFound {
            id: entity_id.to_string(),
        })?;

    Ok(normalize_entity_object(entity, entity_id))
}

/// Normalize a bare entity object, as found in dump lines.
///
/// # Errors
/// [`Error::InvalidDocument`] when `entity` is not an object or has no
/// string `id`.
pub fn normalize_bare_entity(entity: &Value) -> Result<NormalizedEntity> {
    if !entity.is_object() {
        return Err(Error::InvalidDocument(format!(
            "expected an entity object, got {}",
            json_kind(entity)
        )));
    }
    let id = entity
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::InvalidDocument("entity has no id".to_string()))?;
    Ok(normalize_entity_object(entity, id))
}

/// Parse `json` and normalize one entity from it.
///
/// Without an `entity_id` the document must hold exactly one entity (or be a
/// bare entity object), which is then used.
///
/// # Errors
/// [`Error::Serialization`] for malformed JSON, plus the errors of
/// [`normalize_entity`] and [`normalize_bare_entity`].
pub fn normalize_entity_json(json: &str, entity_id: Option<&str>) -> Result<NormalizedEntity> {
    let document: Value = serde_json::from_str(json)?;

    match (entity_id, document.get("entities")) {
        (Some(id), _) => normalize_entity(&document, id),
        (None, Some(_)) => {
            let id = sole_entity_id(&document)?;
            normalize_entity(&document, &id)
        }
        (None, None) => normalize_bare_entity(&document),
    }
}

/// The ID of the only entity in an `EntityData` document.
///
/// # Errors
/// [`Error::InvalidDocument`] when the document holds zero or several
/// entities.
pub fn sole_entity_id(document: &Value) -> Result<String> {
    let entities = document
        .get("entities")
        .and_then(Value::as_object)
        .ok_or_else(|| Error::InvalidDocument("document has no entities".to_string()))?;

    let mut ids = entities.keys();
    match (ids.next(), ids.next()) {
        (Some(id), None) => Ok(id.clone()),
        (None, _) => Err(Error::InvalidDocument("document has no entities".to_string())),
        (Some(_), Some(_)) => Err(Error::InvalidDocument(format!(
            "document holds {} entities; pick one by id",
            entities.len()
        ))),
    }
}

fn normalize_entity_object(entity: &Value, entity_id: &str) -> NormalizedEntity {
    let field = |name: &str| entity.get(name).unwrap_or(&Value::Null);
    let claims = field("claims");

    let normalized = NormalizedEntity {
        id: entity_id.to_string(),
        labels: normalize_labels(field("labels")),
        descriptions: normalize_labels(field("descriptions")),
        aliases: normalize_aliases(field("aliases")),
        sitelinks: normalize_sitelinks(field("sitelinks")),
        claims: if claims.is_null() {
            Value::Object(serde_json::Map::new())
        } else {
            claims.clone()
        },
        properties: categorize_claims(claims),
    };

    log::debug!(
        "normalized {}: {} labels, {} sitelinks, {} claims",
        entity_id,
        normalized.labels.len(),
        normalized.sitelinks.len(),
        normalized.properties.len()
    );
    normalized
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
