//! Display-ready values extracted from Wikidata snaks.
//!
//! Every variant holds flat, typed fields. Raw nested JSON never survives
//! extraction: unknown structures are flattened into their textual form
//! before they reach an [`ExtractedValue`].

use serde::{Serialize, Serializer};
use std::fmt;

/// The normalized value of one snak.
///
/// Serializes to the shape the explorer front end renders: `String` and
/// `Url` become plain JSON strings, `Scalar` keeps its JSON scalar, and the
/// structured variants become objects carrying a `type` tag.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractedValue {
    /// `string` values, and unknown datatypes whose payload is text or had
    /// to be flattened from a nested structure.
    String(String),
    /// `url` values.
    Url(String),
    /// A reference to another entity (item, lexeme, form or sense).
    Reference(EntityRef),
    MonolingualText(MonolingualText),
    Time(TimeValue),
    Quantity(QuantityValue),
    GlobeCoordinate(GlobeCoordinate),
    /// Unknown datatypes whose payload is a bare number, boolean or null.
    Scalar(Scalar),
}

/// Which kind of entity a [`EntityRef`] points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    Item,
    Lexeme,
    Form,
    Sense,
}

impl ReferenceKind {
    /// Map a snak `datatype` to a reference kind.
    pub fn from_datatype(datatype: &str) -> Option<Self> {
        match datatype {
            "wikibase-item" => Some(Self::Item),
            "wikibase-lexeme" => Some(Self::Lexeme),
            "wikibase-form" => Some(Self::Form),
            "wikibase-sense" => Some(Self::Sense),
            _ => None,
        }
    }

    pub const fn datatype(self) -> &'static str {
        match self {
            Self::Item => "wikibase-item",
            Self::Lexeme => "wikibase-lexeme",
            Self::Form => "wikibase-form",
            Self::Sense => "wikibase-sense",
        }
    }
}

/// A reference to another entity.
///
/// Referenced labels are not resolved; `label` carries the raw ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityRef {
    #[serde(skip)]
    pub kind: ReferenceKind,
    pub id: String,
    pub label: String,
}

impl EntityRef {
    pub fn new(kind: ReferenceKind, id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            kind,
            label: id.clone(),
            id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonolingualText {
    pub text: String,
    pub language: String,
}

/// A point in time with its precision-dependent rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeValue {
    /// The raw Wikidata time string, sign included (`+1990-01-01T00:00:00Z`).
    pub time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precision: Option<u8>,
    pub formatted: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuantityValue {
    pub amount: String,
    pub unit: String,
    pub formatted: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobeCoordinate {
    pub latitude: f64,
    pub longitude: f64,
    pub formatted: String,
}

/// A bare JSON scalar kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(serde_json::Number),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum Tagged<'a> {
    #[serde(rename = "wikibase-entityid")]
    Item(&'a EntityRef),
    #[serde(rename = "wikibase-lexeme")]
    Lexeme(&'a EntityRef),
    #[serde(rename = "wikibase-form")]
    Form(&'a EntityRef),
    #[serde(rename = "wikibase-sense")]
    Sense(&'a EntityRef),
    #[serde(rename = "monolingualtext")]
    MonolingualText(&'a MonolingualText),
    #[serde(rename = "time")]
    Time(&'a TimeValue),
    #[serde(rename = "quantity")]
    Quantity(&'a QuantityValue),
    #[serde(rename = "globe-coordinate")]
    GlobeCoordinate(&'a GlobeCoordinate),
}

impl Serialize for ExtractedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let tagged = match self {
            Self::String(text) | Self::Url(text) => return serializer.serialize_str(text),
            Self::Scalar(scalar) => return scalar.serialize(serializer),
            Self::Reference(reference) => match reference.kind {
                ReferenceKind::Item => Tagged::Item(reference),
                ReferenceKind::Lexeme => Tagged::Lexeme(reference),
                ReferenceKind::Form => Tagged::Form(reference),
                ReferenceKind::Sense => Tagged::Sense(reference),
            },
            Self::MonolingualText(text) => Tagged::MonolingualText(text),
            Self::Time(time) => Tagged::Time(time),
            Self::Quantity(quantity) => Tagged::Quantity(quantity),
            Self::GlobeCoordinate(coordinate) => Tagged::GlobeCoordinate(coordinate),
        };
        tagged.serialize(serializer)
    }
}

impl fmt::Display for ExtractedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(text) | Self::Url(text) => f.write_str(text),
            Self::Reference(reference) => f.write_str(&reference.label),
            Self::MonolingualText(text) => write!(f, "{} ({})", text.text, text.language),
            Self::Time(TimeValue { formatted, .. })
            | Self::Quantity(QuantityValue { formatted, .. })
            | Self::GlobeCoordinate(GlobeCoordinate { formatted, .. }) => f.write_str(formatted),
            Self::Scalar(scalar) => write!(f, "{scalar}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_variants_serialize_as_strings() {
        let value = ExtractedValue::Url("https://example.org".to_string());
        assert_eq!(serde_json::to_value(&value).unwrap(), json!("https://example.org"));
    }

    #[test]
    fn test_item_reference_serializes_with_entityid_tag() {
        let value = ExtractedValue::Reference(EntityRef::new(ReferenceKind::Item, "Q5"));
        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            json!({"type": "wikibase-entityid", "id": "Q5", "label": "Q5"})
        );
    }

    #[test]
    fn test_lexeme_reference_serializes_with_datatype_tag() {
        let value = ExtractedValue::Reference(EntityRef::new(ReferenceKind::Sense, "L1-S1"));
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(json["type"], "wikibase-sense");
    }

    #[test]
    fn test_time_omits_missing_precision() {
        let value = ExtractedValue::Time(TimeValue {
            time: "+1990-01-01T00:00:00Z".to_string(),
            precision: None,
            formatted: "+1990-01-01T00:00:00Z".to_string(),
        });
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(json["type"], "time");
        assert!(json.get("precision").is_none());
    }

    #[test]
    fn test_scalar_keeps_json_scalar() {
        let value = ExtractedValue::Scalar(Scalar::Number(42.into()));
        assert_eq!(serde_json::to_value(&value).unwrap(), json!(42));
        assert_eq!(
            serde_json::to_value(ExtractedValue::Scalar(Scalar::Null)).unwrap(),
            json!(null)
        );
    }

    #[test]
    fn test_display_renders_human_text() {
        let text = ExtractedValue::MonolingualText(MonolingualText {
            text: "Berlin".to_string(),
            language: "de".to_string(),
        });
        assert_eq!(text.to_string(), "Berlin (de)");

        let quantity = ExtractedValue::Quantity(QuantityValue {
            amount: "+5".to_string(),
            unit: "1".to_string(),
            formatted: "+5 1".to_string(),
        });
        assert_eq!(quantity.to_string(), "+5 1");

        let reference = ExtractedValue::Reference(EntityRef::new(ReferenceKind::Item, "Q183"));
        assert_eq!(reference.to_string(), "Q183");
    }
}
