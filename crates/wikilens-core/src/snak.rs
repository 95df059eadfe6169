//! Snak value extraction.
//!
//! A snak is the value-bearing cell of a claim:
//!
//! ```json
//! {
//!   "snaktype": "value",
//!   "property": "P569",
//!   "datatype": "time",
//!   "datavalue": {"type": "time", "value": {"time": "+1879-03-14T00:00:00Z", "precision": 11}}
//! }
//! ```
//!
//! [`extract_snak_value`] dispatches on `datatype` and produces an
//! [`ExtractedValue`]. Extraction is total: a payload with an unexpected
//! shape degrades to its textual form instead of failing.

use serde_json::Value;

use crate::model::{
    EntityRef, ExtractedValue, GlobeCoordinate, MonolingualText, QuantityValue, ReferenceKind,
    Scalar, TimeValue,
};
use crate::time::format_time;

/// Concept URI prefixes stripped from quantity units.
const ENTITY_URI_PREFIXES: &[&str] = &[
    "http://www.wikidata.org/entity/",
    "https://www.wikidata.org/entity/",
];

/// Unit used by Wikidata for dimensionless quantities.
const DIMENSIONLESS_UNIT: &str = "1";

/// Extract the value of a snak.
///
/// Returns `None` when the snak has no `datavalue` (for example
/// `somevalue` snaks).
pub fn extract_snak_value(snak: &Value) -> Option<ExtractedValue> {
    let datavalue = snak.get("datavalue").filter(|v| !v.is_null())?;
    let payload = datavalue.get("value").unwrap_or(&Value::Null);
    let datatype = snak.get("datatype").and_then(Value::as_str).unwrap_or_default();

    let typed = match datatype {
        "string" => payload.as_str().map(|s| ExtractedValue::String(s.to_string())),
        "url" => payload.as_str().map(|s| ExtractedValue::Url(s.to_string())),
        "monolingualtext" => extract_monolingual_text(payload),
        "time" => extract_time(payload),
        "quantity" => extract_quantity(payload),
        "globe-coordinate" => extract_globe_coordinate(payload),
        _ => match ReferenceKind::from_datatype(datatype) {
            Some(kind) => extract_reference(kind, payload),
            None => return Some(coerce_payload(payload)),
        },
    };

    Some(typed.unwrap_or_else(|| {
        log::debug!("malformed {} payload, falling back to text", datatype);
        coerce_payload(payload)
    }))
}

/// Flatten any payload into a value that never carries nested JSON.
fn coerce_payload(payload: &Value) -> ExtractedValue {
    match payload {
        Value::String(s) => ExtractedValue::String(s.clone()),
        Value::Array(_) | Value::Object(_) => ExtractedValue::String(payload.to_string()),
        Value::Null => ExtractedValue::Scalar(Scalar::Null),
        Value::Bool(b) => ExtractedValue::Scalar(Scalar::Bool(*b)),
        Value::Number(n) => ExtractedValue::Scalar(Scalar::Number(n.clone())),
    }
}

fn extract_reference(kind: ReferenceKind, payload: &Value) -> Option<ExtractedValue> {
    let id = match payload.get("id").and_then(Value::as_str) {
        Some(id) => id.to_string(),
        // Older dumps only carry the numeric ID.
        None => {
            let numeric = payload.get("numeric-id").and_then(Value::as_u64)?;
            match kind {
                ReferenceKind::Item => format!("Q{numeric}"),
                ReferenceKind::Lexeme => format!("L{numeric}"),
                ReferenceKind::Form | ReferenceKind::Sense => return None,
            }
        }
    };
    Some(ExtractedValue::Reference(EntityRef::new(kind, id)))
}

fn extract_monolingual_text(payload: &Value) -> Option<ExtractedValue> {
    let text = payload.get("text").and_then(Value::as_str)?;
    let language = payload.get("language").and_then(Value::as_str)?;
    Some(ExtractedValue::MonolingualText(MonolingualText {
        text: text.to_string(),
        language: language.to_string(),
    }))
}

fn extract_time(payload: &Value) -> Option<ExtractedValue> {
    let time = payload.get("time").and_then(Value::as_str)?;
    let precision = payload
        .get("precision")
        .and_then(Value::as_u64)
        .and_then(|p| u8::try_from(p).ok());
    Some(ExtractedValue::Time(TimeValue {
        time: time.to_string(),
        precision,
        formatted: format_time(time, precision),
    }))
}

fn extract_quantity(payload: &Value) -> Option<ExtractedValue> {
    let amount = match payload.get("amount")? {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    let unit = match payload.get("unit") {
        Some(Value::String(s)) => s.clone(),
        None | Some(Value::Null) => DIMENSIONLESS_UNIT.to_string(),
        Some(_) => return None,
    };
    let formatted = format!("{} {}", amount, unit_label(&unit));
    Some(ExtractedValue::Quantity(QuantityValue {
        amount,
        unit,
        formatted,
    }))
}

/// The unit's entity ID when it is a concept URI, else the unit as given.
pub fn unit_label(unit: &str) -> &str {
    ENTITY_URI_PREFIXES
        .iter()
        .find_map(|prefix| unit.strip_prefix(prefix))
        .unwrap_or(unit)
}

fn extract_globe_coordinate(payload: &Value) -> Option<ExtractedValue> {
    let latitude = payload.get("latitude").and_then(Value::as_f64)?;
    let longitude = payload.get("longitude").and_then(Value::as_f64)?;
    Some(ExtractedValue::GlobeCoordinate(GlobeCoordinate {
        latitude,
        longitude,
        formatted: format!("{}, {}", latitude, longitude),
    }))
}
