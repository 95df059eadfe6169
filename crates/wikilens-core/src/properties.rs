//! Property labelling and claim categorization.
//!
//! Claims are split into three sections for display:
//!
//! 1. **identifiers**: the main snak's datatype is `external-id`;
//! 2. **basic**: the property is in [`BASIC_PROPERTIES`];
//! 3. **statements**: everything else.
//!
//! The rules are checked in that order, so an external identifier never lands
//! in the basic section even when its property is allow-listed.

use serde_json::Value;

use crate::model::{CategorizedProperties, ProcessedClaim};
use crate::snak::extract_snak_value;

/// English labels for well-known properties.
pub const PROPERTY_LABELS: &[(&str, &str)] = &[
    ("P31", "Instance of"),
    ("P21", "Sex or gender"),
    ("P27", "Country of citizenship"),
    ("P106", "Occupation"),
    ("P569", "Date of birth"),
    ("P570", "Date of death"),
    ("P19", "Place of birth"),
    ("P20", "Place of death"),
    ("P214", "VIAF ID"),
    ("P227", "GND ID"),
    ("P213", "ISNI"),
    ("P646", "Freebase ID"),
    ("P18", "Image"),
    ("P856", "Official website"),
    ("P1082", "Population"),
    ("P17", "Country"),
    ("P131", "Located in"),
    ("P625", "Coordinate location"),
    ("P41", "Flag"),
    ("P373", "Commons category"),
    ("P1566", "GeoNames ID"),
    ("P281", "Postal code"),
    ("P2046", "Area"),
    ("P30", "Continent"),
    ("P6", "Head of government"),
    ("P35", "Head of state"),
    ("P37", "Official language"),
    ("P38", "Currency"),
    ("P47", "Shares border with"),
    ("P36", "Capital"),
    ("P1448", "Official name"),
    ("P571", "Inception"),
    ("P576", "Dissolution"),
    ("P580", "Start time"),
    ("P582", "End time"),
    ("P2048", "Height"),
    ("P2049", "Width"),
    ("P2067", "Mass"),
    ("P577", "Publication date"),
    ("P50", "Author"),
    ("P57", "Director"),
    ("P58", "Screenwriter"),
    ("P161", "Cast member"),
    ("P170", "Creator"),
    ("P175", "Performer"),
    ("P495", "Country of origin"),
    ("P136", "Genre"),
    ("P144", "Based on"),
    ("P166", "Award received"),
    ("P276", "Location"),
    ("P361", "Part of"),
    ("P463", "Member of"),
    ("P527", "Has part"),
    ("P737", "Influenced by"),
    ("P800", "Notable work"),
    ("P1343", "Described by source"),
    ("P1559", "Name in native language"),
    ("P2561", "Name"),
    ("P2572", "Twitter username"),
    ("P2671", "Google Knowledge Graph ID"),
    ("P3417", "Quora topic ID"),
    ("P3984", "Subreddit"),
    ("P4264", "LinkedIn company ID"),
];

/// Properties shown in the basic section.
pub const BASIC_PROPERTIES: &[&str] = &[
    "P31", "P21", "P27", "P106", "P569", "P570", "P19", "P20", "P18", "P856", "P1082", "P17",
    "P131", "P625", "P41", "P373", "P1566", "P281", "P2046", "P30", "P6", "P35", "P37", "P38",
    "P47", "P36", "P1448", "P571", "P576", "P580", "P582", "P2048", "P2049", "P2067", "P577",
    "P50", "P57", "P58", "P161", "P170", "P175", "P495", "P136", "P144", "P166", "P276",
    "P361", "P463", "P527", "P737", "P800", "P1343", "P1559", "P2561",
];

const EXTERNAL_ID_DATATYPE: &str = "external-id";

/// The display section a claim belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Basic,
    Identifier,
    Statement,
}

/// English label for a property, or the ID itself when unknown.
pub fn property_label(property_id: &str) -> &str {
    PROPERTY_LABELS
        .iter()
        .find(|(id, _)| *id == property_id)
        .map(|(_, label)| *label)
        .unwrap_or(property_id)
}

pub fn is_basic_property(property_id: &str) -> bool {
    BASIC_PROPERTIES.contains(&property_id)
}

/// Pick the section for a claim.
///
/// The datatype check runs first: `external-id` always means
/// [`Category::Identifier`], whatever the allow-list says.
pub fn classify(property_id: &str, datatype: Option<&str>) -> Category {
    if datatype == Some(EXTERNAL_ID_DATATYPE) {
        Category::Identifier
    } else if is_basic_property(property_id) {
        Category::Basic
    } else {
        Category::Statement
    }
}

/// Extract and categorize every claim of an entity.
///
/// `claims` maps property IDs to claim arrays; a lone claim in place of an
/// array is read as a one-claim array. Claims whose main snak is missing,
/// null or `novalue` are dropped. Every other claim lands in exactly one
/// section, in document order, even when its main snak is malformed.
pub fn categorize_claims(claims: &Value) -> CategorizedProperties {
    let mut categorized = CategorizedProperties::default();

    let Some(claims) = claims.as_object() else {
        if !claims.is_null() {
            log::debug!("claims are not an object, ignoring");
        }
        return categorized;
    };

    for (property_id, claim_list) in claims {
        let claim_list = match claim_list.as_array() {
            Some(list) => list.as_slice(),
            None => {
                log::debug!("claims for {} are not a list, reading as one claim", property_id);
                std::slice::from_ref(claim_list)
            }
        };
        let label = property_label(property_id);

        for claim in claim_list {
            let Some(main_snak) = claim.get("mainsnak").filter(|s| !s.is_null()) else {
                continue;
            };
            if main_snak.get("snaktype").and_then(Value::as_str) == Some("novalue") {
                continue;
            }

            // A non-object main snak has no datatype and no value, but the
            // claim itself is still reported.
            let datatype = main_snak.get("datatype").and_then(Value::as_str);
            let value = if main_snak.is_object() {
                extract_snak_value(main_snak)
            } else {
                log::debug!("main snak for {} is not an object", property_id);
                None
            };
            let processed = ProcessedClaim {
                property_id: property_id.clone(),
                property_label: label.to_string(),
                value,
            };

            match classify(property_id, datatype) {
                Category::Identifier => categorized.identifiers.push(processed),
                Category::Basic => categorized.basic.push(processed),
                Category::Statement => categorized.statements.push(processed),
            }
        }
    }

    log::trace!(
        "categorized {} basic, {} identifier, {} statement claims",
        categorized.basic.len(),
        categorized.identifiers.len(),
        categorized.statements.len()
    );
    categorized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ExtractedValue;
    use serde_json::json;
    use std::collections::HashSet;

    fn claim(property: &str, datatype: &str, value: Value) -> Value {
        json!({
            "mainsnak": {
                "snaktype": "value",
                "property": property,
                "datatype": datatype,
                "datavalue": {"value": value, "type": "string"}
            },
            "type": "statement",
            "rank": "normal"
        })
    }

    #[test]
    fn test_tables_have_expected_sizes() {
        assert_eq!(PROPERTY_LABELS.len(), 63);
        assert_eq!(BASIC_PROPERTIES.len(), 54);
        let unique: HashSet<_> = BASIC_PROPERTIES.iter().collect();
        assert_eq!(unique.len(), BASIC_PROPERTIES.len());
    }

    #[test]
    fn test_property_label_lookup_and_fallback() {
        assert_eq!(property_label("P31"), "Instance of");
        assert_eq!(property_label("P4264"), "LinkedIn company ID");
        assert_eq!(property_label("P99999"), "P99999");
    }

    #[test]
    fn test_classify_order() {
        assert_eq!(classify("P31", Some("wikibase-item")), Category::Basic);
        assert_eq!(classify("P214", Some("external-id")), Category::Identifier);
        // Allow-listed but external-id: the datatype wins.
        assert_eq!(classify("P1566", Some("external-id")), Category::Identifier);
        assert_eq!(classify("P1566", Some("string")), Category::Basic);
        assert_eq!(classify("P9999", Some("string")), Category::Statement);
        assert_eq!(classify("P9999", None), Category::Statement);
    }

    #[test]
    fn test_categorize_buckets_and_order() {
        let claims = json!({
            "P31": [claim("P31", "wikibase-item", json!({"id": "Q5"}))],
            "P214": [claim("P214", "external-id", json!("113230702"))],
            "P1412": [claim("P1412", "wikibase-item", json!({"id": "Q1860"}))],
            "P106": [
                claim("P106", "wikibase-item", json!({"id": "Q36180"})),
                claim("P106", "wikibase-item", json!({"id": "Q36180"}))
            ]
        });
        let categorized = categorize_claims(&claims);

        let basic: Vec<_> = categorized.basic.iter().map(|c| c.property_id.as_str()).collect();
        assert_eq!(basic, vec!["P31", "P106", "P106"]);
        assert_eq!(categorized.identifiers.len(), 1);
        assert_eq!(categorized.identifiers[0].property_label, "VIAF ID");
        assert_eq!(
            categorized.identifiers[0].value,
            Some(ExtractedValue::String("113230702".to_string()))
        );
        assert_eq!(categorized.statements.len(), 1);
        assert_eq!(categorized.statements[0].property_label, "P1412");
    }

    #[test]
    fn test_novalue_and_missing_mainsnak_are_dropped() {
        let claims = json!({
            "P570": [{"mainsnak": {"snaktype": "novalue", "property": "P570", "datatype": "time"}}],
            "P26": [{"type": "statement"}],
            "P40": [{"mainsnak": null}]
        });
        let categorized = categorize_claims(&claims);
        assert!(categorized.is_empty());
    }

    #[test]
    fn test_somevalue_is_kept_without_value() {
        let claims = json!({
            "P570": [{"mainsnak": {"snaktype": "somevalue", "property": "P570", "datatype": "time"}}]
        });
        let categorized = categorize_claims(&claims);
        assert_eq!(categorized.basic.len(), 1);
        assert_eq!(categorized.basic[0].value, None);
    }

    #[test]
    fn test_malformed_claims_are_kept_unless_main_snak_is_missing() {
        let claims = json!({
            "P9001": "not a list",
            "P9002": [{"mainsnak": "garbage"}],
            "P9003": [42],
            "P31": {"mainsnak": {"snaktype": "value", "datatype": "wikibase-item",
                "datavalue": {"type": "wikibase-entityid", "value": {"id": "Q5"}}}},
            "P17": [42, claim("P17", "wikibase-item", json!({"id": "Q183"}))],
            "P18": [{"mainsnak": 7}]
        });
        let categorized = categorize_claims(&claims);

        // P9001 and P9003 carry no main snak at all, so they are dropped.
        let ids: Vec<_> = categorized.iter().map(|c| c.property_id.as_str()).collect();
        assert_eq!(ids, vec!["P31", "P17", "P18", "P9002"]);

        assert_eq!(categorized.statements.len(), 1);
        assert_eq!(categorized.statements[0].property_id, "P9002");
        assert_eq!(categorized.statements[0].value, None);

        assert_eq!(
            categorized.basic[0].value.as_ref().map(ToString::to_string),
            Some("Q5".to_string())
        );
        assert_eq!(categorized.basic[2].property_id, "P18");
        assert_eq!(categorized.basic[2].value, None);
    }

    #[test]
    fn test_every_claim_lands_in_exactly_one_bucket() {
        let claims = json!({
            "P31": [claim("P31", "wikibase-item", json!({"id": "Q5"}))],
            "P646": [claim("P646", "external-id", json!("/m/0282x"))],
            "P373": [claim("P373", "string", json!("Douglas Adams"))],
            "P735": [claim("P735", "wikibase-item", json!({"id": "Q463035"}))],
            "P2561": [claim("P2561", "external-id", json!("odd"))]
        });
        let categorized = categorize_claims(&claims);
        assert_eq!(categorized.len(), 5);

        for property in ["P31", "P646", "P373", "P735", "P2561"] {
            let hits = [&categorized.basic, &categorized.identifiers, &categorized.statements]
                .iter()
                .filter(|bucket| bucket.iter().any(|c| c.property_id == property))
                .count();
            assert_eq!(hits, 1, "property {property}");
        }
    }

    #[test]
    fn test_non_object_claims_yield_empty() {
        assert!(categorize_claims(&json!(null)).is_empty());
        assert!(categorize_claims(&json!([1, 2, 3])).is_empty());
    }
}
