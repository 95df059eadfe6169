use serde::Serialize;
use std::collections::BTreeMap;

use super::value::ExtractedValue;

/// One claim after extraction, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedClaim {
    #[serde(rename = "id")]
    pub property_id: String,

    /// English label from the static property table, or the raw ID.
    #[serde(rename = "label")]
    pub property_label: String,

    /// `None` when the main snak carries no datavalue (e.g. `somevalue`).
    pub value: Option<ExtractedValue>,
}

/// Claims partitioned into the three explorer sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategorizedProperties {
    pub basic: Vec<ProcessedClaim>,
    pub identifiers: Vec<ProcessedClaim>,
    pub statements: Vec<ProcessedClaim>,
}

impl CategorizedProperties {
    /// Total number of claims across all buckets.
    pub fn len(&self) -> usize {
        self.basic.len() + self.identifiers.len() + self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over every claim, basic first, then identifiers, then
    /// statements.
    pub fn iter(&self) -> impl Iterator<Item = &ProcessedClaim> {
        self.basic
            .iter()
            .chain(&self.identifiers)
            .chain(&self.statements)
    }
}

/// A link from the entity to a page on another wiki.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sitelink {
    pub site: String,
    pub title: String,
    pub url: String,
}

/// The fully normalized view of one entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedEntity {
    pub id: String,
    pub labels: BTreeMap<String, String>,
    pub descriptions: BTreeMap<String, String>,
    pub aliases: BTreeMap<String, Vec<String>>,
    pub sitelinks: BTreeMap<String, Sitelink>,

    /// The raw claims object, passed through untouched for callers that need
    /// the original data.
    pub claims: serde_json::Value,

    pub properties: CategorizedProperties,
}

impl NormalizedEntity {
    /// Label in `lang`, falling back to English, then to any language.
    pub fn preferred_label(&self, lang: &str) -> Option<&str> {
        preferred(&self.labels, lang)
    }

    /// Description in `lang`, falling back to English, then to any language.
    pub fn preferred_description(&self, lang: &str) -> Option<&str> {
        preferred(&self.descriptions, lang)
    }
}

fn preferred<'a>(map: &'a BTreeMap<String, String>, lang: &str) -> Option<&'a str> {
    map.get(lang)
        .or_else(|| map.get("en"))
        .or_else(|| map.values().next())
        .map(String::as_str)
}
