use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A canonical Wikidata entity identifier such as `Q42`, `P31`, `L7` or
/// `L7-F1`.
///
/// Parsing is forgiving about where the identifier comes from: lower-case
/// prefixes, concept URIs (`http://www.wikidata.org/entity/Q42`) and prefixed
/// names (`wd:Q42`) all normalize to the same upper-case form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityId(String);

impl EntityId {
    /// Parse and canonicalize an identifier.
    ///
    /// # Errors
    /// Returns [`Error::InvalidEntityId`] when the input does not end in a
    /// `Q`/`P`/`L`/`M` identifier.
    pub fn parse(input: &str) -> Result<Self> {
        canonicalize(input)
            .map(Self)
            .ok_or_else(|| Error::InvalidEntityId(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The type letter (`Q`, `P`, `L` or `M`).
    pub fn prefix(&self) -> char {
        self.0.chars().next().unwrap_or('Q')
    }
}

fn canonicalize(input: &str) -> Option<String> {
    let trimmed = input.trim();
    let last_segment = trimmed.rsplit(['/', '#']).next().unwrap_or(trimmed);
    let candidate = last_segment
        .rsplit(':')
        .next()
        .unwrap_or(last_segment)
        .trim();

    let mut chars = candidate.chars();
    let prefix = chars.next()?.to_ascii_uppercase();
    if !matches!(prefix, 'Q' | 'P' | 'L' | 'M') {
        return None;
    }

    let rest = chars.as_str();
    let (digits, suffix) = match rest.split_once('-') {
        Some((digits, suffix)) => (digits, Some(suffix)),
        None => (rest, None),
    };
    if !is_number(digits) {
        return None;
    }

    let mut canonical = format!("{prefix}{digits}");
    if let Some(suffix) = suffix {
        // Only lexemes carry form (`-F1`) and sense (`-S1`) suffixes.
        if prefix != 'L' {
            return None;
        }
        let mut suffix_chars = suffix.chars();
        let kind = suffix_chars.next()?.to_ascii_uppercase();
        let suffix_digits = suffix_chars.as_str();
        if !matches!(kind, 'F' | 'S') || !is_number(suffix_digits) {
            return None;
        }
        canonical.push('-');
        canonical.push(kind);
        canonical.push_str(suffix_digits);
    }
    Some(canonical)
}

fn is_number(digits: &str) -> bool {
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EntityId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for EntityId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_item_id() {
        let id = EntityId::parse("Q42").unwrap();
        assert_eq!(id.as_str(), "Q42");
        assert_eq!(id.prefix(), 'Q');
    }

    #[test]
    fn test_parse_uppercases_prefix() {
        assert_eq!(EntityId::parse("q42").unwrap().as_str(), "Q42");
        assert_eq!(EntityId::parse(" p31 ").unwrap().as_str(), "P31");
    }

    #[test]
    fn test_parse_concept_uri_and_prefixed_name() {
        let from_uri = EntityId::parse("http://www.wikidata.org/entity/Q64").unwrap();
        let from_prefixed = EntityId::parse("wd:Q64").unwrap();
        assert_eq!(from_uri, from_prefixed);
        assert_eq!(from_uri.to_string(), "Q64");
    }

    #[test]
    fn test_parse_lexeme_form_and_sense() {
        assert_eq!(EntityId::parse("L7-f1").unwrap().as_str(), "L7-F1");
        assert_eq!(EntityId::parse("L7-S2").unwrap().as_str(), "L7-S2");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for input in ["", "Q", "X42", "Q4x2", "Q42-F1", "L7-X1", "L7-F"] {
            let err = EntityId::parse(input).unwrap_err();
            assert!(matches!(err, Error::InvalidEntityId(_)), "input {input:?}");
        }
    }

    #[test]
    fn test_serde_round_trip_rejects_invalid() {
        let id: EntityId = serde_json::from_str(r#""q5""#).unwrap();
        assert_eq!(id.as_str(), "Q5");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""Q5""#);
        assert!(serde_json::from_str::<EntityId>(r#""nope""#).is_err());
    }
}
