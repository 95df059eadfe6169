//! Sectioned view of a normalized entity, shared by the text renderer and
//! the explorer.

use std::collections::BTreeSet;

use wikilens_core::{NormalizedEntity, ProcessedClaim};

/// The five sections an entity is presented in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Properties,
    Identifiers,
    Statements,
    Links,
    Languages,
}

impl Section {
    pub const ALL: [Self; 5] = [
        Self::Properties,
        Self::Identifiers,
        Self::Statements,
        Self::Links,
        Self::Languages,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::Properties => "Properties",
            Self::Identifiers => "Identifiers",
            Self::Statements => "Statements",
            Self::Links => "Links",
            Self::Languages => "Languages",
        }
    }

    /// Shown when the section has nothing to list.
    pub fn empty_message(self) -> &'static str {
        match self {
            Self::Properties => "No basic properties",
            Self::Identifiers => "No identifiers",
            Self::Statements => "No other statements",
            Self::Links => "No sitelinks",
            Self::Languages => "No labels, descriptions or aliases",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// One line of a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionRow {
    /// A sub-heading inside a section (Languages groups by kind).
    Heading(String),
    Entry { key: String, value: String },
}

impl SectionRow {
    fn entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Entry {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// The rows of `section` for `entity`. Empty when the section has nothing
/// to show.
pub fn section_rows(entity: &NormalizedEntity, section: Section) -> Vec<SectionRow> {
    match section {
        Section::Properties => claim_rows(&entity.properties.basic),
        Section::Identifiers => claim_rows(&entity.properties.identifiers),
        Section::Statements => claim_rows(&entity.properties.statements),
        Section::Links => entity
            .sitelinks
            .values()
            .map(|link| SectionRow::entry(&link.site, format!("{}  {}", link.title, link.url)))
            .collect(),
        Section::Languages => language_rows(entity),
    }
}

fn claim_rows(claims: &[ProcessedClaim]) -> Vec<SectionRow> {
    claims
        .iter()
        .map(|claim| {
            let value = claim
                .value
                .as_ref()
                .map_or_else(|| "(unknown value)".to_string(), ToString::to_string);
            SectionRow::entry(
                format!("{} ({})", claim.property_label, claim.property_id),
                value,
            )
        })
        .collect()
}

fn language_rows(entity: &NormalizedEntity) -> Vec<SectionRow> {
    let mut rows = Vec::new();

    if !entity.labels.is_empty() {
        rows.push(SectionRow::Heading("Labels".to_string()));
        rows.extend(
            entity
                .labels
                .iter()
                .map(|(lang, label)| SectionRow::entry(lang, label)),
        );
    }

    if !entity.descriptions.is_empty() {
        rows.push(SectionRow::Heading("Descriptions".to_string()));
        rows.extend(
            entity
                .descriptions
                .iter()
                .map(|(lang, description)| SectionRow::entry(lang, description)),
        );
    }

    if !entity.aliases.is_empty() {
        rows.push(SectionRow::Heading("Aliases".to_string()));
        rows.extend(
            entity
                .aliases
                .iter()
                .map(|(lang, aliases)| SectionRow::entry(lang, aliases.join(", "))),
        );
    }

    rows
}

/// Number of distinct languages the entity has any text in.
pub fn language_count(entity: &NormalizedEntity) -> usize {
    entity
        .labels
        .keys()
        .chain(entity.descriptions.keys())
        .chain(entity.aliases.keys())
        .collect::<BTreeSet<_>>()
        .len()
}
