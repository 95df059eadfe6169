//! Normalizers for the multilingual and sitelink maps of an entity.
//!
//! Wikidata nests every label as `{"language": "en", "value": "..."}`, every
//! alias list as an array of such objects and every sitelink as
//! `{"site", "title", "badges", "url"}`. The functions here flatten those maps
//! into plain strings. Entries with an unexpected shape are coerced to text;
//! they never abort normalization.

use serde_json::Value;
use std::collections::BTreeMap;

use crate::model::Sitelink;

/// Sister projects whose site keys end in the project name rather than
/// `wiki`, e.g. `enwikiquote` → `en.wikiquote.org`.
const SISTER_PROJECTS: &[&str] = &[
    "wikiquote",
    "wikisource",
    "wikivoyage",
    "wikinews",
    "wikibooks",
    "wikiversity",
    "wiktionary",
];

/// Site keys that do not follow the `{lang}wiki` pattern.
const SPECIAL_SITES: &[(&str, &str)] = &[
    ("commonswiki", "commons.wikimedia.org"),
    ("specieswiki", "species.wikimedia.org"),
    ("metawiki", "meta.wikimedia.org"),
    ("mediawikiwiki", "www.mediawiki.org"),
    ("wikidatawiki", "www.wikidata.org"),
    ("sourceswiki", "wikisource.org"),
];

/// Render any JSON value as a plain string.
///
/// Strings pass through; objects contribute their `value` or `text` field
/// when it is a non-empty string; everything else becomes its compact JSON
/// text.
pub fn coerce_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(map) => ["value", "text"]
            .iter()
            .filter_map(|key| map.get(*key).and_then(Value::as_str))
            .find(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| value.to_string()),
        other => other.to_string(),
    }
}

/// Flatten a language-keyed label or description map.
pub fn normalize_labels(items: &Value) -> BTreeMap<String, String> {
    let Some(map) = as_map(items, "labels") else {
        return BTreeMap::new();
    };
    map.iter()
        .map(|(lang, item)| (lang.clone(), coerce_text(item)))
        .collect()
}

/// Flatten a language-keyed alias map, keeping each language's order.
///
/// A language whose entry is not an array yields a single alias holding the
/// entry's text.
pub fn normalize_aliases(aliases: &Value) -> BTreeMap<String, Vec<String>> {
    let Some(map) = as_map(aliases, "aliases") else {
        return BTreeMap::new();
    };
    map.iter()
        .map(|(lang, entry)| {
            let list = match entry {
                Value::Array(items) => items.iter().map(coerce_text).collect(),
                other => {
                    log::debug!("aliases for {} are not a list, coercing", lang);
                    vec![coerce_text(other)]
                }
            };
            (lang.clone(), list)
        })
        .collect()
}

/// Flatten a site-keyed sitelink map, deriving URLs that are missing.
pub fn normalize_sitelinks(sitelinks: &Value) -> BTreeMap<String, Sitelink> {
    let Some(map) = as_map(sitelinks, "sitelinks") else {
        return BTreeMap::new();
    };
    map.iter()
        .map(|(site, entry)| (site.clone(), normalize_sitelink(site, entry)))
        .collect()
}

fn normalize_sitelink(site: &str, entry: &Value) -> Sitelink {
    let title = match entry {
        Value::String(s) => s.clone(),
        Value::Object(map) => match map.get("title") {
            Some(Value::String(s)) => s.clone(),
            Some(other) => coerce_text(other),
            None => coerce_text(entry),
        },
        other => coerce_text(other),
    };
    let url = entry
        .get("url")
        .and_then(Value::as_str)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| sitelink_url(site, &title));

    Sitelink {
        site: site.to_string(),
        title,
        url,
    }
}

/// Derive the page URL for a sitelink.
///
/// `enwiki` + `Albert Einstein` →
/// `https://en.wikipedia.org/wiki/Albert_Einstein`. Keys without a
/// recognisable suffix are taken to be Wikipedia language codes.
pub fn sitelink_url(site: &str, title: &str) -> String {
    let host = sitelink_host(site);
    let path = urlencoding::encode(&title.replace(' ', "_")).into_owned();
    format!("https://{}/wiki/{}", host, path)
}

fn sitelink_host(site: &str) -> String {
    if let Some((_, host)) = SPECIAL_SITES.iter().find(|(key, _)| *key == site) {
        return (*host).to_string();
    }
    for project in SISTER_PROJECTS {
        if let Some(lang) = site.strip_suffix(project).filter(|l| !l.is_empty()) {
            return format!("{}.{}.org", language_subdomain(lang), project);
        }
    }
    let lang = site
        .strip_suffix("wiki")
        .filter(|l| !l.is_empty())
        .unwrap_or(site);
    format!("{}.wikipedia.org", language_subdomain(lang))
}

/// Site keys use underscores where hostnames use hyphens (`zh_yue`).
fn language_subdomain(lang: &str) -> String {
    lang.replace('_', "-")
}

fn as_map<'a>(value: &'a Value, what: &str) -> Option<&'a serde_json::Map<String, Value>> {
    match value {
        Value::Object(map) => Some(map),
        Value::Null => None,
        _ => {
            log::debug!("{} is not an object, ignoring", what);
            None
        }
    }
}
