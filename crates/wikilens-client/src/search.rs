//! Text search over Wikidata items.
//!
//! The `wbsearchentities` action returns a loosely shaped list of hits; this
//! module reshapes each hit into a [`SearchResult`] with every field filled.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ClientError, ClientResult};

/// A single search hit, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Entity ID, e.g. `Q42`.
    pub id: String,
    /// Label in the search language, or the ID when the item has none.
    pub label: String,
    /// Short description, empty when absent.
    pub description: String,
    /// Concept URI, empty when absent.
    pub url: String,
}

// ---------------------------------------------------------------------------
// Action API response types (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    search: Vec<SearchHit>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(default)]
    id: String,
    label: Option<String>,
    description: Option<String>,
    concepturi: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    info: String,
}

impl From<SearchHit> for SearchResult {
    fn from(hit: SearchHit) -> Self {
        let label = hit
            .label
            .filter(|label| !label.is_empty())
            .unwrap_or_else(|| hit.id.clone());
        Self {
            id: hit.id,
            label,
            description: hit.description.unwrap_or_default(),
            url: hit.concepturi.unwrap_or_default(),
        }
    }
}

/// Reshape a raw `wbsearchentities` response body.
///
/// # Errors
///
/// Returns [`ClientError::Api`] when the body carries an `error` object and
/// [`ClientError::Parse`] when it is not shaped like a search response.
pub fn parse_search_response(body: Value) -> ClientResult<Vec<SearchResult>> {
    let response: SearchResponse =
        serde_json::from_value(body).map_err(|e| ClientError::Parse {
            message: e.to_string(),
        })?;

    if let Some(error) = response.error {
        return Err(ClientError::Api {
            code: error.code,
            info: error.info,
        });
    }

    Ok(response
        .search
        .into_iter()
        .filter(|hit| {
            if hit.id.is_empty() {
                log::debug!("dropping search hit without an id");
            }
            !hit.id.is_empty()
        })
        .map(SearchResult::from)
        .collect())
}
