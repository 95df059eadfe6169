//! Retrieval error types.

use thiserror::Error;

/// Errors that can occur while talking to Wikidata.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Wikidata answered with a non-success HTTP status.
    #[error("HTTP {status} from Wikidata for {url}")]
    Http { status: u16, url: String },

    /// Wikidata returned a rate-limit response.
    #[error("rate limited by Wikidata")]
    RateLimited,

    /// The requested entity does not exist.
    #[error("not found: {entity} at Wikidata")]
    NotFound { entity: String },

    /// The caller supplied something that is not an entity ID.
    #[error("invalid entity id: {0:?}")]
    InvalidId(String),

    /// The Action API reported an error in its response body.
    #[error("Wikidata API error {code}: {info}")]
    Api { code: String, info: String },

    /// A response could not be parsed.
    #[error("parse error from Wikidata: {message}")]
    Parse { message: String },

    /// An error propagated from `reqwest`.
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The document was fetched but could not be normalized.
    #[error("normalization error: {0}")]
    Normalize(wikilens_core::Error),
}

impl ClientError {
    /// Returns `true` when the error is transient and the request may
    /// succeed if retried.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http { status, .. } => *status >= 500,
            Self::RateLimited => true,
            Self::Request(err) => err.is_timeout() || err.is_connect(),
            _ => false,
        }
    }

    /// Returns `true` when the error indicates the entity was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<wikilens_core::Error> for ClientError {
    fn from(err: wikilens_core::Error) -> Self {
        match err {
            wikilens_core::Error::NotFound { id } => Self::NotFound { entity: id },
            wikilens_core::Error::InvalidEntityId(input) => Self::InvalidId(input),
            other => Self::Normalize(other),
        }
    }
}

/// Convenience alias for retrieval results.
pub type ClientResult<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_errors_and_rate_limits_are_transient() {
        let server = ClientError::Http {
            status: 503,
            url: "https://www.wikidata.org".to_string(),
        };
        assert!(server.is_transient());
        assert!(ClientError::RateLimited.is_transient());
    }

    #[test]
    fn test_client_errors_are_not_transient() {
        let bad_request = ClientError::Http {
            status: 400,
            url: "https://www.wikidata.org".to_string(),
        };
        assert!(!bad_request.is_transient());
        assert!(!ClientError::Parse {
            message: "eof".to_string()
        }
        .is_transient());
    }

    #[test]
    fn test_core_not_found_maps_to_not_found() {
        let err: ClientError = wikilens_core::Error::NotFound {
            id: "Q1".to_string(),
        }
        .into();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "not found: Q1 at Wikidata");
    }

    #[test]
    fn test_core_invalid_id_maps_to_invalid_id() {
        let err: ClientError = wikilens_core::Error::InvalidEntityId("Berlin".to_string()).into();
        assert!(matches!(err, ClientError::InvalidId(ref input) if input == "Berlin"));
        assert!(!err.is_transient());
    }

    #[test]
    fn test_other_core_errors_stay_distinct_from_not_found() {
        let err: ClientError =
            wikilens_core::Error::InvalidDocument("expected a JSON object".to_string()).into();
        assert!(!err.is_not_found());
        assert!(matches!(err, ClientError::Normalize(_)));
    }
}
