//! Wikidata HTTP client.
//!
//! Talks to two endpoints:
//!
//! - the Action API (`w/api.php?action=wbsearchentities`) for text search,
//! - `Special:EntityData/{id}.json` for full entity documents.
//!
//! Every request goes through the client's [`RateLimiter`] and is retried
//! with exponential backoff when the failure is transient (5xx, 429,
//! timeouts, refused connections).

use std::time::Duration;

use backon::{ExponentialBuilder, Retryable};
use reqwest::{Client, StatusCode};
use serde_json::Value;

use wikilens_core::{normalize_entity, EntityId, NormalizedEntity};

use crate::config::Config;
use crate::error::{ClientError, ClientResult};
use crate::resilience::RateLimiter;
use crate::search::{parse_search_response, SearchResult};

/// Wikidata search and entity-data client.
///
/// Wraps a `reqwest::Client` pre-configured with the configured user agent
/// and timeout, plus a per-client [`RateLimiter`].
#[derive(Debug, Clone)]
pub struct WikidataClient {
    http: Client,
    rate_limiter: RateLimiter,
    api_endpoint: String,
    entity_data_endpoint: String,
    language: String,
    search_limit: u32,
    max_retries: usize,
}

impl WikidataClient {
    /// Create a new Wikidata client from configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: &Config) -> ClientResult<Self> {
        let http = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            rate_limiter: RateLimiter::new(config.requests_per_second),
            api_endpoint: config.api_endpoint.clone(),
            entity_data_endpoint: config.entity_data_endpoint.trim_end_matches('/').to_string(),
            language: config.language.clone(),
            search_limit: config.search_limit,
            max_retries: config.max_retries,
        })
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Search items matching `query`, up to the configured limit.
    ///
    /// # Errors
    /// See [`WikidataClient::search_with_limit`].
    pub async fn search(&self, query: &str) -> ClientResult<Vec<SearchResult>> {
        self.search_with_limit(query, self.search_limit).await
    }

    /// Search items matching `query`, returning at most `limit` hits.
    ///
    /// A blank query yields no results and sends no request.
    ///
    /// # Errors
    /// Returns an error on HTTP failure, when the Action API reports an
    /// error, or if the response cannot be parsed.
    pub async fn search_with_limit(
        &self,
        query: &str,
        limit: u32,
    ) -> ClientResult<Vec<SearchResult>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let limit = limit.to_string();
        let params = [
            ("action", "wbsearchentities"),
            ("search", query),
            ("language", self.language.as_str()),
            ("uselang", self.language.as_str()),
            ("type", "item"),
            ("format", "json"),
            ("limit", limit.as_str()),
        ];

        let body = self.get_json(&self.api_endpoint, &params, query).await?;
        let results = parse_search_response(body)?;
        log::debug!("Search for {:?} returned {} result(s)", query, results.len());
        Ok(results)
    }

    /// URL of the `Special:EntityData` JSON document for `id`.
    pub fn entity_data_url(&self, id: &EntityId) -> String {
        format!("{}/{}.json", self.entity_data_endpoint, id)
    }

    /// Fetch the raw `Special:EntityData` document for `id`.
    ///
    /// # Errors
    /// [`ClientError::NotFound`] on a 404, [`ClientError::RateLimited`] once
    /// retries are exhausted on 429, [`ClientError::Http`] for any other
    /// non-success status and [`ClientError::Parse`] for a body that is not
    /// JSON.
    pub async fn fetch_entity_document(&self, id: &EntityId) -> ClientResult<Value> {
        let url = self.entity_data_url(id);
        self.get_json(&url, &[], id.as_str()).await
    }

    /// Fetch and normalize the entity `id`.
    ///
    /// `id` may be a bare ID (`Q42`) or a concept URI
    /// (`http://www.wikidata.org/entity/Q42`).
    ///
    /// # Errors
    /// [`ClientError::InvalidId`] when `id` is not an entity ID,
    /// [`ClientError::NotFound`] when Wikidata has no such entity (including
    /// redirects, whose document is keyed by the target ID), and the errors
    /// of [`WikidataClient::fetch_entity_document`].
    pub async fn fetch_entity(&self, id: &str) -> ClientResult<NormalizedEntity> {
        let id = EntityId::parse(id)?;
        let document = self.fetch_entity_document(&id).await?;
        let entity = normalize_entity(&document, id.as_str())?;
        log::info!(
            "Fetched {} ({} propert{})",
            entity.id,
            entity.properties.len(),
            if entity.properties.len() == 1 { "y" } else { "ies" }
        );
        Ok(entity)
    }

    async fn get_json(
        &self,
        url: &str,
        query: &[(&str, &str)],
        subject: &str,
    ) -> ClientResult<Value> {
        (|| self.get_json_once(url, query, subject))
            .retry(self.backoff())
            .when(ClientError::is_transient)
            .notify(|err: &ClientError, delay: Duration| {
                log::warn!("Retrying Wikidata request for {subject} in {delay:?}: {err}");
            })
            .await
    }

    async fn get_json_once(
        &self,
        url: &str,
        query: &[(&str, &str)],
        subject: &str,
    ) -> ClientResult<Value> {
        self.rate_limiter.acquire().await;
        log::trace!("GET {url}");

        let response = self.http.get(url).query(query).send().await?;
        check_status(response.status(), url, subject)?;

        response.json().await.map_err(|e| ClientError::Parse {
            message: e.to_string(),
        })
    }

    fn backoff(&self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(Duration::from_millis(200))
            .with_max_times(self.max_retries)
    }
}

fn check_status(status: StatusCode, url: &str, subject: &str) -> ClientResult<()> {
    match status {
        StatusCode::NOT_FOUND => Err(ClientError::NotFound {
            entity: subject.to_string(),
        }),
        StatusCode::TOO_MANY_REQUESTS => Err(ClientError::RateLimited),
        status if !status.is_success() => Err(ClientError::Http {
            status: status.as_u16(),
            url: url.to_string(),
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> WikidataClient {
        WikidataClient::new(&Config::default()).unwrap()
    }

    #[test]
    fn test_wikidata_client_creation_succeeds() {
        assert!(WikidataClient::new(&Config::default()).is_ok());
    }

    #[test]
    fn test_wikidata_client_debug_format() {
        let debug = format!("{:?}", client());
        assert!(debug.contains("WikidataClient"));
        assert!(debug.contains("RateLimiter"));
    }

    #[test]
    fn test_entity_data_url() {
        let id = EntityId::parse("Q42").unwrap();
        assert_eq!(
            client().entity_data_url(&id),
            "https://www.wikidata.org/wiki/Special:EntityData/Q42.json"
        );
    }

    #[test]
    fn test_entity_data_url_ignores_trailing_slash() {
        let config = Config {
            entity_data_endpoint: "http://localhost:8080/entity/".to_string(),
            ..Config::default()
        };
        let client = WikidataClient::new(&config).unwrap();
        let id = EntityId::parse("P31").unwrap();
        assert_eq!(
            client.entity_data_url(&id),
            "http://localhost:8080/entity/P31.json"
        );
    }

    #[test]
    fn test_language_comes_from_config() {
        let config = Config {
            language: "de".to_string(),
            ..Config::default()
        };
        assert_eq!(WikidataClient::new(&config).unwrap().language(), "de");
    }

    #[tokio::test]
    async fn test_blank_search_sends_nothing() {
        // Unroutable endpoint: a request would fail rather than succeed.
        let config = Config {
            api_endpoint: "http://127.0.0.1:9/w/api.php".to_string(),
            max_retries: 0,
            ..Config::default()
        };
        let client = WikidataClient::new(&config).unwrap();
        assert!(client.search("   ").await.unwrap().is_empty());
        assert!(client.search("").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_id_fails_before_any_request() {
        let err = client().fetch_entity("Douglas Adams").await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidId(_)));
    }

    #[test]
    fn test_status_mapping() {
        let url = "https://www.wikidata.org/wiki/Special:EntityData/Q1.json";
        assert!(check_status(StatusCode::OK, url, "Q1").is_ok());
        assert!(check_status(StatusCode::NOT_FOUND, url, "Q1")
            .unwrap_err()
            .is_not_found());
        assert!(matches!(
            check_status(StatusCode::TOO_MANY_REQUESTS, url, "Q1"),
            Err(ClientError::RateLimited)
        ));
        assert!(matches!(
            check_status(StatusCode::BAD_GATEWAY, url, "Q1"),
            Err(ClientError::Http { status: 502, .. })
        ));
        assert!(matches!(
            check_status(StatusCode::FORBIDDEN, url, "Q1"),
            Err(ClientError::Http { status: 403, .. })
        ));
    }
}
