//! Scopus API client.
//!
//! Provides the [`AuthorIndex`] capability used by the resolver and its
//! HTTP implementation:
//! - Connection pooling via reqwest
//! - One rate limiter shared by every clone of the client
//! - Paginated author search, METRICS-view author retrieval

use std::sync::Arc;

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::Client;

use crate::config::{Config, api};
use crate::error::{ClientError, ClientResult};
use crate::models::{
    AuthorMetrics, AuthorRetrievalResponse, AuthorSearchEntry, AuthorSearchResponse, Candidate,
    SearchExpression,
};

/// Remote author index: candidate search plus metrics retrieval.
#[async_trait::async_trait]
pub trait AuthorIndex: Send + Sync {
    /// Candidates for an expression, in provider (relevance) order.
    async fn search(&self, expression: &SearchExpression) -> ClientResult<Vec<Candidate>>;

    /// Extended metrics for a candidate identifier.
    async fn retrieve(&self, identifier: &str) -> ClientResult<AuthorMetrics>;
}

/// Scopus API client.
#[derive(Clone)]
pub struct ScopusClient {
    /// HTTP client with credential headers.
    client: Client,

    /// Request limiter shared across clones.
    limiter: Arc<DefaultDirectRateLimiter>,

    /// Base URLs and paging settings.
    config: Arc<Config>,
}

impl ScopusClient {
    /// Create a new client with the given configuration.
    ///
    /// This is the one-time API setup: credentials are validated and baked
    /// into the default headers.
    ///
    /// # Errors
    ///
    /// Returns error if no API key is configured or HTTP client initialization fails.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let Some(key) = config.api_key.as_deref() else {
            anyhow::bail!("No Scopus API key configured. Set SCOPUS_API_KEY or pass --api-key.");
        };

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(reqwest::header::ACCEPT, "application/json".parse()?);
        headers.insert(api::API_KEY_HEADER, key.parse()?);

        if let Some(ref token) = config.inst_token {
            headers.insert(api::INST_TOKEN_HEADER, token.parse()?);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(api::MAX_KEEPALIVE)
            .pool_idle_timeout(api::KEEPALIVE_EXPIRY)
            .gzip(true)
            .build()?;

        let limiter = RateLimiter::direct(Quota::per_second(config.requests_per_second));

        Ok(Self { client, limiter: Arc::new(limiter), config: Arc::new(config) })
    }

    /// Check if an institution token is configured.
    #[must_use]
    pub fn has_inst_token(&self) -> bool {
        self.config.inst_token.is_some()
    }

    /// Search authors, following pages until the result set or the
    /// candidate cap is exhausted.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn search_authors(&self, expression: &SearchExpression) -> ClientResult<Vec<Candidate>> {
        let url = self.config.search_url();
        let max = self.config.max_candidates;
        let mut candidates = Vec::new();
        let mut start: u32 = 0;

        if max == 0 {
            return Ok(candidates);
        }

        loop {
            let count = self.config.page_size.min(max - start);
            let params = vec![
                ("query".to_string(), expression.to_string()),
                ("start".to_string(), start.to_string()),
                ("count".to_string(), count.to_string()),
            ];

            let page: AuthorSearchResponse = self.get(&url, &params).await?;
            let total = page.results.total.unwrap_or(0);
            let fetched = u32::try_from(page.results.entry.len()).unwrap_or(u32::MAX);

            candidates.extend(
                page.results.entry.into_iter().filter_map(AuthorSearchEntry::into_candidate),
            );

            start = start.saturating_add(fetched);
            if fetched == 0 || u64::from(start) >= total || start >= max {
                break;
            }
        }

        tracing::debug!(query = %expression, total = candidates.len(), "Author search complete");
        Ok(candidates)
    }

    /// Retrieve METRICS-view counters for an author.
    ///
    /// Accepts either a full EID or a bare numeric author ID.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn get_author_metrics(&self, identifier: &str) -> ClientResult<AuthorMetrics> {
        let author_id = identifier.rsplit('-').next().unwrap_or(identifier);
        let url = self.config.retrieval_url(author_id);
        let params = vec![("view".to_string(), api::METRICS_VIEW.to_string())];

        let response: AuthorRetrievalResponse = self.get(&url, &params).await?;
        let profile = response
            .profiles
            .into_first()
            .ok_or_else(|| ClientError::not_found(format!("author {author_id}")))?;

        Ok(AuthorMetrics::from(profile))
    }

    /// Make a GET request.
    async fn get<T>(&self, url: &str, params: &[(String, String)]) -> ClientResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.limiter.until_ready().await;

        let response = self.client.get(url).query(params).send().await?;

        let response = self.handle_response(response).await?;
        let value: serde_json::Value = response.json().await?;

        serde_json::from_value(value).map_err(ClientError::from)
    }

    /// Handle API response status codes.
    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        match status.as_u16() {
            401 | 403 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::Unauthorized { status: status.as_u16(), message: text })
            }
            429 => {
                let retry_after = response
                    .headers()
                    .get("Retry-After")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60);

                Err(ClientError::rate_limited(retry_after))
            }
            404 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::not_found(text))
            }
            400 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::bad_request(text))
            }
            500..=599 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::server(status.as_u16(), text))
            }
            _ => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::UnexpectedStatus { status: status.as_u16(), message: text })
            }
        }
    }
}

#[async_trait::async_trait]
impl AuthorIndex for ScopusClient {
    async fn search(&self, expression: &SearchExpression) -> ClientResult<Vec<Candidate>> {
        self.search_authors(expression).await
    }

    async fn retrieve(&self, identifier: &str) -> ClientResult<AuthorMetrics> {
        self.get_author_metrics(identifier).await
    }
}

impl std::fmt::Debug for ScopusClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopusClient")
            .field("base_url", &self.config.base_url)
            .field("has_inst_token", &self.has_inst_token())
            .finish()
    }
}
