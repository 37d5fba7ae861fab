//! Configuration for the Scopus author metrics resolver.

use std::num::NonZeroU32;
use std::time::Duration;

/// API configuration constants.
pub mod api {
    use std::num::NonZeroU32;
    use std::time::Duration;

    /// Base URL for the Elsevier APIs.
    pub const BASE_URL: &str = "https://api.elsevier.com";

    /// Author search endpoint, relative to the base URL.
    pub const AUTHOR_SEARCH_PATH: &str = "/content/search/author";

    /// Author retrieval endpoint, relative to the base URL.
    pub const AUTHOR_RETRIEVAL_PATH: &str = "/content/author/author_id";

    /// Retrieval view carrying h-index, document and citation counts.
    pub const METRICS_VIEW: &str = "METRICS";

    /// Public author profile page; the numeric author ID is appended.
    pub const PROFILE_URL: &str = "https://www.scopus.com/authid/detail.uri?authorId=";

    /// Header carrying the API key (`X-ELS-APIKey`).
    pub const API_KEY_HEADER: &str = "x-els-apikey";

    /// Header carrying the optional institution token (`X-ELS-Insttoken`).
    pub const INST_TOKEN_HEADER: &str = "x-els-insttoken";

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Requests per second shared by all resolutions (Scopus throttles author
    /// search at 2 req/s for standard keys).
    pub const REQUESTS_PER_SECOND: NonZeroU32 = match NonZeroU32::new(2) {
        Some(n) => n,
        None => unreachable!(),
    };

    /// Entries requested per search page.
    pub const PAGE_SIZE: u32 = 25;

    /// Upper bound on candidates collected for one query.
    pub const MAX_CANDIDATES: u32 = 200;

    /// Maximum idle connections kept per host.
    pub const MAX_KEEPALIVE: usize = 10;

    /// Keepalive expiry.
    pub const KEEPALIVE_EXPIRY: Duration = Duration::from_secs(30);
}

/// Output defaults.
pub mod output {
    /// Default input file.
    pub const DEFAULT_INPUT: &str = "names.txt";

    /// Default output workbook.
    pub const DEFAULT_OUTPUT: &str = "author_metrics.xlsx";

    /// Default worksheet name.
    pub const DEFAULT_SHEET: &str = "metrics";

    /// Fill color for low-confidence rows (ARGB without alpha).
    pub const FLAG_FILL_RGB: &str = "FFC7CE";
}

/// Resolver configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Scopus API key.
    pub api_key: Option<String>,

    /// Institution token (optional, grants off-campus entitlements).
    pub inst_token: Option<String>,

    /// Base URL for the Elsevier APIs (for testing with mock servers).
    pub base_url: String,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Requests per second across the whole client.
    pub requests_per_second: NonZeroU32,

    /// Entries requested per search page.
    pub page_size: u32,

    /// Upper bound on candidates collected per query.
    pub max_candidates: u32,
}

impl Config {
    /// Create a new configuration with the given credentials.
    #[must_use]
    pub fn new(api_key: Option<String>, inst_token: Option<String>) -> Self {
        Self {
            api_key,
            inst_token,
            base_url: api::BASE_URL.to_string(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            requests_per_second: api::REQUESTS_PER_SECOND,
            page_size: api::PAGE_SIZE,
            max_candidates: api::MAX_CANDIDATES,
        }
    }

    /// Create a test configuration pointing at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            api_key: Some("test-key".to_string()),
            inst_token: None,
            base_url: base_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            requests_per_second: NonZeroU32::MAX, // effectively unthrottled
            page_size: api::PAGE_SIZE,
            max_candidates: api::MAX_CANDIDATES,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads `SCOPUS_API_KEY` and `SCOPUS_INST_TOKEN`.
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = std::env::var("SCOPUS_API_KEY").ok().filter(|k| !k.is_empty());
        let inst_token = std::env::var("SCOPUS_INST_TOKEN").ok().filter(|t| !t.is_empty());
        Ok(Self::new(api_key, inst_token))
    }

    /// Full author search URL.
    #[must_use]
    pub fn search_url(&self) -> String {
        format!("{}{}", self.base_url, api::AUTHOR_SEARCH_PATH)
    }

    /// Full author retrieval URL for a numeric author ID.
    #[must_use]
    pub fn retrieval_url(&self, author_id: &str) -> String {
        format!("{}{}/{}", self.base_url, api::AUTHOR_RETRIEVAL_PATH, author_id)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.api_key.is_none());
        assert!(config.api_key.is_none());
        assert_eq!(config.base_url, api::BASE_URL);
    }

    #[test]
    fn test_config_with_api_key() {
        let config = Config::new(Some("test-key".to_string()), None);
        assert_eq!(config.api_key, Some("test-key".to_string()));
    }

    #[test]
    fn test_urls() {
        let config = Config::for_testing("http://127.0.0.1:9000/");
        assert_eq!(config.search_url(), "http://127.0.0.1:9000/content/search/author");
        assert_eq!(
            config.retrieval_url("7004212771"),
            "http://127.0.0.1:9000/content/author/author_id/7004212771"
        );
    }
}
