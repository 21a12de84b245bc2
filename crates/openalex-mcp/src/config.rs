//! Configuration for the OpenAlex MCP server.

use std::time::Duration;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// Base URL for the OpenAlex REST API.
    pub const BASE_URL: &str = "https://api.openalex.org";

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Retries for transient upstream failures (429, 5xx, connection resets).
    pub const MAX_RETRIES: u32 = 3;

    /// Lower bound for exponential backoff between retries.
    pub const RETRY_MIN_BACKOFF: Duration = Duration::from_millis(500);

    /// Upper bound for exponential backoff between retries.
    pub const RETRY_MAX_BACKOFF: Duration = Duration::from_secs(30);

    /// Maximum keepalive connections.
    pub const MAX_KEEPALIVE: usize = 10;

    /// Keepalive expiry.
    pub const KEEPALIVE_EXPIRY: Duration = Duration::from_secs(30);
}

/// Paging limits accepted by the works endpoint.
pub mod paging {
    /// Default page size.
    pub const DEFAULT_PER_PAGE: u32 = 25;

    /// Largest page size OpenAlex serves.
    pub const MAX_PER_PAGE: u32 = 200;

    /// Cursor value that starts pagination from the first page.
    pub const FIRST_PAGE_CURSOR: &str = "*";

    /// Maximum IDs per batch lookup (OR-filter length limit upstream).
    pub const MAX_BATCH_IDS: usize = 50;
}

/// Work field names with special handling.
pub mod fields {
    /// Plaintext abstract key exposed to agents.
    pub const ABSTRACT: &str = "abstract";

    /// Upstream key holding the word-to-positions abstract encoding.
    pub const ABSTRACT_INVERTED_INDEX: &str = "abstract_inverted_index";

    /// Outgoing citation list of a work.
    pub const REFERENCED_WORKS: &str = "referenced_works";

    /// Identifier field.
    pub const ID: &str = "id";
}

/// Server configuration.
#[derive(Clone)]
pub struct Config {
    /// Contact email for the OpenAlex polite pool (optional).
    pub email: Option<String>,

    /// OpenAlex API key (optional).
    pub api_key: Option<String>,

    /// Base URL for the works API (overridable for mock servers).
    pub api_url: String,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Retries for transient failures.
    pub max_retries: u32,
}

impl Config {
    /// Create a new configuration.
    ///
    /// Blank values are treated as absent, so an exported but empty
    /// `OPENALEX_API_KEY` does not send an empty key upstream.
    #[must_use]
    pub fn new(email: Option<String>, api_key: Option<String>) -> Self {
        Self {
            email: non_blank(email),
            api_key: non_blank(api_key),
            api_url: api::BASE_URL.to_string(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            max_retries: api::MAX_RETRIES,
        }
    }

    /// Create a test configuration pointing at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            email: None,
            api_key: None,
            api_url: base_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            max_retries: 0, // Errors surface immediately in tests
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads `OPENALEX_EMAIL`, `OPENALEX_API_KEY` and `OPENALEX_API_URL`.
    ///
    /// # Errors
    ///
    /// Returns error if `OPENALEX_API_URL` is not a valid URL.
    pub fn from_env() -> anyhow::Result<Self> {
        let email = std::env::var("OPENALEX_EMAIL").ok();
        let api_key = std::env::var("OPENALEX_API_KEY").ok();
        let config = Self::new(email, api_key);

        match non_blank(std::env::var("OPENALEX_API_URL").ok()) {
            Some(url) => config.with_api_url(&url),
            None => Ok(config),
        }
    }

    /// Override the API base URL.
    ///
    /// # Errors
    ///
    /// Returns error if `url` does not parse.
    pub fn with_api_url(mut self, url: &str) -> anyhow::Result<Self> {
        let parsed = url::Url::parse(url)?;
        self.api_url = parsed.as_str().trim_end_matches('/').to_string();
        Ok(self)
    }

    /// Check if an API key is configured.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Check if requests go to the polite pool.
    #[must_use]
    pub const fn has_email(&self) -> bool {
        self.email.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("email", &self.email)
            .field("has_api_key", &self.has_api_key())
            .field("api_url", &self.api_url)
            .field("request_timeout", &self.request_timeout)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
