//! OpenAlex works API client.
//!
//! Provides async HTTP client with:
//! - Connection pooling via reqwest
//! - Retry middleware with exponential backoff (429 and 5xx)
//! - Polite-pool identification (`mailto`) and optional API key

mod query;

pub use query::WorksQuery;

use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde_json::Value;

use crate::config::{Config, api};
use crate::error::{ClientError, ClientResult};
use crate::models::{WorkRecord, WorksPage};

/// Upstream operations the tools depend on.
///
/// `OpenAlexClient` is the production implementation; tests can inject a
/// fake through `ToolContext`.
#[async_trait::async_trait]
pub trait WorksApi: Send + Sync {
    /// Run a works list query and return one page.
    async fn list_works(&self, query: &WorksQuery) -> ClientResult<WorksPage>;

    /// Fetch one work. An empty `select` returns the full record.
    async fn get_work(&self, work_id: &str, select: &[String]) -> ClientResult<WorkRecord>;

    /// Fetch the n-gram sub-resource of a work.
    async fn get_work_ngrams(&self, work_id: &str) -> ClientResult<Value>;
}

/// OpenAlex API client.
#[derive(Clone)]
pub struct OpenAlexClient {
    /// HTTP client with middleware.
    client: ClientWithMiddleware,

    /// Contact email for the polite pool (optional).
    email: Option<String>,

    /// API key (optional).
    api_key: Option<String>,

    /// API base URL.
    api_url: String,
}

impl OpenAlexClient {
    /// Create a new client from the process configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let user_agent = match config.email {
            Some(ref email) => {
                format!("openalex-mcp/{} (mailto:{email})", env!("CARGO_PKG_VERSION"))
            }
            None => format!("openalex-mcp/{}", env!("CARGO_PKG_VERSION")),
        };

        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(api::MAX_KEEPALIVE)
            .pool_idle_timeout(api::KEEPALIVE_EXPIRY)
            .gzip(true)
            .build()?;

        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(api::RETRY_MIN_BACKOFF, api::RETRY_MAX_BACKOFF)
            .build_with_max_retries(config.max_retries);

        let client = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            email: config.email.clone(),
            api_key: config.api_key.clone(),
            api_url: config.api_url.clone(),
        })
    }

    /// Check if an API key is configured.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Check if requests identify themselves for the polite pool.
    #[must_use]
    pub fn has_email(&self) -> bool {
        self.email.is_some()
    }

    /// Make a GET request, adding credentials to the query string.
    async fn get<T>(&self, url: &str, params: &[(String, String)]) -> ClientResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let mut params = params.to_vec();
        if let Some(ref email) = self.email {
            params.push(("mailto".to_string(), email.clone()));
        }
        if let Some(ref key) = self.api_key {
            params.push(("api_key".to_string(), key.clone()));
        }

        tracing::debug!(url, "OpenAlex request");

        let response = self.client.get(url).query(&params).send().await?;

        let response = self.handle_response(response).await?;
        let value: Value = response.json().await?;

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
            429 => {
                let retry_after = response
                    .headers()
                    .get("Retry-After")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60);

                Err(ClientError::rate_limited(retry_after))
            }
            404 => Err(ClientError::not_found(response.url().path().to_string())),
            400 | 403 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::bad_request(upstream_message(&text)))
            }
            500..=599 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::server(status.as_u16(), upstream_message(&text)))
            }
            _ => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::UnexpectedStatus {
                    status: status.as_u16(),
                    message: upstream_message(&text),
                })
            }
        }
    }
}

#[async_trait::async_trait]
impl WorksApi for OpenAlexClient {
    async fn list_works(&self, query: &WorksQuery) -> ClientResult<WorksPage> {
        let url = format!("{}/works", self.api_url);
        self.get(&url, &query.to_params()).await
    }

    async fn get_work(&self, work_id: &str, select: &[String]) -> ClientResult<WorkRecord> {
        let url = format!("{}/works/{}", self.api_url, work_id);
        let params = if select.is_empty() {
            vec![]
        } else {
            vec![("select".to_string(), select.join(","))]
        };

        self.get(&url, &params).await
    }

    async fn get_work_ngrams(&self, work_id: &str) -> ClientResult<Value> {
        let url = format!("{}/works/{}/ngrams", self.api_url, work_id);
        self.get(&url, &[]).await
    }
}

impl std::fmt::Debug for OpenAlexClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAlexClient")
            .field("api_url", &self.api_url)
            .field("has_email", &self.has_email())
            .field("has_api_key", &self.has_api_key())
            .finish()
    }
}

/// Pull the human-readable message out of an OpenAlex error body.
///
/// OpenAlex answers errors with `{"error": "...", "message": "..."}`; other
/// bodies are passed through as-is.
fn upstream_message(body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let field = |name: &str| {
        parsed.as_ref().and_then(|v| v.get(name)).and_then(Value::as_str).map(str::to_string)
    };

    field("message").or_else(|| field("error")).unwrap_or_else(|| body.trim().to_string())
}
