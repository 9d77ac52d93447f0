//! Authenticated HTTP source backed by reqwest

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Client as HttpClient;
use std::time::Duration;
use txweb_config::ApiConfig;
use txweb_core::envelope::{self, Endpoint};
use txweb_core::{CoreError, CoreResult, DetailResponse, ListResponse};

use crate::error::ClientError;
use crate::TransactionSource;

/// Client for the upstream transactions API
#[derive(Clone)]
pub struct HttpTransactionSource {
    http_client: HttpClient,
    base_url: String,
    detail_retry_attempts: u32,
    retry_base_delay: Duration,
}

impl HttpTransactionSource {
    const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(500);

    /// Build a source from the `api` config section
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::InvalidBaseUrl { url: config.base_url.clone() });
        }

        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(Self::create_headers(config.token.as_deref())?)
            .build()?;

        Ok(Self {
            http_client,
            base_url,
            detail_retry_attempts: config.detail_retry_attempts,
            retry_base_delay: Self::DEFAULT_RETRY_DELAY,
        })
    }

    /// Override the first backoff delay (doubles on each retry)
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }

    /// Default headers, including the bearer token when configured
    fn create_headers(token: Option<&str>) -> Result<HeaderMap, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(token) = token.filter(|t| !t.is_empty()) {
            let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| ClientError::InvalidToken { message: e.to_string() })?;
            auth_value.set_sensitive(true);
            headers.insert(AUTHORIZATION, auth_value);
        }

        Ok(headers)
    }

    fn url(&self, key: &str) -> String {
        format!("{}{}", self.base_url, key)
    }

    /// GET `key` and return the body of a 2xx response
    async fn get(&self, key: &str, endpoint: Endpoint) -> CoreResult<Vec<u8>> {
        let url = self.url(key);
        log::debug!(target: "txweb::client", "GET {}", url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| CoreError::Network { message: e.to_string() })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| CoreError::Network { message: e.to_string() })?;

        if !status.is_success() {
            let error = envelope::upstream_error(
                endpoint,
                status.as_u16(),
                status.canonical_reason().unwrap_or(""),
                &body,
            );
            log::warn!(target: "txweb::client", "GET {} failed with {}: {}", key, status, error);
            return Err(error);
        }

        Ok(body.to_vec())
    }

    async fn detail_once(&self, key: &str) -> CoreResult<DetailResponse> {
        let body = self.get(key, Endpoint::Detail).await?;
        envelope::decode(&body)
    }
}

#[async_trait]
impl TransactionSource for HttpTransactionSource {
    async fn fetch_list(&self, key: &str) -> CoreResult<ListResponse> {
        // No retry: a failed list fetch is reported and left to the user
        let body = self.get(key, Endpoint::List).await?;
        envelope::decode(&body)
    }

    async fn fetch_detail(&self, key: &str) -> CoreResult<DetailResponse> {
        let mut delay = self.retry_base_delay;
        let mut attempt = 0;
        loop {
            match self.detail_once(key).await {
                Err(e) if e.is_transient() && attempt < self.detail_retry_attempts => {
                    attempt += 1;
                    log::info!(
                        target: "txweb::client",
                        "Retrying {} in {:?} (attempt {}/{}): {}",
                        key, delay, attempt, self.detail_retry_attempts, e
                    );
                    tokio::time::sleep(delay).await;
                    delay = delay.saturating_mul(2);
                }
                result => return result,
            }
        }
    }
}
