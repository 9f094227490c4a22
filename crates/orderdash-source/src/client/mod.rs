//! HTTP client for the remote order API.

mod paged;

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use orderdash_core::{AppConfig, NormalizedOrder};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Url};
use serde::Serialize;

use crate::cache::ResponseCache;
use crate::error::SourceError;
use crate::extract::extract_orders;
use crate::normalize::normalize;
use crate::retry::retry_with_fixed_backoff;
use crate::types::RawOrder;

pub(crate) use paged::page_url;

/// Per-request fetch settings. Also part of the cache key, so changing any
/// option bypasses entries stored under different options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchOptions {
    pub timeout_secs: u64,
    /// TTL of the read-through cache; `None` skips the cache entirely.
    pub cache_minutes: Option<u64>,
    /// Maximum number of attempts, including the first.
    pub retry_count: u32,
    /// Fixed pause between attempts.
    pub retry_backoff_ms: u64,
    pub headers: BTreeMap<String, String>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            cache_minutes: None,
            retry_count: 3,
            retry_backoff_ms: 1_000,
            headers: BTreeMap::new(),
        }
    }
}

impl FetchOptions {
    /// Options for the configured source, with the API token (if any) sent
    /// as a bearer `Authorization` header.
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        let mut headers = BTreeMap::new();
        if let Some(token) = &config.source_api_token {
            headers.insert("Authorization".to_owned(), format!("Bearer {token}"));
        }
        Self {
            timeout_secs: config.source_timeout_secs,
            cache_minutes: config.source_cache_minutes,
            retry_count: config.source_retry_count,
            retry_backoff_ms: config.source_retry_backoff_ms,
            headers,
        }
    }

    fn cache_ttl(&self) -> Option<Duration> {
        self.cache_minutes
            .filter(|m| *m > 0)
            .map(|m| Duration::from_secs(m.saturating_mul(60)))
    }
}

/// HTTP client for the order source.
///
/// Each fetch enforces the caller's timeout, retries transient failures a
/// bounded number of times with a fixed pause, and optionally reads through
/// a shared [`ResponseCache`].
pub struct OrderSourceClient {
    client: Client,
    cache: Arc<ResponseCache>,
}

impl OrderSourceClient {
    /// Creates a client with its own empty cache.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(user_agent: &str) -> Result<Self, SourceError> {
        Self::with_cache(user_agent, Arc::new(ResponseCache::new()))
    }

    /// Creates a client that shares `cache` with other clients.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_cache(user_agent: &str, cache: Arc<ResponseCache>) -> Result<Self, SourceError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client, cache })
    }

    /// Client for the configured source, using its user agent.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, SourceError> {
        Self::new(&config.source_user_agent)
    }

    #[must_use]
    pub fn cache(&self) -> &Arc<ResponseCache> {
        &self.cache
    }

    /// Fetches the JSON document at `url`, serving it from the cache when
    /// `options.cache_minutes` is set and a fresh entry exists.
    ///
    /// # Errors
    ///
    /// - [`SourceError::InvalidUrl`] / [`SourceError::InvalidHeader`]: bad input (not retried).
    /// - [`SourceError::RateLimited`]: HTTP 429 after all attempts.
    /// - [`SourceError::UnexpectedStatus`]: any other non-2xx status (5xx retried, 4xx not).
    /// - [`SourceError::Http`]: network failure or timeout after all attempts.
    /// - [`SourceError::Deserialize`]: body is not JSON (not retried).
    /// - [`SourceError::EmptyDocument`]: body is JSON `null`.
    pub async fn fetch(
        &self,
        url: &str,
        options: &FetchOptions,
    ) -> Result<serde_json::Value, SourceError> {
        let cache_slot = options
            .cache_ttl()
            .map(|ttl| (Self::cache_key(url, options), ttl));

        if let Some((key, _)) = &cache_slot {
            if let Some(document) = self.cache.get(key).await {
                tracing::info!(url, "order source cache hit");
                return Ok(document);
            }
        }

        let document = self.fetch_uncached(url, options).await?;

        if let Some((key, ttl)) = cache_slot {
            if is_substantial(&document) {
                self.cache.put(key, document.clone(), ttl).await;
                tracing::info!(url, ttl_secs = ttl.as_secs(), "order source document cached");
            }
        }

        Ok(document)
    }

    /// Fetches `url` and returns the order records it contains, in document
    /// order. An unrecognised document shape yields an empty list.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::fetch`].
    pub async fn fetch_orders(
        &self,
        url: &str,
        options: &FetchOptions,
    ) -> Result<Vec<RawOrder>, SourceError> {
        let document = self.fetch(url, options).await?;
        Ok(orders_from_document(&document))
    }

    /// Single fetch when `max_pages <= 1`, paged collection otherwise.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::fetch_orders`] or
    /// [`Self::fetch_all_pages`].
    pub async fn collect_orders(
        &self,
        url: &str,
        options: &FetchOptions,
        max_pages: usize,
        page_delay_ms: u64,
    ) -> Result<Vec<RawOrder>, SourceError> {
        if max_pages > 1 {
            self.fetch_all_pages(url, options, max_pages, page_delay_ms)
                .await
        } else {
            self.fetch_orders(url, options).await
        }
    }

    /// Loads the configured source (paged when `source_max_pages > 1`) and
    /// normalizes every order. This is the one fetch a metrics request makes.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::collect_orders`].
    pub async fn fetch_normalized(
        &self,
        config: &AppConfig,
    ) -> Result<Vec<NormalizedOrder>, SourceError> {
        let options = FetchOptions::from_app_config(config);
        let raw = self
            .collect_orders(
                &config.source_url,
                &options,
                config.source_max_pages,
                config.source_page_delay_ms,
            )
            .await?;
        Ok(normalize(raw))
    }

    async fn fetch_uncached(
        &self,
        url: &str,
        options: &FetchOptions,
    ) -> Result<serde_json::Value, SourceError> {
        let parsed = Url::parse(url).map_err(|e| SourceError::InvalidUrl {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;
        let headers = build_headers(&options.headers)?;
        let timeout = Duration::from_secs(options.timeout_secs);

        retry_with_fixed_backoff(options.retry_count, options.retry_backoff_ms, || {
            let parsed = parsed.clone();
            let headers = headers.clone();
            let url = url.to_owned();
            async move {
                let response = self
                    .client
                    .get(parsed)
                    .headers(headers)
                    .timeout(timeout)
                    .send()
                    .await?;
                let status = response.status();

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(60);
                    return Err(SourceError::RateLimited {
                        url,
                        retry_after_secs,
                    });
                }

                if !status.is_success() {
                    tracing::warn!(status = status.as_u16(), url, "order source HTTP error");
                    return Err(SourceError::UnexpectedStatus {
                        status: status.as_u16(),
                        url,
                    });
                }

                let body = response.text().await?;
                let document = serde_json::from_str::<serde_json::Value>(&body).map_err(|e| {
                    SourceError::Deserialize {
                        context: format!("order document from {url}"),
                        source: e,
                    }
                })?;

                if document.is_null() {
                    return Err(SourceError::EmptyDocument { url });
                }

                tracing::info!(status = status.as_u16(), url, "order source import ok");
                Ok(document)
            }
        })
        .await
    }

    fn cache_key(url: &str, options: &FetchOptions) -> String {
        let serialized = serde_json::to_string(options).unwrap_or_default();
        ResponseCache::key_for(url, &serialized)
    }
}

/// Extracts and decodes the order records of an already fetched document.
#[must_use]
pub fn orders_from_document(document: &serde_json::Value) -> Vec<RawOrder> {
    extract_orders(document)
        .into_iter()
        .map(RawOrder::from_value)
        .collect()
}

/// Empty objects and arrays are valid answers but not worth caching.
fn is_substantial(document: &serde_json::Value) -> bool {
    match document {
        serde_json::Value::Object(map) => !map.is_empty(),
        serde_json::Value::Array(items) => !items.is_empty(),
        serde_json::Value::Null => false,
        _ => true,
    }
}

/// Validates caller-supplied headers before any request is sent.
///
/// # Errors
///
/// Returns [`SourceError::InvalidHeader`] for a name or value that is not a
/// legal HTTP header.
fn build_headers(headers: &BTreeMap<String, String>) -> Result<HeaderMap, SourceError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| SourceError::InvalidHeader {
                name: name.clone(),
                reason: e.to_string(),
            })?;
        let header_value =
            HeaderValue::from_str(value).map_err(|e| SourceError::InvalidHeader {
                name: name.clone(),
                reason: e.to_string(),
            })?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
