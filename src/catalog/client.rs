//! HTTP client for the price list endpoints.

use crate::catalog::cache::{CacheEntry, ResponseCache};
use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};
use wreq::header::HeaderMap;
use wreq::Client;

/// Trait for fetching catalog documents - enables mocking for tests.
#[async_trait]
pub trait CatalogFetch: Send + Sync {
    /// Performs a GET and returns the response body.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Price list HTTP client with transparent response caching.
pub struct CatalogClient {
    client: Client,
    cache: Option<ResponseCache>,
}

impl CatalogClient {
    /// Creates a client from configuration, with caching if enabled.
    pub fn new(config: &Config) -> Result<Self> {
        let cache = if config.cache {
            config.cache_dir.clone().or_else(ResponseCache::default_dir).map(ResponseCache::new)
        } else {
            None
        };

        if config.cache && cache.is_none() {
            warn!("No cache directory available, responses will not be cached");
        }

        Self::with_cache(config, cache)
    }

    /// Creates a client with an explicit cache (or none).
    pub fn with_cache(config: &Config, cache: Option<ResponseCache>) -> Result<Self> {
        let mut builder = Client::builder()
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs));

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build()?;

        Ok(Self { client, cache })
    }

    async fn get(&self, url: &str, cached: Option<CacheEntry>) -> Result<String> {
        debug!("GET {}", url);

        let mut request = self.client.get(url).header("Accept", "application/json");

        if let Some(entry) = &cached {
            if let Some(etag) = &entry.etag {
                request = request.header("If-None-Match", etag.as_str());
            }
            if let Some(last_modified) = &entry.last_modified {
                request = request.header("If-Modified-Since", last_modified.as_str());
            }
        }

        let response =
            request.send().await.with_context(|| format!("Failed to send request to {}", url))?;

        let status = response.status();
        debug!("Response status: {}", status);

        if status == 304 {
            return match (&self.cache, &cached) {
                (Some(cache), Some(entry)) => {
                    debug!("Not modified, serving cached copy of {}", url);
                    cache.load_body(entry).await
                }
                _ => anyhow::bail!("Got 304 for {} without a cached copy", url),
            };
        }

        if !status.is_success() {
            anyhow::bail!("Request for {} failed with status: {}", url, status);
        }

        let entry = CacheEntry {
            url: url.to_string(),
            etag: header_value(response.headers(), "etag"),
            last_modified: header_value(response.headers(), "last-modified"),
        };

        let body = response.text().await.context("Failed to read response body")?;

        if let Some(cache) = &self.cache {
            if entry.has_validators() {
                if let Err(e) = cache.store(&entry, &body).await {
                    warn!("Failed to cache {}: {:#}", url, e);
                }
            }
        }

        Ok(body)
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string)
}

#[async_trait]
impl CatalogFetch for CatalogClient {
    async fn fetch(&self, url: &str) -> Result<String> {
        let cached = match &self.cache {
            Some(cache) => cache.load_entry(url).await,
            None => None,
        };

        self.get(url, cached).await
    }
}
