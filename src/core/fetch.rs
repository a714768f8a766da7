use crate::domain::ports::DataSource;
use crate::utils::error::{Result, SiteError};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL, PRAGMA};
use reqwest::{Client, Response};
use url::Url;

/// Fetches page data over HTTP GET relative to a base URL, bypassing caches.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    base_url: Url,
}

impl HttpFetcher {
    pub fn new(base_url: &str) -> Result<Self> {
        // 以目錄語意解析相對路徑
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };

        let base_url = Url::parse(&normalized).map_err(|e| SiteError::InvalidConfigValue {
            field: "base_url".to_string(),
            value: base_url.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;

        Ok(Self {
            client: Client::new(),
            base_url,
        })
    }

    pub fn resolve(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| SiteError::InvalidConfigValue {
                field: "path".to_string(),
                value: path.to_string(),
                reason: format!("Cannot resolve against base URL: {}", e),
            })
    }

    async fn get(&self, path: &str) -> Result<Response> {
        let url = self.resolve(path)?;
        tracing::debug!("Fetching {}", url);

        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));

        let response = self.client.get(url).headers(headers).send().await?;
        tracing::debug!("Response status for {}: {}", path, response.status());

        if !response.status().is_success() {
            return Err(SiteError::Status {
                path: path.to_string(),
                status: response.status().as_u16(),
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl DataSource for HttpFetcher {
    async fn fetch_json(&self, path: &str) -> Result<serde_json::Value> {
        let body = self.get(path).await?.bytes().await?;
        serde_json::from_slice(&body).map_err(|source| SiteError::Decode {
            path: path.to_string(),
            source,
        })
    }

    async fn fetch_text(&self, path: &str) -> Result<String> {
        Ok(self.get(path).await?.text().await?)
    }
}
