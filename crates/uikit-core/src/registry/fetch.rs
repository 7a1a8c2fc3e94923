//! HTTP transport for remote registries
//!
//! Every failure mode (transport error, timeout, non-2xx status, unreadable
//! body) collapses into `None`; callers only ever see "content" or "absent".

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use url::Url;

/// Per-request timeout
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Host serving raw files from GitHub repositories
pub const GITHUB_RAW_HOST: &str = "raw.githubusercontent.com";

/// Read-only access to remote documents
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Fetch `url` and return its body, or `None` on any failure
    async fn get_text(&self, url: &Url) -> Option<String>;
}

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a new fetcher with a custom user agent
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(FETCH_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn get_text(&self, url: &Url) -> Option<String> {
        let response = match self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "*/*")
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(%url, error = %e, "Request failed");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::debug!(%url, status = %response.status(), "Unexpected HTTP status");
            return None;
        }

        match response.text().await {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::debug!(%url, error = %e, "Failed to read response body");
                None
            }
        }
    }
}

/// Build a URL by appending a relative path, preserving query parameters
///
/// `path` may contain several `/`-separated segments (`registry/button.json`,
/// `stubs/tabs/list.blade.php.stub`); each is pushed and percent-encoded
/// separately.
pub fn build_url(base: &Url, path: &str) -> Result<Url> {
    let mut url = base.clone();
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| anyhow::anyhow!("URL cannot have path segments: {}", base))?;
        segments.pop_if_empty();
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            segments.push(segment);
        }
    }
    Ok(url)
}

/// The directory containing the document at `url`
pub fn parent_url(url: &Url) -> Result<Url> {
    let mut parent = url.clone();
    parent
        .path_segments_mut()
        .map_err(|_| anyhow::anyhow!("URL cannot have path segments: {}", url))?
        .pop_if_empty()
        .pop();
    parent.set_query(None);
    Ok(parent)
}

/// Last path segment of a URL, if any
pub fn file_name(url: &Url) -> Option<&str> {
    url.path_segments()?.next_back().filter(|s| !s.is_empty())
}
