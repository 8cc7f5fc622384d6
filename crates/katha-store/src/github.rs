//! GitHub Contents API store
//!
//! Implements [`ContentStore`] against
//! `GET/PUT /repos/{owner}/{repo}/contents/{path}`. The base URL is
//! configurable for GitHub Enterprise and for HTTP-mocked tests.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use katha_core::config::{AppConfig, GitHubConfig};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{error, info};

use crate::traits::{ContentStore, PutOutcome, RemoteEntry, StoreError, StoreResult};

const ACCEPT_HEADER: &str = "application/vnd.github+json";
// GitHub rejects requests without a User-Agent.
const USER_AGENT: &str = concat!("katha/", env!("CARGO_PKG_VERSION"));

/// GitHub-backed content store.
pub struct GitHubStore {
    client: reqwest::Client,
    api_url: String,
    config: GitHubConfig,
}

#[derive(Serialize)]
struct PutRequest<'a> {
    message: &'a str,
    content: String,
    branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
}

#[derive(Deserialize)]
struct ContentInfo {
    sha: String,
}

#[derive(Default, Deserialize)]
struct PutResponse {
    #[serde(default)]
    content: Option<PutContent>,
}

#[derive(Deserialize)]
struct PutContent {
    #[serde(default)]
    sha: Option<String>,
    #[serde(default)]
    html_url: Option<String>,
}

impl GitHubStore {
    pub fn new(config: GitHubConfig, api_url: &str, timeout: Duration) -> StoreResult<Self> {
        config
            .validate()
            .map_err(|e| StoreError::Config(e.to_string()))?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            config,
        })
    }

    pub fn from_config(config: &AppConfig) -> StoreResult<Self> {
        Self::new(
            config.github.clone(),
            &config.api_url,
            config.request_timeout,
        )
    }

    fn contents_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_url, self.config.owner, self.config.repo, path
        )
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("Authorization", format!("Bearer {}", self.config.token))
            .header("Accept", ACCEPT_HEADER)
    }

    async fn error_body(response: reqwest::Response) -> String {
        response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string())
    }
}

#[async_trait]
impl ContentStore for GitHubStore {
    async fn current_revision(&self, path: &str) -> StoreResult<Option<String>> {
        let response = self
            .authed(self.client.get(self.contents_url(path)))
            .query(&[("ref", self.config.branch.as_str())])
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let body = Self::error_body(response).await;
            error!(path, status = status.as_u16(), "existence check failed");
            return Err(StoreError::ReadFailed {
                path: path.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let info: ContentInfo = response.json().await?;
        Ok(Some(info.sha))
    }

    async fn put(
        &self,
        path: &str,
        bytes: &[u8],
        message: &str,
        revision: Option<&str>,
    ) -> StoreResult<PutOutcome> {
        let payload = PutRequest {
            message,
            content: BASE64.encode(bytes),
            branch: &self.config.branch,
            sha: revision,
        };

        let started = Instant::now();
        let response = self
            .authed(self.client.put(self.contents_url(path)))
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = Self::error_body(response).await;
            error!(path, status = status.as_u16(), body = %body, "contents write failed");
            return Err(StoreError::WriteFailed {
                path: path.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        // A 2xx means the write landed; an unexpected body only costs us the
        // revision and URL, not the commit.
        let parsed: PutResponse = response.json().await.unwrap_or_default();
        info!(
            path,
            size_bytes = bytes.len(),
            updated = revision.is_some(),
            duration_ms = started.elapsed().as_millis() as u64,
            "contents write committed"
        );

        Ok(PutOutcome {
            revision: parsed.content.as_ref().and_then(|c| c.sha.clone()),
            html_url: parsed.content.and_then(|c| c.html_url),
        })
    }

    async fn list(&self, path: &str) -> StoreResult<Vec<RemoteEntry>> {
        let response = self
            .authed(self.client.get(self.contents_url(path)))
            .query(&[("ref", self.config.branch.as_str())])
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        if !status.is_success() {
            let body = Self::error_body(response).await;
            error!(path, status = status.as_u16(), "listing failed");
            return Err(StoreError::ReadFailed {
                path: path.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        // A directory lists as an array; a file path yields a single object.
        let value: serde_json::Value = response.json().await?;
        let entries = if value.is_array() {
            serde_json::from_value(value)?
        } else {
            vec![serde_json::from_value(value)?]
        };
        Ok(entries)
    }
}
