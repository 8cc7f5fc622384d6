//! Content-store abstraction
//!
//! This module defines the ContentStore trait the submission protocol writes
//! through, so the remote backend can be swapped (or mocked) without touching
//! the protocol.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Store operation errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File {filename} exceeds {limit_bytes} byte limit ({size_bytes} bytes)")]
    FileTooLarge {
        filename: String,
        size_bytes: usize,
        limit_bytes: usize,
    },

    #[error("Write to {path} failed with status {status}: {body}")]
    WriteFailed {
        path: String,
        status: u16,
        body: String,
    },

    #[error("Read of {path} failed with status {status}: {body}")]
    ReadFailed {
        path: String,
        status: u16,
        body: String,
    },

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Outcome of one successful write.
#[derive(Debug, Clone, Default)]
pub struct PutOutcome {
    /// Revision token of the written object, when the store returned one.
    pub revision: Option<String>,
    /// Public URL of the written object, when the store returned one.
    pub html_url: Option<String>,
}

/// One entry of a directory listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteEntry {
    pub name: String,
    pub path: String,
    /// `file` or `dir`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
}

/// Remote file store with create-or-update semantics per path.
///
/// `current_revision` and `put` together form a compare-and-swap: a path that
/// already exists must be written with its current revision token or the
/// store rejects the write as conflicting.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Revision token of `path` on the target branch, or `None` if absent.
    ///
    /// Only a definitive not-found maps to `None`; any other failure is
    /// surfaced so an outage cannot masquerade as "create new".
    async fn current_revision(&self, path: &str) -> StoreResult<Option<String>>;

    /// Write `bytes` to `path`, creating it when `revision` is `None` and
    /// updating in place otherwise.
    async fn put(
        &self,
        path: &str,
        bytes: &[u8],
        message: &str,
        revision: Option<&str>,
    ) -> StoreResult<PutOutcome>;

    /// List the children of a directory. Absent directories list as empty.
    async fn list(&self, path: &str) -> StoreResult<Vec<RemoteEntry>>;

    /// Existence check followed by the matching create or update.
    async fn upsert(&self, path: &str, bytes: &[u8], message: &str) -> StoreResult<PutOutcome> {
        let revision = self.current_revision(path).await?;
        self.put(path, bytes, message, revision.as_deref()).await
    }
}
