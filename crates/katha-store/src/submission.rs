//! Submission protocol
//!
//! Writes one story as a sequence of strictly ordered round trips: the
//! metadata document first, then each media file in upload order, aborting on
//! the first failure. Already-committed files stay committed; there is no
//! rollback. Per-path atomicity comes from the remote store.

use std::sync::Arc;

use katha_core::models::{Artifact, ArtifactKind, MediaUpload, SavedStory, StoryMetadata};
use tracing::{info, warn};

use crate::paths::{slugify, SubmissionPath};
use crate::traits::{ContentStore, RemoteEntry, StoreError, StoreResult};

/// Story archive over a [`ContentStore`].
pub struct StoryArchive {
    store: Arc<dyn ContentStore>,
    max_media_bytes: usize,
}

impl StoryArchive {
    pub fn new(store: Arc<dyn ContentStore>, max_media_bytes: usize) -> Self {
        Self {
            store,
            max_media_bytes,
        }
    }

    /// Save a submission under a freshly minted directory.
    ///
    /// Every call mints a new dedupe token; replaying the same paths requires
    /// passing an explicit [`SubmissionPath`] to [`save_at`](Self::save_at).
    pub async fn save(
        &self,
        meta: &StoryMetadata,
        files: &[MediaUpload],
    ) -> StoreResult<SavedStory> {
        self.save_at(SubmissionPath::for_story(meta), meta, files)
            .await
    }

    /// Save a submission under an explicit directory.
    pub async fn save_at(
        &self,
        path: SubmissionPath,
        meta: &StoryMetadata,
        files: &[MediaUpload],
    ) -> StoreResult<SavedStory> {
        let body = serde_json::to_vec_pretty(meta)?;
        let story_path = path.story_file();
        let message = format!(
            "feat(story): {} ({}, {})",
            meta.title,
            slugify(&meta.village),
            slugify(&meta.state)
        );

        let outcome = self.store.upsert(&story_path, &body, &message).await?;
        info!(path = %story_path, size_bytes = body.len(), "story metadata committed");

        let mut artifacts = vec![Artifact {
            kind: ArtifactKind::Json,
            path: story_path,
            html_url: outcome.html_url,
        }];

        for file in files {
            if file.len() > self.max_media_bytes {
                warn!(
                    filename = %file.name,
                    size_bytes = file.len(),
                    limit_bytes = self.max_media_bytes,
                    "media file over size limit, aborting submission"
                );
                return Err(StoreError::FileTooLarge {
                    filename: file.name.clone(),
                    size_bytes: file.len(),
                    limit_bytes: self.max_media_bytes,
                });
            }

            let media_path = path.media_file(&file.name);
            let message = format!("asset: {}", file.name);
            let outcome = self.store.upsert(&media_path, &file.bytes, &message).await?;
            info!(path = %media_path, size_bytes = file.len(), "media file committed");

            artifacts.push(Artifact {
                kind: ArtifactKind::Media,
                path: media_path,
                html_url: outcome.html_url,
            });
        }

        Ok(SavedStory {
            base_dir: path.base_dir().to_string(),
            artifacts,
        })
    }

    /// List the archive tree at `subpath` (or its root).
    pub async fn browse(&self, subpath: Option<&str>) -> StoreResult<Vec<RemoteEntry>> {
        let path = match subpath {
            Some(sub) => {
                if sub.contains("..") || sub.starts_with('/') {
                    return Err(StoreError::InvalidPath(sub.to_string()));
                }
                let sub = sub.trim_end_matches('/');
                if sub.is_empty() {
                    katha_core::constants::ARCHIVE_ROOT.to_string()
                } else {
                    format!("{}/{}", katha_core::constants::ARCHIVE_ROOT, sub)
                }
            }
            None => katha_core::constants::ARCHIVE_ROOT.to_string(),
        };
        self.store.list(&path).await
    }
}
