//! GitHub-backed content store for the katha archive.
//!
//! This crate owns the two pieces of real protocol in the system: deriving
//! collision-free storage paths from submitted metadata (`paths`), and the
//! existence-check + upsert write sequence against the GitHub Contents API
//! (`traits`, `github`), composed into the metadata-first submission protocol
//! (`submission`).

pub mod github;
pub mod paths;
pub mod submission;
pub mod traits;

pub use github::GitHubStore;
pub use paths::{media_file_name, new_dedupe_token, slugify, SubmissionPath};
pub use submission::StoryArchive;
pub use traits::{ContentStore, PutOutcome, RemoteEntry, StoreError, StoreResult};
