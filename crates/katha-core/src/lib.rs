//! Katha Core Library
//!
//! This crate provides the domain models, configuration, and constants shared
//! across all katha components. Everything here is a per-submission value
//! object; no state is held between submissions.

pub mod config;
pub mod constants;
pub mod models;

// Re-export commonly used types
pub use config::{AppConfig, GitHubConfig};
pub use models::{Artifact, ArtifactKind, Category, MediaUpload, SavedStory, StoryMetadata};
