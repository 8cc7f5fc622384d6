//! Domain models

pub mod artifact;
pub mod story;
pub mod upload;

pub use artifact::{Artifact, ArtifactKind, SavedStory};
pub use story::{Category, StoryMetadata};
pub use upload::MediaUpload;
