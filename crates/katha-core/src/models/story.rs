use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use validator::Validate;

/// One submitted story, serialized verbatim into `story.json`.
///
/// Field order is the document's key order. Required fields are enforced by
/// the caller via `validate()` before any write is attempted; the store does
/// not re-check them.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StoryMetadata {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "State is required"))]
    pub state: String,
    #[validate(length(min = 1, message = "Village is required"))]
    pub village: String,
    #[validate(length(min = 1, message = "Language is required"))]
    pub language: String,
    #[validate(length(min = 1, message = "Story text is required"))]
    pub story: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contributor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approx_year: Option<String>,
    pub category: Category,
    pub timestamp: DateTime<Utc>,
    pub app_version: String,
}

/// Story category
///
/// Serde names are the published document values; `FromStr` additionally
/// accepts kebab-case for CLI flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Folklore,
    History,
    #[serde(rename = "Personal Memory")]
    PersonalMemory,
    Craft,
    Food,
    Festival,
    #[serde(rename = "Song/Poem")]
    SongPoem,
    Other,
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "folklore" => Ok(Category::Folklore),
            "history" => Ok(Category::History),
            "personal-memory" | "personal memory" => Ok(Category::PersonalMemory),
            "craft" => Ok(Category::Craft),
            "food" => Ok(Category::Food),
            "festival" => Ok(Category::Festival),
            "song-poem" | "song/poem" => Ok(Category::SongPoem),
            "other" => Ok(Category::Other),
            _ => Err(anyhow::anyhow!("Invalid category: {}", s)),
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Category::Folklore => write!(f, "Folklore"),
            Category::History => write!(f, "History"),
            Category::PersonalMemory => write!(f, "Personal Memory"),
            Category::Craft => write!(f, "Craft"),
            Category::Food => write!(f, "Food"),
            Category::Festival => write!(f, "Festival"),
            Category::SongPoem => write!(f, "Song/Poem"),
            Category::Other => write!(f, "Other"),
        }
    }
}
