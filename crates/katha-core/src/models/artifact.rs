use serde::{Deserialize, Serialize};

/// What kind of file a write produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Json,
    Media,
}

/// One file committed into the archive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
    #[serde(rename = "type")]
    pub kind: ArtifactKind,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
}

/// Result of a fully saved submission: the directory it landed in and the
/// written files in commit order (metadata first, then media in upload order).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedStory {
    pub base_dir: String,
    pub artifacts: Vec<Artifact>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_kind_uses_lowercase_tags() {
        let artifact = Artifact {
            kind: ArtifactKind::Json,
            path: "data/goa/old-town/2026-08-31/abcd1234/story.json".to_string(),
            html_url: None,
        };
        let json = serde_json::to_value(&artifact).unwrap();
        assert_eq!(json["type"], "json");
        assert!(json.get("html_url").is_none());
    }
}
