//! Storage path derivation
//!
//! Every submission lands under
//! `data/{state-slug}/{village-slug}/{YYYY-MM-DD}/{token}`, where the token
//! is minted once per submission and embedded in every sibling filename. Two
//! submissions can never collide; two files with the same sanitized root and
//! extension inside one submission share a path and the later write wins.

use chrono::{NaiveDate, Utc};
use katha_core::constants::{ARCHIVE_ROOT, DEDUPE_TOKEN_LEN, STORY_FILE_NAME};
use katha_core::models::StoryMetadata;
use uuid::Uuid;

/// Render free text as a lower-case, hyphen-separated path segment.
///
/// Lower-cases, drops everything outside `[a-z0-9- ]`, collapses whitespace
/// and hyphen runs to single hyphens, and falls back to `untitled` when
/// nothing survives. Pure; idempotent on its own output. Leading and trailing
/// hyphens are kept.
pub fn slugify(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    for c in lowered.chars() {
        let c = if c.is_whitespace() { '-' } else { c };
        match c {
            'a'..='z' | '0'..='9' => slug.push(c),
            '-' if !slug.ends_with('-') => slug.push('-'),
            _ => {}
        }
    }
    if slug.is_empty() {
        "untitled".to_string()
    } else {
        slug
    }
}

/// Mint a fresh per-submission dedupe token: 8 hex chars of a UUIDv4.
pub fn new_dedupe_token() -> String {
    let mut token = Uuid::new_v4().simple().to_string();
    token.truncate(DEDUPE_TOKEN_LEN);
    token
}

/// Derive the safe target filename for one uploaded file.
///
/// Characters outside `[A-Za-z0-9_.-]` become `_`, the extension is split at
/// the last `.` and lower-cased (`bin` when absent), and the remaining root
/// is slugified with the shared token appended. No path separators survive.
pub fn media_file_name(original_name: &str, dedupe_token: &str) -> String {
    let sanitized: String = original_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let (root, ext) = match sanitized.rsplit_once('.') {
        Some((root, ext)) => (root.to_string(), ext.to_lowercase()),
        None => (sanitized, String::new()),
    };
    let ext = if ext.is_empty() { "bin".to_string() } else { ext };

    format!("{}-{}.{}", slugify(&root), dedupe_token, ext)
}

/// The directory one submission writes into, plus the token shared by all of
/// its files.
#[derive(Clone, Debug)]
pub struct SubmissionPath {
    base_dir: String,
    dedupe_token: String,
}

impl SubmissionPath {
    /// Stamp today's UTC date and a fresh token for the given story.
    pub fn for_story(meta: &StoryMetadata) -> Self {
        Self::with_parts(
            &meta.state,
            &meta.village,
            Utc::now().date_naive(),
            &new_dedupe_token(),
        )
    }

    /// Deterministic constructor for explicit replays and tests.
    pub fn with_parts(state: &str, village: &str, date: NaiveDate, dedupe_token: &str) -> Self {
        let base_dir = format!(
            "{}/{}/{}/{}/{}",
            ARCHIVE_ROOT,
            slugify(state),
            slugify(village),
            date.format("%Y-%m-%d"),
            dedupe_token
        );
        Self {
            base_dir,
            dedupe_token: dedupe_token.to_string(),
        }
    }

    pub fn base_dir(&self) -> &str {
        &self.base_dir
    }

    pub fn dedupe_token(&self) -> &str {
        &self.dedupe_token
    }

    /// Path of the metadata document.
    pub fn story_file(&self) -> String {
        format!("{}/{}", self.base_dir, STORY_FILE_NAME)
    }

    /// Path of one media file, named via [`media_file_name`].
    pub fn media_file(&self, original_name: &str) -> String {
        format!(
            "{}/{}",
            self.base_dir,
            media_file_name(original_name, &self.dedupe_token)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_basic() {
        assert_eq!(slugify("Old Town"), "old-town");
        assert_eq!(slugify("  Goa  "), "goa");
        assert_eq!(slugify("Telangana"), "telangana");
    }

    #[test]
    fn slugify_strips_and_collapses() {
        assert_eq!(slugify("A   Big -- Story!"), "a-big-story");
        assert_eq!(slugify("naïve café"), "nave-caf");
        assert_eq!(slugify("my_photo"), "myphoto");
    }

    #[test]
    fn slugify_fallback() {
        assert_eq!(slugify(""), "untitled");
        assert_eq!(slugify("   "), "untitled");
        assert_eq!(slugify("@#$%"), "untitled");
    }

    #[test]
    fn slugify_is_idempotent() {
        for input in ["Old Town", "A   Big -- Story!", "", "@#$%", "-edge-"] {
            let once = slugify(input);
            assert_eq!(slugify(&once), once);
        }
    }

    #[test]
    fn dedupe_token_is_short_hex() {
        let token = new_dedupe_token();
        assert_eq!(token.len(), DEDUPE_TOKEN_LEN);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(token, new_dedupe_token());
    }

    #[test]
    fn media_file_name_sanitizes_and_tags() {
        assert_eq!(
            media_file_name("Photo of Fair.JPG", "abcd1234"),
            "photooffair-abcd1234.jpg"
        );
        assert_eq!(media_file_name("song.mp3", "abcd1234"), "song-abcd1234.mp3");
    }

    #[test]
    fn media_file_name_defaults_extension() {
        assert_eq!(media_file_name("notes", "abcd1234"), "notes-abcd1234.bin");
        assert_eq!(media_file_name("notes.", "abcd1234"), "notes-abcd1234.bin");
    }

    #[test]
    fn media_file_name_blocks_traversal() {
        let name = media_file_name("../../etc/passwd", "abcd1234");
        assert!(!name.contains('/'));
        assert!(!name.contains(".."));
    }

    #[test]
    fn media_file_name_empty_root_falls_back() {
        assert_eq!(
            media_file_name(".gitignore", "abcd1234"),
            "untitled-abcd1234.gitignore"
        );
    }

    #[test]
    fn submission_path_shape() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 31).unwrap();
        let path = SubmissionPath::with_parts("Goa", "Old Town", date, "abcd1234");
        assert_eq!(path.base_dir(), "data/goa/old-town/2026-08-31/abcd1234");
        assert_eq!(
            path.story_file(),
            "data/goa/old-town/2026-08-31/abcd1234/story.json"
        );
        assert_eq!(
            path.media_file("Photo.JPG"),
            "data/goa/old-town/2026-08-31/abcd1234/photo-abcd1234.jpg"
        );
    }

    #[test]
    fn base_dir_contains_only_safe_characters() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();
        let path = SubmissionPath::with_parts("Tamil Nadu!", "Ooty @ Hills", date, "deadbeef");
        assert!(path
            .base_dir()
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '/' | '-' | '_')));
    }

    #[test]
    fn identical_names_in_one_submission_collide() {
        // Known edge case: collision avoidance relies on the shared token, so
        // duplicate originals map to the same path and the later write wins.
        let date = NaiveDate::from_ymd_opt(2026, 8, 31).unwrap();
        let path = SubmissionPath::with_parts("Goa", "Old Town", date, "abcd1234");
        assert_eq!(path.media_file("Photo.JPG"), path.media_file("Photo.JPG"));
    }
}
