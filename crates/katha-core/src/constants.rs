//! Archive-wide constants
//!
//! Path layout is a published contract:
//! `data/{state-slug}/{village-slug}/{YYYY-MM-DD}/{token}/story.json`
//! plus sibling media files named `{root-slug}-{token}.{ext}`.

/// Root directory of the archive inside the backing repository.
pub const ARCHIVE_ROOT: &str = "data";

/// Metadata document written first into every submission directory.
pub const STORY_FILE_NAME: &str = "story.json";

/// Hex characters kept from the per-submission UUID.
pub const DEDUPE_TOKEN_LEN: usize = 8;

/// Branch written to when GITHUB_BRANCH is not set.
pub const DEFAULT_BRANCH: &str = "main";

/// GitHub REST base URL. Overridable for GitHub Enterprise and tests.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Per-file size cap applied before any media write.
pub const DEFAULT_MAX_MEDIA_SIZE_MB: usize = 15;

/// Bound on every remote round trip.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Schema version stamped into every story document.
pub const APP_VERSION: &str = "1.0.0";
