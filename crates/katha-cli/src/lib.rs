use anyhow::Context;
use katha_core::models::MediaUpload;
use std::path::{Path, PathBuf};

/// Split a comma-separated tag string, trimming entries and dropping empties.
pub fn parse_tags(raw: Option<&str>) -> Vec<String> {
    match raw {
        Some(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    }
}

/// Read media files into uploads, keeping command-line order.
pub fn load_uploads(paths: &[PathBuf]) -> anyhow::Result<Vec<MediaUpload>> {
    paths
        .iter()
        .map(|path| {
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("upload.bin")
                .to_string();
            let bytes = std::fs::read(path)
                .with_context(|| format!("Failed to read media file: {}", path.display()))?;
            Ok(MediaUpload::new(name, bytes))
        })
        .collect()
}

/// Resolve a story argument: `@path` reads the text from a file.
pub fn resolve_story(arg: &str) -> anyhow::Result<String> {
    match arg.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(Path::new(path))
            .with_context(|| format!("Failed to read story file: {}", path)),
        None => Ok(arg.to_string()),
    }
}

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_tags_trims_and_drops_empties() {
        assert_eq!(
            parse_tags(Some(" festivals , , crafts,folklore ")),
            vec!["festivals", "crafts", "folklore"]
        );
        assert!(parse_tags(Some(" , ,")).is_empty());
        assert!(parse_tags(None).is_empty());
    }

    #[test]
    fn load_uploads_reads_names_and_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Photo.JPG");
        std::fs::write(&path, b"jpeg bytes").unwrap();

        let uploads = load_uploads(&[path]).unwrap();
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].name, "Photo.JPG");
        assert_eq!(&uploads[0].bytes[..], b"jpeg bytes");
    }

    #[test]
    fn load_uploads_fails_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.png");
        assert!(load_uploads(&[missing]).is_err());
    }

    #[test]
    fn resolve_story_inline_and_from_file() {
        assert_eq!(resolve_story("once upon a time").unwrap(), "once upon a time");

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "from a file").unwrap();
        let arg = format!("@{}", file.path().display());
        assert_eq!(resolve_story(&arg).unwrap(), "from a file");
    }
}
