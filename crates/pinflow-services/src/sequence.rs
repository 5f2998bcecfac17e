//! Sequential numeric filenames for downloaded images.

use std::path::Path;

use pinflow_core::{AppError, AppResult};

/// Next unused leading integer in `dir`: one greater than the highest
/// existing `N.*` filename. Non-numeric names are ignored; a missing
/// directory is created and numbering starts at 1.
///
/// Single-writer only: two processes scanning the same directory can compute
/// the same number. Nothing here locks.
pub fn next_sequence_number(dir: &Path) -> AppResult<u32> {
    if !dir.exists() {
        std::fs::create_dir_all(dir)
            .map_err(|e| AppError::Filesystem(format!("Failed to create {}: {}", dir.display(), e)))?;
        tracing::info!(dir = %dir.display(), "Created images directory");
        return Ok(1);
    }

    let entries = std::fs::read_dir(dir)
        .map_err(|e| AppError::Filesystem(format!("Failed to read {}: {}", dir.display(), e)))?;

    let mut highest = 0u32;
    for entry in entries {
        let entry = entry
            .map_err(|e| AppError::Filesystem(format!("Failed to read {}: {}", dir.display(), e)))?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        // leading integer up to the first dot, e.g. "12.jpg" or "12.full.png"
        if let Some((prefix, _)) = name.split_once('.') {
            if let Ok(num) = prefix.parse::<u32>() {
                highest = highest.max(num);
            }
        }
    }

    tracing::debug!(dir = %dir.display(), highest, next = highest + 1, "Sequence scan");
    Ok(highest + 1)
}

/// Extension of the URL's path component, lowercased, defaulting to `.jpg`
/// when the path has none.
pub fn extension_for_url(url: &str) -> String {
    let without_query = url.split(['?', '#']).next().unwrap_or(url);
    let basename = without_query.rsplit('/').next().unwrap_or("");
    match basename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => {
            format!(".{}", ext.to_ascii_lowercase())
        }
        _ => ".jpg".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn returns_one_past_highest_numeric_file() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("3.jpg"), b"x").unwrap();
        std::fs::write(dir.path().join("7.png"), b"x").unwrap();
        assert_eq!(next_sequence_number(dir.path()).unwrap(), 8);
    }

    #[test]
    fn ignores_non_numeric_names() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("5.jpg"), b"x").unwrap();
        std::fs::write(dir.path().join("cover.jpg"), b"x").unwrap();
        std::fs::write(dir.path().join("12abc.jpg"), b"x").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        assert_eq!(next_sequence_number(dir.path()).unwrap(), 6);
    }

    #[test]
    fn empty_directory_starts_at_one() {
        let dir = tempdir().unwrap();
        assert_eq!(next_sequence_number(dir.path()).unwrap(), 1);
    }

    #[test]
    fn missing_directory_is_created() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("images");
        assert_eq!(next_sequence_number(&missing).unwrap(), 1);
        assert!(missing.is_dir());
    }

    #[test]
    fn url_extension_resolution() {
        assert_eq!(extension_for_url("https://example.com/a/photo.JPG"), ".jpg");
        assert_eq!(extension_for_url("https://example.com/a/photo.png?w=640"), ".png");
        assert_eq!(extension_for_url("https://example.com/gallery"), ".jpg");
        assert_eq!(extension_for_url("https://example.com/"), ".jpg");
    }
}
