//! Font resolution over an ordered candidate list.
//!
//! The candidate list is configuration data; resolution is simply the first
//! path that exists, reads, and parses as a font. There is no bundled
//! fallback face: when nothing resolves the caller gets a parse failure and
//! has to point the configuration at a real font file.

use std::path::{Path, PathBuf};

use ab_glyph::FontVec;
use pinflow_core::{AppError, AppResult};

/// Resolve the first usable font among `candidates`.
///
/// Unreadable or unparseable candidates are skipped with a warning; order in
/// the slice is the priority order.
pub fn resolve_font(candidates: &[PathBuf]) -> AppResult<(FontVec, PathBuf)> {
    for path in candidates {
        match try_load(path) {
            Ok(Some(font)) => {
                tracing::debug!(path = %path.display(), "Resolved caption font");
                return Ok((font, path.clone()));
            }
            Ok(None) => {}
            Err(reason) => {
                tracing::warn!(path = %path.display(), reason = %reason, "Skipping font candidate");
            }
        }
    }

    Err(AppError::Parse(format!(
        "No usable font among {} candidate path(s)",
        candidates.len()
    )))
}

fn try_load(path: &Path) -> Result<Option<FontVec>, String> {
    if !path.is_file() {
        return Ok(None);
    }
    let bytes = std::fs::read(path).map_err(|e| e.to_string())?;
    let font = FontVec::try_from_vec(bytes).map_err(|e| e.to_string())?;
    Ok(Some(font))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_candidate_list_fails() {
        let err = resolve_font(&[]).unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
    }

    #[test]
    fn missing_paths_are_skipped() {
        let candidates = vec![PathBuf::from("/definitely/not/here.ttf")];
        assert!(resolve_font(&candidates).is_err());
    }

    #[test]
    fn garbage_file_is_not_a_font() {
        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().join("bogus.ttf");
        std::fs::write(&bogus, b"this is not a font").unwrap();
        assert!(resolve_font(&[bogus]).is_err());
    }
}
