//! CSV export of an ingest document.
//!
//! One row per pin in document order, under the fixed 5-column header the
//! downstream bulk-upload template expects. The Media URL column carries the
//! downloaded `location`, never the source URL key.

use std::path::{Path, PathBuf};

use pinflow_core::models::{PinCsvRow, PinDocument, PinRecord};
use pinflow_core::{AppError, AppResult};

/// Write the CSV summary for `document` into `csv_dir`.
///
/// The output name is the JSON filename with its extension swapped; an
/// existing file of that name is overwritten without merge.
pub fn write_pin_csv(
    document: &PinDocument,
    json_filename: &str,
    csv_dir: &Path,
) -> AppResult<PathBuf> {
    let csv_filename = match json_filename.strip_suffix(".json") {
        Some(stem) => format!("{}.csv", stem),
        None => format!("{}.csv", json_filename),
    };

    std::fs::create_dir_all(csv_dir).map_err(|e| {
        AppError::Filesystem(format!("Failed to create {}: {}", csv_dir.display(), e))
    })?;

    let csv_path = csv_dir.join(csv_filename);
    let mut writer = csv::Writer::from_path(&csv_path).map_err(|e| {
        AppError::Filesystem(format!("Failed to create {}: {}", csv_path.display(), e))
    })?;

    for value in document.values() {
        let record: PinRecord = serde_json::from_value(value.clone())?;
        writer.serialize(PinCsvRow::from(&record)).map_err(|e| {
            AppError::Filesystem(format!("Failed to write {}: {}", csv_path.display(), e))
        })?;
    }

    writer.flush().map_err(|e| {
        AppError::Filesystem(format!("Failed to flush {}: {}", csv_path.display(), e))
    })?;

    tracing::info!(path = %csv_path.display(), rows = document.len(), "Created CSV file");
    Ok(csv_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn document_with(url: &str, fields: serde_json::Value) -> PinDocument {
        let mut document = PinDocument::new();
        document.insert(url.to_string(), fields);
        document
    }

    #[test]
    fn header_and_row_use_location_not_url() {
        let dir = tempdir().unwrap();
        let document = document_with(
            "https://example.com/a.jpg",
            serde_json::json!({
                "pinTitle": "T",
                "location": "pins/images/1.jpg",
                "board": "B",
                "link": "L",
                "date": "D"
            }),
        );

        let path = write_pin_csv(&document, "2025-07-01_site.json", dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "2025-07-01_site.csv");

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "Title,Media URL,Pinterest board,Link,Publish date\nT,pins/images/1.jpg,B,L,D\n"
        );
    }

    #[test]
    fn missing_fields_render_empty() {
        let dir = tempdir().unwrap();
        let document = document_with("https://example.com/a.jpg", serde_json::json!({}));

        let path = write_pin_csv(&document, "2025-07-01_site.json", dir.path()).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        lines.next(); // header
        assert_eq!(lines.next().unwrap(), ",,,,");
    }

    #[test]
    fn rows_follow_document_order() {
        let dir = tempdir().unwrap();
        let mut document = PinDocument::new();
        document.insert(
            "https://example.com/z.jpg".to_string(),
            serde_json::json!({"pinTitle": "Last alphabetically, first in file"}),
        );
        document.insert(
            "https://example.com/a.jpg".to_string(),
            serde_json::json!({"pinTitle": "Second in file"}),
        );

        let path = write_pin_csv(&document, "2025-07-01_site.json", dir.path()).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        let rows: Vec<&str> = contents.lines().skip(1).collect();
        assert!(rows[0].starts_with("\"Last alphabetically, first in file\""));
        assert!(rows[1].starts_with("Second in file"));
    }

    #[test]
    fn existing_csv_is_overwritten() {
        let dir = tempdir().unwrap();
        let first = document_with("u1", serde_json::json!({"pinTitle": "old"}));
        write_pin_csv(&first, "2025-07-01_site.json", dir.path()).unwrap();

        let second = document_with("u2", serde_json::json!({"pinTitle": "new"}));
        let path = write_pin_csv(&second, "2025-07-01_site.json", dir.path()).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("new"));
        assert!(!contents.contains("old"));
    }

    #[test]
    fn creates_missing_csv_dir() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("out").join("csv");
        let document = document_with("u1", serde_json::json!({}));
        write_pin_csv(&document, "2025-07-01_site.json", &nested).unwrap();
        assert!(nested.join("2025-07-01_site.csv").exists());
    }
}
