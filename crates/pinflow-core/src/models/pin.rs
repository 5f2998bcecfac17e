//! Pin records: the entries of an ingest JSON file and their CSV projection.

use serde::{Deserialize, Serialize};

/// An ingest document: image URL → pin metadata, in the file's own order.
///
/// Kept as a raw JSON map so a rewrite preserves every key the file carried,
/// whether this tool knows about it or not.
pub type PinDocument = serde_json::Map<String, serde_json::Value>;

/// Metadata attached to one image URL in an ingest document.
///
/// All fields are optional in the source JSON. `location` is absent on input
/// and filled in with the local download path. Unknown keys survive a
/// deserialize/serialize round trip via `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PinRecord {
    #[serde(rename = "pinTitle", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One row of the exported CSV. Header names are fixed by the downstream
/// bulk-upload template and must not change.
#[derive(Debug, Clone, Serialize)]
pub struct PinCsvRow {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Media URL")]
    pub media_url: String,
    #[serde(rename = "Pinterest board")]
    pub board: String,
    #[serde(rename = "Link")]
    pub link: String,
    #[serde(rename = "Publish date")]
    pub date: String,
}

impl From<&PinRecord> for PinCsvRow {
    fn from(record: &PinRecord) -> Self {
        // Media URL is the downloaded location, never the source URL key.
        PinCsvRow {
            title: record.title.clone().unwrap_or_default(),
            media_url: record.location.clone().unwrap_or_default(),
            board: record.board.clone().unwrap_or_default(),
            link: record.link.clone().unwrap_or_default(),
            date: record.date.clone().unwrap_or_default(),
        }
    }
}
