use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A document as stored on disk: an arbitrary JSON object. The OCR pipeline
/// writes these and nothing validates them, so fields are looked up lazily
/// and missing ones project as JSON null.
pub type DocumentRecord = serde_json::Map<String, Value>;

/// On-disk shape of the document store: internal keys under `_default`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DocumentDb {
    #[serde(rename = "_default", default)]
    pub default: BTreeMap<String, DocumentRecord>,
}

impl DocumentDb {
    /// The external identifier is the `id` field, not the store key. Ids are
    /// expected unique but the store never enforced that, so first match wins.
    pub fn find_by_id(&self, doc_id: &str) -> Option<&DocumentRecord> {
        self.default
            .values()
            .find(|doc| doc.get("id").and_then(Value::as_str) == Some(doc_id))
    }
}

/// Listing projection: metadata fields plus a translation count, never the
/// full `translations`/`pages` arrays.
#[derive(Debug, Serialize)]
pub struct DocumentSummary {
    pub id: Value,
    pub filename: Value,
    pub title: Value,
    pub author: Value,
    pub description: Value,
    pub genre: Value,
    #[serde(rename = "publishedYear")]
    pub published_year: Value,
    #[serde(rename = "coverImage")]
    pub cover_image: Value,
    pub rating: Value,
    pub page_count: Value,
    pub pages_processed: Value,
    pub status: Value,
    pub engine: Value,
    pub created_at: Value,
    pub updated_at: Value,
    pub translation_count: usize,
}

impl DocumentSummary {
    pub fn from_record(doc: &DocumentRecord) -> Self {
        Self {
            id: field(doc, "id"),
            filename: field(doc, "filename"),
            title: field(doc, "title"),
            author: field(doc, "author"),
            description: field(doc, "description"),
            genre: field(doc, "genre"),
            published_year: field(doc, "publishedYear"),
            cover_image: field(doc, "coverImage"),
            rating: field(doc, "rating"),
            page_count: field(doc, "page_count"),
            pages_processed: field(doc, "pages_processed"),
            status: field(doc, "status"),
            engine: field(doc, "engine"),
            created_at: field(doc, "created_at"),
            updated_at: field(doc, "updated_at"),
            translation_count: doc
                .get("translations")
                .and_then(Value::as_array)
                .map_or(0, |t| t.len()),
        }
    }
}

pub fn field(doc: &DocumentRecord, key: &str) -> Value {
    doc.get(key).cloned().unwrap_or(Value::Null)
}
