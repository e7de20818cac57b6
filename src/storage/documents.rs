use crate::models::document::DocumentDb;
use std::path::PathBuf;

/// Read-only view over the OCR document store file. The file is re-read on
/// every request; nothing is cached across calls.
#[derive(Clone, Debug)]
pub struct DocumentStore {
    path: PathBuf,
}

impl DocumentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the whole store. A missing file or malformed JSON yields the
    /// empty shape rather than an error; the API stays up with an empty
    /// library and the condition only shows in the logs.
    pub async fn load(&self) -> DocumentDb {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(db) => db,
                Err(e) => {
                    tracing::warn!(
                        "malformed document store at {}: {e}",
                        self.path.display()
                    );
                    DocumentDb::default()
                }
            },
            Err(e) => {
                tracing::warn!("document store unreadable at {}: {e}", self.path.display());
                DocumentDb::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn missing_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path().join("ocr_database.json"));

        let db = store.load().await;
        assert!(db.default.is_empty());
    }

    #[tokio::test]
    async fn malformed_json_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ocr_database.json");
        std::fs::write(&path, "{not json").unwrap();

        let db = DocumentStore::new(&path).load().await;
        assert!(db.default.is_empty());
    }

    #[tokio::test]
    async fn finds_document_by_id_field_not_store_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ocr_database.json");
        std::fs::write(
            &path,
            json!({
                "_default": {
                    "1": {"id": "doc-a", "title": "A"},
                    "2": {"id": "doc-b", "title": "B"}
                }
            })
            .to_string(),
        )
        .unwrap();

        let db = DocumentStore::new(&path).load().await;
        let doc = db.find_by_id("doc-b").unwrap();
        assert_eq!(doc["title"], "B");
        assert!(db.find_by_id("2").is_none());
    }
}
