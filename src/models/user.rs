use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// On-disk shape of the user store: user id -> record under `users`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UserDb {
    #[serde(default)]
    pub users: BTreeMap<String, User>,
}

/// Users are created out of band (there is no signup endpoint), so only the
/// progress map is typed; everything else flattens through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub reading_progress: BTreeMap<String, ReadingProgress>,
    #[serde(flatten)]
    pub fields: serde_json::Map<String, Value>,
}

/// Per (user, document) progress marker, overwritten wholesale on update.
/// `last_read` is skipped when absent so the "no progress yet" default
/// serializes as `{"current_page": 0}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadingProgress {
    pub current_page: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_read: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProgressUpdate {
    #[serde(default)]
    pub document_id: Option<String>,
    #[serde(default)]
    pub current_page: i64,
    #[serde(default)]
    pub timestamp: Option<String>,
}
