use crate::models::user::{ProgressUpdate, ReadingProgress, User};
use crate::{AppState, api::api_error::ApiError};
use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};

pub async fn list_users(State(state): State<AppState>) -> Json<Vec<User>> {
    let db = state.users.load().await;
    Json(db.users.values().cloned().collect())
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let db = state.users.load().await;
    db.users
        .get(&user_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
}

pub async fn update_progress(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(payload): Json<ProgressUpdate>,
) -> Result<Json<Value>, ApiError> {
    // Guard held across load + save: the whole file is rewritten, so two
    // interleaved updates would otherwise drop one of the writes.
    let _guard = state.users.write_guard().await;
    let mut db = state.users.load().await;

    let Some(user) = db.users.get_mut(&user_id) else {
        return Err(ApiError::NotFound("User not found".to_string()));
    };

    let document_id = payload
        .document_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::BadRequest("document_id is required".to_string()))?;

    let progress = ReadingProgress {
        current_page: payload.current_page,
        last_read: Some(payload.timestamp.unwrap_or_default()),
    };
    user.reading_progress.insert(document_id, progress.clone());

    state.users.save(&db).await.map_err(|e| {
        tracing::error!("failed to write user store: {e}");
        ApiError::Internal("Failed to save progress".to_string())
    })?;
    Ok(Json(json!({"status": "ok", "progress": progress})))
}

pub async fn get_progress(
    State(state): State<AppState>,
    Path((user_id, document_id)): Path<(String, String)>,
) -> Result<Json<ReadingProgress>, ApiError> {
    let db = state.users.load().await;
    let Some(user) = db.users.get(&user_id) else {
        return Err(ApiError::NotFound("User not found".to_string()));
    };

    let progress = user
        .reading_progress
        .get(&document_id)
        .cloned()
        .unwrap_or_default();
    Ok(Json(progress))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AppState, config::Config};
    use serde_json::json;
    use std::sync::Arc;

    fn test_state(dir: &std::path::Path) -> AppState {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            base_dir: dir.to_path_buf(),
            document_db: dir.join("ocr_database.json"),
            users_db: dir.join("users_database.json"),
            static_dir: dir.join("static"),
            environment: "local".to_string(),
        };
        AppState::new(Arc::new(config))
    }

    fn seed_users(dir: &std::path::Path) {
        std::fs::write(
            dir.join("users_database.json"),
            json!({
                "users": {
                    "u1": {"id": "u1", "name": "Ana"},
                    "u2": {"id": "u2", "name": "Ben"}
                }
            })
            .to_string(),
        )
        .unwrap();
    }

    #[tokio::test]
    async fn lists_users_in_key_order() {
        let dir = tempfile::tempdir().unwrap();
        seed_users(dir.path());
        let state = test_state(dir.path());

        let Json(users) = list_users(State(state)).await;
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].fields["id"], "u1");
        assert_eq!(users[1].fields["id"], "u2");
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        seed_users(dir.path());
        let state = test_state(dir.path());

        let err = get_user(State(state), Path("missing".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn progress_defaults_to_page_zero() {
        let dir = tempfile::tempdir().unwrap();
        seed_users(dir.path());
        let state = test_state(dir.path());

        let Json(progress) = get_progress(
            State(state),
            Path(("u1".to_string(), "doc1".to_string())),
        )
        .await
        .unwrap();
        assert_eq!(progress.current_page, 0);
        assert!(progress.last_read.is_none());
    }

    #[tokio::test]
    async fn update_then_read_returns_posted_progress() {
        let dir = tempfile::tempdir().unwrap();
        seed_users(dir.path());
        let state = test_state(dir.path());

        let payload = ProgressUpdate {
            document_id: Some("doc1".to_string()),
            current_page: 5,
            timestamp: Some("T1".to_string()),
        };
        let Json(body) = update_progress(
            State(state.clone()),
            Path("u1".to_string()),
            Json(payload),
        )
        .await
        .unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["progress"], json!({"current_page": 5, "last_read": "T1"}));

        let Json(progress) = get_progress(
            State(state),
            Path(("u1".to_string(), "doc1".to_string())),
        )
        .await
        .unwrap();
        assert_eq!(progress.current_page, 5);
        assert_eq!(progress.last_read.as_deref(), Some("T1"));
    }

    #[tokio::test]
    async fn update_overwrites_previous_progress() {
        let dir = tempfile::tempdir().unwrap();
        seed_users(dir.path());
        let state = test_state(dir.path());

        for (page, ts) in [(3, "T1"), (9, "T2")] {
            let payload = ProgressUpdate {
                document_id: Some("doc1".to_string()),
                current_page: page,
                timestamp: Some(ts.to_string()),
            };
            update_progress(State(state.clone()), Path("u1".to_string()), Json(payload))
                .await
                .unwrap();
        }

        let Json(progress) = get_progress(
            State(state),
            Path(("u1".to_string(), "doc1".to_string())),
        )
        .await
        .unwrap();
        assert_eq!(progress.current_page, 9);
        assert_eq!(progress.last_read.as_deref(), Some("T2"));
    }

    #[tokio::test]
    async fn update_for_unknown_user_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        seed_users(dir.path());
        let state = test_state(dir.path());

        let payload = ProgressUpdate {
            document_id: Some("doc1".to_string()),
            current_page: 1,
            timestamp: None,
        };
        let err = update_progress(State(state), Path("missing".to_string()), Json(payload))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_without_document_id_is_bad_request() {
        let dir = tempfile::tempdir().unwrap();
        seed_users(dir.path());
        let state = test_state(dir.path());

        let payload = ProgressUpdate {
            document_id: None,
            current_page: 1,
            timestamp: None,
        };
        let err = update_progress(State(state), Path("u1".to_string()), Json(payload))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[tokio::test]
    async fn missing_timestamp_is_stored_as_empty_string() {
        let dir = tempfile::tempdir().unwrap();
        seed_users(dir.path());
        let state = test_state(dir.path());

        let payload = ProgressUpdate {
            document_id: Some("doc1".to_string()),
            current_page: 2,
            timestamp: None,
        };
        update_progress(State(state.clone()), Path("u1".to_string()), Json(payload))
            .await
            .unwrap();

        let Json(progress) = get_progress(
            State(state),
            Path(("u1".to_string(), "doc1".to_string())),
        )
        .await
        .unwrap();
        assert_eq!(progress.last_read.as_deref(), Some(""));
    }
}
