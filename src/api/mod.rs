use axum::{
    Json,
    Router,
    extract::State,
    routing::{get, post},
};
use serde_json::{Value, json};
pub mod api_error;
mod documents;
mod users;
use crate::{
    AppState,
    api::{
        documents::{get_document, get_pages, get_translations, list_documents},
        users::{get_progress, get_user, list_users, update_progress},
    },
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        // Users
        .route("/users", get(list_users))
        .route("/users/{user_id}", get(get_user))
        // Reading progress
        .route("/users/{user_id}/progress", post(update_progress))
        .route("/users/{user_id}/progress/{document_id}", get(get_progress))
        // Documents
        .route("/documents", get(list_documents))
        .route("/documents/{doc_id}", get(get_document))
        .route("/documents/{doc_id}/translations", get(get_translations))
        .route("/documents/{doc_id}/pages", get(get_pages))
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "environment": state.config.environment,
    }))
}
