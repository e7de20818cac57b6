use crate::models::document::{DocumentSummary, field};
use crate::{AppState, api::api_error::ApiError};
use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};

pub async fn list_documents(State(state): State<AppState>) -> Json<Vec<DocumentSummary>> {
    let db = state.documents.load().await;
    let summaries = db
        .default
        .values()
        .map(DocumentSummary::from_record)
        .collect();
    Json(summaries)
}

pub async fn get_document(
    State(state): State<AppState>,
    Path(doc_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let db = state.documents.load().await;
    match db.find_by_id(&doc_id) {
        Some(doc) => Ok(Json(Value::Object(doc.clone()))),
        None => Err(ApiError::NotFound("Document not found".to_string())),
    }
}

pub async fn get_translations(
    State(state): State<AppState>,
    Path(doc_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let db = state.documents.load().await;
    let Some(doc) = db.find_by_id(&doc_id) else {
        return Err(ApiError::NotFound("Document not found".to_string()));
    };

    Ok(Json(json!({
        "document_id": doc_id,
        "filename": field(doc, "filename"),
        "translations": doc.get("translations").cloned().unwrap_or_else(|| json!([])),
    })))
}

pub async fn get_pages(
    State(state): State<AppState>,
    Path(doc_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let db = state.documents.load().await;
    let Some(doc) = db.find_by_id(&doc_id) else {
        return Err(ApiError::NotFound("Document not found".to_string()));
    };

    Ok(Json(json!({
        "document_id": doc_id,
        "filename": field(doc, "filename"),
        "pages": doc.get("pages").cloned().unwrap_or_else(|| json!([])),
    })))
}
