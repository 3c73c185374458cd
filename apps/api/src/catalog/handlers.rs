use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct DocumentsResponse {
    pub documents: Vec<String>,
    pub total: usize,
}

/// GET /api/v1/grants/documents
///
/// Lists the PDFs currently in the store. Enumeration only; nothing is
/// read or extracted.
pub async fn handle_list_documents(
    State(state): State<AppState>,
) -> Result<Json<DocumentsResponse>, AppError> {
    let documents: Vec<String> = state
        .store
        .documents()?
        .into_iter()
        .map(|d| d.name)
        .collect();
    let total = documents.len();
    Ok(Json(DocumentsResponse { documents, total }))
}
