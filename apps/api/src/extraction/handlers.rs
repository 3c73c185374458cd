use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::grant::ExtractedGrantDetails;
use crate::state::AppState;
use crate::store::encode_payload;

#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub file_name: String,
    pub details: ExtractedGrantDetails,
}

/// POST /api/v1/grants/analyze
///
/// Analyzes one uploaded PDF (multipart field `file`) without touching the
/// document store. Used to preview a grant before dropping it into the
/// grants directory.
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart request: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload.pdf").to_string();
        if !file_name.to_ascii_lowercase().ends_with(".pdf") {
            return Err(AppError::Validation(
                "Only PDF files are accepted.".to_string(),
            ));
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        if bytes.is_empty() {
            return Err(AppError::Validation("Uploaded file is empty.".to_string()));
        }

        let payload = encode_payload(&file_name, &bytes);
        let details = state.extractor.extract(&payload).await?;
        return Ok(Json(AnalyzeResponse { file_name, details }));
    }

    Err(AppError::Validation(
        "Missing 'file' field in multipart request".to_string(),
    ))
}
