use axum::{extract::Multipart, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::extraction::upload::ResumeForm;
use crate::extraction::{extract_blocking, ExtractedText};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractResponse {
    #[serde(flatten)]
    pub extracted: ExtractedText,
    pub char_count: usize,
}

/// POST /api/v1/extract
///
/// Returns the plain text of an uploaded PDF, DOCX or TXT file without
/// analysing it, so the client can preview what will be sent.
pub async fn handle_extract(multipart: Multipart) -> Result<Json<ExtractResponse>, AppError> {
    let form = ResumeForm::from_multipart(multipart).await?;
    let file = form
        .file
        .ok_or_else(|| AppError::Validation("A 'file' field is required".to_string()))?;

    let kind = file.kind()?;
    let extracted = extract_blocking(kind, file.bytes).await?;

    Ok(Json(ExtractResponse {
        char_count: extracted.char_count(),
        extracted,
    }))
}
