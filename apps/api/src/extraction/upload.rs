//! Multipart form parsing shared by the extract and analysis endpoints.

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use bytes::Bytes;

use crate::errors::AppError;
use crate::extraction::FileKind;

pub const FILE_FIELD: &str = "file";
pub const RESUME_TEXT_FIELD: &str = "resume_text";

/// A document as the client uploaded it, before any parsing.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedFile {
    /// Resolves the file kind. Fails with the unsupported-type error for
    /// anything other than PDF, DOCX or TXT.
    pub fn kind(&self) -> Result<FileKind, AppError> {
        FileKind::detect(self.content_type.as_deref(), self.file_name.as_deref())
            .map_err(AppError::from)
    }
}

/// The resume form: a file, pasted text, or both (the file wins).
#[derive(Debug, Default)]
pub struct ResumeForm {
    pub file: Option<UploadedFile>,
    pub resume_text: Option<String>,
}

impl ResumeForm {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = ResumeForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| multipart_error("Malformed multipart body", e))?
        {
            let name = field.name().map(str::to_string);
            match name.as_deref() {
                Some(FILE_FIELD) => {
                    let file_name = field.file_name().map(str::to_string);
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| multipart_error("Could not read uploaded file", e))?;
                    // browsers send an empty part when no file was chosen
                    if bytes.is_empty() && file_name.as_deref().unwrap_or_default().is_empty() {
                        continue;
                    }
                    form.file = Some(UploadedFile {
                        file_name,
                        content_type,
                        bytes,
                    });
                }
                Some(RESUME_TEXT_FIELD) => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| multipart_error("Could not read resume_text", e))?;
                    form.resume_text = Some(text);
                }
                _ => {}
            }
        }

        Ok(form)
    }
}

/// Body-limit failures surface as multipart errors; keep their 413.
fn multipart_error(context: &str, err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::Validation(format!("{context}: {err}"))
    }
}
