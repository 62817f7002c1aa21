use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::{AnalysisError, ANALYSIS_FAILED_MESSAGE};
use crate::extraction::ExtractError;

pub const EMPTY_RESUME_MESSAGE: &str =
    "Resume is empty. Please upload a file or paste text to analyze.";
pub const MISSING_API_KEY_MESSAGE: &str = "API Key not found. Please set your API key.";
pub const PAYLOAD_TOO_LARGE_MESSAGE: &str = "Upload is too large. Please upload a smaller file.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{0}")]
    UnsupportedFileType(String),

    #[error("{0}")]
    UnreadableFile(String),

    #[error("{}", EMPTY_RESUME_MESSAGE)]
    EmptyResume,

    #[error("{}", PAYLOAD_TOO_LARGE_MESSAGE)]
    PayloadTooLarge,

    #[error("{}", MISSING_API_KEY_MESSAGE)]
    MissingApiKey,

    #[error("Invalid API key: {0}")]
    InvalidApiKey(String),

    #[error("{}", ANALYSIS_FAILED_MESSAGE)]
    AnalysisFailed,

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ExtractError> for AppError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::UnsupportedType { ref mime } => {
                tracing::info!(mime = %mime, "Rejected unsupported upload");
                AppError::UnsupportedFileType(err.to_string())
            }
            other => AppError::UnreadableFile(other.to_string()),
        }
    }
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::InvalidCredential(message) => AppError::InvalidApiKey(message),
            AnalysisError::Failed => AppError::AnalysisFailed,
        }
    }
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnsupportedFileType(msg) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_FILE_TYPE",
                msg.clone(),
            ),
            AppError::UnreadableFile(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNREADABLE_FILE",
                msg.clone(),
            ),
            AppError::EmptyResume => (
                StatusCode::BAD_REQUEST,
                "EMPTY_RESUME",
                EMPTY_RESUME_MESSAGE.to_string(),
            ),
            AppError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                PAYLOAD_TOO_LARGE_MESSAGE.to_string(),
            ),
            AppError::MissingApiKey => (
                StatusCode::UNAUTHORIZED,
                "MISSING_API_KEY",
                MISSING_API_KEY_MESSAGE.to_string(),
            ),
            AppError::InvalidApiKey(msg) => {
                tracing::warn!("Completion service rejected the API key: {msg}");
                (StatusCode::UNAUTHORIZED, "INVALID_API_KEY", self.to_string())
            }
            AppError::AnalysisFailed => (
                StatusCode::BAD_GATEWAY,
                "ANALYSIS_FAILED",
                ANALYSIS_FAILED_MESSAGE.to_string(),
            ),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
