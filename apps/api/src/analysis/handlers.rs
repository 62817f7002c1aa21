//! Axum route handlers for the Analysis API.

use std::fmt::Write;
use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::analysis::analyze_resume;
use crate::analysis::sample::SAMPLE_RESUME;
use crate::config::Config;
use crate::dashboard::DashboardView;
use crate::errors::AppError;
use crate::extraction::extract_blocking;
use crate::extraction::upload::ResumeForm;
use crate::report::{render_markdown, report_filename, REPORT_CONTENT_TYPE};
use crate::session::{AnalysisSource, StoredAnalysis};
use crate::state::AppState;

/// Header carrying the client's own completion-service key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// The client's key wins; the server's configured key is the fallback.
fn resolve_api_key(headers: &HeaderMap, config: &Config) -> Result<String, AppError> {
    headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .or_else(|| config.gemini_api_key.clone())
        .ok_or(AppError::MissingApiKey)
}

/// Rejects whitespace-only resumes before anything is sent to the model.
pub fn require_resume_text(text: &str) -> Result<&str, AppError> {
    if text.trim().is_empty() {
        return Err(AppError::EmptyResume);
    }
    Ok(text)
}

async fn find_analysis(state: &AppState, id: Uuid) -> Result<Arc<StoredAnalysis>, AppError> {
    state
        .store
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Analysis {id} not found")))
}

/// `attachment` disposition with an ASCII fallback name and the exact UTF-8 name.
fn content_disposition(filename: &str) -> String {
    let ascii: String = filename
        .chars()
        .map(|c| if c.is_ascii_graphic() { c } else { '_' })
        .collect();

    let mut encoded = String::new();
    for byte in filename.bytes() {
        if byte.is_ascii_alphanumeric() || b"-._~".contains(&byte) {
            encoded.push(byte as char);
        } else {
            let _ = write!(encoded, "%{byte:02X}");
        }
    }

    format!("attachment; filename=\"{ascii}\"; filename*=UTF-8''{encoded}")
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/sample-resume
pub async fn handle_sample_resume() -> Json<Value> {
    Json(json!({ "resumeText": SAMPLE_RESUME }))
}

/// POST /api/v1/analyses
///
/// Multipart form with a `file` (PDF, DOCX, TXT) and/or `resume_text`; the
/// file wins when both are present. Extracts, checks for an empty resume,
/// runs exactly one LLM analysis and stores the result for this session.
pub async fn handle_create_analysis(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Arc<StoredAnalysis>>), AppError> {
    let api_key = resolve_api_key(&headers, &state.config)?;
    let form = ResumeForm::from_multipart(multipart).await?;

    let (resume_text, source) = match form.file {
        Some(file) => {
            let kind = file.kind()?;
            let extracted = extract_blocking(kind, file.bytes).await?;
            let source = AnalysisSource::File {
                file_name: file.file_name,
                file_kind: kind,
            };
            (extracted.text, source)
        }
        None => (form.resume_text.unwrap_or_default(), AnalysisSource::Text),
    };

    let resume_text = require_resume_text(&resume_text)?;
    let result = analyze_resume(state.llm.as_ref(), &api_key, resume_text).await?;

    let stored = state.store.insert(source, result).await;
    info!(id = %stored.id, "Analysis stored for session");

    Ok((StatusCode::CREATED, Json(stored)))
}

/// GET /api/v1/analyses/:id
pub async fn handle_get_analysis(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Arc<StoredAnalysis>>, AppError> {
    Ok(Json(find_analysis(&state, id).await?))
}

/// GET /api/v1/analyses/:id/dashboard
pub async fn handle_get_dashboard(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DashboardView>, AppError> {
    let analysis = find_analysis(&state, id).await?;
    Ok(Json(DashboardView::from_result(&analysis.result)))
}

/// GET /api/v1/analyses/:id/report
///
/// Markdown report as a download named after the candidate.
pub async fn handle_get_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let analysis = find_analysis(&state, id).await?;
    let filename = report_filename(&analysis.result.summary_card.name);

    Ok((
        [
            (header::CONTENT_TYPE, REPORT_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, content_disposition(&filename)),
        ],
        render_markdown(&analysis.result),
    ))
}

/// DELETE /api/v1/analyses/:id
///
/// "Analyze another resume": the stored result is discarded.
pub async fn handle_discard_analysis(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.store.discard(id).await {
        return Err(AppError::NotFound(format!("Analysis {id} not found")));
    }
    info!(id = %id, "Analysis discarded");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_require_resume_text_rejects_whitespace() {
        let err = require_resume_text("   ").unwrap_err();
        assert!(matches!(err, AppError::EmptyResume));
        assert!(err.to_string().starts_with("Resume is empty"));
        assert!(require_resume_text("\n\t").is_err());
        assert_eq!(require_resume_text(" Jane ").unwrap(), " Jane ");
    }

    #[test]
    fn test_api_key_header_wins_over_config() {
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, HeaderValue::from_static("client-key"));
        let mut config = Config::for_tests();
        config.gemini_api_key = Some("server-key".to_string());

        assert_eq!(resolve_api_key(&headers, &config).unwrap(), "client-key");
    }

    #[test]
    fn test_api_key_falls_back_to_config() {
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, HeaderValue::from_static("   "));
        let mut config = Config::for_tests();
        config.gemini_api_key = Some("server-key".to_string());

        assert_eq!(resolve_api_key(&headers, &config).unwrap(), "server-key");
    }

    #[test]
    fn test_missing_api_key() {
        let err = resolve_api_key(&HeaderMap::new(), &Config::for_tests()).unwrap_err();
        assert!(matches!(err, AppError::MissingApiKey));
    }

    #[test]
    fn test_content_disposition_ascii_and_utf8() {
        assert_eq!(
            content_disposition("Resume-Analysis-Report-José_Díaz.md"),
            "attachment; filename=\"Resume-Analysis-Report-Jos__D_az.md\"; \
             filename*=UTF-8''Resume-Analysis-Report-Jos%C3%A9_D%C3%ADaz.md"
        );
    }
}
