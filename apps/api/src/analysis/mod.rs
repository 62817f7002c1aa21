//! Analysis Requester — one schema-constrained LLM call per resume.
//!
//! Builds the prompt, sends it through `llm_client`, and parses the returned
//! JSON into an `AnalysisResult`. No retries, no streaming, no partial
//! results: a call either yields a complete result or an `AnalysisError`.

pub mod handlers;
pub mod model;
pub mod prompts;
pub mod sample;

use thiserror::Error;
use tracing::{error, info};

use crate::analysis::model::AnalysisResult;
use crate::analysis::prompts::{analysis_response_schema, ANALYSIS_PROMPT_TEMPLATE, ANALYSIS_SYSTEM};
use crate::llm_client::prompts::{fill_template, JSON_ONLY_SYSTEM};
use crate::llm_client::{complete_json, CompletionRequest, CompletionService, LlmError};

pub const ANALYSIS_FAILED_MESSAGE: &str = "Failed to get a valid response from the AI model.";

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The completion service rejected the API key.
    #[error("{0}")]
    InvalidCredential(String),

    /// Network, service, empty-content or parse failure. The cause is logged, not exposed.
    #[error("{}", ANALYSIS_FAILED_MESSAGE)]
    Failed,
}

impl From<LlmError> for AnalysisError {
    fn from(err: LlmError) -> Self {
        if err.is_credential_error() {
            let message = match err {
                LlmError::Api { message, .. } => message,
                other => other.to_string(),
            };
            return AnalysisError::InvalidCredential(message);
        }
        error!("Error calling the completion service: {err}");
        AnalysisError::Failed
    }
}

/// Builds the analysis prompt for `resume_text`.
pub fn build_prompt(resume_text: &str) -> String {
    fill_template(ANALYSIS_PROMPT_TEMPLATE, &[("resume_text", resume_text.trim())])
}

/// Analyzes a resume with exactly one completion request.
///
/// The caller guarantees `resume_text` is non-empty after trimming.
pub async fn analyze_resume(
    llm: &dyn CompletionService,
    api_key: &str,
    resume_text: &str,
) -> Result<AnalysisResult, AnalysisError> {
    let prompt = build_prompt(resume_text);
    let system = format!("{ANALYSIS_SYSTEM} {JSON_ONLY_SYSTEM}");
    let schema = analysis_response_schema();

    let result: AnalysisResult = complete_json(
        llm,
        api_key,
        CompletionRequest {
            system: &system,
            prompt: &prompt,
            response_schema: &schema,
        },
    )
    .await?;

    info!(
        predicted_role = %result.job_prediction.predicted_role,
        confidence = result.job_prediction.confidence_score,
        matches = result.job_matches.len(),
        "Resume analysis completed"
    );
    Ok(result)
}


#[cfg(test)]
mod tests {
    use super::testing::StubCompletion;
    use super::*;
    use crate::analysis::model::fixtures;

    #[tokio::test]
    async fn test_conforming_response_populates_all_sections() {
        let stub = StubCompletion::replying(fixtures::full_response().to_string());
        let result = analyze_resume(&stub, "key", "Jane Doe, Rust engineer").await.unwrap();

        assert_eq!(result, fixtures::full_result());
        assert!(!result.summary_card.name.is_empty());
        assert!(!result.job_prediction.predicted_role.is_empty());
        assert!(!result.job_matches.is_empty());
        assert!(!result.interview_questions.is_empty());
        assert!(!result.career_roadmap.is_empty());
        assert_eq!(stub.call_count(), 1);
    }

    #[tokio::test]
    async fn test_prompt_embeds_resume_text_and_key_is_forwarded() {
        let stub = StubCompletion::replying(fixtures::full_response().to_string());
        analyze_resume(&stub, "user-key", "  UNIQUE-RESUME-MARKER  ").await.unwrap();

        let prompt = stub.last_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("---\nUNIQUE-RESUME-MARKER\n---"));
        assert_eq!(stub.last_api_key.lock().unwrap().as_deref(), Some("user-key"));
    }

    #[tokio::test]
    async fn test_fenced_response_is_accepted() {
        let fenced = format!("```json\n{}\n```", fixtures::full_response());
        let stub = StubCompletion::replying(fenced);
        assert!(analyze_resume(&stub, "key", "resume").await.is_ok());
    }

    #[tokio::test]
    async fn test_malformed_response_is_generic_failure() {
        let stub = StubCompletion::replying("Sorry, I can't help with that.");
        let err = analyze_resume(&stub, "key", "resume").await.unwrap_err();
        assert!(matches!(err, AnalysisError::Failed));
        assert_eq!(err.to_string(), "Failed to get a valid response from the AI model.");
        assert_eq!(stub.call_count(), 1);
    }

    #[tokio::test]
    async fn test_incomplete_json_is_generic_failure() {
        let stub = StubCompletion::replying(r#"{"summaryCard": {"name": "Jane"}}"#);
        let err = analyze_resume(&stub, "key", "resume").await.unwrap_err();
        assert!(matches!(err, AnalysisError::Failed));
    }

    #[tokio::test]
    async fn test_service_error_is_generic_failure() {
        let stub = StubCompletion::with(|| {
            Err(LlmError::Api {
                status: 503,
                message: "The model is overloaded.".to_string(),
            })
        });
        let err = analyze_resume(&stub, "key", "resume").await.unwrap_err();
        assert!(matches!(err, AnalysisError::Failed));
    }

    #[tokio::test]
    async fn test_rejected_key_is_credential_error() {
        let stub = StubCompletion::with(|| {
            Err(LlmError::Api {
                status: 400,
                message: "API key not valid. Please pass a valid API key.".to_string(),
            })
        });
        let err = analyze_resume(&stub, "bad", "resume").await.unwrap_err();
        match err {
            AnalysisError::InvalidCredential(msg) => assert!(msg.contains("API key not valid")),
            other => panic!("expected credential error, got {other:?}"),
        }
    }

    #[test]
    fn test_build_prompt_trims_resume() {
        let prompt = build_prompt("\n\n  Jane Doe  \n");
        assert!(prompt.contains("---\nJane Doe\n---"));
        assert!(!prompt.contains("{resume_text}"));
    }
}
