use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::CompletionService;
use crate::session::AnalysisStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable completion service. Production: `GeminiClient`.
    pub llm: Arc<dyn CompletionService>,
    /// Results of the current client sessions, in memory only.
    pub store: AnalysisStore,
    pub config: Config,
}
