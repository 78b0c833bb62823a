use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::GenerativeService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Generative backend for reports. `LlmClient` in production.
    pub llm: Arc<dyn GenerativeService>,
    pub config: Config,
}
