use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::ModelInvoker;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The injected model-invocation capability. Production wires `LlmClient`;
    /// tests wire scripted doubles. Shared freely — the client is its own
    /// synchronization domain and the pipelines keep no mutable state.
    pub invoker: Arc<dyn ModelInvoker>,
    pub config: Config,
}
