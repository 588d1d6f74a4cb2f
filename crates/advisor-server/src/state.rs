//! Application State

use std::sync::Arc;

use advisor_core::{LlmProvider, MemorySessionStore};
use diamond_advisor::{ExpertAdvisor, GbtModel};

/// Shared application state.
///
/// The model and provider are immutable singletons initialized once at
/// startup; the only mutable state is the per-session transcripts in
/// the session store.
#[derive(Clone)]
pub struct AppState {
    /// Pre-trained regression model (read-only, shared)
    pub model: Arc<GbtModel>,

    /// Diamond expert chat client
    pub advisor: Arc<ExpertAdvisor>,

    /// Remote LLM provider (for health reporting)
    pub provider: Arc<dyn LlmProvider>,

    /// In-memory chat sessions
    pub sessions: Arc<MemorySessionStore>,
}
