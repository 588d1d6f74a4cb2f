//! Adamas Advisor HTTP Server
//!
//! Axum-based server exposing diamond price prediction, currency quotes,
//! insights, and the Gemini-backed expert chat.

mod handlers;
mod state;

use std::sync::Arc;

use advisor_core::LlmProvider;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use advisor_core::MemorySessionStore;
use advisor_runtime::GeminiProvider;
use diamond_advisor::{advisor::DEFAULT_MODEL, ExpertAdvisor, GbtModel};

use crate::handlers::{
    chat_handler, health_check, predict_handler, refresh_handler, transcript_handler,
};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    // Load the regression model once. Missing or malformed artifact is
    // fatal: predictions without it would be meaningless.
    let model_path = std::env::var("MODEL_PATH").unwrap_or_else(|_| "xgb_model.json".into());
    let model = Arc::new(GbtModel::load(&model_path)?);
    tracing::info!("✓ Loaded model from {} ({} trees)", model_path, model.tree_count());

    // Initialize LLM provider
    let provider = Arc::new(GeminiProvider::from_env()?);

    if provider.is_configured() {
        match provider.health_check().await {
            Ok(true) => tracing::info!("✓ Connected to Gemini"),
            _ => tracing::warn!("⚠ Gemini not reachable - chat will return fallback replies"),
        }
    } else {
        tracing::warn!("⚠ GEMINI_API_KEY not set - chat will return fallback replies");
    }

    let chat_model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());
    let advisor = Arc::new(ExpertAdvisor::with_model(provider.clone(), chat_model));

    // Build application state
    let state = AppState {
        model,
        advisor,
        provider,
        sessions: Arc::new(MemorySessionStore::new()),
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        // Health & info
        .route("/health", get(health_check))
        // Valuation API
        .route("/api/predict", post(predict_handler))
        .route("/api/refresh", post(refresh_handler))
        // Advisor API
        .route("/api/chat", post(chat_handler))
        .route("/api/chat/{session_id}", get(transcript_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("💎 adamas-advisor server running on http://{}", addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health                 - Health check");
    tracing::info!("  POST /api/predict            - Price prediction + insights");
    tracing::info!("  POST /api/refresh            - Refresh acknowledgment");
    tracing::info!("  POST /api/chat               - Ask the diamond expert");
    tracing::info!("  GET  /api/chat/{{session_id}}  - Session transcript");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
