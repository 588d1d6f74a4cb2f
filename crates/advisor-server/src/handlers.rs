//! HTTP Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use advisor_core::{
    message::Message,
    session::{SessionId, SessionStore},
};
use diamond_advisor::{
    attributes::DiamondAttributes,
    currency::{self, CurrencyQuote},
    error::AdvisorError,
    insight::InsightBundle,
    ADVISOR_GREETING,
};

use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub provider_connected: bool,
    pub model_trees: usize,
}

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub carat: f64,
    pub cut: String,
    pub color: String,
    pub clarity: String,
    pub depth: f64,
    pub table: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    /// Valuation in all supported currencies. Display precision is a
    /// client concern: 2 decimals for USD/INR/AED, 0 for JPY.
    pub price: CurrencyQuote,
    pub insights: InsightBundle,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub message: String,
    pub session_id: String,
}

#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub session_id: String,
    pub messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub status: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

type ErrorReply = (StatusCode, Json<ErrorResponse>);

fn bad_request(code: &str, error: impl Into<String>) -> ErrorReply {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: error.into(),
            code: code.into(),
        }),
    )
}

/// Map a domain error to a user-visible HTTP reply. Grade and range
/// errors abort the request with the message; nothing is defaulted.
fn advisor_error(e: &AdvisorError) -> ErrorReply {
    match e {
        AdvisorError::InvalidGrade { .. } => bad_request("INVALID_GRADE", e.to_string()),
        AdvisorError::OutOfRange { .. } => bad_request("OUT_OF_RANGE", e.to_string()),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
                code: "PREDICTION_ERROR".into(),
            }),
        ),
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let provider_connected = state.provider.health_check().await.unwrap_or(false);

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        provider_connected,
        model_trees: state.model.tree_count(),
    })
}

/// Predict a diamond's price and derive the quote and insights
pub async fn predict_handler(
    State(state): State<AppState>,
    Json(payload): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, ErrorReply> {
    let attributes = DiamondAttributes {
        carat: payload.carat,
        cut: payload.cut.parse().map_err(|e| advisor_error(&e))?,
        color: payload.color.parse().map_err(|e| advisor_error(&e))?,
        clarity: payload.clarity.parse().map_err(|e| advisor_error(&e))?,
        depth_pct: payload.depth,
        table_pct: payload.table,
        x: payload.x,
        y: payload.y,
        z: payload.z,
    };

    let features = attributes.encode().map_err(|e| advisor_error(&e))?;

    let prediction = state.model.predict(&features).map_err(|e| {
        tracing::error!("prediction failed: {}", e);
        advisor_error(&e)
    })?;

    Ok(Json(PredictResponse {
        price: currency::convert(prediction.usd),
        insights: InsightBundle::for_attributes(&attributes),
    }))
}

/// Chat with the diamond expert. Creates the session on first contact
/// and always returns a displayable reply. The advisor call runs outside
/// any store lock; the user and assistant turns are then appended in a
/// single atomic store operation, so concurrent posts to one session
/// interleave exchanges instead of overwriting each other.
pub async fn chat_handler(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ErrorReply> {
    if payload.message.trim().is_empty() {
        return Err(bad_request("EMPTY_MESSAGE", "Message must not be empty"));
    }

    let session_id = payload
        .session_id
        .map(SessionId::from_string)
        .unwrap_or_default();

    let reply = state.advisor.ask(&payload.message).await;

    let session = state
        .sessions
        .append_exchange(
            &session_id,
            ADVISOR_GREETING,
            Message::user(&payload.message),
            Message::assistant(&reply),
        )
        .map_err(internal_error)?;

    Ok(Json(ChatResponse {
        message: reply,
        session_id: session.id.to_string(),
    }))
}

/// Fetch the running transcript for a session
pub async fn transcript_handler(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<TranscriptResponse>, ErrorReply> {
    let id = SessionId::from_string(session_id);
    let session = state
        .sessions
        .load(&id)
        .map_err(internal_error)?
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("Session {} not found", id),
                    code: "SESSION_NOT_FOUND".into(),
                }),
            )
        })?;

    Ok(Json(TranscriptResponse {
        session_id: session.id.to_string(),
        messages: session.transcript.messages().to_vec(),
    }))
}

/// Refresh action: simulated delay and acknowledgment, no functional
/// effect (rates and model are fixed for the process lifetime).
pub async fn refresh_handler() -> Json<RefreshResponse> {
    tokio::time::sleep(Duration::from_millis(1500)).await;

    Json(RefreshResponse {
        status: "ok",
        message: "Data refreshed successfully!",
    })
}

fn internal_error(e: advisor_core::AgentError) -> ErrorReply {
    tracing::error!("session store error: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: "Internal server error".into(),
            code: "SESSION_ERROR".into(),
        }),
    )
}
