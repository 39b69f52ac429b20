//! Yes-And API Routes
//!
//! - /personas - persona listing
//! - /chat, /chat/stream - improv turns (batch and SSE)
//! - /generate - conversation to image
//! - /suggest - audience suggestion word
//! - /proxy-image - download proxy for generated images

pub mod chat;
pub mod generate;
pub mod persona;
pub mod proxy;
pub mod suggest;
pub mod swagger;

use axum::{http::StatusCode, Router};
use yesand::{DomainError, Persona};

use crate::AppState;

/// Error half of every handler result
pub type ApiError = (StatusCode, String);

/// Map a domain failure to its single HTTP status and body text
pub fn api_error(err: DomainError) -> ApiError {
    match err {
        DomainError::NotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
        DomainError::Rejected(msg) => (StatusCode::BAD_REQUEST, msg),
        DomainError::Configuration(msg) => {
            tracing::error!("Configuration error: {}", msg);
            (StatusCode::INTERNAL_SERVER_ERROR, msg)
        }
        DomainError::TurnFailed(msg) => {
            tracing::warn!("Turn failed: {}", msg);
            (StatusCode::BAD_GATEWAY, format!("LLM error: {}", msg))
        }
        DomainError::SynthesisFailed(msg) => {
            tracing::warn!("Synthesis failed: {}", msg);
            (StatusCode::BAD_GATEWAY, format!("Synthesizer error: {}", msg))
        }
        DomainError::ImageGenerationFailed(msg) => {
            tracing::warn!("Image generation failed: {}", msg);
            (StatusCode::BAD_GATEWAY, format!("Image generation error: {}", msg))
        }
        DomainError::ExternalService(msg) => {
            tracing::warn!("Upstream failure: {}", msg);
            (StatusCode::BAD_GATEWAY, msg)
        }
    }
}

/// Look up a persona before any model call is made
pub(crate) fn resolve_persona(state: &AppState, persona_id: &str) -> Result<Persona, ApiError> {
    state
        .personas
        .get(persona_id)
        .map_err(api_error)?
        .ok_or_else(|| api_error(DomainError::not_found("persona", persona_id)))
}

/// All API routes, without docs or middleware
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(persona::router())
        .merge(chat::router())
        .merge(generate::router())
        .merge(suggest::router())
        .merge(proxy::router())
}
