//! Generate Route - conversation to image

use axum::{extract::State, routing::post, Json, Router};

use super::{api_error, resolve_persona, ApiError};
use crate::models::{ChatRequest, GenerateResponse};
use crate::AppState;

/// Synthesize an image prompt from the conversation, then generate the image
#[utoipa::path(
    post,
    path = "/generate",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Generated image and the prompt behind it", body = GenerateResponse),
        (status = 404, description = "Unknown persona"),
        (status = 502, description = "Synthesizer or image generation error")
    ),
    tag = "Generate"
)]
pub async fn generate(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let persona = resolve_persona(&state, &payload.persona_id)?;
    let history = payload.history();

    let prompt = state
        .synthesizer
        .synthesize(&persona, &history)
        .await
        .map_err(api_error)?;

    let image_url = state
        .images
        .fetch_image(&prompt)
        .await
        .map_err(api_error)?;

    tracing::info!("🎨 Generated image for {}", persona.id);

    Ok(Json(GenerateResponse {
        image_url,
        prompt_used: prompt,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/generate", post(generate))
}
