//! Chat Routes - improv turns
//!
//! `/chat` returns the whole reply; `/chat/stream` frames fragments as SSE
//! `chunk` events closed by `done`, or by `error` if the upstream fails.

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    routing::post,
    Json, Router,
};
use futures::stream::{Stream, StreamExt};
use std::convert::Infallible;

use super::{api_error, resolve_persona, ApiError};
use crate::models::{ChatRequest, ChatResponse, StreamEvent};
use crate::AppState;

fn sse_event(event: &StreamEvent) -> Result<Event, Infallible> {
    let data = serde_json::to_string(event).unwrap_or_default();
    Ok(Event::default().data(data))
}

/// Run one improv turn
#[utoipa::path(
    post,
    path = "/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Reply opening with \"yes, and\"", body = ChatResponse),
        (status = 404, description = "Unknown persona"),
        (status = 502, description = "LLM error")
    ),
    tag = "Chat"
)]
pub async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let persona = resolve_persona(&state, &payload.persona_id)?;
    let history = payload.history();

    tracing::info!("Turn for {} ({} messages)", persona.id, history.len());

    let message = state
        .turns
        .run_turn(&persona, &history)
        .await
        .map_err(api_error)?;

    Ok(Json(ChatResponse { message }))
}

/// Stream one improv turn as server-sent events
#[utoipa::path(
    post,
    path = "/chat/stream",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "SSE stream of chunk events, then done or error", body = StreamEvent, content_type = "text/event-stream"),
        (status = 404, description = "Unknown persona")
    ),
    tag = "Chat"
)]
pub async fn chat_stream(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    let persona = resolve_persona(&state, &payload.persona_id)?;
    let history = payload.history();

    tracing::info!("Streaming turn for {} ({} messages)", persona.id, history.len());

    let fragments = state.turns.stream_turn(&persona, &history);

    let stream = async_stream::stream! {
        let mut fragments = Box::pin(fragments);
        let mut failed = false;

        while let Some(item) = fragments.next().await {
            match item {
                Ok(content) => yield sse_event(&StreamEvent::Chunk { content }),
                Err(e) => {
                    tracing::warn!("Streaming turn failed: {}", e);
                    yield sse_event(&StreamEvent::Error { message: e.detail() });
                    failed = true;
                    break;
                }
            }
        }

        if !failed {
            yield sse_event(&StreamEvent::Done);
        }
    };

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/chat", post(chat))
        .route("/chat/stream", post(chat_stream))
}
