//! Persona Routes

use axum::{extract::State, routing::get, Json, Router};

use super::{api_error, ApiError};
use crate::models::{PersonaSummary, PersonasResponse};
use crate::AppState;

/// List all personas
#[utoipa::path(
    get,
    path = "/personas",
    responses(
        (status = 200, description = "Personas in load order", body = PersonasResponse),
        (status = 500, description = "Persona configuration is broken")
    ),
    tag = "Persona"
)]
pub async fn list_personas(
    State(state): State<AppState>,
) -> Result<Json<PersonasResponse>, ApiError> {
    let personas = state.personas.list().map_err(api_error)?;

    Ok(Json(PersonasResponse {
        personas: personas.into_iter().map(PersonaSummary::from).collect(),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/personas", get(list_personas))
}
