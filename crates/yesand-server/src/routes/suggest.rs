use axum::{extract::State, routing::get, Json, Router};

use crate::models::SuggestResponse;
use crate::AppState;

/// Random audience suggestion to open a scene
#[utoipa::path(
    get,
    path = "/suggest",
    responses(
        (status = 200, description = "One uppercase word", body = SuggestResponse)
    ),
    tag = "Suggest"
)]
pub async fn suggest(State(state): State<AppState>) -> Json<SuggestResponse> {
    Json(SuggestResponse {
        word: state.suggestions.suggest(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/suggest", get(suggest))
}
