//! Image Proxy Route
//!
//! Serves generated images with an attachment disposition so browsers
//! download them instead of opening a cross-origin page.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use yesand::DomainError;

use super::ApiError;
use crate::application::DOWNLOAD_FILENAME;
use crate::models::ProxyQuery;
use crate::AppState;

/// Download a generated image through the server
#[utoipa::path(
    get,
    path = "/proxy-image",
    params(ProxyQuery),
    responses(
        (status = 200, description = "Image bytes with the upstream content type"),
        (status = 400, description = "Invalid image URL"),
        (status = 502, description = "Failed to fetch image")
    ),
    tag = "Proxy"
)]
pub async fn proxy_image(
    State(state): State<AppState>,
    Query(query): Query<ProxyQuery>,
) -> Result<Response, ApiError> {
    let image = state.proxy.fetch(&query.url).await.map_err(|e| match e {
        DomainError::Rejected(msg) => (StatusCode::BAD_REQUEST, msg),
        other => {
            tracing::warn!("Image proxy fetch failed: {}", other);
            (StatusCode::BAD_GATEWAY, "Failed to fetch image".to_string())
        }
    })?;

    tracing::debug!("Proxied {} bytes ({})", image.bytes.len(), image.content_type);

    Ok((
        [
            (header::CONTENT_TYPE, image.content_type),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", DOWNLOAD_FILENAME),
            ),
        ],
        image.bytes,
    )
        .into_response())
}

pub fn router() -> Router<AppState> {
    Router::new().route("/proxy-image", get(proxy_image))
}
