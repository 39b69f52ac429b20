use anyhow::Context;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use yesand::PersonaSource;

mod adapters;
mod application;
mod config;
mod models;
mod routes;
#[cfg(test)]
mod test_support;

use adapters::{
    DirPersonaSource, EmbeddedPersonaSource, HttpImageFetcher, OpenAiChatModel, OpenAiClient,
    OpenAiImageGenerator,
};
use application::{
    ImageService, PersonaStore, ProxyService, SuggestionService, SynthesisService, TurnService,
};
use config::{Settings, SECRET_KEYS};

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub personas: Arc<PersonaStore>,
    pub turns: Arc<TurnService>,
    pub synthesizer: Arc<SynthesisService>,
    pub images: Arc<ImageService>,
    pub proxy: Arc<ProxyService>,
    pub suggestions: Arc<SuggestionService>,
}

#[derive(Serialize)]
struct HealthCheck {
    status: String,
    message: String,
    version: String,
}

async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "Yes-And API is running - the scene is open".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

fn persona_source(settings: &Settings) -> Arc<dyn PersonaSource> {
    match settings.personas_dir() {
        Some(dir) => Arc::new(DirPersonaSource::new(dir)),
        None => Arc::new(EmbeddedPersonaSource),
    }
}

#[shuttle_runtime::main]
async fn main(
    #[shuttle_runtime::Secrets] secrets: shuttle_runtime::SecretStore,
) -> shuttle_axum::ShuttleAxum {
    tracing::info!("🎭 Yes-And API initializing...");

    // Secrets are the last fallback; .env and the process environment win
    let captured: HashMap<String, String> = SECRET_KEYS
        .iter()
        .filter_map(|key| secrets.get(key).map(|value| (key.to_string(), value)))
        .collect();
    let settings = Arc::new(Settings::new(captured));

    if settings.api_key().is_none() {
        tracing::warn!("⚠️  No OPENAI_API_KEY set - turns and images fail until it is configured");
    }

    // Personas are validated up front; a broken definition stops startup
    let personas = Arc::new(PersonaStore::new(persona_source(&settings)));
    let catalog = personas.load().context("Failed to load personas")?;
    tracing::info!("🎪 {} personas ready", catalog.len());

    let openai = OpenAiClient::new(settings.clone()).context("Failed to build OpenAI client")?;
    let chat = Arc::new(OpenAiChatModel::new(openai.clone()));
    let generator = Arc::new(OpenAiImageGenerator::new(openai));
    let fetcher = Arc::new(HttpImageFetcher::new().context("Failed to build proxy client")?);

    let state = AppState {
        personas,
        turns: Arc::new(TurnService::new(chat.clone(), settings.clone())),
        synthesizer: Arc::new(SynthesisService::new(chat, settings.clone())),
        images: Arc::new(ImageService::new(generator, settings)),
        proxy: Arc::new(ProxyService::new(fetcher)),
        suggestions: Arc::new(SuggestionService::new()),
    };

    // OpenAPI documentation
    let openapi = routes::swagger::ApiDoc::openapi();

    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(health_check))
        .merge(routes::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    tracing::info!("📚 Swagger UI: /swagger-ui");
    tracing::info!("✅ Yes-And API ready - yes, and...");

    Ok(router.into())
}
