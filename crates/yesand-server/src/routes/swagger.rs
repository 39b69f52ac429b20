//! OpenAPI Documentation
//!
//! Swagger UI available at /swagger-ui

use utoipa::OpenApi;

use crate::models::{
    AestheticResponse, ChatRequest, ChatResponse, GenerateResponse, PersonaSummary,
    PersonasResponse, StreamEvent, SuggestResponse, TurnMessage, TurnRole,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::persona::list_personas,
        super::chat::chat,
        super::chat::chat_stream,
        super::generate::generate,
        super::suggest::suggest,
        super::proxy::proxy_image,
    ),
    info(
        title = "Yes-And API",
        version = "0.1.0",
        description = "Improv with an AI partner that always says \"yes, and\", then turn the scene into an image.",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Persona", description = "Improv partner personas"),
        (name = "Chat", description = "Improv turns, batch and streamed"),
        (name = "Generate", description = "Conversation to image"),
        (name = "Suggest", description = "Audience suggestions"),
        (name = "Proxy", description = "Image download proxy"),
    ),
    components(
        schemas(
            AestheticResponse,
            PersonaSummary,
            PersonasResponse,
            TurnRole,
            TurnMessage,
            ChatRequest,
            ChatResponse,
            StreamEvent,
            GenerateResponse,
            SuggestResponse,
        )
    ),
)]
pub struct ApiDoc;
