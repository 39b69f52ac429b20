//! OpenAI adapters
//!
//! Chat completions (batch and SSE streaming via reqwest-eventsource) and image generations over
//! reqwest. Credentials, base URL and model choices come from [`Settings`]
//! on every request so they can be changed without a restart.

mod chat;
mod image;

pub use chat::OpenAiChatModel;
pub use image::OpenAiImageGenerator;

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use yesand::DomainError;

use crate::config::Settings;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Bound for non-streaming calls
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Shared HTTP plumbing for the OpenAI REST API
#[derive(Clone)]
pub struct OpenAiClient {
    http: Client,
    settings: Arc<Settings>,
}

impl OpenAiClient {
    pub fn new(settings: Arc<Settings>) -> Result<Self, DomainError> {
        let http = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| DomainError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { http, settings })
    }

    fn post(&self, path: &str) -> Result<RequestBuilder, DomainError> {
        let api_key = self.settings.api_key().ok_or_else(|| {
            DomainError::ExternalService("OPENAI_API_KEY is not set".to_string())
        })?;
        let url = format!("{}/{}", self.settings.base_url(), path.trim_start_matches('/'));

        Ok(self
            .http
            .post(url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json"))
    }
}

async fn send(request: RequestBuilder) -> Result<Response, DomainError> {
    let response = request
        .send()
        .await
        .map_err(|e| DomainError::ExternalService(format!("Request failed: {}", e)))?;

    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Failed to read error body".to_string());
    Err(map_http_error(status, body))
}

fn map_http_error(status: StatusCode, body: String) -> DomainError {
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|json| {
            json.get("error")
                .and_then(|err| err.get("message"))
                .and_then(|msg| msg.as_str())
                .map(|msg| msg.to_string())
        })
        .unwrap_or(body);

    DomainError::ExternalService(format!("OpenAI API error ({}): {}", status.as_u16(), message))
}
