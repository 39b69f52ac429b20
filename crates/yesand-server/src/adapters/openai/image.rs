//! OpenAI image generations

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use yesand::{DomainError, GeneratedImage, ImageGenerator, ImageRequest};

use super::{send, OpenAiClient, REQUEST_TIMEOUT};

/// [`ImageGenerator`] backed by `/images/generations`
#[derive(Clone)]
pub struct OpenAiImageGenerator {
    client: OpenAiClient,
}

impl OpenAiImageGenerator {
    pub fn new(client: OpenAiClient) -> Self {
        Self { client }
    }
}

#[derive(Serialize)]
struct ImageGenerationRequest {
    model: String,
    prompt: String,
    size: String,
    n: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    quality: Option<String>,
}

impl From<&ImageRequest> for ImageGenerationRequest {
    fn from(request: &ImageRequest) -> Self {
        Self {
            model: request.model.to_string(),
            prompt: request.prompt.clone(),
            size: request.size.clone(),
            n: request.n,
            quality: request.quality.clone(),
        }
    }
}

#[derive(Deserialize)]
struct ImageGenerationResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Deserialize)]
struct ImageData {
    url: Option<String>,
    revised_prompt: Option<String>,
}

#[async_trait]
impl ImageGenerator for OpenAiImageGenerator {
    async fn generate(&self, request: &ImageRequest) -> Result<Vec<GeneratedImage>, DomainError> {
        let body = ImageGenerationRequest::from(request);
        tracing::debug!(
            "Image generation: model={} size={} quality={:?}",
            body.model,
            body.size,
            body.quality
        );

        let http = self
            .client
            .post("images/generations")?
            .timeout(REQUEST_TIMEOUT)
            .json(&body);
        let response = send(http).await?;

        let raw: ImageGenerationResponse = response
            .json()
            .await
            .map_err(|e| DomainError::ExternalService(format!("Parse error: {}", e)))?;

        Ok(raw
            .data
            .into_iter()
            .map(|d| GeneratedImage {
                url: d.url,
                revised_prompt: d.revised_prompt,
            })
            .collect())
    }
}
