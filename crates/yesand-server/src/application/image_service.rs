//! Image Application Service
//!
//! Turns a finished prompt into a hosted image URL. Model, size and quality
//! are read from settings on every call.

use std::sync::Arc;

use yesand::{DomainError, ImageGenerator, ImageRequest};

use crate::config::Settings;

pub struct ImageService {
    generator: Arc<dyn ImageGenerator>,
    settings: Arc<Settings>,
}

impl ImageService {
    pub fn new(generator: Arc<dyn ImageGenerator>, settings: Arc<Settings>) -> Self {
        Self { generator, settings }
    }

    /// Request for one image; quality is only sent to models that accept it
    pub fn build_request(&self, prompt: &str) -> ImageRequest {
        let model = self.settings.image_model();
        let quality = model
            .supports_quality()
            .then(|| self.settings.image_quality());

        ImageRequest {
            model,
            prompt: prompt.to_string(),
            size: self.settings.image_size(),
            quality,
            n: 1,
        }
    }

    /// URL of the first generated image
    pub async fn fetch_image(&self, prompt: &str) -> Result<String, DomainError> {
        let request = self.build_request(prompt);
        tracing::debug!("Generating image with {} ({})", request.model, request.size);

        let images = self.generator.generate(&request).await.map_err(|e| match e {
            DomainError::ImageGenerationFailed(_) => e,
            other => DomainError::ImageGenerationFailed(other.detail()),
        })?;

        images
            .into_iter()
            .next()
            .and_then(|image| image.url)
            .ok_or_else(|| {
                DomainError::ImageGenerationFailed("No image URL in response".to_string())
            })
    }
}
