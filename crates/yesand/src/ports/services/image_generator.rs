//! Image Generator Port
//!
//! Abstract interface for text-to-image generation.

use async_trait::async_trait;

use crate::domain::errors::DomainError;
use crate::domain::value_objects::ImageModel;

/// One image-generation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub model: ImageModel,
    pub prompt: String,
    /// e.g. "1024x1024"
    pub size: String,
    /// Only set for models that support tiered quality
    pub quality: Option<String>,
    /// Number of images
    pub n: u8,
}

/// A generated image
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedImage {
    pub url: Option<String>,
    pub revised_prompt: Option<String>,
}

/// Image-generation capability
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, request: &ImageRequest) -> Result<Vec<GeneratedImage>, DomainError>;
}
