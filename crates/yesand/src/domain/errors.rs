//! Domain Errors
//!
//! Error types for domain operations. Each component reports exactly one
//! failure kind; the HTTP boundary maps each kind to a single status.

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown {entity_type}: {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Turn failed: {0}")]
    TurnFailed(String),

    #[error("Synthesis failed: {0}")]
    SynthesisFailed(String),

    #[error("Image generation failed: {0}")]
    ImageGenerationFailed(String),

    #[error("Rejected: {0}")]
    Rejected(String),

    #[error("External service error: {0}")]
    ExternalService(String),
}

impl DomainError {
    pub fn not_found<T: AsRef<str>>(entity_type: T, id: &str) -> Self {
        Self::NotFound {
            entity_type: entity_type.as_ref().to_string(),
            id: id.to_string(),
        }
    }

    /// Underlying message without the kind prefix
    pub fn detail(&self) -> String {
        match self {
            Self::NotFound { entity_type, id } => format!("Unknown {}: {}", entity_type, id),
            Self::Configuration(msg)
            | Self::TurnFailed(msg)
            | Self::SynthesisFailed(msg)
            | Self::ImageGenerationFailed(msg)
            | Self::Rejected(msg)
            | Self::ExternalService(msg) => msg.clone(),
        }
    }
}
