//! Persona - Improv partner identity
//!
//! Pure domain entity loaded from static YAML definitions.

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Style hints for how a persona speaks (display only)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaVoice {
    pub tone: String,
    pub rhythm: String,
}

/// What a persona's imagery drifts toward and away from (display only)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaAesthetic {
    pub pulls_toward: Vec<String>,
    pub pulls_away_from: Vec<String>,
}

/// Persona - immutable once loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    pub id: String,
    pub name: String,
    pub tagline: String,
    pub voice: PersonaVoice,
    pub aesthetic: PersonaAesthetic,
    /// Governs turn generation
    pub agent_system_prompt: String,
    /// Governs image-prompt synthesis
    pub synthesizer_system_prompt: String,
}

impl Persona {
    /// Parse a single persona record. Every field is required.
    pub fn from_yaml(source_name: &str, text: &str) -> Result<Self, DomainError> {
        serde_yaml::from_str(text).map_err(|e| {
            DomainError::Configuration(format!("Invalid persona definition {}: {}", source_name, e))
        })
    }
}
