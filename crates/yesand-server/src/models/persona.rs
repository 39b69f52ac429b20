//! Persona listing DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use yesand::Persona;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AestheticResponse {
    pub pulls_toward: Vec<String>,
    pub pulls_away_from: Vec<String>,
}

/// Public view of a persona; system prompts are never exposed
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PersonaSummary {
    pub id: String,
    pub name: String,
    pub tagline: String,
    pub aesthetic: AestheticResponse,
}

impl From<Persona> for PersonaSummary {
    fn from(persona: Persona) -> Self {
        Self {
            id: persona.id,
            name: persona.name,
            tagline: persona.tagline,
            aesthetic: AestheticResponse {
                pulls_toward: persona.aesthetic.pulls_toward,
                pulls_away_from: persona.aesthetic.pulls_away_from,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PersonasResponse {
    pub personas: Vec<PersonaSummary>,
}
