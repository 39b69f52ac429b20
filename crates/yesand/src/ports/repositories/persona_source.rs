//! Persona Source Port
//!
//! Read-only access to static persona definitions.

use crate::domain::errors::DomainError;

/// One raw persona record and where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonaDefinition {
    /// Ordering key (a file name for directory sources)
    pub source_name: String,
    /// YAML text of the record
    pub text: String,
}

impl PersonaDefinition {
    pub fn new(source_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            text: text.into(),
        }
    }
}

/// Source interface for persona definitions
pub trait PersonaSource: Send + Sync {
    /// Enumerate every definition; order is not significant
    fn definitions(&self) -> Result<Vec<PersonaDefinition>, DomainError>;

    /// Human-readable location for logs
    fn describe(&self) -> String;
}
