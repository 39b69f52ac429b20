//! Yes-And Domain Library
//!
//! Core domain types and interfaces for the Yes-And improv image system.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Core domain models (Persona, Message)
//!   - `value_objects/`: Immutable value types (ImageModel)
//!   - `services/`: The yes-and prefix rule, its streaming gate, transcripts
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Persona definition sources
//!   - `services/`: Chat, image generation and image fetch capabilities
//!
//! # Usage
//!
//! ```rust,ignore
//! use yesand::domain::{ensure_yes_and, YesAndGate};
//! use yesand::ports::{ChatModel, ImageGenerator};
//! ```

pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    ensure_yes_and, starts_with_yes_and, transcript, DomainError, ImageModel, Message, Persona,
    PersonaAesthetic, PersonaVoice, Role, YesAndGate, YES_AND,
};
pub use ports::{
    ChatMessage, ChatModel, CompletionOptions, CompletionResponse, FetchedImage, FragmentStream,
    GeneratedImage, ImageFetcher, ImageGenerator, ImageRequest, MessageRole, PersonaDefinition,
    PersonaSource, TokenUsage,
};
