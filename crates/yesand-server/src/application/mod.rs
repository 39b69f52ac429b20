//! Application Layer (Use Cases)
//!
//! Orchestrates domain operations and coordinates between
//! persona sources and external model services.

mod image_service;
mod persona_service;
mod proxy_service;
mod suggestion_service;
mod synthesis_service;
mod turn_service;

pub use image_service::ImageService;
pub use persona_service::PersonaStore;
pub use proxy_service::{ProxyService, DOWNLOAD_FILENAME};
pub use suggestion_service::SuggestionService;
pub use synthesis_service::SynthesisService;
pub use turn_service::TurnService;
