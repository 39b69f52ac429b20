//! Infrastructure Adapters
//!
//! Concrete implementations of the domain ports.

mod http_fetcher;
pub mod openai;
mod persona_source;

pub use http_fetcher::HttpImageFetcher;
pub use openai::{OpenAiChatModel, OpenAiClient, OpenAiImageGenerator};
pub use persona_source::{DirPersonaSource, EmbeddedPersonaSource};
