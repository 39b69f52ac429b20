//! Service Ports
//!
//! Abstract interfaces for external capabilities.

mod chat_model;
mod image_fetcher;
mod image_generator;

pub use chat_model::*;
pub use image_fetcher::*;
pub use image_generator::*;
