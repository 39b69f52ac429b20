//! HTTP Data Models
//!
//! - Persona: public persona listing
//! - Chat: history requests, replies and stream events
//! - Generate: synthesized prompt and image URL
//! - Suggest: audience suggestion word and proxy query

mod chat;
mod generate;
mod persona;
mod suggest;

pub use chat::*;
pub use generate::*;
pub use persona::*;
pub use suggest::*;
