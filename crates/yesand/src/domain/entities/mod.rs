//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - Persona: improv partner with two system prompts
//! - Message: one role-tagged turn of a history

mod message;
mod persona;

pub use message::*;
pub use persona::*;
