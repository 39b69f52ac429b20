//! Repository Ports
//!
//! Abstract interfaces for read-only configuration data.

mod persona_source;

pub use persona_source::*;
