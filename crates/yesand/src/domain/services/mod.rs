//! Domain Services
//!
//! Pure turn-shaping logic shared by the server and its tests.

mod transcript;
mod yes_and;

pub use transcript::*;
pub use yes_and::*;
