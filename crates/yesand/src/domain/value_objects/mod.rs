//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod image_model;

pub use image_model::*;
