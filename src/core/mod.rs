//! Data model, validation and the lookup engine.

pub mod email;
pub mod engine;
pub mod error;
pub mod time;
pub mod types;
