//! lexa-service: translates between statutory text and legal XML, and
//! evaluates XML encodings against their source text, using Gemini.
pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

pub use startup::{build_router, AppState, Application};
