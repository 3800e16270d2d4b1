//! HTTP handlers for the Lexa service.

pub mod generation;
pub mod health;

pub use generation::{evaluate, translate};
pub use health::{health_check, root};
