pub mod generation;
pub mod prompts;
pub mod providers;

pub use generation::{GenerationClient, GenerationResult};
