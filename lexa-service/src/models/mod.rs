pub mod translation;

pub use translation::{
    EvaluationRequest, GenerationResponse, InvalidDirection, TranslationDirection,
    TranslationRequest,
};
