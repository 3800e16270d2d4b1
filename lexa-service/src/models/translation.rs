use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::{Validate, ValidationError};

/// Direction of a translation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationDirection {
    LegalToXml,
    XmlToLegal,
}

impl TranslationDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TranslationDirection::LegalToXml => "legal_to_xml",
            TranslationDirection::XmlToLegal => "xml_to_legal",
        }
    }
}

impl fmt::Display for TranslationDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidDirection(pub String);

impl fmt::Display for InvalidDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid direction '{}'. Use 'legal_to_xml' or 'xml_to_legal'",
            self.0
        )
    }
}

impl std::error::Error for InvalidDirection {}

impl FromStr for TranslationDirection {
    type Err = InvalidDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "legal_to_xml" => Ok(TranslationDirection::LegalToXml),
            "xml_to_legal" => Ok(TranslationDirection::XmlToLegal),
            other => Err(InvalidDirection(other.to_string())),
        }
    }
}

/// Body of `POST /translate`. Missing fields deserialize as empty strings so
/// they are rejected by validation rather than by the JSON extractor.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct TranslationRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Text cannot be empty"))]
    pub text: String,
    #[serde(default)]
    pub direction: String,
}

impl TranslationRequest {
    pub fn direction(&self) -> Result<TranslationDirection, InvalidDirection> {
        self.direction.parse()
    }
}

/// Body of `POST /evaluate`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct EvaluationRequest {
    #[serde(default)]
    #[validate(custom(
        function = "not_blank",
        message = "Both legal_text and xml_text are required"
    ))]
    pub legal_text: String,
    #[serde(default)]
    #[validate(custom(
        function = "not_blank",
        message = "Both legal_text and xml_text are required"
    ))]
    pub xml_text: String,
}

/// `{result}` envelope returned by both generation endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub result: String,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
