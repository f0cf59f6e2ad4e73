use thiserror::Error;

use crate::nlp_client::NlpError;

/// Parser-level error type.
/// Only the first three variants are fatal to a parse call; the rest are
/// recovered inside the extractors and only surface in logs.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("No text could be extracted from {0}")]
    EmptyExtraction(String),

    #[error("Optional component unavailable: {0}")]
    OptionalComponentUnavailable(String),

    #[error("Extractor '{extractor}' failed: {reason}")]
    ExtractorFailure { extractor: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ParseError {
    pub fn extractor(extractor: &str, reason: impl std::fmt::Display) -> Self {
        ParseError::ExtractorFailure {
            extractor: extractor.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Whether the error aborts the whole parse call.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ParseError::NotFound(_)
                | ParseError::UnsupportedFormat(_)
                | ParseError::EmptyExtraction(_)
                | ParseError::Io(_)
        )
    }
}

/// NLP failures never abort a parse; they mark the component as unavailable.
impl From<NlpError> for ParseError {
    fn from(e: NlpError) -> Self {
        ParseError::OptionalComponentUnavailable(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_format_message_names_the_format() {
        let err = ParseError::UnsupportedFormat(".txt".to_string());
        assert_eq!(err.to_string(), "Unsupported file format: .txt");
    }

    #[test]
    fn test_extractor_failure_is_not_fatal() {
        let err = ParseError::extractor("experience", "missing title");
        assert!(!err.is_fatal());
        assert_eq!(
            err.to_string(),
            "Extractor 'experience' failed: missing title"
        );
    }

    #[test]
    fn test_io_error_converts_and_is_fatal() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ParseError = io.into();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_nlp_error_becomes_optional_component() {
        let err: ParseError = NlpError::Component("model not loaded".to_string()).into();
        assert!(!err.is_fatal());
        assert_eq!(
            err.to_string(),
            "Optional component unavailable: Component failed: model not loaded"
        );
    }
}
