//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Tool results do not line up with the invocations they answer.
    #[error("Malformed history: {0}")]
    MalformedHistory(String),

    /// The API description could not be turned into tools.
    #[error("Invalid API document: {0}")]
    InvalidApiDocument(String),
}

impl DomainError {
    pub fn is_malformed_history(&self) -> bool {
        matches!(self, DomainError::MalformedHistory(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_history_display() {
        let error = DomainError::MalformedHistory("missing result for call_1".to_string());
        assert_eq!(error.to_string(), "Malformed history: missing result for call_1");
        assert!(error.is_malformed_history());
    }

    #[test]
    fn test_invalid_document_is_not_history_error() {
        let error = DomainError::InvalidApiDocument("paths missing".to_string());
        assert!(!error.is_malformed_history());
    }
}
