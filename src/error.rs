//! Error types for the cap table engine
//!
//! The calculators themselves never fail: degenerate inputs produce empty
//! views. Errors only come from record validation, commits and config/JSON
//! handling at the edges.

use thiserror::Error;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, CapTableError>;

/// Engine error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CapTableError {
    /// A record or round parameter failed validation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A pro-forma result could not be committed to the record list
    #[error("Commit rejected: {0}")]
    CommitRejected(String),

    /// Engine configuration is unusable
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON encoding or decoding failed
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CapTableError {
    fn from(err: serde_json::Error) -> Self {
        CapTableError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CapTableError::InvalidInput("shares must be positive".to_string());
        assert_eq!(err.to_string(), "Invalid input: shares must be positive");

        let err = CapTableError::CommitRejected("round name is required".to_string());
        assert!(err.to_string().starts_with("Commit rejected"));
    }

    #[test]
    fn test_from_serde_json_error() {
        let parse: std::result::Result<u32, _> = serde_json::from_str("not json");
        let err: CapTableError = parse.unwrap_err().into();
        assert!(matches!(err, CapTableError::Serialization(_)));
    }
}
