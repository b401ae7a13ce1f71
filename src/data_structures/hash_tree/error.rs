//! Error types for the hash tree.
//!
//! Lookups on missing keys or paths are not errors; they surface as `None`.
//! The variants here cover sources that cannot be merged into a tree.

/// Errors that can occur in hash tree operations.
#[derive(Debug, thiserror::Error)]
pub enum HashTreeError {
    /// The source of a bulk merge is not shaped like a tree.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The source text could not be parsed as JSON.
    #[error("Malformed JSON tree: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HashTreeError::InvalidArgument("expected a JSON object, found array".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid argument: expected a JSON object, found array"
        );

        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = HashTreeError::from(parse_err);
        assert!(err.to_string().starts_with("Malformed JSON tree:"));
    }
}
