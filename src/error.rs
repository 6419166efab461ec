use thiserror::Error;

use crate::parser::ParseError;

#[derive(Debug, Error)]
pub enum EnhancerError {
    #[error("Malformed query '{query}': {reason}")]
    MalformedQuery { query: String, reason: String },

    #[error("Unsupported operation on query '{query}': {reason}")]
    UnsupportedOperation { query: String, reason: String },

    #[error("Ambiguous alias in query '{query}': candidates {aliases:?}")]
    AmbiguousAlias { query: String, aliases: Vec<String> },

    #[error("Unknown property '{property}' on type '{type_name}'")]
    UnknownProperty { property: String, type_name: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid enhancer configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl EnhancerError {
    pub fn malformed(query: &str, reason: impl Into<String>) -> Self {
        Self::MalformedQuery { query: query.to_string(), reason: reason.into() }
    }

    pub fn unsupported(query: &str, reason: impl Into<String>) -> Self {
        Self::UnsupportedOperation { query: query.to_string(), reason: reason.into() }
    }

    pub fn from_parse(query: &str, err: &ParseError) -> Self {
        Self::malformed(query, err.to_string())
    }

    /// Fails with `MalformedQuery` when the query text is empty or only whitespace.
    pub fn ensure_text(query: &str) -> Result<(), Self> {
        if query.trim().is_empty() {
            return Err(Self::malformed(query, "query must not be blank"));
        }
        Ok(())
    }
}
