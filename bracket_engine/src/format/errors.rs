//! Format configuration error types.

use thiserror::Error;

use super::validation::FormatValidation;

/// Format configuration errors
#[derive(Debug, Error)]
pub enum FormatError {
    /// The document is not a well-formed format configuration
    #[error("Format configuration could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration parsed but failed validation
    #[error("Invalid format configuration: {0}")]
    Invalid(FormatValidation),
}

/// Result type for format operations
pub type FormatResult<T> = Result<T, FormatError>;
