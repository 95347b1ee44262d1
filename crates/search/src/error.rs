//! Error types for the search crate.

use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur during search operations.
///
/// Matching itself never fails; these cover configuration and batch input.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Threshold out of range
    #[error("Invalid match config: {0}")]
    InvalidConfig(String),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Error code for integration with petadopt-core error handling.
/// Range: 10xxx for search errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchErrorCode {
    /// Threshold out of range
    InvalidConfig = 10001,
    /// JSON parsing error
    JsonParsing = 10002,
}

impl SearchError {
    /// Returns the error code for this error.
    pub fn code(&self) -> SearchErrorCode {
        match self {
            SearchError::InvalidConfig(_) => SearchErrorCode::InvalidConfig,
            SearchError::JsonError(_) => SearchErrorCode::JsonParsing,
        }
    }
}
