//! Error types for the crypto crate.

use thiserror::Error;

/// Result type alias for crypto operations.
pub type Result<T> = std::result::Result<T, CryptoError>;

/// Errors that can occur during crypto operations.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Invalid signature format
    #[error("Invalid signature format: {0}")]
    InvalidSignature(String),

    /// Signature verification failed
    #[error("Signature mismatch")]
    SignatureMismatch,

    /// Stored password hash could not be parsed
    #[error("Invalid password hash: {0}")]
    InvalidHash(String),

    /// Session token past its expiry
    #[error("Token expired")]
    TokenExpired,

    /// Encoding error
    #[error("Encoding error: {0}")]
    EncodingError(String),

    /// The OS random source failed
    #[error("Random source unavailable: {0}")]
    RandomSource(String),
}

impl From<getrandom::Error> for CryptoError {
    fn from(err: getrandom::Error) -> Self {
        CryptoError::RandomSource(err.to_string())
    }
}
