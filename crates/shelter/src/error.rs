//! Error types for the shelter crate.

use petadopt_core::validation::ValidationResult;
use petadopt_core::ErrorCode;
use petadopt_crypto::CryptoError;
use thiserror::Error;

/// Result type alias for shelter operations.
pub type Result<T> = std::result::Result<T, ShelterError>;

/// Errors surfaced by the shelter services.
#[derive(Debug, Error)]
pub enum ShelterError {
    /// Record lookup failed
    #[error("{what} not found: {id}")]
    NotFound {
        /// Record kind, e.g. "Animal"
        what: &'static str,
        /// ID or email that was looked up
        id: String,
    },

    /// Requester does not own the record
    #[error("Not authorized to {0}")]
    Forbidden(String),

    /// Unique constraint hit
    #[error("{0}")]
    Conflict(String),

    /// Payload failed validation
    #[error("Validation failed: {}", .0.summary())]
    Validation(ValidationResult),

    /// Unknown email or wrong password
    #[error("Incorrect email or password")]
    InvalidCredentials,

    /// Login attempted before email verification
    #[error("Please verify your email before logging in")]
    EmailNotVerified,

    /// Submitted code does not match
    #[error("Invalid verification code")]
    InvalidOtp,

    /// Code is past its expiry
    #[error("Verification code has expired")]
    OtpExpired,

    /// Verification requested for a verified account
    #[error("Email is already verified")]
    AlreadyVerified,

    /// Session token rejected
    #[error("Invalid session token: {0}")]
    InvalidToken(#[source] CryptoError),

    /// Verification code could not be delivered
    #[error("Failed to send verification email: {0}")]
    Delivery(String),

    /// Hashing or signing failure
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// Data file failure
    #[error(transparent)]
    Storage(#[from] petadopt_core::Error),
}

impl From<ValidationResult> for ShelterError {
    fn from(result: ValidationResult) -> Self {
        ShelterError::Validation(result)
    }
}

impl ShelterError {
    /// Shorthand for [`ShelterError::NotFound`].
    pub fn not_found(what: &'static str, id: impl Into<String>) -> Self {
        ShelterError::NotFound { what, id: id.into() }
    }

    /// Returns the shared error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ShelterError::NotFound { .. } => ErrorCode::RecordNotFound,
            ShelterError::Forbidden(_) => ErrorCode::UnauthorizedAccess,
            ShelterError::Conflict(_) => ErrorCode::DuplicateRecord,
            ShelterError::Validation(_) => ErrorCode::ValidationError,
            ShelterError::InvalidCredentials => ErrorCode::InvalidCredentials,
            ShelterError::EmailNotVerified => ErrorCode::EmailNotVerified,
            ShelterError::InvalidOtp => ErrorCode::InvalidOtp,
            ShelterError::OtpExpired => ErrorCode::OtpExpired,
            ShelterError::AlreadyVerified => ErrorCode::AlreadyVerified,
            ShelterError::InvalidToken(_) => ErrorCode::InvalidToken,
            ShelterError::Delivery(_) => ErrorCode::DeliveryFailed,
            ShelterError::Crypto(_) => ErrorCode::SecurityError,
            ShelterError::Storage(err) => err.code,
        }
    }

    /// HTTP status the REST layer answers with.
    pub fn http_status(&self) -> u16 {
        match self {
            ShelterError::NotFound { .. } => 404,
            ShelterError::Forbidden(_) | ShelterError::EmailNotVerified => 403,
            ShelterError::InvalidCredentials | ShelterError::InvalidToken(_) => 401,
            ShelterError::Conflict(_)
            | ShelterError::Validation(_)
            | ShelterError::InvalidOtp
            | ShelterError::OtpExpired
            | ShelterError::AlreadyVerified => 400,
            ShelterError::Delivery(_) | ShelterError::Crypto(_) | ShelterError::Storage(_) => 500,
        }
    }
}
