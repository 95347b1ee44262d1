//! Cryptographic utilities for the pet adoption platform.
//!
//! This crate provides:
//! - HMAC-SHA256 signatures with constant-time verification
//! - Six-digit email verification codes
//! - Salted PBKDF2 password hashes
//! - Signed, expiring session tokens

#![warn(missing_docs)]

mod hmac_impl;
mod error;
mod otp;
mod password;
mod token;

pub use hmac_impl::{hmac_sha256, verify_signature};
pub use error::{CryptoError, Result};
pub use otp::{generate_otp, verify_otp, OTP_MIN};
pub use password::{hash_password, verify_password};
pub use token::{sign_token, verify_token, TokenClaims};
