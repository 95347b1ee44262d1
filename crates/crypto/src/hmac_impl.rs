//! HMAC-SHA256 signing.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::{CryptoError, Result};

type HmacSha256 = Hmac<Sha256>;

/// Generate HMAC-SHA256 signature.
///
/// # Arguments
/// * `key` - Secret key bytes
/// * `message` - Message to sign
///
/// # Returns
/// Signature as hex string
pub fn hmac_sha256(key: &[u8], message: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(key)
        .expect("HMAC can take key of any size");
    mac.update(message);
    let result = mac.finalize();
    hex::encode(result.into_bytes())
}

/// Verify a signature against an expected value.
///
/// # Arguments
/// * `signature` - The signature to verify (hex-encoded)
/// * `expected` - The expected signature (hex-encoded)
///
/// # Returns
/// Ok(()) if signatures match, Err otherwise
pub fn verify_signature(signature: &str, expected: &str) -> Result<()> {
    if signature.is_empty() || !signature.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(CryptoError::InvalidSignature(
            "expected a hex-encoded signature".to_string(),
        ));
    }
    if bool::from(signature.as_bytes().ct_eq(expected.as_bytes())) {
        Ok(())
    } else {
        Err(CryptoError::SignatureMismatch)
    }
}
