//! Signed session tokens.
//!
//! Format: `base64url(json claims)` `.` `hex(hmac_sha256(secret, first part))`.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::{hmac_sha256, verify_signature, CryptoError, Result};

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// User ID
    pub sub: String,
    /// Expiry, Unix seconds
    pub exp: i64,
}

/// Sign `claims` with `secret`.
pub fn sign_token(secret: &[u8], claims: &TokenClaims) -> Result<String> {
    let payload =
        serde_json::to_vec(claims).map_err(|e| CryptoError::EncodingError(e.to_string()))?;
    let encoded = URL_SAFE_NO_PAD.encode(payload);
    let signature = hmac_sha256(secret, encoded.as_bytes());
    Ok(format!("{encoded}.{signature}"))
}

/// Check the signature and expiry of `token` at `now` (Unix seconds).
pub fn verify_token(secret: &[u8], token: &str, now: i64) -> Result<TokenClaims> {
    let (encoded, signature) = token
        .split_once('.')
        .ok_or_else(|| CryptoError::InvalidSignature("missing `.` separator".to_string()))?;

    verify_signature(signature, &hmac_sha256(secret, encoded.as_bytes()))?;

    let payload = URL_SAFE_NO_PAD
        .decode(encoded)
        .map_err(|e| CryptoError::EncodingError(e.to_string()))?;
    let claims: TokenClaims =
        serde_json::from_slice(&payload).map_err(|e| CryptoError::EncodingError(e.to_string()))?;

    if now >= claims.exp {
        return Err(CryptoError::TokenExpired);
    }

    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret-of-sufficient-length";

    fn claims() -> TokenClaims {
        TokenClaims {
            sub: "user-1".to_string(),
            exp: 1_700_000_000,
        }
    }

    #[test]
    fn test_sign_and_verify() {
        let token = sign_token(SECRET, &claims()).unwrap();
        assert_eq!(verify_token(SECRET, &token, 1_699_999_999).unwrap(), claims());
    }

    #[test]
    fn test_expired() {
        let token = sign_token(SECRET, &claims()).unwrap();
        assert!(matches!(
            verify_token(SECRET, &token, 1_700_000_000),
            Err(CryptoError::TokenExpired)
        ));
    }

    #[test]
    fn test_wrong_secret() {
        let token = sign_token(SECRET, &claims()).unwrap();
        assert!(matches!(
            verify_token(b"another-secret", &token, 0),
            Err(CryptoError::SignatureMismatch)
        ));
    }

    #[test]
    fn test_tampered_payload() {
        let token = sign_token(SECRET, &claims()).unwrap();
        let (_, signature) = token.split_once('.').unwrap();
        let forged_claims = TokenClaims {
            sub: "admin".to_string(),
            exp: i64::MAX,
        };
        let forged_payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&forged_claims).unwrap());
        let forged = format!("{forged_payload}.{signature}");
        assert!(verify_token(SECRET, &forged, 0).is_err());
    }

    #[test]
    fn test_malformed() {
        assert!(verify_token(SECRET, "no-separator", 0).is_err());
        assert!(verify_token(SECRET, ".", 0).is_err());
    }
}
