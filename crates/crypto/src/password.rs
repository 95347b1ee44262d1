//! Salted password hashing.
//!
//! Encoded form: `pbkdf2-sha256$<rounds>$<salt hex>$<hash hex>`. The round
//! count travels with the hash, so raising the configured rounds does not
//! invalidate existing accounts.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::{CryptoError, Result};

const SCHEME: &str = "pbkdf2-sha256";
const SALT_LEN: usize = 16;
const HASH_LEN: usize = 32;

/// Hash `password` with a fresh random salt.
pub fn hash_password(password: &str, rounds: u32) -> Result<String> {
    let mut salt = [0u8; SALT_LEN];
    getrandom::getrandom(&mut salt)?;
    Ok(encode(&salt, rounds, &derive(password, &salt, rounds)))
}

/// Check `password` against an encoded hash from [`hash_password`].
///
/// # Returns
/// Ok(false) on a wrong password, Err if `encoded` is malformed
pub fn verify_password(password: &str, encoded: &str) -> Result<bool> {
    let mut parts = encoded.split('$');
    let (Some(scheme), Some(rounds), Some(salt), Some(hash), None) = (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) else {
        return Err(CryptoError::InvalidHash("expected 4 `$`-separated fields".into()));
    };

    if scheme != SCHEME {
        return Err(CryptoError::InvalidHash(format!("unknown scheme `{scheme}`")));
    }
    let rounds: u32 = rounds
        .parse()
        .map_err(|_| CryptoError::InvalidHash(format!("bad round count `{rounds}`")))?;
    if rounds == 0 {
        return Err(CryptoError::InvalidHash("round count must be positive".into()));
    }
    let salt = hex::decode(salt).map_err(|e| CryptoError::EncodingError(e.to_string()))?;
    let expected = hex::decode(hash).map_err(|e| CryptoError::EncodingError(e.to_string()))?;

    let actual = derive(password, &salt, rounds);
    Ok(actual.as_slice().ct_eq(expected.as_slice()).into())
}

fn derive(password: &str, salt: &[u8], rounds: u32) -> [u8; HASH_LEN] {
    let mut out = [0u8; HASH_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, rounds, &mut out);
    out
}

fn encode(salt: &[u8], rounds: u32, hash: &[u8]) -> String {
    format!("{SCHEME}${rounds}${}${}", hex::encode(salt), hex::encode(hash))
}
