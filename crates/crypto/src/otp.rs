//! One-time verification codes.

use crate::Result;
use subtle::ConstantTimeEq;

/// Smallest code; codes are always six digits.
pub const OTP_MIN: u32 = 100_000;

/// Number of distinct codes (`100000..=999999`).
const OTP_SPAN: u32 = 900_000;

/// Generate a six-digit code from the OS random source.
///
/// Draws are rejected above the largest multiple of the span so every code
/// is equally likely.
///
/// # Example
/// ```
/// let code = petadopt_crypto::generate_otp().unwrap();
/// assert_eq!(code.len(), 6);
/// ```
pub fn generate_otp() -> Result<String> {
    let limit = u32::MAX - (u32::MAX % OTP_SPAN);
    loop {
        let mut buf = [0u8; 4];
        getrandom::getrandom(&mut buf)?;
        let draw = u32::from_le_bytes(buf);
        if draw < limit {
            return Ok((OTP_MIN + draw % OTP_SPAN).to_string());
        }
    }
}

/// Compare a submitted code with the stored one in constant time.
///
/// Surrounding whitespace in the submission is ignored.
pub fn verify_otp(expected: &str, submitted: &str) -> bool {
    // Slices of unequal length compare unequal.
    expected.as_bytes().ct_eq(submitted.trim().as_bytes()).into()
}
