//! Configuration and input validation
//!
//! Provides validation for:
//! - Configuration files
//! - Request payloads (listings, adoption forms, sign-up)
//! - Contact details (email, phone)
//!
//! # Example
//!
//! ```rust
//! use petadopt_core::validation::Validator;
//!
//! let result = Validator::new()
//!     .required("name", "Bruno")
//!     .max_length("name", "Bruno", 50)
//!     .email("email", "adopter@example.com")
//!     .validate();
//!
//! assert!(result.is_valid());
//! ```

use crate::error::{Error, ErrorCode, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Non-space, `@`, non-space, `.`, non-space.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("valid email regex"));

/// Optional `+`, then digits with spaces or dashes, 7 to 20 chars overall.
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9][0-9 \-]{5,18}[0-9]$").expect("valid phone regex"));

/// Validation error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    /// Field that failed validation
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
    /// Expected value (if applicable)
    pub expected: Option<String>,
    /// Actual value (if applicable)
    pub actual: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
    warnings: Vec<ValidationError>,
}

impl ValidationResult {
    /// Create a new empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get all errors
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Get all warnings
    pub fn warnings(&self) -> &[ValidationError] {
        &self.warnings
    }

    /// Add an error
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Add a warning
    pub fn add_warning(&mut self, warning: ValidationError) {
        self.warnings.push(warning);
    }

    /// Merge another result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// Joined error messages, `; ` separated
    pub fn summary(&self) -> String {
        self.errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Convert to Result type
    pub fn to_result(self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(Error::new(
                ErrorCode::ValidationError,
                format!("Validation failed: {}", self.summary()),
            ))
        }
    }
}

/// Fluent validator builder
pub struct Validator {
    result: ValidationResult,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Create a new validator
    pub fn new() -> Self {
        Self {
            result: ValidationResult::new(),
        }
    }

    /// Validate that a field is not empty
    pub fn required(mut self, field: &str, value: &str) -> Self {
        if value.trim().is_empty() {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: "Field is required".to_string(),
                code: "REQUIRED".to_string(),
                expected: Some("non-empty value".to_string()),
                actual: Some("empty".to_string()),
            });
        }
        self
    }

    /// Validate minimum length in characters
    pub fn min_length(mut self, field: &str, value: &str, min: usize) -> Self {
        let len = value.chars().count();
        if len < min {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: format!("Must be at least {} characters", min),
                code: "MIN_LENGTH".to_string(),
                expected: Some(format!(">= {} chars", min)),
                actual: Some(format!("{} chars", len)),
            });
        }
        self
    }

    /// Validate maximum length in characters
    pub fn max_length(mut self, field: &str, value: &str, max: usize) -> Self {
        let len = value.chars().count();
        if len > max {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: format!("Must be at most {} characters", max),
                code: "MAX_LENGTH".to_string(),
                expected: Some(format!("<= {} chars", max)),
                actual: Some(format!("{} chars", len)),
            });
        }
        self
    }

    /// Validate against a regex pattern
    pub fn pattern(mut self, field: &str, value: &str, pattern: &str, description: &str) -> Self {
        match Regex::new(pattern) {
            Ok(re) => self.check_match(field, value, &re, description),
            Err(_) => {
                self.result.add_error(ValidationError {
                    field: field.to_string(),
                    message: "Invalid validation pattern".to_string(),
                    code: "INTERNAL".to_string(),
                    expected: None,
                    actual: None,
                });
                self
            }
        }
    }

    /// Validate an email address (`name@host.tld`)
    pub fn email(self, field: &str, value: &str) -> Self {
        self.check_match(field, value.trim(), &EMAIL_RE, "a valid email address")
    }

    /// Validate a phone number (digits, optional leading `+`, spaces or dashes)
    pub fn phone(self, field: &str, value: &str) -> Self {
        self.check_match(field, value.trim(), &PHONE_RE, "a valid phone number")
    }

    fn check_match(mut self, field: &str, value: &str, re: &Regex, description: &str) -> Self {
        if !re.is_match(value) {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: format!("Must match {}", description),
                code: "PATTERN".to_string(),
                expected: Some(description.to_string()),
                actual: Some(value.to_string()),
            });
        }
        self
    }

    /// Validate that a value is in a list of allowed values
    pub fn one_of(mut self, field: &str, value: &str, allowed: &[&str]) -> Self {
        if !allowed.contains(&value) {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: format!("Must be one of: {}", allowed.join(", ")),
                code: "ONE_OF".to_string(),
                expected: Some(allowed.join(", ")),
                actual: Some(value.to_string()),
            });
        }
        self
    }

    /// Validate a numeric range
    pub fn range<T: PartialOrd + std::fmt::Display>(
        mut self,
        field: &str,
        value: T,
        min: T,
        max: T,
    ) -> Self {
        if value < min || value > max {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: format!("Must be between {} and {}", min, max),
                code: "RANGE".to_string(),
                expected: Some(format!("{} - {}", min, max)),
                actual: Some(value.to_string()),
            });
        }
        self
    }

    /// Add a warning (non-blocking)
    pub fn warn_if(mut self, field: &str, condition: bool, message: &str) -> Self {
        if condition {
            self.result.add_warning(ValidationError {
                field: field.to_string(),
                message: message.to_string(),
                code: "WARNING".to_string(),
                expected: None,
                actual: None,
            });
        }
        self
    }

    /// Complete validation and return result
    pub fn validate(self) -> ValidationResult {
        self.result
    }
}

/// Top-level sections understood by the configuration loader
pub const KNOWN_CONFIG_KEYS: &[&str] = &["storage", "search", "auth", "logging", "media"];

/// Warn about unknown top-level configuration keys
pub fn validate_config_keys<'a>(keys: impl IntoIterator<Item = &'a str>) -> ValidationResult {
    let mut result = ValidationResult::new();

    for key in keys {
        if !KNOWN_CONFIG_KEYS.contains(&key) {
            result.add_warning(ValidationError {
                field: key.to_string(),
                message: format!("Unknown configuration key: {}", key),
                code: "UNKNOWN_KEY".to_string(),
                expected: Some(KNOWN_CONFIG_KEYS.join(", ")),
                actual: Some(key.to_string()),
            });
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_validation() {
        let result = Validator::new().required("name", "  ").validate();
        assert!(!result.is_valid());
        assert_eq!(result.errors()[0].code, "REQUIRED");
    }

    #[test]
    fn test_min_length_counts_chars() {
        let result = Validator::new().min_length("password", "ab", 3).validate();
        assert_eq!(result.errors()[0].code, "MIN_LENGTH");

        // 5 chars, 10 bytes
        let result = Validator::new().max_length("name", "ééééé", 5).validate();
        assert!(result.is_valid());
    }

    #[test]
    fn test_max_length_validation() {
        let result = Validator::new()
            .max_length("name", "abcdefghijk", 5)
            .validate();
        assert!(!result.is_valid());
        assert_eq!(result.errors()[0].code, "MAX_LENGTH");
    }

    #[test]
    fn test_pattern_validation() {
        let result = Validator::new()
            .pattern("otp", "12ab56", r"^\d{6}$", "six digits")
            .validate();
        assert!(!result.is_valid());
        assert_eq!(result.errors()[0].code, "PATTERN");
    }

    #[test]
    fn test_email_validation() {
        assert!(Validator::new().email("email", "a@b.co").validate().is_valid());
        assert!(Validator::new().email("email", " A.B@mail.example.org ").validate().is_valid());
        assert!(!Validator::new().email("email", "invalid").validate().is_valid());
        assert!(!Validator::new().email("email", "a b@c.d").validate().is_valid());
        assert!(!Validator::new().email("email", "a@b").validate().is_valid());
    }

    #[test]
    fn test_phone_validation() {
        assert!(Validator::new().phone("phone", "+91 98765 43210").validate().is_valid());
        assert!(Validator::new().phone("phone", "555-123-4567").validate().is_valid());
        assert!(!Validator::new().phone("phone", "12345").validate().is_valid());
        assert!(!Validator::new().phone("phone", "call me").validate().is_valid());
    }

    #[test]
    fn test_one_of_validation() {
        let result = Validator::new()
            .one_of("payment_method", "cheque", &["cash", "online"])
            .validate();
        assert!(!result.is_valid());
        assert_eq!(result.errors()[0].code, "ONE_OF");
    }

    #[test]
    fn test_range_validation() {
        let result = Validator::new().range("otp_ttl_minutes", 0, 1, 1440).validate();
        assert!(!result.is_valid());
        assert_eq!(result.errors()[0].code, "RANGE");
    }

    #[test]
    fn test_warnings_do_not_fail() {
        let result = Validator::new()
            .warn_if("token_secret", true, "Using the built-in development secret")
            .validate();
        assert!(result.is_valid());
        assert_eq!(result.warnings().len(), 1);
    }

    #[test]
    fn test_to_result_summary() {
        let err = Validator::new()
            .required("name", "")
            .email("email", "nope")
            .validate()
            .to_result()
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("name: Field is required"));
        assert!(err.message.contains("email: Must match a valid email address"));
    }

    #[test]
    fn test_unknown_config_keys() {
        let result = validate_config_keys(["storage", "search", "smtp"]);
        assert!(result.is_valid());
        assert_eq!(result.warnings().len(), 1);
        assert_eq!(result.warnings()[0].field, "smtp");
    }

    #[test]
    fn test_chained_validation() {
        let result = Validator::new()
            .required("name", "Bella")
            .min_length("name", "Bella", 2)
            .max_length("name", "Bella", 10)
            .validate();
        assert!(result.is_valid());
    }
}
