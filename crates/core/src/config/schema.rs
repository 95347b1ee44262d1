//! Configuration schema definitions
//!
//! Every section has defaults, so an empty file (or no file) is valid.

use crate::validation::{ValidationResult, Validator};
use petadopt_search::{MatchConfig, MAX_THRESHOLD};
use serde::{Deserialize, Serialize};

/// Secret used when none is configured. Fine for local runs only.
pub const DEV_TOKEN_SECRET: &str = "petadopt-development-secret";

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    /// Data file location
    #[serde(default)]
    pub storage: StorageConfig,

    /// Location matcher thresholds
    #[serde(default)]
    pub search: MatchConfig,

    /// Verification codes, sessions, and password hashing
    #[serde(default)]
    pub auth: AuthConfig,

    /// Log filter and format
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Image URL resolution
    #[serde(default)]
    pub media: MediaConfig,
}

impl ConfigSchema {
    /// Check value ranges. Warnings do not make the result invalid.
    pub fn validate(&self) -> ValidationResult {
        Validator::new()
            .required("storage.data_file", &self.storage.data_file)
            .range("search.max_length_gap", self.search.max_length_gap, 0, MAX_THRESHOLD)
            .range("search.max_distance", self.search.max_distance, 0, MAX_THRESHOLD)
            .range("auth.otp_ttl_minutes", self.auth.otp_ttl_minutes, 1, 24 * 60)
            .range("auth.token_ttl_days", self.auth.token_ttl_days, 1, 365)
            .range("auth.password_rounds", self.auth.password_rounds, 1_000, 10_000_000)
            .min_length("auth.token_secret", &self.auth.token_secret, 16)
            .warn_if(
                "auth.token_secret",
                self.auth.token_secret == DEV_TOKEN_SECRET,
                "Using the built-in development secret; set PETADOPT_TOKEN_SECRET",
            )
            .one_of(
                "logging.level",
                &self.logging.level,
                &["trace", "debug", "info", "warn", "error"],
            )
            .validate()
    }
}

/// JSON data file location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path of the JSON document holding all records
    #[serde(default = "default_data_file")]
    pub data_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
        }
    }
}

fn default_data_file() -> String {
    "data.json".to_string()
}

/// Email verification and session settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Lifetime of a verification code
    #[serde(default = "default_otp_ttl_minutes")]
    pub otp_ttl_minutes: i64,

    /// Lifetime of a session token
    #[serde(default = "default_token_ttl_days")]
    pub token_ttl_days: i64,

    /// HMAC key for session tokens
    #[serde(default = "default_token_secret")]
    pub token_secret: String,

    /// PBKDF2 iterations for new password hashes
    #[serde(default = "default_password_rounds")]
    pub password_rounds: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            otp_ttl_minutes: default_otp_ttl_minutes(),
            token_ttl_days: default_token_ttl_days(),
            token_secret: default_token_secret(),
            password_rounds: default_password_rounds(),
        }
    }
}

fn default_otp_ttl_minutes() -> i64 {
    10
}

fn default_token_ttl_days() -> i64 {
    7
}

fn default_token_secret() -> String {
    DEV_TOKEN_SECRET.to_string()
}

fn default_password_rounds() -> u32 {
    100_000
}

/// Log output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Include the event target in log lines
    #[serde(default)]
    pub show_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            show_target: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Where uploaded images are served from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Prefix for relative image paths
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let schema = ConfigSchema::default();
        let result = schema.validate();
        assert!(result.is_valid(), "{}", result.summary());
        assert_eq!(result.warnings().len(), 1);
        assert_eq!(schema.search, MatchConfig::default());
        assert_eq!(schema.auth.otp_ttl_minutes, 10);
        assert_eq!(schema.auth.token_ttl_days, 7);
    }

    #[test]
    fn test_partial_toml() {
        let schema: ConfigSchema = toml::from_str(
            r#"
            [search]
            max_distance = 2

            [auth]
            otp_ttl_minutes = 5
            "#,
        )
        .unwrap();
        assert_eq!(schema.search.max_distance, 2);
        assert_eq!(schema.search.max_length_gap, 3);
        assert_eq!(schema.auth.otp_ttl_minutes, 5);
        assert_eq!(schema.storage.data_file, "data.json");
    }

    #[test]
    fn test_out_of_range_values() {
        let mut schema = ConfigSchema::default();
        schema.search.max_distance = MAX_THRESHOLD + 1;
        schema.auth.otp_ttl_minutes = 0;
        schema.logging.level = "loud".to_string();
        let result = schema.validate();
        assert_eq!(result.errors().len(), 3);
    }

    #[test]
    fn test_short_secret_rejected() {
        let mut schema = ConfigSchema::default();
        schema.auth.token_secret = "short".to_string();
        assert!(!schema.validate().is_valid());
    }
}
