//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, ErrorCode, Result};
use crate::validation::{validate_config_keys, ValidationError};
use std::path::{Path, PathBuf};

/// Overrides the HMAC key for session tokens
pub const ENV_TOKEN_SECRET: &str = "PETADOPT_TOKEN_SECRET";

/// Overrides the JSON data file path
pub const ENV_DATA_FILE: &str = "PETADOPT_DATA_FILE";

/// Configuration wrapper
#[derive(Debug, Clone)]
pub struct Config {
    /// Parsed and validated settings
    pub schema: ConfigSchema,
    /// File the settings came from, if any
    pub path: Option<PathBuf>,
    /// Non-fatal findings (unknown keys, development secret)
    pub warnings: Vec<ValidationError>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema: ConfigSchema::default(),
            path: None,
            warnings: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from a file path or use defaults
    ///
    /// Environment overrides are applied after the file, then the result is
    /// validated.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) if !p.exists() => return Err(Error::config_not_found(p)),
            Some(p) => Some(p.to_path_buf()),
            None => find_config_file(),
        };

        let mut config = match &config_path {
            Some(p) => Self::from_toml_str(&std::fs::read_to_string(p).map_err(|e| {
                Error::config(format!("Failed to read config file {}: {}", p.display(), e))
                    .with_source(e)
            })?)
            .map_err(|e| e.with_context(format!("In {}", p.display())))?,
            None => Self::default(),
        };
        config.path = config_path;

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.finish()
    }

    /// Parse TOML text without touching the environment or validating
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(content)?;
        let key_check = validate_config_keys(table.keys().map(String::as_str));
        let schema: ConfigSchema = table.try_into()?;

        Ok(Self {
            schema,
            path: None,
            warnings: key_check.warnings().to_vec(),
        })
    }

    /// Apply `PETADOPT_*` overrides from `lookup`
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(secret) = lookup(ENV_TOKEN_SECRET).filter(|s| !s.is_empty()) {
            self.schema.auth.token_secret = secret;
        }
        if let Some(data_file) = lookup(ENV_DATA_FILE).filter(|s| !s.is_empty()) {
            self.schema.storage.data_file = data_file;
        }
    }

    /// Validate the schema, collecting warnings
    pub fn finish(mut self) -> Result<Self> {
        let result = self.schema.validate();
        self.warnings.extend(result.warnings().iter().cloned());

        if !result.is_valid() {
            return Err(Error::new(
                ErrorCode::ConfigValidationError,
                format!("Invalid configuration: {}", result.summary()),
            )
            .with_suggestion("Fix the listed keys or remove them to use defaults"));
        }

        Ok(self)
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    let mut candidates: Vec<PathBuf> = [".petadopt.toml", "petadopt.toml", ".config/petadopt.toml"]
        .into_iter()
        .map(PathBuf::from)
        .collect();

    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("petadopt").join("config.toml"));
    }

    candidates.into_iter().find(|candidate| candidate.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.path.is_none());
        assert_eq!(config.schema.search.max_distance, 3);
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = Config::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigNotFound);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[storage]\ndata_file = \"shelter.json\"\n\n[search]\nmax_length_gap = 5\n"
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.path.as_deref(), Some(file.path()));
        assert_eq!(config.schema.search.max_length_gap, 5);
        assert!(!config.schema.storage.data_file.is_empty());
    }

    #[test]
    fn test_unknown_keys_warn() {
        let config = Config::from_toml_str("[smtp]\nhost = \"mail\"\n").unwrap();
        assert_eq!(config.warnings.len(), 1);
        assert_eq!(config.warnings[0].code, "UNKNOWN_KEY");
    }

    #[test]
    fn test_parse_error() {
        let err = Config::from_toml_str("[search\n").unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigParseError);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.apply_env_overrides(|key| match key {
            ENV_TOKEN_SECRET => Some("a-much-longer-production-secret".to_string()),
            ENV_DATA_FILE => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.schema.auth.token_secret, "a-much-longer-production-secret");
        assert_eq!(config.schema.storage.data_file, "data.json");

        let config = config.finish().unwrap();
        assert!(config.warnings.is_empty());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let config = Config::from_toml_str("[auth]\ntoken_ttl_days = 0\n").unwrap();
        let err = config.finish().unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigValidationError);
        assert!(err.message.contains("auth.token_ttl_days"));
    }
}
