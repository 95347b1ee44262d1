//! Core utilities for the pet adoption platform
//!
//! This crate provides shared functionality used by the domain crate and the CLI:
//!
//! - **Error handling**: Structured errors with codes, context, and recovery suggestions
//! - **Configuration**: TOML-based configuration with validation and env overrides
//! - **Validation**: Fluent validators for request payloads and settings
//!
//! # Example
//!
//! ```rust,no_run
//! use petadopt_core::config::Config;
//!
//! let config = Config::load(None).expect("invalid configuration");
//! for warning in &config.warnings {
//!     eprintln!("warning: {}", warning);
//! }
//! println!("data file: {}", config.schema.storage.data_file);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod validation;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::validation::{ValidationResult, Validator};
}
