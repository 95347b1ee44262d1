//! Typo-tolerant search for the adoption listings.
//!
//! This crate provides:
//! - Text normalization (lowercase, `[a-z0-9]` only)
//! - Levenshtein edit distance
//! - A bounded fuzzy matcher with tunable thresholds
//! - Batch matching with optional parallelism
//! - WASM bindings for the browser listing page
//!
//! # Example
//!
//! ```
//! use petadopt_search::{is_fuzzy_match, MatchConfig};
//!
//! assert!(is_fuzzy_match("New York", "new york"));
//! assert!(MatchConfig::new(3, 1).matches("Springfield", "Springfeld"));
//! ```

mod fuzzy;
pub mod batch;
mod error;

#[cfg(feature = "wasm")]
mod wasm;

pub use fuzzy::{
    is_fuzzy_match, levenshtein_distance, normalize_text, MatchConfig,
    DEFAULT_MAX_DISTANCE, DEFAULT_MAX_LENGTH_GAP, MAX_THRESHOLD,
};
pub use batch::{match_all, matching_indices, LocationItem};
pub use error::{Result, SearchError, SearchErrorCode};
