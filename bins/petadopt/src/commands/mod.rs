//! Subcommand implementations

pub mod adopt;
pub mod animals;
pub mod auth;
pub mod kits;
pub mod matching;
