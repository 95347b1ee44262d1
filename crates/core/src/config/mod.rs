//! Configuration loading and schema definitions
//!
//! TOML settings shared by the library crates and the CLI.

mod loader;
mod schema;

pub use loader::{Config, ENV_DATA_FILE, ENV_TOKEN_SECRET};
pub use schema::*;
