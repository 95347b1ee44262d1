//! Terminal helpers for the petadopt command-line tool
//!
//! Provides shared CLI functionality:
//! - Status lines and headers
//! - Price, count, and duration formatting
//! - Spinners and progress bars

#![warn(missing_docs)]

pub mod output;
pub mod progress;
