//! Markup parsing for module code.
//!
//! This module handles scanning module markup for placeholders and
//! producing substituted output.

pub mod placeholders;

// Re-export commonly used functions
pub use placeholders::{extract_placeholders, substitute};
