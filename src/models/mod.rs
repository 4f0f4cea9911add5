//! Data models for modules, projects and module instances.
//!
//! This module contains the core data structures used throughout the application.
//! Models are designed to be independent of storage and presentation.

pub mod color;
pub mod module;
pub mod project;

use uuid::Uuid;

// Re-export all model types
pub use color::{is_color_key, normalize_hex_if_color};
pub use module::Module;
pub use project::{ModuleInstance, Project, ValueMap};

/// Generates a new unique id with the given namespace prefix (e.g. "mod_…").
///
/// Ids are random v4 UUIDs, so an id is never handed out twice.
pub fn generate_id(prefix: &str) -> String {
    format!("{prefix}_{}", Uuid::new_v4().simple())
}
