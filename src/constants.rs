//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name, storage keys and environment overrides.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Mailforge";

/// Directory name used under the platform config directory.
pub const APP_DIR_NAME: &str = "mailforge";

/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "MAILFORGE_CONFIG_DIR";

/// Blob key holding the serialized module collection.
pub const MODULES_KEY: &str = "modules_v1";

/// Blob key holding the serialized project collection.
pub const PROJECTS_KEY: &str = "projects_v1";

/// File name of the seed manifest inside a seed directory.
pub const SEED_MANIFEST_FILE: &str = "manifest.json";

/// Id prefix for modules.
pub const MODULE_ID_PREFIX: &str = "mod";

/// Id prefix for projects.
pub const PROJECT_ID_PREFIX: &str = "proj";

/// Id prefix for module instances.
pub const INSTANCE_ID_PREFIX: &str = "inst";
