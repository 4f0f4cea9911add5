//! Error types for the composition core.

use std::fmt;
use thiserror::Error;

/// The kind of entity an id was expected to resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// A module in the repository
    Module,
    /// A project
    Project,
    /// A module instance inside a project
    Instance,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Module => "module",
            Self::Project => "project",
            Self::Instance => "instance",
        };
        f.write_str(label)
    }
}

/// Errors raised by module repository and project composition operations.
///
/// Malformed placeholders and invalid color values are never errors; they
/// are passed through untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComposerError {
    /// A referenced id does not resolve.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// What the id was supposed to reference
        kind: EntityKind,
        /// The unresolved id
        id: String,
    },

    /// A required text field was empty.
    #[error("{field} cannot be empty")]
    EmptyField {
        /// Name of the offending field
        field: &'static str,
    },
}

impl ComposerError {
    /// Builds a `NotFound` error for the given entity kind and id.
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Returns true if this is a `NotFound` error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result alias for core operations.
pub type ComposerResult<T> = Result<T, ComposerError>;
