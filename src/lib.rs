//! Mailforge Library
//!
//! This library provides the core of an HTML email composer: a repository of
//! reusable markup modules with `{{placeholder}}` tokens, projects that
//! sequence module instances with their own value bindings, and rendering
//! of the substituted result.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod models;
pub mod parser;
pub mod services;

pub use error::{ComposerError, ComposerResult, EntityKind};
