//! Service layer for business logic.
//!
//! This module contains the module repository, the project composition
//! engine, persistence and seeding, and the workspace that coordinates them.

pub mod composer;
pub mod repository;
pub mod seed;
pub mod storage;
pub mod workspace;

// Re-export commonly used types and functions
pub use composer::{InstanceFields, ProjectComposer};
pub use repository::ModuleRepository;
pub use seed::SeedModule;
pub use storage::{BlobStore, FileBlobStore, MemoryBlobStore, Persistence};
pub use workspace::{LoadReport, Workspace};
