//! Persistence for module and project collections.
//!
//! Collections are stored as JSON blobs in a key-value [`BlobStore`]. The
//! store is treated as atomic from the core's perspective: every save
//! replaces the whole blob.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{MODULES_KEY, PROJECTS_KEY};
use crate::models::{Module, Project};

/// Opaque key-value blob storage.
pub trait BlobStore {
    /// Reads the blob stored under `key`, or `None` if nothing is stored.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the blob stored under `key`.
    fn set(&mut self, key: &str, blob: &str) -> Result<()>;
}

/// Blob store keeping one `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    /// Creates a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn blob_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl BlobStore for FileBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.blob_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read blob file: {}", path.display()))?;
        Ok(Some(content))
    }

    fn set(&mut self, key: &str, blob: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create data directory: {}", self.dir.display()))?;

        let path = self.blob_path(key);
        atomic_write(&path, blob)
    }
}

/// In-memory blob store, used for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    blobs: HashMap<String, String>,
}

impl MemoryBlobStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.blobs.get(key).cloned())
    }

    fn set(&mut self, key: &str, blob: &str) -> Result<()> {
        self.blobs.insert(key.to_string(), blob.to_string());
        Ok(())
    }
}

/// JSON persistence of the module and project collections on top of a blob store.
#[derive(Debug, Clone)]
pub struct Persistence<B: BlobStore> {
    store: B,
}

impl<B: BlobStore> Persistence<B> {
    /// Wraps a blob store.
    pub fn new(store: B) -> Self {
        Self { store }
    }

    /// Underlying blob store.
    pub fn store(&self) -> &B {
        &self.store
    }

    /// Loads the module collection. A missing blob loads as empty.
    pub fn load_modules(&self) -> Result<Vec<Module>> {
        self.load(MODULES_KEY)
    }

    /// Saves the module collection.
    pub fn save_modules(&mut self, modules: &[Module]) -> Result<()> {
        self.save(MODULES_KEY, modules)
    }

    /// Loads the project collection. A missing blob loads as empty.
    pub fn load_projects(&self) -> Result<Vec<Project>> {
        self.load(PROJECTS_KEY)
    }

    /// Saves the project collection.
    pub fn save_projects(&mut self, projects: &[Project]) -> Result<()> {
        self.save(PROJECTS_KEY, projects)
    }

    fn load<T: serde::de::DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        match self.store.get(key)? {
            Some(blob) if !blob.trim().is_empty() => serde_json::from_str(&blob)
                .with_context(|| format!("Failed to parse stored collection '{key}'")),
            _ => Ok(Vec::new()),
        }
    }

    fn save<T: serde::Serialize>(&mut self, key: &str, items: &[T]) -> Result<()> {
        let blob = serde_json::to_string_pretty(items)
            .with_context(|| format!("Failed to serialize collection '{key}'"))?;
        self.store.set(key, &blob)
    }
}

/// Writes `content` to `path` via a temp file + rename.
fn atomic_write(path: &Path, content: &str) -> Result<()> {
    let temp_path = path.with_extension("json.tmp");

    fs::write(&temp_path, content)
        .with_context(|| format!("Failed to write to temporary file: {}", temp_path.display()))?;

    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename temporary file to: {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ModuleInstance;
    use tempfile::TempDir;

    #[test]
    fn test_missing_blobs_load_empty() -> Result<()> {
        let persistence = Persistence::new(MemoryBlobStore::new());
        assert!(persistence.load_modules()?.is_empty());
        assert!(persistence.load_projects()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_memory_roundtrip_preserves_order() -> Result<()> {
        let mut persistence = Persistence::new(MemoryBlobStore::new());
        let modules = vec![Module::new("B", "<b>"), Module::new("A", "<a>")];
        persistence.save_modules(&modules)?;
        assert_eq!(persistence.load_modules()?, modules);
        Ok(())
    }

    #[test]
    fn test_file_store_writes_json_per_key() -> Result<()> {
        let temp = TempDir::new()?;
        let dir = temp.path().join("data");
        let mut persistence = Persistence::new(FileBlobStore::new(&dir));

        let mut project = Project::new("Launch");
        project
            .instances
            .push(ModuleInstance::new("mod_1", ["url"]));
        persistence.save_projects(std::slice::from_ref(&project))?;

        let raw = fs::read_to_string(dir.join("projects_v1.json"))?;
        let json: serde_json::Value = serde_json::from_str(&raw)?;
        assert_eq!(json[0]["name"], "Launch");
        assert_eq!(json[0]["instances"][0]["moduleId"], "mod_1");
        assert!(json[0]["createdAt"].is_string());

        assert_eq!(persistence.load_projects()?, vec![project]);
        assert!(!dir.join("projects_v1.json.tmp").exists());
        Ok(())
    }

    #[test]
    fn test_corrupt_blob_is_an_error() {
        let mut store = MemoryBlobStore::new();
        store.set(MODULES_KEY, "{not json").unwrap();
        let persistence = Persistence::new(store);
        assert!(persistence.load_modules().is_err());
    }
}
