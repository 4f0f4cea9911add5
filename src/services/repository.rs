//! Module repository: the catalog of reusable markup modules.
//!
//! The repository is a leaf component. It knows nothing about projects;
//! cascading a deletion into projects is the caller's job.

use tracing::warn;

use crate::error::{ComposerError, ComposerResult, EntityKind};
use crate::models::Module;
use crate::parser::extract_placeholders;

/// In-memory catalog of modules, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleRepository {
    modules: Vec<Module>,
}

impl ModuleRepository {
    /// Creates an empty repository.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            modules: Vec::new(),
        }
    }

    /// Wraps an already loaded module collection.
    #[must_use]
    pub fn from_modules(modules: Vec<Module>) -> Self {
        Self { modules }
    }

    /// All modules in insertion order.
    #[must_use]
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    /// Number of modules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Returns true if the repository holds no modules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Looks up a module by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.id == id)
    }

    /// Returns true if `id` resolves to a module.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Creates and stores a new module.
    ///
    /// # Errors
    ///
    /// Returns `EmptyField` if the name is blank or the code is empty.
    pub fn create(&mut self, name: &str, code: &str) -> ComposerResult<Module> {
        validate(name, code)?;

        let module = Module::new(name.trim(), code);
        self.modules.push(module.clone());
        Ok(module)
    }

    /// Replaces a module's name and code in place, keeping its id.
    ///
    /// Existing instances are not touched here.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id, `EmptyField` for blank input.
    pub fn update(&mut self, id: &str, name: &str, code: &str) -> ComposerResult<Module> {
        let module = self
            .modules
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| ComposerError::not_found(EntityKind::Module, id))?;
        validate(name, code)?;

        module.name = name.trim().to_string();
        module.code = code.to_string();
        Ok(module.clone())
    }

    /// Removes a module. Unknown ids are a no-op.
    ///
    /// Returns the removed module, if any.
    pub fn delete(&mut self, id: &str) -> Option<Module> {
        let index = self.modules.iter().position(|m| m.id == id)?;
        Some(self.modules.remove(index))
    }

    /// Current placeholder set of a module, in first-occurrence order.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id.
    pub fn placeholders_of(&self, id: &str) -> ComposerResult<Vec<String>> {
        self.get(id)
            .map(|m| extract_placeholders(&m.code))
            .ok_or_else(|| ComposerError::not_found(EntityKind::Module, id))
    }

    /// Appends seed modules, assigning fresh ids.
    ///
    /// Entries with a blank name or empty code are skipped. Returns the
    /// number of modules added.
    pub fn seed<I>(&mut self, seed: I) -> usize
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let before = self.modules.len();
        for (name, code) in seed {
            if let Err(e) = self.create(&name, &code) {
                warn!("Skipping seed module '{}': {}", name, e);
            }
        }
        self.modules.len() - before
    }
}

fn validate(name: &str, code: &str) -> ComposerResult<()> {
    if name.trim().is_empty() {
        return Err(ComposerError::EmptyField {
            field: "module name",
        });
    }
    if code.is_empty() {
        return Err(ComposerError::EmptyField {
            field: "module code",
        });
    }
    Ok(())
}
