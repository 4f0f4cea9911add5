//! Project and module instance data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::{INSTANCE_ID_PREFIX, PROJECT_ID_PREFIX};
use crate::models::color::normalize_hex_if_color;
use crate::models::generate_id;

/// Placeholder name to value bindings of one instance.
pub type ValueMap = BTreeMap<String, String>;

/// A placement of a module inside a project with its own value bindings.
///
/// # Invariants
///
/// - Every placeholder currently declared by the referenced module has a key
///   in `values` (possibly empty) once the project has been reconciled.
/// - Keys for placeholders the module no longer declares are kept; they are
///   unused during substitution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleInstance {
    /// Opaque unique identifier (e.g. "inst_…")
    pub instance_id: String,
    /// Referenced module id (not owned)
    pub module_id: String,
    /// Placeholder bindings
    #[serde(default)]
    pub values: ValueMap,
}

impl ModuleInstance {
    /// Creates an instance of `module_id` with an empty binding for each placeholder.
    pub fn new<I, S>(module_id: impl Into<String>, placeholders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            instance_id: generate_id(INSTANCE_ID_PREFIX),
            module_id: module_id.into(),
            values: placeholders
                .into_iter()
                .map(|key| (key.into(), String::new()))
                .collect(),
        }
    }

    /// Adds an empty binding for every placeholder missing from `values`.
    ///
    /// Returns the number of keys added. Existing keys are never touched.
    pub fn fill_missing<'a, I>(&mut self, placeholders: I) -> usize
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut added = 0;
        for key in placeholders {
            if !self.values.contains_key(key) {
                self.values.insert(key.clone(), String::new());
                added += 1;
            }
        }
        added
    }

    /// Stores a value under `key`, applying color normalization.
    pub fn set_value(&mut self, key: impl Into<String>, raw_value: &str) {
        let key = key.into();
        let value = normalize_hex_if_color(&key, raw_value);
        self.values.insert(key, value);
    }

    /// Re-applies color normalization to every stored value.
    ///
    /// Returns true if any value changed.
    pub fn normalize_values(&mut self) -> bool {
        let mut changed = false;
        for (key, value) in &mut self.values {
            let normalized = normalize_hex_if_color(key, value);
            if normalized != *value {
                *value = normalized;
                changed = true;
            }
        }
        changed
    }
}

/// An ordered composition of module instances forming one email document.
///
/// # Validation
///
/// - created_at must be <= updated_at
/// - instance order is the rendering/export order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Opaque unique identifier (e.g. "proj_…")
    pub id: String,
    /// Display label
    pub name: String,
    /// Creation timestamp (RFC 3339)
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp (RFC 3339)
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
    /// Module instances in rendering order
    #[serde(default)]
    pub instances: Vec<ModuleInstance>,
}

impl Project {
    /// Creates an empty project with both timestamps set to now.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: generate_id(PROJECT_ID_PREFIX),
            name: name.into(),
            created_at: now,
            updated_at: now,
            instances: Vec::new(),
        }
    }

    /// Updates the modification timestamp to now.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Position of an instance in the sequence.
    #[must_use]
    pub fn position_of(&self, instance_id: &str) -> Option<usize> {
        self.instances
            .iter()
            .position(|inst| inst.instance_id == instance_id)
    }

    /// Looks up an instance by id for mutation.
    pub fn instance_mut(&mut self, instance_id: &str) -> Option<&mut ModuleInstance> {
        self.instances
            .iter_mut()
            .find(|inst| inst.instance_id == instance_id)
    }

    /// Drops every instance for which `keep` returns false.
    ///
    /// Returns the number of instances removed.
    pub fn retain_instances<F>(&mut self, keep: F) -> usize
    where
        F: FnMut(&ModuleInstance) -> bool,
    {
        let before = self.instances.len();
        self.instances.retain(keep);
        before - self.instances.len()
    }
}
