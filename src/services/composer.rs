//! Project composition engine.
//!
//! Owns the project collection and implements every instance-level
//! operation: adding, removing and reordering instances, binding values,
//! reconciling bindings against current module definitions, and rendering.
//! Module markup is only ever read, never mutated, from here.

use serde::Serialize;

use crate::error::{ComposerError, ComposerResult, EntityKind};
use crate::models::{normalize_hex_if_color, Module, ModuleInstance, Project};
use crate::parser::{extract_placeholders, substitute};
use crate::services::repository::ModuleRepository;

/// Editable view of one instance: its module and ordered placeholder fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceFields {
    /// Instance id
    pub instance_id: String,
    /// Referenced module id
    pub module_id: String,
    /// Referenced module display name
    pub module_name: String,
    /// `(placeholder, value)` pairs in first-occurrence order
    pub fields: Vec<(String, String)>,
}

/// In-memory project collection plus the composition operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectComposer {
    projects: Vec<Project>,
}

impl ProjectComposer {
    /// Creates an empty composer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            projects: Vec::new(),
        }
    }

    /// Wraps an already loaded project collection.
    #[must_use]
    pub fn from_projects(projects: Vec<Project>) -> Self {
        Self { projects }
    }

    /// All projects in creation order.
    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Projects sorted by most recently updated first.
    ///
    /// Ties are broken by creation time, newest first.
    #[must_use]
    pub fn projects_by_recency(&self) -> Vec<&Project> {
        let mut sorted: Vec<&Project> = self.projects.iter().collect();
        sorted.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        sorted
    }

    /// Looks up a project by id.
    #[must_use]
    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    fn require(&self, id: &str) -> ComposerResult<&Project> {
        self.project(id)
            .ok_or_else(|| ComposerError::not_found(EntityKind::Project, id))
    }

    fn require_mut(&mut self, id: &str) -> ComposerResult<&mut Project> {
        self.projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| ComposerError::not_found(EntityKind::Project, id))
    }

    /// Creates an empty project.
    ///
    /// # Errors
    ///
    /// Returns `EmptyField` if the name is blank.
    pub fn create_project(&mut self, name: &str) -> ComposerResult<Project> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ComposerError::EmptyField {
                field: "project name",
            });
        }

        let project = Project::new(name);
        self.projects.push(project.clone());
        Ok(project)
    }

    /// Appends a new instance of `module_id` to the project.
    ///
    /// Every placeholder of the module is bound to an empty string.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the project or the module is unknown; nothing is
    /// mutated in that case.
    pub fn add_instance(
        &mut self,
        project_id: &str,
        module_id: &str,
        modules: &ModuleRepository,
    ) -> ComposerResult<ModuleInstance> {
        self.require(project_id)?;
        let placeholders = modules.placeholders_of(module_id)?;

        let instance = ModuleInstance::new(module_id, placeholders);
        let project = self.require_mut(project_id)?;
        project.instances.push(instance.clone());
        project.touch();
        Ok(instance)
    }

    /// Removes an instance from the project.
    ///
    /// Returns whether an instance was removed; `updated_at` is refreshed
    /// only in that case.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the project is unknown.
    pub fn remove_instance(&mut self, project_id: &str, instance_id: &str) -> ComposerResult<bool> {
        let project = self.require_mut(project_id)?;
        let removed = project.retain_instances(|inst| inst.instance_id != instance_id) > 0;
        if removed {
            project.touch();
        }
        Ok(removed)
    }

    /// Moves an instance so it ends up at `target_index`.
    ///
    /// The target is clamped to the last valid position. The relative order
    /// of all other instances is preserved. Returns the final index.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the project or instance is unknown.
    pub fn reorder_instance(
        &mut self,
        project_id: &str,
        instance_id: &str,
        target_index: usize,
    ) -> ComposerResult<usize> {
        let project = self.require_mut(project_id)?;
        let from = project
            .position_of(instance_id)
            .ok_or_else(|| ComposerError::not_found(EntityKind::Instance, instance_id))?;

        // Non-empty: the instance was just found
        let to = target_index.min(project.instances.len() - 1);
        if from == to {
            return Ok(to);
        }

        let moved = project.instances.remove(from);
        project.instances.insert(to, moved);
        project.touch();
        Ok(to)
    }

    /// Binds `raw_value` (color-normalized) to `key` on an instance.
    ///
    /// The key does not need to be a current placeholder of the module.
    /// Returns the stored value.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the project or instance is unknown.
    pub fn set_value(
        &mut self,
        project_id: &str,
        instance_id: &str,
        key: &str,
        raw_value: &str,
    ) -> ComposerResult<String> {
        let project = self.require_mut(project_id)?;
        let instance = project
            .instance_mut(instance_id)
            .ok_or_else(|| ComposerError::not_found(EntityKind::Instance, instance_id))?;

        instance.set_value(key, raw_value);
        let stored = instance.values.get(key).cloned().unwrap_or_default();
        project.touch();
        Ok(stored)
    }

    /// Adds missing placeholder keys to every instance of the project.
    ///
    /// Leftover keys are retained. Orphaned instances are skipped. Returns the
    /// number of keys added; `updated_at` is refreshed only if that is non-zero.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the project is unknown.
    pub fn reconcile(&mut self, project_id: &str, modules: &ModuleRepository) -> ComposerResult<usize> {
        let project = self.require_mut(project_id)?;
        Ok(reconcile_project(project, modules, true))
    }

    /// Reconciles every project. Returns the total number of keys added.
    pub fn reconcile_all(&mut self, modules: &ModuleRepository) -> usize {
        self.projects
            .iter_mut()
            .map(|project| reconcile_project(project, modules, true))
            .sum()
    }

    /// Load-time variant of [`reconcile_all`](Self::reconcile_all) that
    /// leaves `updated_at` alone, like [`purge_orphans`](Self::purge_orphans).
    pub fn backfill_all(&mut self, modules: &ModuleRepository) -> usize {
        self.projects
            .iter_mut()
            .map(|project| reconcile_project(project, modules, false))
            .sum()
    }

    /// Removes every instance referencing `module_id` from every project.
    ///
    /// Returns the ids of the projects that lost at least one instance; only
    /// those have their `updated_at` refreshed.
    pub fn purge_module(&mut self, module_id: &str) -> Vec<String> {
        let mut affected = Vec::new();
        for project in &mut self.projects {
            if project.retain_instances(|inst| inst.module_id != module_id) > 0 {
                project.touch();
                affected.push(project.id.clone());
            }
        }
        affected
    }

    /// Removes instances whose module no longer exists.
    ///
    /// Returns the number of instances removed. Timestamps are left alone:
    /// this is load-time scrubbing, not a user edit.
    pub fn purge_orphans(&mut self, modules: &ModuleRepository) -> usize {
        self.projects
            .iter_mut()
            .map(|project| project.retain_instances(|inst| modules.contains(&inst.module_id)))
            .sum()
    }

    /// Re-applies color normalization to every stored value.
    ///
    /// Returns the number of instances whose values changed.
    pub fn normalize_all(&mut self) -> usize {
        self.projects
            .iter_mut()
            .flat_map(|project| project.instances.iter_mut())
            .map(ModuleInstance::normalize_values)
            .filter(|changed| *changed)
            .count()
    }

    /// Renders the project: each instance's substituted markup, concatenated
    /// in sequence order with no separator. Orphaned instances are skipped.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the project is unknown.
    pub fn render(&self, project_id: &str, modules: &ModuleRepository) -> ComposerResult<String> {
        let project = self.require(project_id)?;
        Ok(resolved(project, modules)
            .map(|(inst, module)| substitute(&module.code, &inst.values))
            .collect())
    }

    /// Renders the project with each instance wrapped in a preview frame.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the project is unknown.
    pub fn render_preview(
        &self,
        project_id: &str,
        modules: &ModuleRepository,
    ) -> ComposerResult<String> {
        let project = self.require(project_id)?;
        Ok(resolved(project, modules)
            .map(|(inst, module)| {
                format!(
                    "<div class=\"frame\">{}</div>",
                    substitute(&module.code, &inst.values)
                )
            })
            .collect())
    }

    /// Editable listing of the project's non-orphaned instances.
    ///
    /// Fields follow the module's placeholder order; unbound placeholders
    /// show as empty strings and values are shown normalized.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the project is unknown.
    pub fn instance_fields(
        &self,
        project_id: &str,
        modules: &ModuleRepository,
    ) -> ComposerResult<Vec<InstanceFields>> {
        let project = self.require(project_id)?;
        Ok(resolved(project, modules)
            .map(|(inst, module)| InstanceFields {
                instance_id: inst.instance_id.clone(),
                module_id: module.id.clone(),
                module_name: module.name.clone(),
                fields: extract_placeholders(&module.code)
                    .into_iter()
                    .map(|key| {
                        let raw = inst.values.get(&key).map_or("", String::as_str);
                        let value = normalize_hex_if_color(&key, raw);
                        (key, value)
                    })
                    .collect(),
            })
            .collect())
    }
}

/// Instances of `project` paired with their module, skipping orphans.
fn resolved<'a>(
    project: &'a Project,
    modules: &'a ModuleRepository,
) -> impl Iterator<Item = (&'a ModuleInstance, &'a Module)> + 'a {
    project
        .instances
        .iter()
        .filter_map(move |inst| modules.get(&inst.module_id).map(|module| (inst, module)))
}

fn reconcile_project(project: &mut Project, modules: &ModuleRepository, touch: bool) -> usize {
    let mut added = 0;
    for instance in &mut project.instances {
        if let Some(module) = modules.get(&instance.module_id) {
            added += instance.fill_missing(&module.placeholders());
        }
    }
    if touch && added > 0 {
        project.touch();
    }
    added
}
