//! Write-through workspace tying the repository, composer and persistence together.
//!
//! A [`Workspace`] is the single owner of module and project state. It is
//! initialized from persistence, mutated only through its methods, and saves
//! the affected collection(s) after every successful mutation.

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::models::{Module, ModuleInstance, Project};
use crate::services::composer::{InstanceFields, ProjectComposer};
use crate::services::repository::ModuleRepository;
use crate::services::seed::SeedModule;
use crate::services::storage::{BlobStore, Persistence};

/// Summary of the load-time migration performed by [`Workspace::open`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Modules added from the seed (0 unless the repository was empty)
    pub seeded: usize,
    /// Orphaned instances purged
    pub orphans_purged: usize,
    /// Instances whose values were re-normalized
    pub values_normalized: usize,
    /// Placeholder keys added by reconciliation
    pub keys_added: usize,
}

/// Module and project state with write-through persistence.
#[derive(Debug)]
pub struct Workspace<B: BlobStore> {
    modules: ModuleRepository,
    composer: ProjectComposer,
    persistence: Persistence<B>,
}

impl<B: BlobStore> Workspace<B> {
    /// Loads state from `store` and runs the load-time migration.
    ///
    /// `seed` is only invoked when the stored module collection is empty.
    /// Orphaned instances are purged, values re-normalized and every project
    /// reconciled, then both collections are saved back. None of this touches
    /// project timestamps.
    pub fn open<F>(store: B, seed: F) -> Result<(Self, LoadReport)>
    where
        F: FnOnce() -> Vec<SeedModule>,
    {
        let mut persistence = Persistence::new(store);
        let modules = persistence
            .load_modules()
            .context("Failed to load modules")?;
        let projects = persistence
            .load_projects()
            .context("Failed to load projects")?;
        debug!(
            "Loaded {} modules and {} projects",
            modules.len(),
            projects.len()
        );

        let mut modules = ModuleRepository::from_modules(modules);
        let mut composer = ProjectComposer::from_projects(projects);
        let mut report = LoadReport::default();

        if modules.is_empty() {
            report.seeded = modules.seed(seed().into_iter().map(|s| (s.name, s.code)));
            info!("Seeded {} starter modules", report.seeded);
        }

        report.orphans_purged = composer.purge_orphans(&modules);
        if report.orphans_purged > 0 {
            info!("Purged {} orphaned instances", report.orphans_purged);
        }
        report.values_normalized = composer.normalize_all();
        report.keys_added = composer.backfill_all(&modules);

        persistence.save_modules(modules.modules())?;
        persistence.save_projects(composer.projects())?;

        Ok((
            Self {
                modules,
                composer,
                persistence,
            },
            report,
        ))
    }

    /// All modules in insertion order.
    pub fn modules(&self) -> &[Module] {
        self.modules.modules()
    }

    /// Looks up a module by id.
    pub fn module(&self, id: &str) -> Option<&Module> {
        self.modules.get(id)
    }

    /// Placeholders of a module in first-occurrence order.
    pub fn placeholders_of(&self, module_id: &str) -> Result<Vec<String>> {
        Ok(self.modules.placeholders_of(module_id)?)
    }

    /// All projects in creation order.
    pub fn projects(&self) -> &[Project] {
        self.composer.projects()
    }

    /// Projects sorted most recently updated first.
    pub fn projects_by_recency(&self) -> Vec<&Project> {
        self.composer.projects_by_recency()
    }

    /// Looks up a project by id.
    pub fn project(&self, id: &str) -> Option<&Project> {
        self.composer.project(id)
    }

    /// Underlying persistence layer.
    pub fn persistence(&self) -> &Persistence<B> {
        &self.persistence
    }

    /// Creates a module and saves the module collection.
    pub fn create_module(&mut self, name: &str, code: &str) -> Result<Module> {
        let module = self.modules.create(name, code)?;
        self.save_modules()?;
        debug!("Created module {} ({})", module.id, module.name);
        Ok(module)
    }

    /// Updates a module's name and code, then reconciles every project so
    /// existing instances pick up newly introduced placeholders.
    pub fn update_module(&mut self, id: &str, name: &str, code: &str) -> Result<Module> {
        let module = self.modules.update(id, name, code)?;
        self.save_modules()?;

        let added = self.composer.reconcile_all(&self.modules);
        if added > 0 {
            debug!("Reconciliation added {} keys after updating {}", added, id);
            self.save_projects()?;
        }
        Ok(module)
    }

    /// Deletes a module and purges its instances from every project.
    ///
    /// Unknown ids are a no-op. Returns the ids of projects that lost instances.
    pub fn delete_module(&mut self, id: &str) -> Result<Vec<String>> {
        if self.modules.delete(id).is_none() {
            return Ok(Vec::new());
        }
        self.save_modules()?;

        let affected = self.composer.purge_module(id);
        if !affected.is_empty() {
            info!(
                "Deleting module {} removed instances from {} projects",
                id,
                affected.len()
            );
        }
        self.save_projects()?;
        Ok(affected)
    }

    /// Creates an empty project.
    pub fn create_project(&mut self, name: &str) -> Result<Project> {
        let project = self.composer.create_project(name)?;
        self.save_projects()?;
        Ok(project)
    }

    /// Appends an instance of `module_id` to the project.
    pub fn add_instance(&mut self, project_id: &str, module_id: &str) -> Result<ModuleInstance> {
        let instance = self
            .composer
            .add_instance(project_id, module_id, &self.modules)?;
        self.save_projects()?;
        Ok(instance)
    }

    /// Removes an instance; returns whether one was removed.
    pub fn remove_instance(&mut self, project_id: &str, instance_id: &str) -> Result<bool> {
        let removed = self.composer.remove_instance(project_id, instance_id)?;
        if removed {
            self.save_projects()?;
        }
        Ok(removed)
    }

    /// Moves an instance to `target_index` (clamped); returns the final index.
    pub fn reorder_instance(
        &mut self,
        project_id: &str,
        instance_id: &str,
        target_index: usize,
    ) -> Result<usize> {
        let index = self
            .composer
            .reorder_instance(project_id, instance_id, target_index)?;
        self.save_projects()?;
        Ok(index)
    }

    /// Binds a color-normalized value; returns the stored value.
    pub fn set_value(
        &mut self,
        project_id: &str,
        instance_id: &str,
        key: &str,
        raw_value: &str,
    ) -> Result<String> {
        let stored = self
            .composer
            .set_value(project_id, instance_id, key, raw_value)?;
        self.save_projects()?;
        Ok(stored)
    }

    /// Reconciles one project against current module definitions.
    pub fn reconcile(&mut self, project_id: &str) -> Result<usize> {
        let added = self.composer.reconcile(project_id, &self.modules)?;
        if added > 0 {
            self.save_projects()?;
        }
        Ok(added)
    }

    /// Renders the project's concatenated, substituted markup.
    pub fn render(&self, project_id: &str) -> Result<String> {
        Ok(self.composer.render(project_id, &self.modules)?)
    }

    /// Renders the project with per-instance preview frames.
    pub fn render_preview(&self, project_id: &str) -> Result<String> {
        Ok(self.composer.render_preview(project_id, &self.modules)?)
    }

    /// Editable listing of the project's instances.
    pub fn instance_fields(&self, project_id: &str) -> Result<Vec<InstanceFields>> {
        Ok(self.composer.instance_fields(project_id, &self.modules)?)
    }

    fn save_modules(&mut self) -> Result<()> {
        self.persistence
            .save_modules(self.modules.modules())
            .context("Failed to save modules")
    }

    fn save_projects(&mut self) -> Result<()> {
        self.persistence
            .save_projects(self.composer.projects())
            .context("Failed to save projects")
    }
}
