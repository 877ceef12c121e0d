//! Generation Service - materializes artifact plans.
//!
//! For each planned action:
//! 1. Render the artifact fully in memory
//! 2. Create its parent directories
//! 3. Write it (and mark it executable if planned so)
//!
//! Obsolete files are removed at the end of the plan. A failure aborts the
//! run; artifacts written earlier in the run stay on disk.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::{
    application::{Ecosystem, generators, ports::Filesystem},
    domain::{ArtifactAction, ArtifactPlan, Emitter, Registry, SettingsLayer},
    error::ProjconfResult,
};

/// What a generation run did, with absolute paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub written: Vec<PathBuf>,
    pub removed: Vec<PathBuf>,
}

impl GenerationReport {
    pub fn is_empty(&self) -> bool {
        self.written.is_empty() && self.removed.is_empty()
    }
}

impl fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} written, {} removed",
            self.written.len(),
            self.removed.len()
        )
    }
}

/// Writes generated artifacts through the [`Filesystem`] port.
pub struct GenerationService {
    filesystem: Arc<dyn Filesystem>,
}

impl GenerationService {
    /// Create a new generation service over the given filesystem.
    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Render `generator` and write its output to `path`, creating parent
    /// directories as needed and truncating any existing file.
    ///
    /// Nothing is written if the generator fails.
    pub fn emit<F>(&self, path: &Path, generator: F) -> ProjconfResult<()>
    where
        F: FnOnce(&mut Emitter) -> ProjconfResult<()>,
    {
        info!("Generating {}", path.display());
        let content = Emitter::capture(generator)?;
        if let Some(parent) = path.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem.write_file(path, &content)
    }

    /// Delete `path` if present. Returns whether anything was removed.
    pub fn remove_if_exists(&self, path: &Path) -> ProjconfResult<bool> {
        if !self.filesystem.exists(path) {
            return Ok(false);
        }
        info!("Removing obsolete {}", path.display());
        self.filesystem.remove_file(path)?;
        Ok(true)
    }

    /// Add execute permission bits to `path`.
    pub fn make_executable(&self, path: &Path) -> ProjconfResult<()> {
        debug!(path = %path.display(), "Marking executable");
        self.filesystem.set_executable(path)
    }

    /// Artifacts `ecosystem` would produce for `registry`.
    pub fn plan(&self, ecosystem: Ecosystem, registry: &Registry) -> ProjconfResult<ArtifactPlan> {
        ecosystem.plan(registry)
    }

    /// Generate every artifact of `ecosystem`.
    #[instrument(
        skip_all,
        fields(
            ecosystem = %ecosystem,
            project = %registry.env().project_dir().display()
        )
    )]
    pub fn generate(
        &self,
        ecosystem: Ecosystem,
        registry: &Registry,
    ) -> ProjconfResult<GenerationReport> {
        let plan = self.plan(ecosystem, registry)?;
        let report = self.execute(plan, registry)?;
        let name = registry.text("pretty_name")?;
        info!(
            written = report.written.len(),
            removed = report.removed.len(),
            "Updated {name} configuration"
        );
        Ok(report)
    }

    /// Merge `settings` over a copy of `registry`, then generate.
    pub fn generate_with(
        &self,
        ecosystem: Ecosystem,
        registry: &Registry,
        settings: &SettingsLayer,
    ) -> ProjconfResult<GenerationReport> {
        let registry = registry.clone().with_layer(settings)?;
        self.generate(ecosystem, &registry)
    }

    /// Run the actions of `plan` in order.
    pub fn execute(&self, plan: ArtifactPlan, registry: &Registry) -> ProjconfResult<GenerationReport> {
        let root = registry.env().project_dir().to_path_buf();
        let mut report = GenerationReport::default();

        for action in plan {
            match action {
                ArtifactAction::Write {
                    path,
                    kind,
                    executable,
                } => {
                    let target = root.join(&path);
                    let generator = generators::generator(kind);
                    self.emit(&target, |out| generator(registry, out))?;
                    if executable {
                        self.make_executable(&target)?;
                    }
                    report.written.push(target);
                }
                ArtifactAction::Remove { path } => {
                    let target = root.join(&path);
                    if self.remove_if_exists(&target)? {
                        report.removed.push(target);
                    }
                }
            }
        }
        Ok(report)
    }
}
