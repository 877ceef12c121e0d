//! Shared target resolution: flags + config → adapters → registry.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument};

use projconf_adapters::{
    BuiltinResources, DirectoryResources, HttpFetcher, LocalFilesystem, SettingsLoader,
};
use projconf_core::{
    application::{Ecosystem, Environment, ports::{Filesystem, ResourceStore}},
    domain::{Registry, SettingsLayer, Value},
};

use crate::{
    cli::TargetArgs,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
};

/// Name of the layer built from `--set` flags.
const COMMAND_LINE_LAYER: &str = "command-line";

/// A fully layered registry for one project.
pub struct Target {
    pub ecosystem: Ecosystem,
    pub registry: Registry,
    pub filesystem: Arc<dyn Filesystem>,
}

impl Target {
    pub fn project_dir(&self) -> &Path {
        self.registry.env().project_dir()
    }
}

/// Build the registry the flags describe.
///
/// Layer order: identity, ecosystem layers, settings file, `--set` flags.
#[instrument(skip_all)]
pub fn resolve(args: &TargetArgs, config: &AppConfig) -> CliResult<Target> {
    let ecosystem = select_ecosystem(args, config)?;
    let project_dir = project_dir(args.project_dir.as_deref())?;
    debug!(%ecosystem, project = %project_dir.display(), "Resolved target");

    let filesystem: Arc<dyn Filesystem> = Arc::new(LocalFilesystem::new());
    let resources: Arc<dyn ResourceStore> =
        match config.resource_dir(args.resource_dir.as_deref()) {
            Some(dir) => {
                debug!(dir = %dir.display(), "Using resource directory");
                Arc::new(DirectoryResources::new(dir))
            }
            None => Arc::new(BuiltinResources::new()),
        };
    let fetcher = Arc::new(HttpFetcher::new()?);

    let env = Environment::new(filesystem.clone(), fetcher, resources, &project_dir);
    let mut registry = ecosystem.registry(env, &config.identity)?;

    let loader = SettingsLoader::new(filesystem.clone());
    let settings = match &args.settings {
        Some(path) => Some(loader.load(&absolute(path)?)?),
        None => loader.load_optional(&project_dir.join(&config.defaults.settings_file))?,
    };
    if let Some(settings) = settings {
        registry.load_layer(&settings)?;
    }

    registry.load_layer(&command_line_layer(args, config)?)?;

    Ok(Target {
        ecosystem,
        registry,
        filesystem,
    })
}

fn select_ecosystem(args: &TargetArgs, config: &AppConfig) -> CliResult<Ecosystem> {
    if let Some(arg) = args.ecosystem {
        return Ok(arg.into());
    }
    let name = config
        .defaults
        .ecosystem
        .as_deref()
        .ok_or(CliError::MissingEcosystem)?;
    name.parse::<Ecosystem>().map_err(|e| CliError::ConfigError {
        message: format!("defaults.ecosystem: {e}"),
        source: Some(Box::new(e)),
    })
}

/// `--project-dir`, else the parent of the working directory.
fn project_dir(flag: Option<&Path>) -> CliResult<PathBuf> {
    let dir = match flag {
        Some(dir) => absolute(dir)?,
        None => {
            let cwd = std::env::current_dir()
                .with_cli_context(|| "Failed to read the current directory")?;
            cwd.parent()
                .map(Path::to_path_buf)
                .ok_or_else(|| CliError::InvalidInput {
                    message: format!(
                        "{} has no parent; pass --project-dir",
                        cwd.display()
                    ),
                    source: None,
                })?
        }
    };
    if !dir.is_dir() {
        return Err(CliError::ProjectNotFound { path: dir });
    }
    // Canonical form gives `repository_name` a real directory name, even for `.` or `..`.
    std::fs::canonicalize(&dir)
        .with_cli_context(|| format!("Failed to resolve {}", dir.display()))
}

fn absolute(path: &Path) -> CliResult<PathBuf> {
    std::path::absolute(path).with_cli_context(|| format!("Invalid path {}", path.display()))
}

/// `settings_file` from config, then every `--set KEY=VALUE` in order.
fn command_line_layer(args: &TargetArgs, config: &AppConfig) -> CliResult<SettingsLayer> {
    let mut layer = SettingsLayer::new(COMMAND_LINE_LAYER);
    layer
        .insert(
            "settings_file",
            Value::Str(config.defaults.settings_file.clone()),
        )
        .map_err(|e| CliError::ConfigError {
            message: format!("defaults.settings_file: {e}"),
            source: Some(Box::new(e)),
        })?;
    for assignment in &args.set {
        layer
            .insert_assignment(assignment)
            .map_err(|e| CliError::InvalidInput {
                message: format!("--set {assignment}"),
                source: Some(Box::new(e)),
            })?;
    }
    Ok(layer)
}
