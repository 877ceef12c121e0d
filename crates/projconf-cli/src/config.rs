//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate only sees the [`Identity`] part.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables, `PROJCONF__SECTION__KEY`
//!    (e.g. `PROJCONF__IDENTITY__CODE_OWNER=acme`)
//! 3. Config file (`--config` or the platform config directory)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use projconf_core::application::Identity;

/// Prefix for environment overrides.
const ENV_PREFIX: &str = "PROJCONF";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Who publishes the generated projects.
    pub identity: Identity,
    /// Fallbacks for target flags.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Used when `--ecosystem` is not given.
    pub ecosystem: Option<String>,
    /// Used when `--resource-dir` is not given.
    pub resource_dir: Option<PathBuf>,
    /// Project-relative settings file picked up when present.
    pub settings_file: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            ecosystem: None,
            resource_dir: None,
            settings_file: "scripts/projconf.toml".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration, layering file and environment over defaults.
    ///
    /// An explicit `config_file` must exist; the default location is optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let path = Self::resolve_path(config_file);
        let defaults = config::Config::try_from(&Self::default())
            .context("Failed to serialise built-in defaults")?;

        config::Config::builder()
            .add_source(defaults)
            .add_source(
                config::File::from(path.as_path())
                    .format(config::FileFormat::Toml)
                    .required(config_file.is_some()),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// `config_file` if given, else [`Self::config_path`].
    pub fn resolve_path(config_file: Option<&PathBuf>) -> PathBuf {
        config_file.cloned().unwrap_or_else(Self::config_path)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.projconf.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "projconf", "projconf")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".projconf.toml"))
    }

    /// Resource directory to use, if any.
    pub fn resource_dir<'a>(&'a self, flag: Option<&'a Path>) -> Option<&'a Path> {
        flag.or(self.defaults.resource_dir.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_have_no_ecosystem() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.defaults.ecosystem, None);
        assert_eq!(cfg.defaults.settings_file, "scripts/projconf.toml");
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn file_values_override_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            "[identity]\ncode_owner = \"acme\"\n\n[defaults]\necosystem = \"net\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.identity.code_owner, "acme");
        assert_eq!(cfg.defaults.ecosystem.as_deref(), Some("net"));
        // Untouched keys keep their defaults.
        assert_eq!(cfg.identity.website_domain, Identity::default().website_domain);
        assert_eq!(cfg.defaults.settings_file, "scripts/projconf.toml");
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("absent.toml");
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn resource_flag_wins_over_config() {
        let mut cfg = AppConfig::default();
        cfg.defaults.resource_dir = Some(PathBuf::from("/etc/projconf/res"));
        assert_eq!(
            cfg.resource_dir(Some(Path::new("res"))),
            Some(Path::new("res"))
        );
        assert_eq!(cfg.resource_dir(None), Some(Path::new("/etc/projconf/res")));
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
