//! Project settings files.
//!
//! A settings file is flat TOML mapping attribute names to values. It is
//! merged over the ecosystem layers, so anything it names wins.
//!
//! ```toml
//! pretty_name    = "SourceAFIS for Java"
//! is_opensource  = true
//! inception_year = 2009
//! dependencies   = ["slf4j", "com.google.guava:guava:31.1-jre"]
//! javadoc_links  = [["Guava", "https://guava.dev/releases/31.1-jre/api/docs/"]]
//! ```
//!
//! Supported values: string, boolean, integer, array of strings, and array of
//! `[title, url]` pairs (links). An empty array is an empty list.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, instrument};

use projconf_core::{
    application::ports::Filesystem,
    domain::{DomainError, Link, SettingsLayer, Value},
    error::ProjconfResult,
};

/// One attribute value as written in TOML.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawSetting {
    Bool(bool),
    Integer(i64),
    Text(String),
    Strings(Vec<String>),
    Links(Vec<(String, String)>),
}

impl From<RawSetting> for Value {
    fn from(raw: RawSetting) -> Self {
        match raw {
            RawSetting::Bool(b) => Value::Bool(b),
            RawSetting::Integer(i) => Value::Int(i),
            RawSetting::Text(s) => Value::Str(s),
            RawSetting::Strings(items) => Value::List(items),
            RawSetting::Links(pairs) => Value::Links(
                pairs
                    .into_iter()
                    .map(|(title, url)| Link::new(title, url))
                    .collect(),
            ),
        }
    }
}

/// Reads settings files through the [`Filesystem`] port.
pub struct SettingsLoader {
    filesystem: Arc<dyn Filesystem>,
}

impl SettingsLoader {
    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Load `path` into a layer named after the file.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn load(&self, path: &Path) -> ProjconfResult<SettingsLayer> {
        let text = self.filesystem.read_to_string(path)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "settings".into());
        let layer = parse_settings(&name, &text)?;
        debug!(count = layer.len(), "Loaded settings");
        Ok(layer)
    }

    /// Like [`Self::load`], but an absent file yields `None`.
    pub fn load_optional(&self, path: &Path) -> ProjconfResult<Option<SettingsLayer>> {
        if !self.filesystem.exists(path) {
            debug!(path = %path.display(), "No settings file");
            return Ok(None);
        }
        self.load(path).map(Some)
    }
}

/// Parse settings TOML into a layer called `name`.
pub fn parse_settings(name: &str, text: &str) -> ProjconfResult<SettingsLayer> {
    let table: toml::Table = toml::from_str(text).map_err(|e| DomainError::InvalidSetting {
        key: name.to_string(),
        reason: format!("not valid TOML: {}", e.message()),
    })?;

    let mut layer = SettingsLayer::new(name);
    for (key, value) in table {
        let raw = convert(&key, value)?;
        layer.insert(key, raw.into())?;
    }
    Ok(layer)
}

fn convert(key: &str, value: toml::Value) -> Result<RawSetting, DomainError> {
    let kind = value.type_str();
    // Empty arrays match `Strings` first, which is what we want.
    value.try_into::<RawSetting>().map_err(|_| DomainError::InvalidSetting {
        key: key.to_string(),
        reason: format!(
            "unsupported {kind} value (expected string, boolean, integer, \
             array of strings or array of [title, url] pairs)"
        ),
    })
}

/// Render a layer back to TOML, e.g. for `projconf show --format toml`.
pub fn to_toml(layer: &SettingsLayer) -> ProjconfResult<String> {
    let mut table = BTreeMap::new();
    for (key, value) in layer.iter() {
        let value = match value {
            Value::Null => continue,
            Value::Bool(b) => toml::Value::Boolean(*b),
            Value::Int(i) => toml::Value::Integer(*i),
            Value::Str(s) => toml::Value::String(s.clone()),
            Value::List(items) => {
                toml::Value::Array(items.iter().cloned().map(toml::Value::String).collect())
            }
            Value::Links(links) => toml::Value::Array(
                links
                    .iter()
                    .map(|link| {
                        toml::Value::Array(vec![
                            toml::Value::String(link.title.clone()),
                            toml::Value::String(link.url.clone()),
                        ])
                    })
                    .collect(),
            ),
        };
        table.insert(key.to_string(), value);
    }
    toml::to_string(&table).map_err(|e| {
        DomainError::InvalidSetting {
            key: "settings".into(),
            reason: e.to_string(),
        }
        .into()
    })
}
