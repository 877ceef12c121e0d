//! Layers: named batches of attribute bindings.

use std::collections::BTreeMap;
use std::fmt;

use crate::domain::{error::DomainError, registry::Registry, value::Value};
use crate::error::ProjconfResult;

/// A batch of attribute (re)definitions applied on top of a registry.
///
/// Implementations bind in document order. A later binding in the same layer
/// may reference an earlier one, and may shadow a binding from a previously
/// loaded layer with [`Registry::override_with`] to call through to it.
pub trait Layer {
    /// Name recorded in [`Registry::layers`].
    fn name(&self) -> &str;

    /// Bind this layer's attributes.
    fn apply(&self, registry: &mut Registry) -> ProjconfResult<()>;
}

/// Layer backed by a closure.
pub struct FnLayer<F> {
    name: String,
    apply: F,
}

impl<F> FnLayer<F>
where
    F: Fn(&mut Registry) -> ProjconfResult<()>,
{
    pub fn new(name: impl Into<String>, apply: F) -> Self {
        Self {
            name: name.into(),
            apply,
        }
    }
}

impl<F> Layer for FnLayer<F>
where
    F: Fn(&mut Registry) -> ProjconfResult<()>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, registry: &mut Registry) -> ProjconfResult<()> {
        (self.apply)(registry)
    }
}

/// Fixed name → value mapping merged over the ecosystem layers.
///
/// Produced from a project settings file or from `--set key=value` flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsLayer {
    name: String,
    values: BTreeMap<String, Value>,
}

impl SettingsLayer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: BTreeMap::new(),
        }
    }

    /// Add a setting, validating the attribute name.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Result<(), DomainError> {
        let key = key.into();
        validate_key(&key)?;
        self.values.insert(key, value);
        Ok(())
    }

    /// Builder-style [`Self::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Result<Self, DomainError> {
        self.insert(key, value.into())?;
        Ok(self)
    }

    /// Parse and add a `key=value` assignment.
    pub fn insert_assignment(&mut self, assignment: &str) -> Result<(), DomainError> {
        let (key, raw) = assignment
            .split_once('=')
            .ok_or_else(|| DomainError::InvalidSetting {
                key: assignment.to_string(),
                reason: "expected KEY=VALUE".into(),
            })?;
        self.insert(key.trim(), Value::parse_literal(raw))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Layer for SettingsLayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, registry: &mut Registry) -> ProjconfResult<()> {
        for (key, value) in &self.values {
            registry.constant(key.clone(), value.clone());
        }
        Ok(())
    }
}

impl fmt::Display for SettingsLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} settings)", self.name, self.values.len())
    }
}

fn validate_key(key: &str) -> Result<(), DomainError> {
    let mut chars = key.chars();
    let valid = matches!(chars.next(), Some(c) if c.is_ascii_lowercase() || c == '_')
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(DomainError::InvalidSetting {
            key: key.to_string(),
            reason: "attribute names are lowercase snake_case".into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::environment::test_environment;

    #[test]
    fn assignments_parse_typed_values() {
        let mut layer = SettingsLayer::new("cli");
        layer.insert_assignment("is_opensource=false").unwrap();
        layer.insert_assignment("jdk_version = 17").unwrap();
        layer.insert_assignment("pom_description=Fingerprint = identity").unwrap();

        assert_eq!(layer.get("is_opensource"), Some(&Value::Bool(false)));
        assert_eq!(layer.get("jdk_version"), Some(&Value::Int(17)));
        assert_eq!(
            layer.get("pom_description"),
            Some(&Value::from("Fingerprint = identity"))
        );
    }

    #[test]
    fn malformed_assignment_is_rejected() {
        let mut layer = SettingsLayer::new("cli");
        assert!(layer.insert_assignment("no_equals_sign").is_err());
        assert!(layer.insert_assignment("Bad-Name=1").is_err());
        assert!(layer.is_empty());
    }

    #[test]
    fn settings_layer_binds_constants() {
        let layer = SettingsLayer::new("project")
            .with("license_id", "MIT")
            .unwrap();
        let reg = Registry::new(test_environment("/work/demo"))
            .with_layer(&layer)
            .unwrap();

        assert_eq!(reg.text("license_id").unwrap(), "MIT");
        assert_eq!(reg.layers(), ["project"]);
    }
}
