//! Attribute registry.
//!
//! A [`Registry`] maps attribute names to zero-argument thunks. Thunks are
//! evaluated on demand and may resolve other attributes by name, so forward
//! references between layers need no ordering. Nothing is memoized unless the
//! binding was registered with [`Registry::define_cached`].
//!
//! ```text
//! CommonLayer      pretty_name = repository_name
//!   └─ NetLayer    pretty_name = root_namespace        (replaces)
//!       └─ SubmissionLayer
//!                  documentation_links = base + extras (calls through)
//! ```

use std::cell::{OnceCell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::application::Environment;
use crate::domain::{
    error::DomainError,
    layer::Layer,
    value::{Link, Value},
};
use crate::error::ProjconfResult;

/// A bound attribute computation.
pub type Thunk = Rc<dyn Fn(&Registry) -> ProjconfResult<Value>>;

/// Handle to the definition an override shadows.
///
/// Captured by [`Registry::override_with`] at rebind time, then evaluated
/// against the registry the override is resolved in.
#[derive(Clone)]
pub struct Base {
    name: String,
    previous: Option<Thunk>,
}

impl Base {
    /// Evaluate the shadowed definition.
    pub fn resolve(&self, registry: &Registry) -> ProjconfResult<Value> {
        match &self.previous {
            Some(thunk) => thunk(registry),
            None => Err(DomainError::UndefinedAttribute {
                name: self.name.clone(),
            }
            .into()),
        }
    }

    /// Whether an earlier layer bound this name.
    pub fn is_defined(&self) -> bool {
        self.previous.is_some()
    }
}

/// Fully layered set of attribute bindings for one generation run.
#[derive(Clone)]
pub struct Registry {
    env: Environment,
    bindings: HashMap<String, Thunk>,
    layers: Vec<String>,
    resolving: RefCell<Vec<String>>,
}

impl Registry {
    /// Create an empty registry over the given environment.
    pub fn new(env: Environment) -> Self {
        Self {
            env,
            bindings: HashMap::new(),
            layers: Vec::new(),
            resolving: RefCell::new(Vec::new()),
        }
    }

    /// The ports and paths thunks may consult.
    pub fn env(&self) -> &Environment {
        &self.env
    }

    // -------------------------------------------------------------------------
    // Binding
    // -------------------------------------------------------------------------

    /// Install or replace the computation bound to `name`.
    pub fn define<F>(&mut self, name: impl Into<String>, thunk: F) -> &mut Self
    where
        F: Fn(&Registry) -> ProjconfResult<Value> + 'static,
    {
        self.bindings.insert(name.into(), Rc::new(thunk));
        self
    }

    /// Bind `name` to a fixed value.
    pub fn constant(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        let value = value.into();
        self.define(name, move |_| Ok(value.clone()))
    }

    /// Bind `name` to a computation whose first successful result is kept.
    pub fn define_cached<F>(&mut self, name: impl Into<String>, thunk: F) -> &mut Self
    where
        F: Fn(&Registry) -> ProjconfResult<Value> + 'static,
    {
        let cell: Rc<OnceCell<Value>> = Rc::default();
        self.define(name, move |r| {
            if let Some(value) = cell.get() {
                return Ok(value.clone());
            }
            let value = thunk(r)?;
            Ok(cell.get_or_init(|| value).clone())
        })
    }

    /// Rebind `name`, handing the new computation the definition it replaces.
    pub fn override_with<F>(&mut self, name: impl Into<String>, thunk: F) -> &mut Self
    where
        F: Fn(&Registry, &Base) -> ProjconfResult<Value> + 'static,
    {
        let name = name.into();
        let base = Base {
            previous: self.bindings.get(&name).cloned(),
            name: name.clone(),
        };
        self.define(name, move |r| thunk(r, &base))
    }

    /// Apply a layer atomically.
    ///
    /// Bindings are staged on a copy and committed only if the layer applies
    /// cleanly.
    pub fn load_layer(&mut self, layer: &dyn Layer) -> ProjconfResult<()> {
        let mut staged = self.clone();
        layer.apply(&mut staged)?;
        staged.layers.push(layer.name().to_string());
        debug!(
            layer = layer.name(),
            attributes = staged.bindings.len(),
            "Layer loaded"
        );
        *self = staged;
        Ok(())
    }

    /// Builder-style [`Self::load_layer`].
    pub fn with_layer(mut self, layer: &dyn Layer) -> ProjconfResult<Self> {
        self.load_layer(layer)?;
        Ok(self)
    }

    // -------------------------------------------------------------------------
    // Introspection
    // -------------------------------------------------------------------------

    pub fn is_defined(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// All bound names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.bindings.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Names of the layers applied so far, in order.
    pub fn layers(&self) -> &[String] {
        &self.layers
    }

    // -------------------------------------------------------------------------
    // Resolution
    // -------------------------------------------------------------------------

    /// Evaluate the current binding for `name`.
    pub fn resolve(&self, name: &str) -> ProjconfResult<Value> {
        let thunk = self
            .bindings
            .get(name)
            .cloned()
            .ok_or_else(|| DomainError::UndefinedAttribute { name: name.into() })?;

        {
            let mut stack = self.resolving.borrow_mut();
            if stack.iter().any(|n| n == name) {
                let mut chain = stack.clone();
                chain.push(name.to_string());
                return Err(DomainError::CyclicAttribute {
                    name: name.into(),
                    chain: chain.join(" -> "),
                }
                .into());
            }
            stack.push(name.to_string());
        }

        let result = thunk(self);
        self.resolving.borrow_mut().pop();
        result
    }

    /// Required string. Integers are rendered in decimal.
    pub fn text(&self, name: &str) -> ProjconfResult<String> {
        match self.resolve(name)? {
            Value::Str(s) => Ok(s),
            Value::Int(i) => Ok(i.to_string()),
            Value::Null => Err(unset(name)),
            other => Err(mismatch(name, "a string", &other)),
        }
    }

    /// Optional string; null and empty both read as `None`.
    pub fn opt_text(&self, name: &str) -> ProjconfResult<Option<String>> {
        match self.resolve(name)? {
            Value::Null => Ok(None),
            Value::Str(s) if s.is_empty() => Ok(None),
            Value::Str(s) => Ok(Some(s)),
            Value::Int(i) => Ok(Some(i.to_string())),
            other => Err(mismatch(name, "a string", &other)),
        }
    }

    pub fn flag(&self, name: &str) -> ProjconfResult<bool> {
        match self.resolve(name)? {
            Value::Bool(b) => Ok(b),
            Value::Null => Err(unset(name)),
            other => Err(mismatch(name, "a boolean", &other)),
        }
    }

    pub fn integer(&self, name: &str) -> ProjconfResult<i64> {
        match self.resolve(name)? {
            Value::Int(i) => Ok(i),
            Value::Null => Err(unset(name)),
            other => Err(mismatch(name, "an integer", &other)),
        }
    }

    /// Ordered string list; null reads as empty.
    pub fn list(&self, name: &str) -> ProjconfResult<Vec<String>> {
        match self.resolve(name)? {
            Value::List(items) => Ok(items),
            Value::Null => Ok(Vec::new()),
            other => Err(mismatch(name, "a list", &other)),
        }
    }

    /// Link list; null reads as empty.
    pub fn links(&self, name: &str) -> ProjconfResult<Vec<Link>> {
        match self.resolve(name)? {
            Value::Links(links) => Ok(links),
            Value::Null => Ok(Vec::new()),
            other => Err(mismatch(name, "a link list", &other)),
        }
    }

    /// Text emitted by a generator attribute; null reads as empty.
    pub fn block(&self, name: &str) -> ProjconfResult<String> {
        match self.resolve(name)? {
            Value::Str(s) => Ok(s),
            Value::Null => Ok(String::new()),
            other => Err(mismatch(name, "generated text", &other)),
        }
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("project_dir", &self.env.project_dir())
            .field("layers", &self.layers)
            .field("attributes", &self.bindings.len())
            .finish()
    }
}

fn unset(name: &str) -> crate::error::ProjconfError {
    DomainError::UnsetAttribute { name: name.into() }.into()
}

fn mismatch(name: &str, expected: &'static str, found: &Value) -> crate::error::ProjconfError {
    DomainError::TypeMismatch {
        name: name.into(),
        expected,
        found: found.kind(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::application::environment::test_environment;
    use crate::domain::layer::FnLayer;

    fn registry() -> Registry {
        Registry::new(test_environment("/work/demo"))
    }

    #[test]
    fn resolve_unbound_name_fails_with_undefined_attribute() {
        let err = registry().resolve("missing").unwrap_err();
        assert_eq!(err.undefined_attribute(), Some("missing"));
    }

    #[test]
    fn rebinding_replaces_previous_definition() {
        let mut reg = registry();
        reg.constant("license_id", "Apache-2.0");
        reg.constant("license_id", "MIT");
        assert_eq!(reg.text("license_id").unwrap(), "MIT");
        assert_eq!(reg.names(), vec!["license_id"]);
    }

    #[test]
    fn base_value_survives_layers_that_do_not_touch_it() {
        let base = FnLayer::new("base", |r| {
            r.constant("license_id", "Apache-2.0");
            r.constant("is_opensource", true);
            Ok(())
        });
        let special = FnLayer::new("special", |r| {
            r.constant("is_opensource", false);
            Ok(())
        });

        let reg = registry()
            .with_layer(&base)
            .unwrap()
            .with_layer(&special)
            .unwrap();

        assert_eq!(reg.text("license_id").unwrap(), "Apache-2.0");
        assert!(!reg.flag("is_opensource").unwrap());
        assert_eq!(reg.layers(), ["base", "special"]);
    }

    #[test]
    fn override_calls_through_to_shadowed_definition() {
        let mut reg = registry();
        reg.constant("pretty_name", "demo");
        reg.override_with("pretty_name", |r, base| {
            let previous = base.resolve(r)?;
            Ok(format!("{previous} extractor").into())
        });

        assert_eq!(reg.text("pretty_name").unwrap(), "demo extractor");
    }

    #[test]
    fn shadowed_definition_sees_later_bindings() {
        let mut reg = registry();
        reg.define("homepage", |r| {
            Ok(format!("https://{}.example.com/", r.text("subdomain")?).into())
        });
        reg.override_with("homepage", |r, base| {
            Ok(format!("{}fvc", base.resolve(r)?).into())
        });
        // Bound after both definitions of homepage; still visible lazily.
        reg.constant("subdomain", "sourceafis");

        assert_eq!(
            reg.text("homepage").unwrap(),
            "https://sourceafis.example.com/fvc"
        );
    }

    #[test]
    fn override_without_base_fails_only_when_called_through() {
        let mut reg = registry();
        reg.override_with("documentation_links", |r, base| base.resolve(r));
        reg.override_with("badges", |_, base| {
            assert!(!base.is_defined());
            Ok(Value::from(""))
        });

        assert!(reg.block("badges").unwrap().is_empty());
        assert_eq!(
            reg.resolve("documentation_links")
                .unwrap_err()
                .undefined_attribute(),
            Some("documentation_links")
        );
    }

    #[test]
    fn broken_branch_does_not_affect_unrelated_attributes() {
        let mut reg = registry();
        reg.define("broken", |r| r.resolve("never_defined"));
        reg.constant("fine", 42);

        assert!(reg.resolve("broken").is_err());
        assert_eq!(reg.integer("fine").unwrap(), 42);
    }

    #[test]
    fn cycles_are_reported_not_overflowed() {
        let mut reg = registry();
        reg.define("a", |r| r.resolve("b"));
        reg.define("b", |r| r.resolve("a"));

        let err = reg.resolve("a").unwrap_err();
        assert!(err.to_string().contains("a -> b -> a"), "{err}");
        // The stack unwinds; a later lookup works normally.
        reg.constant("b", 1);
        assert_eq!(reg.integer("a").unwrap(), 1);
    }

    #[test]
    fn cached_definition_runs_once() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();

        let mut reg = registry();
        reg.define_cached("homepage_lead", move |_| {
            counter.set(counter.get() + 1);
            Ok("lead".into())
        });

        assert_eq!(reg.text("homepage_lead").unwrap(), "lead");
        assert_eq!(reg.text("homepage_lead").unwrap(), "lead");
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn uncached_definition_runs_every_time() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();

        let mut reg = registry();
        reg.define("year", move |_| {
            counter.set(counter.get() + 1);
            Ok(2024.into())
        });
        reg.integer("year").unwrap();
        reg.integer("year").unwrap();
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn failing_layer_leaves_registry_untouched() {
        let mut reg = registry();
        reg.constant("kept", "yes");

        let failing = FnLayer::new("failing", |r| {
            r.constant("kept", "no");
            Err(DomainError::InvalidSetting {
                key: "x".into(),
                reason: "bad".into(),
            }
            .into())
        });

        assert!(reg.load_layer(&failing).is_err());
        assert_eq!(reg.text("kept").unwrap(), "yes");
        assert!(reg.layers().is_empty());
    }

    #[test]
    fn typed_accessors_check_variants() {
        let mut reg = registry();
        reg.constant("flag", true);
        reg.constant("none", Value::Null);
        reg.constant("empty", "");
        reg.constant("jdk", 17);

        assert!(matches!(
            reg.text("flag").unwrap_err(),
            crate::error::ProjconfError::Domain(DomainError::TypeMismatch { .. })
        ));
        assert!(matches!(
            reg.flag("none").unwrap_err(),
            crate::error::ProjconfError::Domain(DomainError::UnsetAttribute { .. })
        ));
        assert_eq!(reg.opt_text("empty").unwrap(), None);
        assert_eq!(reg.opt_text("none").unwrap(), None);
        assert_eq!(reg.text("jdk").unwrap(), "17");
        assert!(reg.list("none").unwrap().is_empty());
        assert!(reg.block("none").unwrap().is_empty());
    }
}
