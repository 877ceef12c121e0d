//! Resource copies compiled into the binary.

use projconf_core::{
    application::{ApplicationError, ports::ResourceStore},
    error::ProjconfResult,
};

const BUILTIN: &[(&str, &str)] = &[
    ("license.txt", include_str!("../../res/license.txt")),
    ("java/gitignore.txt", include_str!("../../res/java/gitignore.txt")),
    ("net/gitignore.txt", include_str!("../../res/net/gitignore.txt")),
];

/// Serves the bundled `res/` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinResources;

impl BuiltinResources {
    pub fn new() -> Self {
        Self
    }

    /// Names of every bundled resource.
    pub fn names() -> impl Iterator<Item = &'static str> {
        BUILTIN.iter().map(|(name, _)| *name)
    }
}

impl ResourceStore for BuiltinResources {
    fn read(&self, name: &str) -> ProjconfResult<String> {
        BUILTIN
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, content)| content.to_string())
            .ok_or_else(|| {
                ApplicationError::ResourceMissing {
                    name: name.to_string(),
                }
                .into()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundles_license_and_ignore_files() {
        let resources = BuiltinResources::new();
        assert!(resources.read("license.txt").unwrap().contains("Apache License"));
        assert!(resources.read("java/gitignore.txt").unwrap().contains("/target/"));
        assert!(resources.read("net/gitignore.txt").unwrap().contains("bin/"));
        assert_eq!(BuiltinResources::names().count(), 3);
    }

    #[test]
    fn unknown_resource_is_missing() {
        let err = BuiltinResources::new().read("rust/gitignore.txt").unwrap_err();
        assert!(err.to_string().contains("rust/gitignore.txt"));
    }
}
