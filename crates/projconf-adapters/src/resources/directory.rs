//! Resources read from a directory on disk.

use std::path::{Path, PathBuf};

use tracing::debug;

use projconf_core::{
    application::{ApplicationError, ports::ResourceStore},
    error::ProjconfResult,
};

/// Reads resources below `root`, e.g. a checkout's `res/` directory.
///
/// Names use `/` separators regardless of platform.
#[derive(Debug, Clone)]
pub struct DirectoryResources {
    root: PathBuf,
}

impl DirectoryResources {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_of(&self, name: &str) -> PathBuf {
        name.split('/')
            .fold(self.root.clone(), |path, segment| path.join(segment))
    }
}

impl ResourceStore for DirectoryResources {
    fn read(&self, name: &str) -> ProjconfResult<String> {
        let path = self.path_of(name);
        debug!(path = %path.display(), "Reading resource");
        if !path.is_file() {
            return Err(ApplicationError::ResourceMissing {
                name: name.to_string(),
            }
            .into());
        }
        std::fs::read_to_string(&path).map_err(|e| {
            ApplicationError::FilesystemError {
                path,
                reason: format!("Failed to read resource: {e}"),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn reads_nested_resources() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("java")).unwrap();
        std::fs::write(temp.path().join("java/gitignore.txt"), "/out/\n").unwrap();

        let resources = DirectoryResources::new(temp.path());
        assert_eq!(resources.read("java/gitignore.txt").unwrap(), "/out/\n");
    }

    #[test]
    fn missing_resource_is_reported_by_name() {
        let temp = TempDir::new().unwrap();
        let err = DirectoryResources::new(temp.path())
            .read("license.txt")
            .unwrap_err();
        assert!(err.to_string().contains("Resource not found: license.txt"));
    }
}
