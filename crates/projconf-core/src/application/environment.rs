//! Run environment: the ports and paths attribute thunks may consult.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::application::ports::{Filesystem, PageFetcher, ResourceStore};
use crate::error::ProjconfResult;

/// Ports plus the project directory for one generation run.
///
/// Cheap to clone; all ports are shared.
#[derive(Clone)]
pub struct Environment {
    filesystem: Arc<dyn Filesystem>,
    fetcher: Arc<dyn PageFetcher>,
    resources: Arc<dyn ResourceStore>,
    project_dir: PathBuf,
}

impl Environment {
    pub fn new(
        filesystem: Arc<dyn Filesystem>,
        fetcher: Arc<dyn PageFetcher>,
        resources: Arc<dyn ResourceStore>,
        project_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            filesystem,
            fetcher,
            resources,
            project_dir: project_dir.into(),
        }
    }

    pub fn filesystem(&self) -> &Arc<dyn Filesystem> {
        &self.filesystem
    }

    pub fn fetcher(&self) -> &dyn PageFetcher {
        self.fetcher.as_ref()
    }

    pub fn resources(&self) -> &dyn ResourceStore {
        self.resources.as_ref()
    }

    /// Root of the project being configured.
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Read a file below the project directory.
    pub fn read_project_file(&self, relative: impl AsRef<Path>) -> ProjconfResult<String> {
        self.filesystem
            .read_to_string(&self.project_dir.join(relative))
    }

    pub fn project_file_exists(&self, relative: impl AsRef<Path>) -> bool {
        self.filesystem.exists(&self.project_dir.join(relative))
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("project_dir", &self.project_dir)
            .finish_non_exhaustive()
    }
}

/// Who publishes the generated projects.
///
/// Bound into every registry by
/// [`IdentityLayer`](crate::application::layers::IdentityLayer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Identity {
    /// Shown in NOTICE, the POM and copyright lines.
    pub author_name: String,
    pub author_email: String,
    pub author_url: String,
    /// GitHub / Bitbucket / Codecov account owning the repositories.
    pub code_owner: String,
    /// Project websites live at `https://<subdomain>.<website_domain>/`.
    pub website_domain: String,
    /// Prefix of Maven group IDs and Java packages.
    pub package_namespace: String,
}

impl Default for Identity {
    fn default() -> Self {
        Self {
            author_name: "Project Author".into(),
            author_email: "author@example.com".into(),
            author_url: "https://example.com/".into(),
            code_owner: "example".into(),
            website_domain: "example.com".into(),
            package_namespace: "com.example".into(),
        }
    }
}

#[cfg(test)]
pub(crate) fn test_environment(project_dir: &str) -> Environment {
    use crate::application::ports::{MockFilesystem, MockPageFetcher, MockResourceStore};

    Environment::new(
        Arc::new(MockFilesystem::new()),
        Arc::new(MockPageFetcher::new()),
        Arc::new(MockResourceStore::new()),
        project_dir,
    )
}

/// Mock-backed environment serving canned project files, pages and resources.
#[cfg(test)]
pub(crate) fn fixture_environment(
    project_dir: &str,
    files: &[(&str, &str)],
    pages: &[(&str, &str)],
) -> Environment {
    use std::collections::HashMap;

    use crate::application::ApplicationError;
    use crate::application::ports::{MockFilesystem, MockPageFetcher, MockResourceStore};

    let root = PathBuf::from(project_dir);
    let files: Arc<HashMap<PathBuf, String>> = Arc::new(
        files
            .iter()
            .map(|(path, content)| (root.join(path), content.to_string()))
            .collect(),
    );
    let pages: HashMap<String, String> = pages
        .iter()
        .map(|(url, html)| (url.to_string(), html.to_string()))
        .collect();

    let mut fs = MockFilesystem::new();
    let readable = files.clone();
    fs.expect_read_to_string().returning(move |path| {
        readable
            .get(path)
            .cloned()
            .ok_or_else(|| {
                ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "not found".into(),
                }
                .into()
            })
    });
    fs.expect_exists()
        .returning(move |path| files.contains_key(path));

    let mut fetcher = MockPageFetcher::new();
    fetcher.expect_fetch().returning(move |url| {
        pages.get(url).cloned().ok_or_else(|| {
            ApplicationError::FetchFailed {
                url: url.to_string(),
                reason: "404".into(),
            }
            .into()
        })
    });

    let mut resources = MockResourceStore::new();
    resources.expect_read().returning(|name| match name {
        "license.txt" => Ok("Apache License\nVersion 2.0\n".into()),
        "java/gitignore.txt" => Ok("/target/\n".into()),
        "net/gitignore.txt" => Ok("bin/\nobj/\n".into()),
        other => Err(ApplicationError::ResourceMissing {
            name: other.to_string(),
        }
        .into()),
    });

    Environment::new(
        Arc::new(fs),
        Arc::new(fetcher),
        Arc::new(resources),
        project_dir,
    )
}
