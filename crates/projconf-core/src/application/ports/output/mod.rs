//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `projconf-adapters` crate provides implementations.

use std::path::Path;

use crate::error::ProjconfResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `projconf_adapters::filesystem::LocalFilesystem` (production)
/// - `projconf_adapters::filesystem::MemoryFilesystem` (testing)
///
/// Paths are absolute; the generation service joins plan paths onto the
/// project directory before calling in.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> ProjconfResult<()>;

    /// Write content to a file, truncating it if it exists.
    fn write_file(&self, path: &Path, content: &str) -> ProjconfResult<()>;

    /// Read a UTF-8 file.
    fn read_to_string(&self, path: &Path) -> ProjconfResult<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a single file.
    fn remove_file(&self, path: &Path) -> ProjconfResult<()>;

    /// Add execute permission for owner, group and others.
    ///
    /// A no-op on platforms without mode bits.
    fn set_executable(&self, path: &Path) -> ProjconfResult<()>;
}

/// Port for downloading a web page.
///
/// Implemented by:
/// - `projconf_adapters::fetcher::HttpFetcher` (blocking HTTP GET)
/// - `projconf_adapters::fetcher::StaticFetcher` (canned pages)
#[cfg_attr(test, mockall::automock)]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` and return the body as text.
    fn fetch(&self, url: &str) -> ProjconfResult<String>;
}

/// Port for template resources such as `license.txt`.
///
/// Names are relative, using `/` separators: `license.txt`,
/// `java/gitignore.txt`, `net/gitignore.txt`.
///
/// Implemented by:
/// - `projconf_adapters::resources::DirectoryResources` (a `res/` directory)
/// - `projconf_adapters::resources::BuiltinResources` (compiled-in copies)
#[cfg_attr(test, mockall::automock)]
pub trait ResourceStore: Send + Sync {
    fn read(&self, name: &str) -> ProjconfResult<String>;
}
