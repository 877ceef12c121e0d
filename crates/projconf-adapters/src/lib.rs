//! Infrastructure adapters for projconf.
//!
//! This crate implements the ports defined in `projconf-core::application::ports`
//! and reads project settings files. It contains all external dependencies
//! and I/O operations.

pub mod fetcher;
pub mod filesystem;
pub mod resources;
pub mod settings_loader;

// Re-export commonly used adapters
pub use fetcher::{HttpFetcher, StaticFetcher};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use resources::{BuiltinResources, DirectoryResources};
pub use settings_loader::SettingsLoader;
