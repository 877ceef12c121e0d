//! Resource store adapters.

mod builtin;
mod directory;

pub use builtin::BuiltinResources;
pub use directory::DirectoryResources;
