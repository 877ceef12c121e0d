//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `projconf-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: project file reads and writes
//!   - `PageFetcher`: homepage download for README descriptions
//!   - `ResourceStore`: license and ignore-file templates
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{Filesystem, PageFetcher, ResourceStore};

#[cfg(test)]
pub use output::{MockFilesystem, MockPageFetcher, MockResourceStore};
