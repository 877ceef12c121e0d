//! Application layer for Projconf.
//!
//! This layer contains:
//! - **Layers**: the built-in attribute catalogue per ecosystem
//! - **Generators**: artifact text as a function of the registry
//! - **Services**: use case orchestration (GenerationService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types

pub mod ecosystem;
pub mod environment;
pub mod error;
pub mod generators;
pub mod layers;
pub mod ports;
pub mod services;

pub use ecosystem::Ecosystem;
pub use environment::{Environment, Identity};
pub use error::ApplicationError;
pub use services::{GenerationReport, GenerationService};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, PageFetcher, ResourceStore};
