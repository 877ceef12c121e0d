//! Projconf Core - layered project configuration generator.
//!
//! This crate provides the domain and application layers for the projconf
//! generator, following the same ports-and-adapters split as the rest of the
//! workspace.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          projconf-cli (CLI)             │
//! │   builds Environment + Registry         │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │   (GenerationService, Ecosystem plans)  │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   Layers + Generators (attribute text)  │
//! └──────────────────┬──────────────────────┘
//!                    │ reads
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   Ports (Filesystem, PageFetcher,       │
//! │   ResourceStore) implemented by         │
//! │   projconf-adapters                     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use projconf_core::prelude::*;
//!
//! let env = Environment::new(filesystem, fetcher, resources, "/work/demo");
//! let registry = Ecosystem::Java.registry(env, &identity)?;
//!
//! let service = GenerationService::new(filesystem);
//! service.generate(Ecosystem::Java, &registry)?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        Ecosystem, Environment, GenerationReport, GenerationService, Identity,
        ports::{Filesystem, PageFetcher, ResourceStore},
    };
    pub use crate::domain::{
        ArtifactAction, ArtifactKind, ArtifactPlan, Base, Emitter, Layer, Link, Registry,
        SettingsLayer, Value,
    };
    pub use crate::error::{ProjconfError, ProjconfResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
