// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Projconf.
//!
//! Everything here is synchronous and free of I/O. Thunks bound in a
//! [`Registry`] reach the outside world only through the ports carried by
//! [`crate::application::Environment`].
//!
//! - **value**: what an attribute evaluates to
//! - **registry**: lazy name → thunk bindings with super calls
//! - **layer**: batches of bindings
//! - **text**: whitespace normalization and the output sink
//! - **lead**: homepage paragraph extraction
//! - **dependency**: Maven and NuGet dependency specs
//! - **artifact**: what a run writes and removes

pub mod artifact;
pub mod dependency;
pub mod error;
pub mod layer;
pub mod lead;
pub mod registry;
pub mod text;
pub mod value;

pub use artifact::{ArtifactAction, ArtifactKind, ArtifactPlan};
pub use dependency::{MavenDependency, MavenEntry, MavenExclusion, NugetPackage};
pub use error::{DomainError, DomainResult};
pub use layer::{FnLayer, Layer, SettingsLayer};
pub use lead::extract_lead;
pub use registry::{Base, Registry, Thunk};
pub use text::{DEFAULT_TAB_PASSES, Emitter, dedent, format_block};
pub use value::{Link, Value};
