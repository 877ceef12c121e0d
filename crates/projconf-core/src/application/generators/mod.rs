//! Artifact generators.
//!
//! Each generator is a pure function of the registry that writes the full
//! text of one artifact into an [`Emitter`]. Nothing touches the filesystem
//! here; see [`GenerationService`](crate::application::GenerationService).

mod common;
mod dotnet;
mod maven;
mod submission;

pub use common::{contribution_guidelines, gitignore, license, notice, readme};
pub use dotnet::{csproj, dotnet_release_workflow, project_guid, solution, test_csproj};
pub use maven::{build_workflow, maven_release_workflow, pom};
pub use submission::publish_script;

use crate::domain::{ArtifactKind, Emitter, Registry};
use crate::error::ProjconfResult;

/// Signature shared by all generators.
pub type Generator = fn(&Registry, &mut Emitter) -> ProjconfResult<()>;

/// The generator that renders `kind`.
pub fn generator(kind: ArtifactKind) -> Generator {
    match kind {
        ArtifactKind::Gitignore => gitignore,
        ArtifactKind::License => license,
        ArtifactKind::Notice => notice,
        ArtifactKind::ContributionGuidelines => contribution_guidelines,
        ArtifactKind::Readme => readme,
        ArtifactKind::BuildWorkflow => build_workflow,
        ArtifactKind::MavenReleaseWorkflow => maven_release_workflow,
        ArtifactKind::DotnetReleaseWorkflow => dotnet_release_workflow,
        ArtifactKind::Pom => pom,
        ArtifactKind::Csproj => csproj,
        ArtifactKind::TestCsproj => test_csproj,
        ArtifactKind::Solution => solution,
        ArtifactKind::PublishScript => publish_script,
    }
}

/// Render `kind` into a string.
pub fn render(kind: ArtifactKind, registry: &Registry) -> ProjconfResult<String> {
    Emitter::capture(|out| generator(kind)(registry, out))
}

/// "Generated by ..." text placed in a comment at the top of artifacts.
fn marker(r: &Registry) -> ProjconfResult<String> {
    Ok(format!("Generated by {}", r.text("generator_name")?))
}
