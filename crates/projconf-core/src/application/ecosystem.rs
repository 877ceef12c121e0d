//! Target ecosystems: which layers to stack and which artifacts to emit.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::application::environment::{Environment, Identity};
use crate::application::layers::{CommonLayer, IdentityLayer, JavaLayer, NetLayer, SubmissionLayer};
use crate::domain::{ArtifactKind, ArtifactPlan, DomainError, Layer, Registry};
use crate::error::ProjconfResult;

/// Workflow file superseded by `release.yml`.
const OBSOLETE_NUGET_WORKFLOW: &str = "nuget-release.yml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    /// Maven library or application.
    Java,
    /// .NET library with NUnit tests.
    Net,
    /// FVC-onGoing benchmark submission (.NET).
    Fvc,
}

impl Ecosystem {
    pub const ALL: [Ecosystem; 3] = [Self::Java, Self::Net, Self::Fvc];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Java => "java",
            Self::Net => "net",
            Self::Fvc => "fvc",
        }
    }

    /// Ecosystem layers, bottom to top, excluding identity and settings.
    pub fn layers(self) -> Vec<Box<dyn Layer>> {
        match self {
            Self::Java => vec![Box::new(CommonLayer), Box::new(JavaLayer)],
            Self::Net => vec![Box::new(CommonLayer), Box::new(NetLayer)],
            Self::Fvc => vec![
                Box::new(CommonLayer),
                Box::new(NetLayer),
                Box::new(SubmissionLayer),
            ],
        }
    }

    /// Registry with identity and ecosystem layers applied.
    pub fn registry(self, env: Environment, identity: &Identity) -> ProjconfResult<Registry> {
        let mut registry = Registry::new(env);
        registry.load_layer(&IdentityLayer::new(identity.clone()))?;
        for layer in self.layers() {
            registry.load_layer(layer.as_ref())?;
        }
        Ok(registry)
    }

    /// Ordered artifact actions for this ecosystem.
    pub fn plan(self, r: &Registry) -> ProjconfResult<ArtifactPlan> {
        match self {
            Self::Java => java_plan(r),
            Self::Net => net_plan(r),
            Self::Fvc => {
                let mut plan = ArtifactPlan::new();
                plan.write_executable("scripts/publish.sh", ArtifactKind::PublishScript);
                plan.extend(net_plan(r)?);
                Ok(plan)
            }
        }
    }
}

fn java_plan(r: &Registry) -> ProjconfResult<ArtifactPlan> {
    let open = r.flag("is_opensource")?;
    let workflows = PathBuf::from(r.text("workflows_directory")?);

    let mut plan = ArtifactPlan::new();
    plan.write(".gitignore", ArtifactKind::Gitignore);
    if open {
        plan.write("LICENSE", ArtifactKind::License)
            .write("NOTICE", ArtifactKind::Notice)
            .write(workflows.join("build.yml"), ArtifactKind::BuildWorkflow);
    }
    if r.flag("maven_central")? {
        plan.write(workflows.join("release.yml"), ArtifactKind::MavenReleaseWorkflow);
    }
    plan.write("pom.xml", ArtifactKind::Pom);
    if open {
        plan.write("CONTRIBUTING.md", ArtifactKind::ContributionGuidelines);
    }
    plan.write("README.md", ArtifactKind::Readme);
    Ok(plan)
}

fn net_plan(r: &Registry) -> ProjconfResult<ArtifactPlan> {
    let open = r.flag("is_opensource")?;
    let workflows = PathBuf::from(r.text("workflows_directory")?);
    let namespace = r.text("root_namespace")?;

    let mut plan = ArtifactPlan::new();
    plan.write(".gitignore", ArtifactKind::Gitignore);
    if open {
        plan.write("LICENSE", ArtifactKind::License)
            .write("NOTICE", ArtifactKind::Notice);
    }
    if r.flag("nuget_release")? {
        plan.write(workflows.join("release.yml"), ArtifactKind::DotnetReleaseWorkflow);
    }
    plan.write(
        PathBuf::from(&namespace).join(format!("{namespace}.csproj")),
        ArtifactKind::Csproj,
    );
    if r.flag("has_tests")? {
        let tests = format!("{namespace}.Tests");
        plan.write(
            PathBuf::from(&tests).join(format!("{tests}.csproj")),
            ArtifactKind::TestCsproj,
        );
    }
    plan.write(format!("{namespace}.sln"), ArtifactKind::Solution);
    if open {
        plan.write("CONTRIBUTING.md", ArtifactKind::ContributionGuidelines);
    }
    plan.write("README.md", ArtifactKind::Readme)
        .remove(workflows.join(OBSOLETE_NUGET_WORKFLOW));
    Ok(plan)
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Ecosystem {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "java" | "maven" => Ok(Self::Java),
            "net" | "dotnet" | ".net" => Ok(Self::Net),
            "fvc" => Ok(Self::Fvc),
            other => Err(DomainError::InvalidSetting {
                key: "ecosystem".into(),
                reason: format!("unknown ecosystem '{other}' (expected java, net or fvc)"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::application::environment::fixture_environment;
    use crate::domain::{ArtifactAction, SettingsLayer};

    fn plan_paths(ecosystem: Ecosystem, project: &str, settings: SettingsLayer) -> Vec<String> {
        let r = ecosystem
            .registry(fixture_environment(project, &[], &[]), &Identity::default())
            .unwrap()
            .with_layer(&settings)
            .unwrap();
        ecosystem
            .plan(&r)
            .unwrap()
            .actions()
            .iter()
            .map(|a| match a {
                ArtifactAction::Write { path, .. } => path.display().to_string(),
                ArtifactAction::Remove { path } => format!("-{}", path.display()),
            })
            .collect()
    }

    #[test]
    fn java_library_plan() {
        assert_eq!(
            plan_paths(Ecosystem::Java, "/work/demo", SettingsLayer::new("none")),
            [
                ".gitignore",
                "LICENSE",
                "NOTICE",
                ".github/workflows/build.yml",
                ".github/workflows/release.yml",
                "pom.xml",
                "CONTRIBUTING.md",
                "README.md",
            ]
        );
    }

    #[test]
    fn closed_source_java_plan_keeps_manifest_only_extras_out() {
        let closed = SettingsLayer::new("p").with("is_opensource", false).unwrap();
        assert_eq!(
            plan_paths(Ecosystem::Java, "/work/demo", closed),
            [".gitignore", "pom.xml", "README.md"]
        );
    }

    #[test]
    fn net_library_plan_ends_with_obsolete_removal() {
        assert_eq!(
            plan_paths(Ecosystem::Net, "/work/Demo", SettingsLayer::new("none")),
            [
                ".gitignore",
                "LICENSE",
                "NOTICE",
                ".github/workflows/release.yml",
                "Demo/Demo.csproj",
                "Demo.Tests/Demo.Tests.csproj",
                "Demo.sln",
                "CONTRIBUTING.md",
                "README.md",
                "-.github/workflows/nuget-release.yml",
            ]
        );
    }

    #[test]
    fn fvc_plan_starts_with_executable_publish_script() {
        let settings = SettingsLayer::new("p")
            .with("benchmark_abbreviation", "STFV")
            .unwrap();
        let r = Ecosystem::Fvc
            .registry(fixture_environment("/work/fvc", &[], &[]), &Identity::default())
            .unwrap()
            .with_layer(&settings)
            .unwrap();
        let plan = Ecosystem::Fvc.plan(&r).unwrap();

        assert_eq!(
            plan.actions()[0],
            ArtifactAction::Write {
                path: "scripts/publish.sh".into(),
                kind: ArtifactKind::PublishScript,
                executable: true,
            }
        );
        let writes: Vec<&Path> = plan.writes().collect();
        assert!(writes.contains(&Path::new("SourceAFIS.FVC.STFV/SourceAFIS.FVC.STFV.csproj")));
        assert!(!writes.iter().any(|p| p.to_string_lossy().contains(".Tests")));
        assert!(!writes.contains(&Path::new(".github/workflows/release.yml")));
    }

    #[test]
    fn registry_records_layer_stack() {
        let r = Ecosystem::Fvc
            .registry(fixture_environment("/work/fvc", &[], &[]), &Identity::default())
            .unwrap();
        assert_eq!(r.layers(), ["identity", "common", "net", "fvc"]);
    }

    #[test]
    fn parses_names_and_aliases() {
        assert_eq!("Java".parse::<Ecosystem>().unwrap(), Ecosystem::Java);
        assert_eq!("dotnet".parse::<Ecosystem>().unwrap(), Ecosystem::Net);
        assert!("rust".parse::<Ecosystem>().is_err());
    }
}
