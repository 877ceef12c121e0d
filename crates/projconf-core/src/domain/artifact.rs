//! Artifact plans: the ordered set of files one run writes or removes.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Which generator renders an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Gitignore,
    License,
    Notice,
    ContributionGuidelines,
    Readme,
    BuildWorkflow,
    MavenReleaseWorkflow,
    DotnetReleaseWorkflow,
    Pom,
    Csproj,
    TestCsproj,
    Solution,
    PublishScript,
}

impl ArtifactKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gitignore => "gitignore",
            Self::License => "license",
            Self::Notice => "notice",
            Self::ContributionGuidelines => "contribution_guidelines",
            Self::Readme => "readme",
            Self::BuildWorkflow => "build_workflow",
            Self::MavenReleaseWorkflow => "maven_release_workflow",
            Self::DotnetReleaseWorkflow => "dotnet_release_workflow",
            Self::Pom => "pom",
            Self::Csproj => "csproj",
            Self::TestCsproj => "test_csproj",
            Self::Solution => "solution",
            Self::PublishScript => "publish_script",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of a plan. Paths are relative to the project directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ArtifactAction {
    Write {
        path: PathBuf,
        kind: ArtifactKind,
        executable: bool,
    },
    Remove {
        path: PathBuf,
    },
}

impl ArtifactAction {
    pub fn path(&self) -> &Path {
        match self {
            Self::Write { path, .. } | Self::Remove { path } => path,
        }
    }
}

impl fmt::Display for ArtifactAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Write {
                path,
                kind,
                executable,
            } => {
                write!(f, "write  {} ({kind}", path.display())?;
                if *executable {
                    f.write_str(", executable")?;
                }
                f.write_str(")")
            }
            Self::Remove { path } => write!(f, "remove {}", path.display()),
        }
    }
}

/// Ordered artifact actions for one ecosystem.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArtifactPlan {
    actions: Vec<ArtifactAction>,
}

impl ArtifactPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write(&mut self, path: impl Into<PathBuf>, kind: ArtifactKind) -> &mut Self {
        self.actions.push(ArtifactAction::Write {
            path: path.into(),
            kind,
            executable: false,
        });
        self
    }

    pub fn write_executable(&mut self, path: impl Into<PathBuf>, kind: ArtifactKind) -> &mut Self {
        self.actions.push(ArtifactAction::Write {
            path: path.into(),
            kind,
            executable: true,
        });
        self
    }

    /// Delete a file left behind by an earlier layout.
    pub fn remove(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.actions.push(ArtifactAction::Remove { path: path.into() });
        self
    }

    /// Append another plan's actions after this one's.
    pub fn extend(&mut self, other: ArtifactPlan) -> &mut Self {
        self.actions.extend(other.actions);
        self
    }

    pub fn actions(&self) -> &[ArtifactAction] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn writes(&self) -> impl Iterator<Item = &Path> {
        self.actions.iter().filter_map(|a| match a {
            ArtifactAction::Write { path, .. } => Some(path.as_path()),
            ArtifactAction::Remove { .. } => None,
        })
    }
}

impl IntoIterator for ArtifactPlan {
    type Item = ArtifactAction;
    type IntoIter = std::vec::IntoIter<ArtifactAction>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_keeps_insertion_order() {
        let mut plan = ArtifactPlan::new();
        plan.write(".gitignore", ArtifactKind::Gitignore)
            .write("pom.xml", ArtifactKind::Pom)
            .remove(".github/workflows/nuget-release.yml");

        let paths: Vec<_> = plan.actions().iter().map(ArtifactAction::path).collect();
        assert_eq!(
            paths,
            [
                Path::new(".gitignore"),
                Path::new("pom.xml"),
                Path::new(".github/workflows/nuget-release.yml")
            ]
        );
        assert_eq!(plan.writes().count(), 2);
    }

    #[test]
    fn extend_appends_after_existing_actions() {
        let mut fvc = ArtifactPlan::new();
        fvc.write_executable("scripts/publish.sh", ArtifactKind::PublishScript);
        let mut net = ArtifactPlan::new();
        net.write("README.md", ArtifactKind::Readme);

        fvc.extend(net);
        assert_eq!(fvc.len(), 2);
        assert!(matches!(
            fvc.actions()[0],
            ArtifactAction::Write {
                executable: true,
                ..
            }
        ));
    }

    #[test]
    fn display_lists_action_and_generator() {
        let action = ArtifactAction::Write {
            path: "scripts/publish.sh".into(),
            kind: ArtifactKind::PublishScript,
            executable: true,
        };
        assert_eq!(
            action.to_string(),
            "write  scripts/publish.sh (publish_script, executable)"
        );
    }
}
