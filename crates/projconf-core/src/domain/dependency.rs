//! Dependency specifications for build manifests.
//!
//! Settings list dependencies as compact strings:
//!
//! ```text
//! org.slf4j:slf4j-api:1.7.32
//! org.junit.jupiter:junit-jupiter:5.8.2:test
//! com.example:lib:1.0 !commons-logging:commons-logging
//! <dependency>...</dependency>          (raw XML, emitted as-is)
//! NUnit:3.13.3                          (NuGet)
//! ```

use std::fmt;

use crate::domain::error::{DomainError, DomainResult};

/// Well-known Maven dependencies addressable by a short name.
const MAVEN_ALIASES: &[(&str, &str)] = &[
    ("slf4j", "org.slf4j:slf4j-api:1.7.32"),
    ("junit", "org.junit.jupiter:junit-jupiter:5.8.2:test"),
    ("hamcrest", "org.hamcrest:hamcrest:2.2:test"),
    ("mockito", "org.mockito:mockito-core:4.2.0:test"),
];

/// One entry of the `dependencies` list of a Maven project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MavenEntry {
    Coordinates(MavenDependency),
    /// Literal XML placed inside `<dependencies>`.
    Raw(String),
}

impl MavenEntry {
    pub fn parse(spec: &str) -> DomainResult<Self> {
        let trimmed = spec.trim();
        if trimmed.starts_with('<') {
            return Ok(Self::Raw(trimmed.to_string()));
        }
        MavenDependency::parse(trimmed).map(Self::Coordinates)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MavenDependency {
    pub group: String,
    pub artifact: String,
    pub version: String,
    pub scope: Option<String>,
    pub exclusions: Vec<MavenExclusion>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MavenExclusion {
    pub group: String,
    pub artifact: String,
}

impl MavenDependency {
    /// Parse `group:artifact:version[:scope]` followed by any number of
    /// whitespace-separated `!group:artifact` exclusions.
    pub fn parse(spec: &str) -> DomainResult<Self> {
        let mut tokens = spec.split_whitespace();
        let head = tokens.next().ok_or_else(|| invalid(spec, "empty"))?;
        let head = MAVEN_ALIASES
            .iter()
            .find(|(alias, _)| *alias == head)
            .map_or(head, |(_, expanded)| *expanded);

        let fields: Vec<&str> = head.split(':').collect();
        let (group, artifact, version, scope) = match fields.as_slice() {
            [g, a, v] => (g, a, v, None),
            [g, a, v, s] => (g, a, v, Some(s.to_string())),
            _ => {
                return Err(invalid(
                    spec,
                    "expected group:artifact:version[:scope]",
                ));
            }
        };
        if [group, artifact, version].iter().any(|f| f.is_empty()) {
            return Err(invalid(spec, "empty coordinate"));
        }

        let exclusions = tokens
            .map(|token| {
                let body = token
                    .strip_prefix('!')
                    .ok_or_else(|| invalid(spec, "exclusions start with '!'"))?;
                match body.split(':').collect::<Vec<_>>().as_slice() {
                    [g, a] if !g.is_empty() && !a.is_empty() => Ok(MavenExclusion {
                        group: g.to_string(),
                        artifact: a.to_string(),
                    }),
                    _ => Err(invalid(spec, "exclusions look like !group:artifact")),
                }
            })
            .collect::<DomainResult<Vec<_>>>()?;

        Ok(Self {
            group: group.to_string(),
            artifact: artifact.to_string(),
            version: version.to_string(),
            scope,
            exclusions,
        })
    }
}

impl fmt::Display for MavenDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.version)?;
        if let Some(scope) = &self.scope {
            write!(f, ":{scope}")?;
        }
        Ok(())
    }
}

/// One `PackageReference` of a .NET project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NugetPackage {
    pub name: String,
    pub version: String,
}

impl NugetPackage {
    /// Parse `Package:Version`.
    pub fn parse(spec: &str) -> DomainResult<Self> {
        match spec.trim().split(':').collect::<Vec<_>>().as_slice() {
            [name, version] if !name.is_empty() && !version.is_empty() => Ok(Self {
                name: name.to_string(),
                version: version.to_string(),
            }),
            _ => Err(invalid(spec, "expected Package:Version")),
        }
    }
}

fn invalid(spec: &str, reason: &str) -> DomainError {
    DomainError::InvalidDependency {
        spec: spec.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_coordinates_with_scope_and_exclusions() {
        let dep = MavenDependency::parse(
            "com.example:lib:1.0:test !commons-logging:commons-logging !a:b",
        )
        .unwrap();
        assert_eq!(dep.group, "com.example");
        assert_eq!(dep.scope.as_deref(), Some("test"));
        assert_eq!(dep.exclusions.len(), 2);
        assert_eq!(dep.exclusions[1].artifact, "b");
    }

    #[test]
    fn aliases_expand_to_pinned_coordinates() {
        let dep = MavenDependency::parse("junit").unwrap();
        assert_eq!(dep.to_string(), "org.junit.jupiter:junit-jupiter:5.8.2:test");
    }

    #[test]
    fn wrong_field_count_is_rejected() {
        for spec in ["a:b", "a:b:c:d:e", "", "a::1", "a:b:1 c:d", "a:b:1 !c"] {
            assert!(
                matches!(
                    MavenDependency::parse(spec),
                    Err(DomainError::InvalidDependency { .. })
                ),
                "{spec:?} should be rejected"
            );
        }
    }

    #[test]
    fn xml_entries_pass_through() {
        let entry = MavenEntry::parse("  <dependency><groupId>x</groupId></dependency>").unwrap();
        assert!(matches!(entry, MavenEntry::Raw(xml) if xml.starts_with("<dependency>")));
    }

    #[test]
    fn nuget_packages_need_name_and_version() {
        let pkg = NugetPackage::parse("SourceAFIS:3.14.0").unwrap();
        assert_eq!(pkg.name, "SourceAFIS");
        assert_eq!(pkg.version, "3.14.0");
        assert!(NugetPackage::parse("NUnit").is_err());
        assert!(NugetPackage::parse("a:b:c").is_err());
    }
}
