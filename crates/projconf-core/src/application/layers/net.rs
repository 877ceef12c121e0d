//! .NET / NuGet project attributes.

use crate::domain::{Emitter, Layer, Registry, Value};
use crate::error::ProjconfResult;

/// Test project packages every .NET library gets.
pub const STANDARD_TEST_DEPENDENCIES: [&str; 3] = [
    "NUnit:3.13.3",
    "NUnit3TestAdapter:4.2.1",
    "Microsoft.NET.Test.Sdk:17.2.0",
];

/// .NET specialization of [`CommonLayer`](super::CommonLayer).
#[derive(Debug, Clone, Copy, Default)]
pub struct NetLayer;

impl Layer for NetLayer {
    fn name(&self) -> &str {
        "net"
    }

    fn apply(&self, r: &mut Registry) -> ProjconfResult<()> {
        r.constant("lang_directory", "net");
        r.define("pretty_name", |r| r.resolve("root_namespace"));

        // NuGet package metadata
        r.define("nuget_title", |r| r.resolve("pretty_name"));
        r.constant("nuget_description", Value::Null);
        r.constant("nuget_tags", Value::Null);
        r.define("nuget_icon", |r| {
            let icon = format!("{}/icon.png", r.text("root_namespace")?);
            Ok(if r.env().project_file_exists(icon) {
                "icon.png".into()
            } else {
                Value::Null
            })
        });

        // Code structure
        r.constant("is_library", true);
        r.define("root_namespace", |r| r.resolve("repository_name"));
        r.constant("assembly_name", Value::Null);
        r.constant("extra_sln_projects", Value::List(Vec::new()));
        r.define("sln_projects", |r| {
            let namespace = r.text("root_namespace")?;
            let mut projects = vec![namespace.clone()];
            if r.flag("has_tests")? {
                projects.push(format!("{namespace}.Tests"));
            }
            projects.extend(r.list("extra_sln_projects")?);
            Ok(projects.into())
        });

        // Build features
        r.constant("target_framework", "5.0");
        r.define("nuget_release", |r| {
            Ok((r.flag("is_library")? && r.flag("is_opensource")?).into())
        });
        r.define("has_tests", |r| r.resolve("is_library"));
        // Hosts the reusable release workflow the generated one delegates to.
        r.define("shared_workflows_repository", |r| {
            Ok(format!("{}/project-config", r.text("code_owner")?).into())
        });

        r.constant("dependencies", Value::List(Vec::new()));
        r.constant(
            "standard_test_dependencies",
            STANDARD_TEST_DEPENDENCIES
                .iter()
                .map(|d| d.to_string())
                .collect::<Vec<_>>(),
        );
        r.define("test_dependencies", |r| {
            r.resolve("standard_test_dependencies")
        });

        // Readme
        r.define("md_description_fallback", |r| r.resolve("nuget_description"));
        r.constant("embeddable_readme", true);
        r.define("standard_badges", |r| {
            Ok(Emitter::capture(|out| {
                if r.flag("nuget_release")? {
                    let ns = r.text("root_namespace")?;
                    out.line(format!(
                        "[![Nuget](https://img.shields.io/nuget/v/{ns})](https://www.nuget.org/packages/{ns}/)"
                    ));
                }
                Ok(())
            })?
            .into())
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::environment::{Identity, fixture_environment};
    use crate::application::layers::{CommonLayer, IdentityLayer};
    use crate::domain::SettingsLayer;

    fn net(files: &[(&str, &str)]) -> Registry {
        Registry::new(fixture_environment("/work/Demo.Lib", files, &[]))
            .with_layer(&IdentityLayer::new(Identity::default()))
            .unwrap()
            .with_layer(&CommonLayer)
            .unwrap()
            .with_layer(&NetLayer)
            .unwrap()
    }

    #[test]
    fn namespace_and_solution_projects() {
        let r = net(&[]);
        assert_eq!(r.text("pretty_name").unwrap(), "Demo.Lib");
        assert_eq!(r.list("sln_projects").unwrap(), ["Demo.Lib", "Demo.Lib.Tests"]);
        assert!(r.flag("nuget_release").unwrap());
        assert_eq!(r.list("test_dependencies").unwrap().len(), 3);
    }

    #[test]
    fn icon_is_packed_only_when_present() {
        assert_eq!(net(&[]).opt_text("nuget_icon").unwrap(), None);
        let r = net(&[("Demo.Lib/icon.png", "")]);
        assert_eq!(r.text("nuget_icon").unwrap(), "icon.png");
    }

    #[test]
    fn description_falls_back_to_nuget_description_without_website() {
        let settings = SettingsLayer::new("project")
            .with("has_website", false)
            .unwrap()
            .with("nuget_description", "Fingerprint matcher.")
            .unwrap();
        let r = net(&[]).with_layer(&settings).unwrap();
        assert_eq!(r.text("md_description").unwrap(), "Fingerprint matcher.");
    }

    #[test]
    fn applications_have_no_tests_or_badge() {
        let settings = SettingsLayer::new("project")
            .with("is_library", false)
            .unwrap();
        let r = net(&[]).with_layer(&settings).unwrap();
        assert_eq!(r.list("sln_projects").unwrap(), ["Demo.Lib"]);
        assert!(r.block("badges").unwrap().is_empty());
    }
}
