//! Maven project attributes.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{Emitter, Layer, Link, Registry, Value};
use crate::error::ProjconfResult;

const MODULE_INFO: &str = "src/main/java/module-info.java";

static MODULE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bmodule\s+([a-zA-Z0-9_.]+)").expect("valid regex"));
static EXPORTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s+exports\s+([a-zA-Z0-9_.]+);").expect("valid regex"));

/// Java / Maven specialization of [`CommonLayer`](super::CommonLayer).
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaLayer;

impl Layer for JavaLayer {
    fn name(&self) -> &str {
        "java"
    }

    fn apply(&self, r: &mut Registry) -> ProjconfResult<()> {
        r.constant("lang_directory", "java");
        r.define("scm_connection", |r| {
            Ok(format!("scm:git:{}.git", r.text("repository_url")?).into())
        });

        coordinates(r);
        code_structure(r);
        build_features(r);
        readme(r);
        Ok(())
    }
}

fn coordinates(r: &mut Registry) {
    r.define("pom_subgroup", |r| r.resolve("repository_name"));
    r.define("pom_group", |r| {
        Ok(format!(
            "{}.{}",
            r.text("package_namespace")?,
            r.text("pom_subgroup")?
        )
        .into())
    });
    r.define("pom_artifact", |r| r.resolve("repository_name"));
    r.define("pom_version", |r| r.resolve("project_version"));
    r.define("pom_name", |r| r.resolve("pretty_name"));
    r.constant("pom_description", Value::Null);

    r.define("subdomain", |r| r.resolve("pom_subgroup"));
    r.define("javadoc_site", |r| {
        Ok(format!("{}javadoc/", r.text("website")?).into())
    });
    r.define("javadoc_home", |r| {
        let site = r.text("javadoc_site")?;
        if !r.flag("is_module")? {
            return Ok(site.into());
        }
        let module = r.text("module_name")?;
        if r.flag("is_multi_package")? {
            return Ok(format!("{site}{module}/module-summary.html").into());
        }
        let package = r.text("main_package")?.replace('.', "/");
        Ok(format!("{site}{module}/{package}/package-summary.html").into())
    });
}

fn code_structure(r: &mut Registry) {
    r.constant("module_info_path", MODULE_INFO);
    r.define("is_module", |r| {
        Ok(r.env().project_file_exists(r.text("module_info_path")?).into())
    });
    r.define_cached("module_info_text", |r| {
        Ok(r.env().read_project_file(r.text("module_info_path")?)?.into())
    });
    r.define("module_name", |r| {
        let text = r.text("module_info_text")?;
        Ok(MODULE_NAME
            .captures(&text)
            .and_then(|c| c.get(1))
            .map(|m| Value::from(m.as_str()))
            .unwrap_or_default())
    });
    r.define("exported_packages", |r| {
        let text = r.text("module_info_text")?;
        Ok(EXPORTS
            .captures_iter(&text)
            .map(|c| c[1].to_string())
            .collect::<Vec<_>>()
            .into())
    });
    r.define("is_multi_package", |r| {
        Ok((r.flag("is_module")? && r.list("exported_packages")?.len() > 1).into())
    });
    r.define("main_package", |r| {
        if r.flag("is_module")? {
            return r.resolve("module_name");
        }
        Ok(format!(
            "{}.{}",
            r.text("package_namespace")?,
            r.text("pom_artifact")?.replace('-', ".")
        )
        .into())
    });
    r.constant("main_class_name", Value::Null);
    r.define("main_class", |r| match r.opt_text("main_class_name")? {
        Some(class) => Ok(format!("{}.{class}", r.text("main_package")?).into()),
        None => Ok(Value::Null),
    });
    r.define("is_library", |r| Ok(r.resolve("main_class")?.is_null().into()));
}

fn build_features(r: &mut Registry) {
    r.constant("jdk_version", 11);
    r.constant("jdk_preview", false);
    r.constant("jdk_parameter_names", false);
    r.define("maven_central", |r| {
        Ok((r.flag("is_library")? && r.flag("is_opensource")?).into())
    });
    r.define("test_coverage", |r| r.resolve("maven_central"));
    r.define("has_javadoc", |r| r.resolve("maven_central"));
    r.constant("dependencies", Value::List(Vec::new()));
    r.constant("javadoc_links", Value::List(Vec::new()));
}

fn readme(r: &mut Registry) {
    r.define("standard_badges", |r| {
        Ok(Emitter::capture(|out| {
            if r.flag("maven_central")? {
                let group = r.text("pom_group")?;
                let artifact = r.text("pom_artifact")?;
                out.line(format!(
                    "[![Maven Central](https://img.shields.io/maven-central/v/{group}/{artifact})](https://search.maven.org/artifact/{group}/{artifact})"
                ));
            }
            if r.flag("is_opensource")? {
                let github = r.text("github_repository_url")?;
                out.line(format!(
                    "[![Build status]({github}/workflows/build/badge.svg)]({github}/actions/workflows/build.yml)"
                ));
            }
            if r.flag("test_coverage")? {
                let owner = r.text("code_owner")?;
                let repo = r.text("repository_name")?;
                out.line(format!(
                    "[![Test coverage](https://codecov.io/gh/{owner}/{repo}/branch/master/graph/badge.svg)](https://codecov.io/gh/{owner}/{repo})"
                ));
            }
            Ok(())
        })?
        .into())
    });
    r.override_with("standard_documentation_links", |r, base| {
        let mut links = match base.resolve(r)? {
            Value::Links(links) => links,
            _ => Vec::new(),
        };
        if r.flag("has_javadoc")? {
            links.push(Link::new("Javadoc", r.text("javadoc_home")?));
        }
        Ok(links.into())
    });
}
