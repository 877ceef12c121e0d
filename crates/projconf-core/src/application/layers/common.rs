//! Attributes shared by every ecosystem.

use chrono::{Datelike, Local};

use crate::domain::{Layer, Link, Registry, Value, extract_lead};
use crate::error::{ProjconfError, ProjconfResult};

/// Base layer: resources, repository, license, website and README defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommonLayer;

impl Layer for CommonLayer {
    fn name(&self) -> &str {
        "common"
    }

    fn apply(&self, r: &mut Registry) -> ProjconfResult<()> {
        resources(r);
        repository(r);
        general(r);
        license(r);
        website(r);
        readme(r);
        Ok(())
    }
}

fn resources(r: &mut Registry) {
    r.constant("lang_directory", Value::Null);
    r.define("apache_license_text", |r| {
        Ok(r.env().resources().read("license.txt")?.into())
    });
    r.define("gitignore_text", |r| {
        let lang = r.text("lang_directory")?;
        Ok(r.env().resources().read(&format!("{lang}/gitignore.txt"))?.into())
    });
    r.define("current_year", |_| Ok(i64::from(Local::now().year()).into()));
}

fn repository(r: &mut Registry) {
    r.define("project_directory", |r| {
        Ok(r.env().project_dir().display().to_string().into())
    });
    r.constant("workflows_directory", ".github/workflows");
    r.define("repository_name", |r| {
        r.env()
            .project_dir()
            .file_name()
            .map(|name| Value::from(name.to_string_lossy().into_owned()))
            .ok_or_else(|| ProjconfError::Configuration {
                message: format!(
                    "project directory {} has no name",
                    r.env().project_dir().display()
                ),
            })
    });
    r.define("github_repository_url", |r| {
        if !r.flag("is_opensource")? {
            return Ok(Value::Null);
        }
        Ok(format!(
            "https://github.com/{}/{}",
            r.text("code_owner")?,
            r.text("repository_name")?
        )
        .into())
    });
    r.define("bitbucket_repository_url", |r| {
        Ok(format!(
            "https://bitbucket.org/{}/{}",
            r.text("code_owner")?,
            r.text("repository_name")?
        )
        .into())
    });
    r.define("repository_url", |r| {
        if r.flag("is_opensource")? {
            r.resolve("github_repository_url")
        } else {
            r.resolve("bitbucket_repository_url")
        }
    });
}

fn general(r: &mut Registry) {
    r.define("pretty_name", |r| r.resolve("repository_name"));
    r.constant("is_opensource", true);
    r.define("project_version", |r| {
        let text = r.env().read_project_file("scripts/version.txt")?;
        Ok(text.trim().into())
    });
    r.constant("generator_name", "projconf");
    r.constant("settings_file", "scripts/projconf.toml");
}

fn license(r: &mut Registry) {
    r.define("inception_year", |r| r.resolve("current_year"));
    r.define("license_id", |r| open_source_only(r, |_| Ok("Apache-2.0".into())));
    r.define("license_name", |r| {
        open_source_only(r, |_| Ok("Apache License 2.0".into()))
    });
    r.define("license_url", |r| {
        open_source_only(r, |r| Ok(repository_file_url(r, "LICENSE")?.into()))
    });
    r.define("license_text", |r| {
        open_source_only(r, |r| r.resolve("apache_license_text"))
    });
}

fn website(r: &mut Registry) {
    r.define("has_website", |r| r.resolve("is_opensource"));
    r.define("subdomain", |r| r.resolve("repository_name"));
    r.define("website", |r| {
        Ok(format!(
            "https://{}.{}/",
            r.text("subdomain")?,
            r.text("website_domain")?
        )
        .into())
    });
    r.define("homepage", |r| r.resolve("website"));
    r.define_cached("homepage_html", |r| {
        Ok(r.env().fetcher().fetch(&r.text("homepage")?)?.into())
    });
    r.define_cached("homepage_lead", |r| {
        let html = r.text("homepage_html")?;
        Ok(extract_lead(&html, &r.text("homepage")?)?.into())
    });
}

fn readme(r: &mut Registry) {
    r.constant("standard_badges", "");
    r.define("badges", |r| r.resolve("standard_badges"));
    r.constant("readme_banner", Value::Null);

    r.constant("stable_status", "Stable and maintained.");
    r.constant("experimental_status", "Experimental.");
    r.constant("obsolete_status", "Obsolete. No longer maintained.");
    r.constant("unpublished_status", "Experimental. Unpublished.");
    r.define("project_status", |r| {
        if r.flag("is_opensource")? {
            r.resolve("stable_status")
        } else {
            r.resolve("unpublished_status")
        }
    });

    r.define("standard_documentation_links", |r| {
        let mut links = Vec::new();
        if r.flag("has_website")? {
            links.push(Link::new("Homepage", r.text("homepage")?));
        }
        Ok(links.into())
    });
    r.define("documentation_links", |r| {
        r.resolve("standard_documentation_links")
    });
    r.constant("documentation_comment", Value::Null);

    r.constant("md_description_fallback", Value::Null);
    r.define("md_description", |r| {
        if !r.flag("has_website")? {
            return r.resolve("md_description_fallback");
        }
        Ok(format!(
            "{}\n\nMore on [homepage]({}).",
            r.text("homepage_lead")?,
            r.text("homepage")?
        )
        .into())
    });
    r.constant("embeddable_readme", false);
}

fn open_source_only<F>(r: &Registry, value: F) -> ProjconfResult<Value>
where
    F: FnOnce(&Registry) -> ProjconfResult<Value>,
{
    if r.flag("is_opensource")? {
        value(r)
    } else {
        Ok(Value::Null)
    }
}

/// Link to a file on the default branch of the repository.
pub fn repository_file_url(r: &Registry, path: &str) -> ProjconfResult<String> {
    Ok(format!("{}/blob/master/{path}", r.text("repository_url")?))
}

/// Link to a directory on the default branch of the repository.
pub fn repository_dir_url(r: &Registry, path: &str) -> ProjconfResult<String> {
    Ok(format!("{}/tree/master/{path}", r.text("repository_url")?))
}

/// README link target: absolute when the README is shown outside the
/// repository (package galleries), relative otherwise.
pub fn readme_url(r: &Registry, path: &str) -> ProjconfResult<String> {
    if r.flag("embeddable_readme")? {
        repository_file_url(r, path)
    } else {
        Ok(path.to_string())
    }
}

pub fn readme_dir_url(r: &Registry, path: &str) -> ProjconfResult<String> {
    if r.flag("embeddable_readme")? {
        repository_dir_url(r, path)
    } else {
        Ok(path.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::environment::{Identity, fixture_environment};
    use crate::application::layers::IdentityLayer;
    use crate::domain::SettingsLayer;

    fn common(files: &[(&str, &str)], pages: &[(&str, &str)]) -> Registry {
        Registry::new(fixture_environment("/work/demo", files, pages))
            .with_layer(&IdentityLayer::new(Identity::default()))
            .unwrap()
            .with_layer(&CommonLayer)
            .unwrap()
    }

    #[test]
    fn open_source_defaults() {
        let r = common(&[("scripts/version.txt", " 2.1.0\n")], &[]);

        assert_eq!(r.text("repository_name").unwrap(), "demo");
        assert_eq!(r.text("pretty_name").unwrap(), "demo");
        assert_eq!(r.text("project_version").unwrap(), "2.1.0");
        assert_eq!(
            r.text("repository_url").unwrap(),
            "https://github.com/example/demo"
        );
        assert_eq!(
            r.text("license_url").unwrap(),
            "https://github.com/example/demo/blob/master/LICENSE"
        );
        assert_eq!(r.text("homepage").unwrap(), "https://demo.example.com/");
        assert_eq!(r.text("project_status").unwrap(), "Stable and maintained.");
        assert_eq!(
            r.links("documentation_links").unwrap(),
            vec![Link::new("Homepage", "https://demo.example.com/")]
        );
    }

    #[test]
    fn closed_source_switches_repository_and_drops_license() {
        let settings = SettingsLayer::new("project")
            .with("is_opensource", false)
            .unwrap();
        let r = common(&[], &[]).with_layer(&settings).unwrap();

        assert_eq!(
            r.text("repository_url").unwrap(),
            "https://bitbucket.org/example/demo"
        );
        assert_eq!(r.opt_text("license_id").unwrap(), None);
        assert_eq!(r.opt_text("github_repository_url").unwrap(), None);
        assert!(!r.flag("has_website").unwrap());
        assert!(r.links("documentation_links").unwrap().is_empty());
        assert_eq!(r.text("project_status").unwrap(), "Experimental. Unpublished.");
        assert_eq!(r.opt_text("md_description").unwrap(), None);
    }

    #[test]
    fn description_comes_from_homepage_lead() {
        let r = common(
            &[],
            &[(
                "https://demo.example.com/",
                "<aside><p>ad</p></aside><p>Demo does <a href=\"docs\">things</a>.</p>",
            )],
        );

        assert_eq!(
            r.text("md_description").unwrap(),
            "Demo does [things](https://demo.example.com/docs).\n\nMore on [homepage](https://demo.example.com/)."
        );
    }

    #[test]
    fn gitignore_follows_language_directory() {
        let mut r = common(&[], &[]);
        assert!(r.text("gitignore_text").is_err());

        r.constant("lang_directory", "java");
        assert_eq!(r.text("gitignore_text").unwrap(), "/target/\n");
    }

    #[test]
    fn readme_links_become_absolute_when_embeddable() {
        let mut r = common(&[], &[]);
        assert_eq!(readme_url(&r, "LICENSE").unwrap(), "LICENSE");

        r.constant("embeddable_readme", true);
        assert_eq!(
            readme_url(&r, "LICENSE").unwrap(),
            "https://github.com/example/demo/blob/master/LICENSE"
        );
        assert_eq!(
            readme_dir_url(&r, "docs").unwrap(),
            "https://github.com/example/demo/tree/master/docs"
        );
    }
}
