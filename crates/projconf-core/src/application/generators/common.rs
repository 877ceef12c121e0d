//! Ecosystem-neutral artifacts: ignore file, license, notice, guides, readme.

use super::marker;
use crate::application::layers::readme_url;
use crate::domain::{Emitter, Registry};
use crate::error::ProjconfResult;

pub fn gitignore(r: &Registry, out: &mut Emitter) -> ProjconfResult<()> {
    out.lines(&r.text("gitignore_text")?);
    Ok(())
}

/// License text, verbatim.
pub fn license(r: &Registry, out: &mut Emitter) -> ProjconfResult<()> {
    out.raw(r.text("license_text")?);
    Ok(())
}

pub fn notice(r: &Registry, out: &mut Emitter) -> ProjconfResult<()> {
    let author = r.text("author_name")?;
    out.line(format!("{author}'s {}", r.text("pretty_name")?));
    if r.flag("has_website")? {
        out.line(r.text("homepage")?);
    }
    out.lines(&format!(
        "
        Copyright {}-{} {author} and contributors
        Distributed under {}.
        ",
        r.text("inception_year")?,
        r.text("current_year")?,
        r.text("license_name")?,
    ));
    Ok(())
}

pub fn contribution_guidelines(r: &Registry, out: &mut Emitter) -> ProjconfResult<()> {
    let name = r.text("pretty_name")?;
    let repository = r.text("repository_name")?;
    let settings = r.text("settings_file")?;
    out.lines(&format!(
        "
        <!--- {marker} --->
        # How to contribute to {name}

        Thank you for taking interest in {name}. This document provides guidance for contributors.

        ## Authoritative repository

        Sources are mirrored on several sites. You can submit issues and pull requests on any mirror.

        * [{repository} @ GitHub]({github})
        * [{repository} @ Bitbucket]({bitbucket})

        ## Issues

        Both bug reports and feature requests are welcome. There is no free support,
        but it's perfectly reasonable to open issues asking for more documentation or better usability.

        ## Pull requests

        Pull requests are generally welcome.
        If you would like to make large or controversial changes, open an issue first to discuss your idea.

        Don't worry about formatting and naming too much. Code will be reformatted after merge.
        Just don't run your formatter on whole source files, because it makes diffs hard to understand.

        ## Generated code

        Some files in this repository are generated by {generator} from [{settings}]({settings}).
        The intent is to enforce conventions and to reduce maintenance burden.
        If you need to modify generated files, just do so manually and settings will be updated after merge.

        ## License

        Your submissions will be distributed under [{license}](LICENSE).
        ",
        marker = marker(r)?,
        github = r.text("github_repository_url")?,
        bitbucket = r.text("bitbucket_repository_url")?,
        generator = r.text("generator_name")?,
        license = r.text("license_name")?,
    ));
    Ok(())
}

pub fn readme(r: &Registry, out: &mut Emitter) -> ProjconfResult<()> {
    let open = r.flag("is_opensource")?;
    let has_website = r.flag("has_website")?;

    out.line(format!("<!--- {} --->", marker(r)?));
    if open {
        if let Some(banner) = r.opt_text("readme_banner")? {
            out.line(banner).blank();
        }
    }
    out.line(format!("# {}", r.text("pretty_name")?));

    let badges = r.block("badges")?;
    if !badges.is_empty() {
        out.blank().raw(badges);
    }
    if let Some(description) = r.opt_text("md_description")? {
        out.blank().lines(&description);
    }

    out.blank().line("## Status").blank();
    out.lines(&r.text("project_status")?);

    if has_website {
        out.blank().lines(&format!(
            "
            ## Getting started

            See [homepage]({}).
            ",
            r.text("homepage")?
        ));
    }

    let links = r.links("documentation_links")?;
    let comment = r.opt_text("documentation_comment")?;
    if !links.is_empty() || comment.is_some() {
        out.blank().line("## Documentation");
        if !links.is_empty() {
            out.blank();
            for link in &links {
                out.line(format!("* [{}]({})", link.title, link.url));
            }
        }
        if let Some(comment) = comment {
            out.blank().lines(&comment);
        }
    } else if open {
        out.blank().lines(
            "
            ## Documentation

            None yet. Review source code.
            ",
        );
    }

    if open {
        out.blank().lines(&format!(
            "
            ## Feedback

            Bug reports and pull requests are welcome. See [CONTRIBUTING.md]({}).

            ## License

            Distributed under [{}]({}).
            ",
            readme_url(r, "CONTRIBUTING.md")?,
            r.text("license_name")?,
            readme_url(r, "LICENSE")?,
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::environment::{Identity, fixture_environment};
    use crate::application::generators::render;
    use crate::application::layers::{CommonLayer, IdentityLayer};
    use crate::domain::{ArtifactKind, SettingsLayer};

    fn registry(settings: SettingsLayer) -> Registry {
        Registry::new(fixture_environment("/work/demo", &[], &[]))
            .with_layer(&IdentityLayer::new(Identity::default()))
            .unwrap()
            .with_layer(&CommonLayer)
            .unwrap()
            .with_layer(&settings)
            .unwrap()
    }

    fn settings() -> SettingsLayer {
        SettingsLayer::new("project")
            .with("md_description", "Demo does things.")
            .unwrap()
            .with("inception_year", 2020)
            .unwrap()
            .with("current_year", 2024)
            .unwrap()
    }

    #[test]
    fn notice_lists_author_homepage_and_license() {
        let text = render(ArtifactKind::Notice, &registry(settings())).unwrap();
        assert_eq!(
            text,
            "Project Author's demo\n\
             https://demo.example.com/\n\
             Copyright 2020-2024 Project Author and contributors\n\
             Distributed under Apache License 2.0.\n"
        );
    }

    #[test]
    fn open_source_readme() {
        let text = render(ArtifactKind::Readme, &registry(settings())).unwrap();
        assert_eq!(
            text,
            "<!--- Generated by projconf --->\n\
             # demo\n\
             \n\
             Demo does things.\n\
             \n\
             ## Status\n\
             \n\
             Stable and maintained.\n\
             \n\
             ## Getting started\n\
             \n\
             See [homepage](https://demo.example.com/).\n\
             \n\
             ## Documentation\n\
             \n\
             * [Homepage](https://demo.example.com/)\n\
             \n\
             ## Feedback\n\
             \n\
             Bug reports and pull requests are welcome. See [CONTRIBUTING.md](CONTRIBUTING.md).\n\
             \n\
             ## License\n\
             \n\
             Distributed under [Apache License 2.0](LICENSE).\n"
        );
    }

    #[test]
    fn closed_source_readme_is_minimal() {
        let closed = SettingsLayer::new("project")
            .with("is_opensource", false)
            .unwrap();
        let text = render(ArtifactKind::Readme, &registry(closed)).unwrap();
        assert_eq!(
            text,
            "<!--- Generated by projconf --->\n\
             # demo\n\
             \n\
             ## Status\n\
             \n\
             Experimental. Unpublished.\n"
        );
    }

    #[test]
    fn readme_banner_and_badges_precede_description() {
        let mut custom = settings()
            .with("readme_banner", "[![banner](b.svg)](b)")
            .unwrap()
            .with("badges", "[![x](x.svg)](x)\n")
            .unwrap();
        custom.insert_assignment("documentation_comment=See the wiki.").unwrap();
        let text = render(ArtifactKind::Readme, &registry(custom)).unwrap();

        assert!(text.starts_with(
            "<!--- Generated by projconf --->\n[![banner](b.svg)](b)\n\n# demo\n\n[![x](x.svg)](x)\n\nDemo does things.\n"
        ));
        assert!(text.contains("* [Homepage](https://demo.example.com/)\n\nSee the wiki.\n"));
    }

    #[test]
    fn contribution_guidelines_link_both_mirrors() {
        let text = render(ArtifactKind::ContributionGuidelines, &registry(settings())).unwrap();
        assert!(text.starts_with("<!--- Generated by projconf --->\n# How to contribute to demo\n\n"));
        assert!(text.contains("* [demo @ GitHub](https://github.com/example/demo)\n"));
        assert!(text.contains("* [demo @ Bitbucket](https://bitbucket.org/example/demo)\n"));
        assert!(text.contains("from [scripts/projconf.toml](scripts/projconf.toml)."));
        assert!(text.ends_with("Your submissions will be distributed under [Apache License 2.0](LICENSE).\n"));
    }

    #[test]
    fn license_is_verbatim_and_gitignore_is_normalized() {
        let mut r = registry(settings());
        assert_eq!(
            render(ArtifactKind::License, &r).unwrap(),
            "Apache License\nVersion 2.0\n"
        );
        r.constant("lang_directory", "net");
        assert_eq!(render(ArtifactKind::Gitignore, &r).unwrap(), "bin/\nobj/\n");
    }
}
