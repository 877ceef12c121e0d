//! FVC-onGoing benchmark submission attributes, layered over [`NetLayer`](super::NetLayer).

use crate::domain::{Layer, Link, Registry, Value};
use crate::error::ProjconfResult;

const FVC_ONGOING: &str = "https://biolab.csr.unibo.it/FVCOnGoing/UI/Form/Home.aspx";

#[derive(Debug, Clone, Copy, Default)]
pub struct SubmissionLayer;

impl Layer for SubmissionLayer {
    fn name(&self) -> &str {
        "fvc"
    }

    fn apply(&self, r: &mut Registry) -> ProjconfResult<()> {
        r.constant("benchmark_name", Value::Null);
        r.constant("benchmark_abbreviation", Value::Null);
        r.constant("benchmark_url", Value::Null);

        // Multi-part submissions split extraction and matching.
        r.constant("is_extractor_part", false);
        r.constant("is_matcher_part", false);
        r.define("is_multipart_submission", |r| {
            Ok((r.flag("is_extractor_part")? || r.flag("is_matcher_part")?).into())
        });
        r.constant("bundled_sister_projects", Value::List(Vec::new()));
        r.define("has_submission_zip", |r| {
            Ok((!r.flag("is_multipart_submission")?
                || !r.list("bundled_sister_projects")?.is_empty())
            .into())
        });
        r.define("submission_zip", |r| {
            Ok(format!(
                "sourceafis-fvc-{}.zip",
                r.text("benchmark_abbreviation")?.to_lowercase()
            )
            .into())
        });

        r.constant("subdomain", "sourceafis");
        r.define("homepage", |r| Ok(format!("{}fvc", r.text("website")?).into()));
        r.constant("is_library", false);
        r.define("assembly_name", |r| {
            let name = if r.flag("is_extractor_part")? {
                "enroll"
            } else {
                "match"
            };
            Ok(name.into())
        });
        r.define("namespace_suffix", |r| {
            Ok(part_suffix(r, ".Extractor", ".Matcher")?.into())
        });
        r.define("root_namespace", |r| {
            Ok(format!(
                "SourceAFIS.FVC.{}{}",
                r.text("benchmark_abbreviation")?,
                r.block("namespace_suffix")?
            )
            .into())
        });
        r.define("name_suffix", |r| {
            Ok(part_suffix(r, " extractor", " matcher")?.into())
        });
        r.define("pretty_name", |r| {
            Ok(format!(
                "SourceAFIS{} for FVC {}",
                r.block("name_suffix")?,
                r.text("benchmark_abbreviation")?
            )
            .into())
        });

        r.define("md_description", |r| {
            Ok(format!(
                "Submission of [SourceAFIS]({}){}\nto [{}]({}) benchmark\nin [FVC-onGoing]({FVC_ONGOING}) competition.\n\nMore on [homepage]({}).",
                r.text("website")?,
                r.block("name_suffix")?,
                r.text("benchmark_name")?,
                r.text("benchmark_url")?,
                r.text("homepage")?
            )
            .into())
        });
        r.override_with("documentation_links", |r, base| {
            let mut links = match base.resolve(r)? {
                Value::Links(links) => links,
                _ => Vec::new(),
            };
            links.push(Link::new("SourceAFIS overview", r.text("website")?));
            links.push(Link::new(
                format!("FVC-onGoing {} benchmark", r.text("benchmark_abbreviation")?),
                r.text("benchmark_url")?,
            ));
            Ok(links.into())
        });

        r.constant(
            "dependencies",
            Value::List(vec!["SourceAFIS:3.14.0".to_string()]),
        );
        Ok(())
    }
}

fn part_suffix(r: &Registry, extractor: &str, matcher: &str) -> ProjconfResult<String> {
    Ok(if r.flag("is_extractor_part")? {
        extractor.to_string()
    } else if r.flag("is_matcher_part")? {
        matcher.to_string()
    } else {
        String::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::environment::{Identity, fixture_environment};
    use crate::application::layers::{CommonLayer, IdentityLayer, NetLayer};
    use crate::domain::SettingsLayer;

    fn fvc(settings: SettingsLayer) -> Registry {
        Registry::new(fixture_environment("/work/fvc-stfv", &[], &[]))
            .with_layer(&IdentityLayer::new(Identity::default()))
            .unwrap()
            .with_layer(&CommonLayer)
            .unwrap()
            .with_layer(&NetLayer)
            .unwrap()
            .with_layer(&SubmissionLayer)
            .unwrap()
            .with_layer(&settings)
            .unwrap()
    }

    fn benchmark() -> SettingsLayer {
        SettingsLayer::new("project")
            .with("benchmark_name", "FV-STD-1.0")
            .unwrap()
            .with("benchmark_abbreviation", "STFV")
            .unwrap()
            .with("benchmark_url", "https://biolab.example/stfv")
            .unwrap()
    }

    #[test]
    fn single_part_submission() {
        let r = fvc(benchmark());
        assert_eq!(r.text("root_namespace").unwrap(), "SourceAFIS.FVC.STFV");
        assert_eq!(r.text("pretty_name").unwrap(), "SourceAFIS for FVC STFV");
        assert_eq!(r.text("homepage").unwrap(), "https://sourceafis.example.com/fvc");
        assert_eq!(r.text("submission_zip").unwrap(), "sourceafis-fvc-stfv.zip");
        assert!(r.flag("has_submission_zip").unwrap());
        assert!(!r.flag("has_tests").unwrap());
        assert!(!r.flag("nuget_release").unwrap());
    }

    #[test]
    fn extractor_part_changes_names() {
        let mut settings = benchmark();
        settings.insert_assignment("is_extractor_part=true").unwrap();
        let r = fvc(settings);

        assert_eq!(r.text("root_namespace").unwrap(), "SourceAFIS.FVC.STFV.Extractor");
        assert_eq!(r.text("pretty_name").unwrap(), "SourceAFIS extractor for FVC STFV");
        assert_eq!(r.text("assembly_name").unwrap(), "enroll");
        assert!(!r.flag("has_submission_zip").unwrap());
    }

    #[test]
    fn documentation_links_extend_the_common_list() {
        let r = fvc(benchmark());
        let titles: Vec<_> = r
            .links("documentation_links")
            .unwrap()
            .into_iter()
            .map(|l| l.title)
            .collect();
        assert_eq!(
            titles,
            ["Homepage", "SourceAFIS overview", "FVC-onGoing STFV benchmark"]
        );
    }

    #[test]
    fn description_names_the_benchmark() {
        let r = fvc(benchmark());
        let description = r.text("md_description").unwrap();
        assert!(description.starts_with("Submission of [SourceAFIS](https://sourceafis.example.com/)\nto [FV-STD-1.0]"));
        assert!(description.ends_with("More on [homepage](https://sourceafis.example.com/fvc)."));
    }
}
