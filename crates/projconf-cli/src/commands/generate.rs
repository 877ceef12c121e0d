//! `projconf generate`: materialize the artifact plan.

use std::path::Path;

use serde_json::json;
use tracing::{info, instrument};

use projconf_core::application::GenerationService;

use crate::{
    cli::GenerateArgs,
    commands::{context, plan},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(args: GenerateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let target = context::resolve(&args.target, &config)?;

    if args.dry_run {
        output.info("Dry run: nothing will be written")?;
        return plan::render(&target, &output);
    }

    let service = GenerationService::new(target.filesystem.clone());
    let report = service.generate(target.ecosystem, &target.registry)?;
    let name = target.registry.text("pretty_name")?;
    info!(project = %name, %report, "Generation finished");

    let root = target.project_dir();
    if output.is_json() {
        return output.json(&json!({
            "ecosystem": target.ecosystem,
            "project": root,
            "written": report.written,
            "removed": report.removed,
        }));
    }

    for path in &report.written {
        output.print(&format!("  wrote    {}", relative(root, path)))?;
    }
    for path in &report.removed {
        output.print(&format!("  removed  {}", relative(root, path)))?;
    }
    output.success(&format!("Updated {name} configuration ({report})"))?;
    Ok(())
}

fn relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}
