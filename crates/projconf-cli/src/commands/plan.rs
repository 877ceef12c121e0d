//! `projconf plan`: print what a run would do.

use serde_json::json;

use crate::{
    cli::PlanArgs,
    commands::context::{self, Target},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: PlanArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let target = context::resolve(&args.target, &config)?;
    render(&target, &output)
}

/// Print the plan of `target`, shared with `generate --dry-run`.
pub fn render(target: &Target, output: &OutputManager) -> CliResult<()> {
    let plan = target.ecosystem.plan(&target.registry)?;

    if output.is_json() {
        return output.json(&json!({
            "ecosystem": target.ecosystem,
            "project": target.project_dir(),
            "actions": plan.actions(),
        }));
    }

    output.header(&format!(
        "{} plan for {}",
        target.ecosystem,
        target.project_dir().display()
    ))?;
    for action in plan.actions() {
        output.data(&format!("  {action}"))?;
    }
    Ok(())
}
