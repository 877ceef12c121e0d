//! `projconf attributes`: list every bound attribute name.

use serde_json::json;

use crate::{
    cli::AttributesArgs, commands::context, config::AppConfig, error::CliResult,
    output::OutputManager,
};

pub fn execute(args: AttributesArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let target = context::resolve(&args.target, &config)?;
    let names = target.registry.names();

    if output.is_json() {
        return output.json(&json!({
            "layers": target.registry.layers(),
            "attributes": names,
        }));
    }

    output.header(&format!("Layers: {}", target.registry.layers().join(" > ")))?;
    for name in names {
        output.data(name)?;
    }
    Ok(())
}
