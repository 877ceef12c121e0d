//! `projconf show`: resolve attributes and print their values.

use serde_json::{Map, Value as Json};

use projconf_adapters::settings_loader::to_toml;
use projconf_core::domain::{SettingsLayer, Value};

use crate::{
    cli::ShowArgs,
    commands::context,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(args: ShowArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let target = context::resolve(&args.target, &config)?;

    let mut values = Vec::with_capacity(args.attributes.len());
    for name in &args.attributes {
        values.push((name.as_str(), target.registry.resolve(name)?));
    }

    if args.toml {
        let mut layer = SettingsLayer::new("show");
        for (name, value) in values {
            layer
                .insert(name, value)
                .map_err(|e| CliError::Core(e.into()))?;
        }
        output.data(to_toml(&layer)?.trim_end())?;
        return Ok(());
    }

    if output.is_json() {
        let mut map = Map::new();
        for (name, value) in &values {
            let json = serde_json::to_value(value).unwrap_or(Json::Null);
            map.insert(name.to_string(), json);
        }
        return output.json(&map);
    }

    for (name, value) in &values {
        output.data(&describe(name, value))?;
    }
    Ok(())
}

/// `name = value`, with multi-line text set off on its own lines.
fn describe(name: &str, value: &Value) -> String {
    match value {
        Value::Str(text) if text.contains('\n') => {
            format!("{name} =\n{}", text.trim_end())
        }
        Value::Str(text) => format!("{name} = {text:?}"),
        Value::Null => format!("{name} = (none)"),
        other => format!("{name} = {other}"),
    }
}
