//! Tracing subscriber setup.
//!
//! The library crates only emit events; this is the one place a subscriber
//! is installed. `RUST_LOG` wins over the verbosity flags when set.

use std::io::IsTerminal as _;

use anyhow::Context as _;
use tracing_subscriber::{
    EnvFilter, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::cli::{GlobalArgs, OutputFormat};

/// Targets the verbosity flags apply to. Everything else stays at WARN.
const WORKSPACE_TARGETS: [&str; 3] = ["projconf", "projconf_core", "projconf_adapters"];

/// Install the global subscriber. Logs always go to stderr so that stdout
/// carries only command output.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(directives(verbosity(args)))
            .context("Invalid log filter")?,
    };
    let layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if args.output_format == OutputFormat::Json {
        registry
            .with(layer.json().with_current_span(false))
            .try_init()
    } else {
        let ansi = !args.no_color && std::io::stderr().is_terminal();
        registry.with(layer.with_ansi(ansi)).try_init()
    };
    installed.context("Failed to install tracing subscriber")
}

fn directives(level: LevelFilter) -> String {
    let level = level.to_string().to_ascii_lowercase();
    let mut parts = vec!["warn".to_string()];
    parts.extend(WORKSPACE_TARGETS.iter().map(|target| format!("{target}={level}")));
    parts.join(",")
}

fn verbosity(args: &GlobalArgs) -> LevelFilter {
    if args.quiet {
        return LevelFilter::ERROR;
    }
    match args.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(verbose: u8, quiet: bool) -> GlobalArgs {
        GlobalArgs {
            verbose,
            quiet,
            no_color: true,
            config: None,
            output_format: OutputFormat::Plain,
        }
    }

    #[test]
    fn verbosity_counts_up_to_trace() {
        let levels: Vec<_> = (0..5).map(|v| verbosity(&args(v, false))).collect();
        assert_eq!(
            levels,
            [
                LevelFilter::WARN,
                LevelFilter::INFO,
                LevelFilter::DEBUG,
                LevelFilter::TRACE,
                LevelFilter::TRACE,
            ]
        );
    }

    #[test]
    fn quiet_keeps_errors_only() {
        assert_eq!(verbosity(&args(0, true)), LevelFilter::ERROR);
    }

    #[test]
    fn directives_parse_and_scope_workspace_crates() {
        let text = directives(LevelFilter::DEBUG);
        assert_eq!(
            text,
            "warn,projconf=debug,projconf_core=debug,projconf_adapters=debug"
        );
        assert!(EnvFilter::try_new(text).is_ok());
    }
}
