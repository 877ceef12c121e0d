//! Everything the commands print to stdout goes through [`OutputManager`].
//!
//! Status lines (`print`, `success`, ...) are dropped in quiet mode; `data`
//! and `json` carry the result a command was asked for and always print.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::{OwoColorize, Style};
use serde::Serialize;

use crate::cli::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;
use crate::error::{CliError, CliResult};

pub struct OutputManager {
    format: OutputFormat,
    quiet: bool,
    color: bool,
    term: Term,
}

impl OutputManager {
    /// The `--output-format` flag wins; `auto` defers to the configuration
    /// and finally to whether stdout is a terminal.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let format = [args.output_format, configured_format(&config.output.format)]
            .into_iter()
            .find(|f| *f != OutputFormat::Auto)
            .unwrap_or(if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            });

        Self {
            format,
            quiet: args.quiet,
            color: format == OutputFormat::Human && !args.no_color && !config.output.no_color,
            term: Term::stdout(),
        }
    }

    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    pub fn data(&self, msg: &str) -> io::Result<()> {
        self.term.write_line(msg)
    }

    pub fn json<T: Serialize>(&self, value: &T) -> CliResult<()> {
        let text = serde_json::to_string_pretty(value).map_err(|e| CliError::InvalidInput {
            message: format!("Failed to serialise output: {e}"),
            source: Some(Box::new(e)),
        })?;
        self.data(&text)?;
        Ok(())
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.status('\u{2713}', Style::new().green(), msg)
    }

    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.status('\u{26a0}', Style::new().yellow(), msg)
    }

    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.status('\u{2139}', Style::new().blue(), msg)
    }

    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.color {
            self.print(&text.style(Style::new().cyan().bold()).to_string())
        } else {
            self.print(text)
        }
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    fn status(&self, symbol: char, style: Style, msg: &str) -> io::Result<()> {
        if self.color {
            self.print(&format!(
                "{} {}",
                symbol.style(style.bold()),
                msg.style(style)
            ))
        } else {
            self.print(&format!("{symbol} {msg}"))
        }
    }
}

/// `output.format` from the config file; unknown values mean auto.
fn configured_format(name: &str) -> OutputFormat {
    match name.to_ascii_lowercase().as_str() {
        "human" => OutputFormat::Human,
        "plain" => OutputFormat::Plain,
        "json" => OutputFormat::Json,
        _ => OutputFormat::Auto,
    }
}
