//! Command handlers, one module per subcommand.

pub mod attributes;
pub mod completions;
pub mod config;
pub mod context;
pub mod generate;
pub mod init;
pub mod plan;
pub mod show;
