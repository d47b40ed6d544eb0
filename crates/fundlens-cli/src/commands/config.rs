//! Config command implementation.
//!
//! Shows the effective configuration and where it is read from.

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cli::OutputFormat;
use crate::commands::RunContext;
use crate::output::{print_header, print_info, print_json, print_rows, KeyValue};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Show the configuration file location
    Path,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, ctx: &RunContext) -> Result<()> {
    match args.command {
        ConfigCommand::Show => execute_show(ctx),
        ConfigCommand::Path => execute_path(ctx),
    }
}

/// Flattens a JSON object into `section.key` rows.
fn flatten(prefix: &str, value: &serde_json::Value, out: &mut Vec<KeyValue>) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, v) in map {
                let name = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&name, v, out);
            }
        }
        serde_json::Value::Null => out.push(KeyValue::new(prefix, "(unset)")),
        serde_json::Value::String(s) => out.push(KeyValue::new(prefix, s.as_str())),
        other => out.push(KeyValue::new(prefix, other.to_string())),
    }
}

fn execute_show(ctx: &RunContext) -> Result<()> {
    let mut settings = ctx.settings.clone();
    if ctx.data_dir.is_some() {
        settings.data.dir.clone_from(&ctx.data_dir);
    }

    match ctx.format {
        OutputFormat::Json => print_json(&settings),
        OutputFormat::Table | OutputFormat::Csv => {
            let mut rows = Vec::new();
            flatten("", &serde_json::to_value(&settings)?, &mut rows);
            print_header("Current Configuration", ctx.format);
            print_rows(&rows, ctx.format)
        }
    }
}

fn execute_path(ctx: &RunContext) -> Result<()> {
    println!("{}", ctx.config_path.display());
    if ctx.format == OutputFormat::Table && !ctx.config_path.exists() {
        print_info("File does not exist; defaults are in effect.");
    }
    Ok(())
}
