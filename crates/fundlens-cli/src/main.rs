//! Fundlens CLI - fund returns, risk and contribution in the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Headline numbers
//! fundlens --data-dir ./exports overview
//!
//! # Trailing returns for one holding
//! fundlens returns --ticker AGIX
//!
//! # Cumulative return since a date, as JSON
//! fundlens cumulative --since 2025-01-01 --ticker AGIX --ticker BRKB -f json
//!
//! # Thirty-day contribution, top 5 each way
//! fundlens contribution --window 30 --top 5
//!
//! # Fund against the indices in benchmarks.csv
//! fundlens compare --since-year 2024
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;
mod settings;

use cli::{Cli, Commands};
use commands::RunContext;
use settings::Settings;

fn init_tracing(verbose: bool) {
    let default = if verbose { "fundlens=debug" } else { "fundlens=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // stdout carries the report; logs go to stderr
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if cli.format != cli::OutputFormat::Table {
        colored::control::set_override(false);
    }

    let (settings, config_path) = Settings::load(cli.config.as_deref())?;
    let ctx = RunContext {
        settings,
        config_path,
        data_dir: cli.data_dir,
        as_of: cli.as_of,
        format: cli.format,
    };

    match cli.command {
        Commands::Overview(args) => commands::overview::execute(args, &ctx)?,
        Commands::Returns(args) => commands::returns::execute(args, &ctx)?,
        Commands::Cumulative(args) => commands::cumulative::execute(args, &ctx)?,
        Commands::Risk(args) => commands::risk::execute(args, &ctx)?,
        Commands::Contribution(args) => commands::contribution::execute(args, &ctx)?,
        Commands::Sectors(args) => commands::sectors::execute(args, &ctx)?,
        Commands::Compare(args) => commands::compare::execute(args, &ctx)?,
        Commands::Config(args) => commands::config::execute(args, &ctx)?,
    }

    Ok(())
}
