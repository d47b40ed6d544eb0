//! Compare command implementation.
//!
//! The fund NAV next to each benchmark in benchmarks.csv over the same
//! calendar periods.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use fundlens_analytics::prelude::*;

use crate::cli::OutputFormat;
use crate::commands::RunContext;
use crate::output::{format_signed_percent, print_header, print_info, print_json, print_rows};

/// Arguments for the compare command.
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Reference year for the "since" column; defaults to the year before
    /// the analysis date
    #[arg(short, long)]
    pub since_year: Option<i32>,
}

#[derive(Debug, Serialize, Tabled)]
struct CompareRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Last date")]
    last_date: String,
    #[tabled(rename = "DTD")]
    dtd: String,
    #[tabled(rename = "WTD")]
    wtd: String,
    #[tabled(rename = "MTD")]
    mtd: String,
    #[tabled(rename = "YTD")]
    ytd: String,
    #[tabled(rename = "Since year")]
    since_year: String,
    #[tabled(rename = "Since inception")]
    since_inception: String,
}

fn cell(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), format_signed_percent)
}

fn row(r: &ComparisonRow) -> CompareRow {
    CompareRow {
        name: if r.is_fund {
            format!("{} (fund)", r.name)
        } else {
            r.name.clone()
        },
        last_date: r
            .last_date
            .map_or_else(|| "-".to_string(), |d| d.to_string()),
        dtd: cell(r.day),
        wtd: cell(r.week),
        mtd: cell(r.month),
        ytd: cell(r.year),
        since_year: cell(r.since_year),
        since_inception: cell(r.since_inception),
    }
}

/// Execute the compare command.
pub fn execute(args: CompareArgs, ctx: &RunContext) -> Result<()> {
    let loaded = ctx.load()?;
    let snapshot = &loaded.snapshot;
    let since_year = args
        .since_year
        .unwrap_or_else(|| snapshot.as_of_date().year() - 1);

    let report = snapshot_comparison(snapshot, since_year, ctx.analytics())?;

    if ctx.format == OutputFormat::Json {
        return print_json(&report);
    }

    let rows: Vec<CompareRow> = report.rows().map(row).collect();
    print_header(
        &format!(
            "{} against benchmarks as of {} (since start of {since_year})",
            snapshot.name(),
            report.as_of
        ),
        ctx.format,
    );
    print_rows(&rows, ctx.format)?;

    if ctx.format == OutputFormat::Table && report.benchmarks.is_empty() {
        print_info("No benchmarks loaded; add benchmarks.csv to the data directory");
    }
    Ok(())
}
