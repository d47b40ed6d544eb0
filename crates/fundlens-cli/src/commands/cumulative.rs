//! Cumulative command implementation.
//!
//! Growth since a reference date, for the fund or a list of tickers.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use fundlens_analytics::prelude::*;
use fundlens_core::{PriceSeries, ReturnSeries};

use crate::cli::OutputFormat;
use crate::commands::{parse_date, RunContext};
use crate::output::{print_header, print_json, print_rows, print_warning};

/// Arguments for the cumulative command.
#[derive(Args, Debug)]
pub struct CumulativeArgs {
    /// Reference date (YYYY-MM-DD), or `ytd` for the start of the year
    #[arg(short, long)]
    pub since: String,

    /// Tickers to report (repeatable); the fund NAV when omitted
    #[arg(short, long)]
    pub ticker: Vec<String>,
}

#[derive(Debug, Serialize, Tabled)]
struct CumulativeRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Base date")]
    base_date: String,
    #[tabled(rename = "End date")]
    end_date: String,
    #[tabled(rename = "Cumulative")]
    #[serde(rename = "cumulative_pct")]
    cumulative: String,
}

fn row(series: &ReturnSeries) -> Option<CumulativeRow> {
    let first = series.points().first()?;
    let last = series.last()?;
    Some(CumulativeRow {
        name: series.label().to_string(),
        base_date: first.date.to_string(),
        end_date: last.date.to_string(),
        // cumulative series are already in percent
        cumulative: format!("{:.2}", last.value),
    })
}

/// Execute the cumulative command.
pub fn execute(args: CumulativeArgs, ctx: &RunContext) -> Result<()> {
    let loaded = ctx.load()?;
    let as_of = loaded.snapshot.as_of_date();

    let series: Vec<PriceSeries> = if args.ticker.is_empty() {
        vec![loaded.snapshot.nav_series().clone()]
    } else {
        let mut out = Vec::with_capacity(args.ticker.len());
        for t in &args.ticker {
            match loaded.series(t) {
                Ok(s) => out.push(s),
                Err(e) => print_warning(&format!("{t}: {e}")),
            }
        }
        out
    };

    let ytd = args.since.eq_ignore_ascii_case("ytd");
    let base = if ytd { None } else { Some(parse_date(&args.since)?) };

    let mut results = Vec::with_capacity(series.len());
    for s in &series {
        let growth = match base {
            Some(date) => cumulative(s, date, ctx.analytics()),
            None => since_start_of_year(s, as_of.year(), ctx.analytics()),
        };
        match growth {
            Ok(g) => results.push(g),
            Err(e) => print_warning(&format!("{}: {e}", s.ticker())),
        }
    }

    if ctx.format == OutputFormat::Json {
        return print_json(&results);
    }

    let rows: Vec<CumulativeRow> = results.iter().filter_map(row).collect();
    let title = match base {
        Some(date) => format!("Cumulative return (%) since {date}"),
        None => format!("Cumulative return (%) year to date {}", as_of.year()),
    };
    print_header(&title, ctx.format);
    print_rows(&rows, ctx.format)
}
