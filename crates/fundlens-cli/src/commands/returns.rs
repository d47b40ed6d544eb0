//! Returns command implementation.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use fundlens_analytics::prelude::*;

use crate::cli::OutputFormat;
use crate::commands::RunContext;
use crate::output::{format_signed_percent, print_header, print_info, print_json, print_rows};

/// Arguments for the returns command.
#[derive(Args, Debug)]
pub struct ReturnsArgs {
    /// Ticker to report instead of the fund NAV
    #[arg(short, long)]
    pub ticker: Option<String>,
}

/// One period in the returns table.
#[derive(Debug, Serialize, Tabled)]
struct ReturnRow {
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "From")]
    start: String,
    #[tabled(rename = "To")]
    end: String,
    #[tabled(rename = "Return")]
    #[serde(skip)]
    display: String,
    #[tabled(skip)]
    value: f64,
}

#[derive(Serialize)]
struct ReturnsOutput<'a> {
    returns: &'a PeriodReturns,
    annualized: Option<AnnualizedReturn>,
}

/// Execute the returns command.
pub fn execute(args: ReturnsArgs, ctx: &RunContext) -> Result<()> {
    let loaded = ctx.load()?;
    let series = match &args.ticker {
        Some(t) => loaded.series(t)?,
        None => loaded.snapshot.nav_series().clone(),
    };

    let period_returns = returns(&series, &Period::ALL)?;
    let annualized = annualized_series_return(&series, ctx.analytics()).ok();

    if ctx.format == OutputFormat::Json {
        return print_json(&ReturnsOutput {
            returns: &period_returns,
            annualized,
        });
    }

    let rows: Vec<ReturnRow> = period_returns
        .values
        .iter()
        .map(|r| ReturnRow {
            period: r.period.to_string(),
            start: r.start_date.to_string(),
            end: r.end_date.to_string(),
            display: format_signed_percent(r.value),
            value: r.value,
        })
        .collect();

    print_header(
        &format!("{} returns as of {}", series.ticker(), period_returns.as_of),
        ctx.format,
    );
    print_rows(&rows, ctx.format)?;

    if ctx.format == OutputFormat::Table {
        if !period_returns.unavailable.is_empty() {
            let names: Vec<String> = period_returns
                .unavailable
                .iter()
                .map(ToString::to_string)
                .collect();
            print_info(&format!("Not enough history for: {}", names.join(", ")));
        }
        if let Some(a) = annualized {
            let basis = match a.basis {
                ReturnBasis::Annualized => "annualized",
                ReturnBasis::NonAnnualized => "total, not annualized",
            };
            print_info(&format!(
                "Since inception: {} ({basis})",
                format_signed_percent(a.value)
            ));
        }
    }
    Ok(())
}
