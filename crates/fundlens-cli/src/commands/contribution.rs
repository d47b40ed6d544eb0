//! Contribution command implementation.
//!
//! Ranks holdings by their contribution to the fund's move over a window.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use fundlens_analytics::contribution::{
    ContributionRecord, ContributionReport, ContributionSummary, LargeMovers,
};
use fundlens_analytics::prelude::*;

use crate::cli::OutputFormat;
use crate::commands::RunContext;
use crate::output::{
    format_amount, format_percent, format_signed_percent, print_header, print_info, print_json,
    print_rows, print_warning, KeyValue,
};

/// Arguments for the contribution command.
#[derive(Args, Debug)]
pub struct ContributionArgs {
    /// Window: trailing observations (1, 30, 90) or since:YYYY-MM-DD
    #[arg(short, long, default_value = "1")]
    pub window: ContributionWindow,

    /// Number of top and bottom contributors to show
    #[arg(short = 'n', long, default_value_t = 10)]
    pub top: usize,

    /// Fund value for weight-based holdings
    #[arg(long)]
    pub fund_value: Option<f64>,

    /// Large-move threshold as a fraction (defaults to the config value)
    #[arg(long)]
    pub threshold: Option<f64>,
}

#[derive(Debug, Serialize, Tabled)]
struct ContributionRow {
    #[tabled(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Sector")]
    sector: String,
    #[tabled(rename = "Start")]
    start_price: String,
    #[tabled(rename = "End")]
    end_price: String,
    #[tabled(rename = "Change")]
    change: String,
    #[tabled(rename = "Impact")]
    impact: String,
    #[tabled(rename = "Contribution")]
    contribution: String,
}

impl From<&ContributionRecord> for ContributionRow {
    fn from(r: &ContributionRecord) -> Self {
        Self {
            ticker: r.ticker.clone(),
            sector: r.sector.clone(),
            start_price: format!("{:.4}", r.start_price),
            end_price: format!("{:.4}", r.end_price),
            change: format_signed_percent(r.price_change_pct),
            impact: format_amount(r.price_impact),
            contribution: format_signed_percent(r.contribution_pct),
        }
    }
}

#[derive(Serialize)]
struct ContributionOutput<'a> {
    report: &'a ContributionReport,
    summary: ContributionSummary,
    large_movers: &'a LargeMovers,
}

fn print_exclusions(report: &ContributionReport) {
    if !report.unresolvable.is_empty() {
        print_warning(&format!(
            "No shares or weight, left out: {}",
            report.unresolvable.join(", ")
        ));
    }
    if !report.not_found.is_empty() {
        print_warning(&format!("No price data: {}", report.not_found.join(", ")));
    }
    for excluded in &report.insufficient {
        print_warning(&format!("{}: {}", excluded.ticker, excluded.reason));
    }
}

/// Execute the contribution command.
pub fn execute(args: ContributionArgs, ctx: &RunContext) -> Result<()> {
    let loaded = ctx.load()?;
    let config = ctx.analytics();

    let report = windowed_contribution(&loaded.snapshot, args.window, args.fund_value, config)?;
    let summary = report.summary();
    let movers = large_movers(&report, args.threshold.unwrap_or(config.large_move_threshold))?;

    print_exclusions(&report);

    match ctx.format {
        OutputFormat::Json => print_json(&ContributionOutput {
            report: &report,
            summary,
            large_movers: &movers,
        }),
        OutputFormat::Csv => {
            let rows: Vec<ContributionRow> = report.records.iter().map(Into::into).collect();
            print_rows(&rows, ctx.format)
        }
        OutputFormat::Table => {
            let mode = report.mode.map_or_else(|| "none".to_string(), |m| m.to_string());
            print_header(
                &format!(
                    "Contribution {} to {} ({mode} based)",
                    report.label,
                    loaded.snapshot.as_of_date()
                ),
                ctx.format,
            );

            if report.records.len() <= args.top * 2 {
                let rows: Vec<ContributionRow> = report.records.iter().map(Into::into).collect();
                print_rows(&rows, ctx.format)?;
            } else {
                print_header(&format!("Top {}", args.top), ctx.format);
                let top: Vec<ContributionRow> = report
                    .top_contributors(args.top)
                    .into_iter()
                    .map(Into::into)
                    .collect();
                print_rows(&top, ctx.format)?;

                print_header(&format!("Bottom {}", args.top), ctx.format);
                let bottom: Vec<ContributionRow> = report
                    .bottom_contributors(args.top)
                    .into_iter()
                    .map(Into::into)
                    .collect();
                print_rows(&bottom, ctx.format)?;
            }

            print_header("Summary", ctx.format);
            let rows = vec![
                KeyValue::new("Holdings", summary.holding_count.to_string()),
                KeyValue::new("Portfolio value", format_amount(report.total_value)),
                KeyValue::new("Total impact", format_amount(summary.total_impact)),
                KeyValue::percent("Total contribution", summary.total_contribution),
                KeyValue::new(
                    "Up / down",
                    format!("{} / {}", summary.positive_count, summary.negative_count),
                ),
            ];
            print_rows(&rows, ctx.format)?;

            if movers.is_empty() {
                print_info(&format!(
                    "No moves beyond {}",
                    format_percent(movers.threshold)
                ));
            } else {
                let list = |records: &[ContributionRecord]| {
                    records
                        .iter()
                        .map(|r| format!("{} {}", r.ticker, format_signed_percent(r.price_change_pct)))
                        .collect::<Vec<_>>()
                        .join(", ")
                };
                if !movers.gainers.is_empty() {
                    print_info(&format!("Large gainers: {}", list(movers.gainers.as_slice())));
                }
                if !movers.decliners.is_empty() {
                    print_info(&format!("Large decliners: {}", list(movers.decliners.as_slice())));
                }
            }
            Ok(())
        }
    }
}
