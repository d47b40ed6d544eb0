//! Sectors command implementation.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use fundlens_analytics::contribution::{SectorAllocation, SectorContribution};
use fundlens_analytics::prelude::*;

use crate::cli::OutputFormat;
use crate::commands::RunContext;
use crate::output::{
    format_amount, format_percent, format_signed_percent, print_header, print_info, print_json,
    print_rows,
};

/// Arguments for the sectors command.
#[derive(Args, Debug)]
pub struct SectorsArgs {
    /// Window for sector contribution: trailing observations or since:YYYY-MM-DD
    #[arg(short, long, default_value = "1")]
    pub window: ContributionWindow,

    /// Fund value for weight-based holdings
    #[arg(long)]
    pub fund_value: Option<f64>,
}

#[derive(Debug, Serialize, Tabled)]
struct SectorRow {
    #[tabled(rename = "Sector")]
    sector: String,
    #[tabled(rename = "Holdings")]
    holdings: usize,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "Value share")]
    value_share: String,
    #[tabled(rename = "Market value")]
    market_value: String,
    #[tabled(rename = "Count share")]
    count_share: String,
    #[tabled(rename = "Impact")]
    impact: String,
    #[tabled(rename = "Contribution")]
    contribution: String,
}

#[derive(Serialize)]
struct Allocations<'a> {
    weight: &'a SectorAllocation,
    market_value: &'a SectorAllocation,
    count: &'a SectorAllocation,
}

#[derive(Serialize)]
struct SectorsOutput<'a> {
    window: String,
    allocation: Allocations<'a>,
    contribution: &'a [SectorContribution],
}

fn share(allocation: &SectorAllocation, sector: &str) -> String {
    allocation
        .sector(sector)
        .map_or_else(|| "-".to_string(), |s| format_percent(s.weight))
}

/// Execute the sectors command.
pub fn execute(args: SectorsArgs, ctx: &RunContext) -> Result<()> {
    let loaded = ctx.load()?;
    let snapshot = &loaded.snapshot;

    let by_weight = sector_allocation(snapshot.holdings());
    let by_value = sector_allocation_by_value(snapshot, ctx.analytics());
    let by_count = sector_allocation_by_count(snapshot.holdings());
    let report = windowed_contribution(snapshot, args.window, args.fund_value, ctx.analytics())?;
    let contribution = sector_contributions(&report);

    if ctx.format == OutputFormat::Json {
        return print_json(&SectorsOutput {
            window: report.label.clone(),
            allocation: Allocations {
                weight: &by_weight,
                market_value: &by_value,
                count: &by_count,
            },
            contribution: &contribution,
        });
    }

    // every sector holds at least one holding, so the count allocation lists
    // them all; order by contribution, then by count
    let mut sectors: Vec<&str> = contribution.iter().map(|c| c.sector.as_str()).collect();
    for s in &by_count.sectors {
        if !sectors.contains(&s.sector.as_str()) {
            sectors.push(&s.sector);
        }
    }

    let rows: Vec<SectorRow> = sectors
        .into_iter()
        .map(|sector| {
            let c = contribution.iter().find(|c| c.sector == sector);
            SectorRow {
                sector: sector.to_string(),
                holdings: by_count.sector(sector).map_or(0, |s| s.holding_count),
                weight: share(&by_weight, sector),
                value_share: share(&by_value, sector),
                market_value: by_value
                    .sector(sector)
                    .map_or_else(|| "-".to_string(), |s| format_amount(s.amount)),
                count_share: share(&by_count, sector),
                impact: c.map_or_else(|| "-".to_string(), |c| format_amount(c.price_impact)),
                contribution: c.map_or_else(
                    || "-".to_string(),
                    |c| format_signed_percent(c.contribution_pct),
                ),
            }
        })
        .collect();

    print_header(
        &format!("Sectors, contribution {} to {}", report.label, snapshot.as_of_date()),
        ctx.format,
    );
    print_rows(&rows, ctx.format)?;

    if ctx.format == OutputFormat::Table {
        if by_weight.sectors.is_empty() {
            print_info("No holding carries a weight; see value and count shares");
        } else if !by_weight.excluded.is_empty() {
            print_info(&format!(
                "{} holdings carry no weight and are not in the weight column",
                by_weight.excluded.len()
            ));
        }
        if !by_value.excluded.is_empty() {
            print_info(&format!("Not valued: {}", by_value.excluded.join(", ")));
        }
    }
    Ok(())
}
