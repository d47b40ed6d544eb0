//! Risk command implementation.
//!
//! Risk profile of the fund NAV, selected tickers or every holding.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use fundlens_analytics::prelude::*;
use fundlens_analytics::risk::RiskBatch;
use fundlens_core::PriceSeries;

use crate::cli::OutputFormat;
use crate::commands::RunContext;
use crate::output::{format_percent, print_header, print_json, print_rows, print_warning};

/// Arguments for the risk command.
#[derive(Args, Debug)]
pub struct RiskArgs {
    /// Tickers to report (repeatable); the fund NAV when omitted
    #[arg(short, long)]
    pub ticker: Vec<String>,

    /// Report every holding with price data
    #[arg(long, conflicts_with = "ticker")]
    pub holdings: bool,
}

#[derive(Debug, Serialize, Tabled)]
struct RiskRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Obs")]
    observations: usize,
    #[tabled(rename = "Volatility")]
    volatility: String,
    #[tabled(rename = "Max DD")]
    max_drawdown: String,
    #[tabled(rename = "VaR")]
    var: String,
    #[tabled(rename = "Sharpe")]
    sharpe: String,
}

impl RiskRow {
    fn new(name: &str, m: &RiskMetrics) -> Self {
        Self {
            name: name.to_string(),
            observations: m.observations,
            volatility: format_percent(m.annualized_volatility),
            max_drawdown: format_percent(m.max_drawdown),
            var: format_percent(m.var_95),
            sharpe: format!("{:.2}", m.sharpe_ratio),
        }
    }
}

/// Execute the risk command.
pub fn execute(args: RiskArgs, ctx: &RunContext) -> Result<()> {
    let loaded = ctx.load()?;
    let config = ctx.analytics();
    let params = config.risk_params();

    let title = format!(
        "Risk as of {} (VaR at {:.0}%)",
        loaded.snapshot.as_of_date(),
        params.var_confidence * 100.0
    );

    if args.ticker.is_empty() && !args.holdings {
        let nav = loaded.snapshot.nav_series();
        let metrics = risk_metrics(&simple_returns(nav)?, &params)?;
        if ctx.format == OutputFormat::Json {
            return print_json(&metrics);
        }
        print_header(&title, ctx.format);
        return print_rows(&[RiskRow::new(nav.ticker(), &metrics)], ctx.format);
    }

    let batch: RiskBatch = if args.holdings {
        risk_metrics_by_ticker(loaded.snapshot.prices().values(), &params, config)
    } else {
        let mut series: Vec<PriceSeries> = Vec::with_capacity(args.ticker.len());
        for t in &args.ticker {
            match loaded.series(t) {
                Ok(s) => series.push(s),
                Err(e) => print_warning(&format!("{t}: {e}")),
            }
        }
        risk_metrics_by_ticker(&series, &params, config)
    };

    for failure in &batch.failures {
        print_warning(&format!("{}: {}", failure.ticker, failure.reason));
    }

    if ctx.format == OutputFormat::Json {
        return print_json(&batch);
    }

    let rows: Vec<RiskRow> = batch
        .metrics
        .iter()
        .map(|t| RiskRow::new(&t.ticker, &t.metrics))
        .collect();
    print_header(&title, ctx.format);
    print_rows(&rows, ctx.format)
}
