//! Overview command implementation.
//!
//! Headline numbers for the fund as of the analysis date.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use fundlens_analytics::prelude::*;
use fundlens_core::Date;

use crate::cli::OutputFormat;
use crate::commands::RunContext;
use crate::output::{format_percent, print_header, print_json, print_rows, print_warning, KeyValue};

/// Arguments for the overview command.
#[derive(Args, Debug)]
pub struct OverviewArgs {}

#[derive(Serialize)]
struct Overview {
    fund: String,
    as_of: Date,
    latest_nav: Option<f64>,
    holdings: usize,
    annualized_return: Option<AnnualizedReturn>,
    risk: Option<RiskMetrics>,
}

fn basis_label(basis: ReturnBasis) -> &'static str {
    match basis {
        ReturnBasis::Annualized => "annualized",
        ReturnBasis::NonAnnualized => "not annualized, short history",
    }
}

/// Execute the overview command.
pub fn execute(_args: OverviewArgs, ctx: &RunContext) -> Result<()> {
    let loaded = ctx.load()?;
    let snapshot = &loaded.snapshot;
    let config = ctx.analytics();
    let nav = snapshot.nav_series();

    let annualized_return = match annualized_series_return(nav, config) {
        Ok(r) => Some(r),
        Err(e) => {
            print_warning(&format!("annualized return unavailable: {e}"));
            None
        }
    };
    let risk = match simple_returns(nav).and_then(|r| risk_metrics(&r, &config.risk_params())) {
        Ok(m) => Some(m),
        Err(e) => {
            print_warning(&format!("risk metrics unavailable: {e}"));
            None
        }
    };

    let overview = Overview {
        fund: snapshot.name().to_string(),
        as_of: snapshot.as_of_date(),
        latest_nav: snapshot.latest_nav(),
        holdings: snapshot.holding_count(),
        annualized_return,
        risk,
    };

    if ctx.format == OutputFormat::Json {
        return print_json(&overview);
    }

    let mut rows = vec![
        KeyValue::new("Fund", &overview.fund),
        KeyValue::new("As of", overview.as_of.to_string()),
        KeyValue::new(
            "Latest NAV",
            overview
                .latest_nav
                .map_or_else(|| "n/a".to_string(), |v| format!("{v:.4}")),
        ),
        KeyValue::new("Holdings", overview.holdings.to_string()),
    ];
    if let Some(r) = &overview.annualized_return {
        rows.push(KeyValue::new(
            "Return",
            format!(
                "{} ({}, {} days)",
                format_percent(r.value),
                basis_label(r.basis),
                r.days_available
            ),
        ));
    }
    if let Some(m) = &overview.risk {
        rows.push(KeyValue::percent("Volatility (ann.)", m.annualized_volatility));
        rows.push(KeyValue::percent("Max drawdown", m.max_drawdown));
        rows.push(KeyValue::percent(
            format!("VaR ({:.0}%)", m.var_confidence * 100.0),
            m.var_95,
        ));
        rows.push(KeyValue::new("Sharpe ratio", format!("{:.2}", m.sharpe_ratio)));
    }

    print_header(&format!("{} as of {}", overview.fund, overview.as_of), ctx.format);
    print_rows(&rows, ctx.format)
}
