//! Risk Calculator.
//!
//! Volatility, drawdown, historical VaR and Sharpe ratio over a series of
//! daily simple returns. Each measure is an independent pure function;
//! [`risk_metrics`] runs all of them over the same input.
//!
//! # Example
//!
//! ```rust
//! use fundlens_analytics::risk::{risk_metrics, RiskParams};
//! use fundlens_core::{Date, ReturnSeries};
//!
//! let start = Date::from_ymd(2025, 1, 2).unwrap();
//! let returns = ReturnSeries::from_values("FUND", start, &[0.01, -0.02, 0.015]).unwrap();
//!
//! let metrics = risk_metrics(&returns, &RiskParams::default()).unwrap();
//! assert!(metrics.max_drawdown <= 0.0);
//! ```

mod drawdown;
mod metrics;
mod params;
mod sharpe;
mod var;
mod volatility;

pub use drawdown::{drawdown_series, max_drawdown};
pub use metrics::{risk_metrics, risk_metrics_by_ticker, RiskBatch, RiskMetrics, TickerFailure, TickerRisk};
pub use params::RiskParams;
pub use sharpe::{sharpe_ratio, ZERO_VOLATILITY_TOLERANCE};
pub use var::value_at_risk;
pub use volatility::annualized_volatility;
