//! Return Calculator.
//!
//! Point, trailing-period, cumulative and annualized returns from a price or
//! NAV series. Missing endpoints are errors, never zeros.

mod annualize;
mod cumulative;
mod period;

pub use annualize::{annualize, annualized_series_return, AnnualizedReturn, ReturnBasis};
pub use cumulative::{cumulative, period_to_date, since_start_of_year, PeriodToDate};
pub(crate) use period::resolve;
pub use period::{period_return, returns, simple_returns, Period, PeriodReturn, PeriodReturns};
