//! Cashflow projection - cumulative balance, NPV, funding gap, break-even
//!
//! Periods are processed in ascending period order. NPV discounts by the
//! 0-based period position, so the first period is undiscounted.

use serde::{Deserialize, Serialize};

/// Cash in/out for one period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashflowPeriod {
    /// 0-based period index
    pub period: usize,

    pub cash_in: f64,
    pub cash_out: f64,
}

impl CashflowPeriod {
    pub fn new(period: usize, cash_in: f64, cash_out: f64) -> Self {
        Self {
            period,
            cash_in,
            cash_out,
        }
    }

    /// `cash_in - cash_out`
    pub fn net_cashflow(&self) -> f64 {
        self.cash_in - self.cash_out
    }
}

/// One projected period with derived values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodProjection {
    pub period: usize,
    pub cash_in: f64,
    pub cash_out: f64,
    pub net_cashflow: f64,

    /// Running sum of net cashflow up to and including this period
    pub cumulative: f64,
}

/// A cashflow series for one project
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CashflowStatement {
    #[serde(default)]
    pub periods: Vec<CashflowPeriod>,
}

impl CashflowStatement {
    /// Build a statement, ordering the periods ascending
    pub fn new(mut periods: Vec<CashflowPeriod>) -> Self {
        periods.sort_by_key(|p| p.period);
        Self { periods }
    }

    /// Project the series under the given discount rate (a fraction,
    /// e.g. 0.10 for 10%)
    pub fn project(&self, discount_rate: f64) -> CashflowProjection {
        let mut projected = Vec::with_capacity(self.periods.len());
        let mut cumulative = 0.0;
        let mut npv = 0.0;
        let mut total_cash_in = 0.0;
        let mut total_cash_out = 0.0;

        for (t, period) in self.periods.iter().enumerate() {
            let net = period.net_cashflow();
            cumulative += net;
            npv += net / (1.0 + discount_rate).powi(t as i32);
            total_cash_in += period.cash_in;
            total_cash_out += period.cash_out;

            projected.push(PeriodProjection {
                period: period.period,
                cash_in: period.cash_in,
                cash_out: period.cash_out,
                net_cashflow: net,
                cumulative,
            });
        }

        let min_cumulative = projected
            .iter()
            .map(|p| p.cumulative)
            .fold(f64::INFINITY, f64::min);
        let funding_gap = if min_cumulative < 0.0 {
            min_cumulative.abs()
        } else {
            0.0
        };

        // First period at or above zero after being underwater (or from
        // the start)
        let mut break_even_period = None;
        for (i, p) in projected.iter().enumerate() {
            if p.cumulative >= 0.0 && (i == 0 || projected[i - 1].cumulative < 0.0) {
                break_even_period = Some(i);
                break;
            }
        }

        let final_cumulative = projected.last().map(|p| p.cumulative).unwrap_or(0.0);

        CashflowProjection {
            periods: projected,
            npv,
            funding_gap,
            break_even_period,
            total_cash_in,
            total_cash_out,
            final_cumulative,
        }
    }
}

/// Derived cashflow figures for a whole series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashflowProjection {
    pub periods: Vec<PeriodProjection>,

    /// Discounted sum of net cashflows
    pub npv: f64,

    /// Peak financing need: most negative cumulative point, as a
    /// positive number (zero when the curve never dips below zero)
    pub funding_gap: f64,

    /// First period position where the cumulative curve reaches zero or
    /// above; None when the series never recovers
    pub break_even_period: Option<usize>,

    pub total_cash_in: f64,
    pub total_cash_out: f64,
    pub final_cumulative: f64,
}

/// Per-period gap between cumulative cash in and cumulative cash out
pub fn funding_gap_series(cash_in: &[f64], cash_out: &[f64]) -> Vec<f64> {
    let mut gaps = Vec::with_capacity(cash_in.len());
    let mut cum_in = 0.0;
    let mut cum_out = 0.0;

    for (i, inflow) in cash_in.iter().enumerate() {
        cum_in += inflow;
        cum_out += cash_out.get(i).copied().unwrap_or(0.0);
        gaps.push(cum_in - cum_out);
    }

    gaps
}
