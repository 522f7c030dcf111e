//! Productivity-based labor costing
//!
//! Derives crew-days and crew cost from a productivity template, a work
//! quantity, and the selected condition factors. A zero or negative
//! adjusted rate yields zero days instead of a division error.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calc::conditions::combine_factors;
use crate::core::lookup::CrewRateLookup;
use crate::entities::productivity::{ConditionFactor, ProductivityTemplate};

/// Cost contribution of one crew role over the whole duration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewCostLine {
    pub role_code: String,
    pub role_name_ar: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_name_en: Option<String>,

    /// Head count of the role
    pub qty: f64,

    /// Daily rate per head (zero when the role is unknown)
    pub daily_rate: f64,

    /// Days the role is engaged (equals the item duration)
    pub total_days: f64,

    /// `daily_rate * qty * total_days`
    pub total_cost: f64,

    /// The crew catalog had no entry for this role code
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub role_missing: bool,
}

/// Derived productivity costing for one work item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductivityCost {
    /// Product of the selected condition factors
    pub combined_factor: f64,

    /// `productivity_rate * combined_factor`, units/day
    pub adjusted_rate: f64,

    /// `quantity / adjusted_rate`, zero when the rate degenerates
    pub days_required: f64,

    /// Crew cost for one day, independent of duration
    pub daily_crew_cost: f64,

    /// Total labor cost over the duration
    pub total_labor_cost: f64,

    pub crew_breakdown: Vec<CrewCostLine>,
}

/// Derive crew-days and crew cost for a quantity of templated work
pub fn calculate_productivity_cost(
    template: &ProductivityTemplate,
    quantity: f64,
    crew_rates: &dyn CrewRateLookup,
    factors: &[ConditionFactor],
) -> ProductivityCost {
    let combined_factor = combine_factors(factors);
    let adjusted_rate = template.productivity_rate * combined_factor;

    let days_required = if adjusted_rate > 0.0 {
        quantity / adjusted_rate
    } else {
        0.0
    };

    let mut daily_crew_cost = 0.0;
    let mut total_labor_cost = 0.0;
    let mut crew_breakdown = Vec::with_capacity(template.crew.len());

    for member in &template.crew {
        let role = crew_rates.role(&member.role_code);
        let daily_rate = role.map(|r| r.daily_rate).unwrap_or(0.0);
        let total_cost = daily_rate * member.qty * days_required;

        daily_crew_cost += daily_rate * member.qty;
        total_labor_cost += total_cost;

        crew_breakdown.push(CrewCostLine {
            role_code: member.role_code.clone(),
            role_name_ar: role.map(|r| r.name_ar.clone()).unwrap_or_default(),
            role_name_en: role.map(|r| r.name_en.clone()),
            qty: member.qty,
            daily_rate,
            total_days: days_required,
            total_cost,
            role_missing: role.is_none(),
        });
    }

    debug!(
        template = %template.code,
        quantity,
        days_required,
        total_labor_cost,
        "productivity costing"
    );

    ProductivityCost {
        combined_factor,
        adjusted_rate,
        days_required,
        daily_crew_cost,
        total_labor_cost,
        crew_breakdown,
    }
}

/// Calendar completion date for a duration starting at `start`
///
/// Fractional days round up to whole calendar days.
pub fn completion_date(start: NaiveDate, days_required: f64) -> NaiveDate {
    let whole_days = days_required.ceil().max(0.0) as i64;
    start + Duration::days(whole_days)
}
