//! Calculation pipelines
//!
//! Pure, synchronous, non-throwing numeric pipelines. Degraded inputs
//! (missing rates, zero productivity, empty quantity) produce zero-valued
//! results so a partial estimate still renders; data-quality problems are
//! surfaced through the validation engine, never as errors.

pub mod boq;
pub mod conditions;
pub mod productivity;
pub mod rollup;

pub use boq::{calculate_boq, BoqCalculation, BoqPercentages};
pub use conditions::{
    analyze_condition_impact, combine_factors, ConditionImpact, ImpactBands, ImpactLevel,
};
pub use productivity::{
    calculate_productivity_cost, completion_date, CrewCostLine, ProductivityCost,
};
pub use rollup::{calculate_item, resolve_components, ItemCosting};
