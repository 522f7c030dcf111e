//! Entity type definitions
//!
//! The estimating engine works over these value objects:
//!
//! **Cost rollup:**
//! - [`ComponentLine`] / [`ComponentGroup`] - BOQ item inputs and their priced form
//! - [`CostConfiguration`] / [`CostBreakdown`] - markup fractions and the cascading stack
//! - [`EstimateItem`] / [`Estimate`] - priced lines grouped under one configuration
//!
//! **Productivity:**
//! - [`CrewRole`] / [`CrewMember`] - labor trades and crew composition
//! - [`ProductivityTemplate`] - daily output per crew for a work type
//! - [`ConditionFactor`] - multiplicative productivity derating
//!
//! **Exposure & procurement:**
//! - [`RiskRecord`] - EMV assessment and categorization
//! - [`SupplierEvaluation`] - weighted multi-criterion supplier ranking
//! - [`CashflowStatement`] - cumulative balance, NPV, funding gap, break-even

pub mod cashflow;
pub mod component;
pub mod crew;
pub mod estimate;
pub mod productivity;
pub mod risk;
pub mod supplier;

pub use cashflow::{CashflowPeriod, CashflowProjection, CashflowStatement};
pub use component::{ComponentClass, ComponentGroup, ComponentLine, PricedComponent};
pub use crew::{CrewMember, CrewRole, CrewRoleCategory};
pub use estimate::{
    CostBreakdown, CostConfiguration, Estimate, EstimateItem, EstimateSnapshot, EstimateStatus,
    EstimateTotals,
};
pub use productivity::{ConditionCategory, ConditionFactor, ConditionPreset, ProductivityTemplate};
pub use risk::{RiskAssessment, RiskBands, RiskCategory, RiskRecord, RiskRegister, RiskTemplate};
pub use supplier::{
    SupplierEvaluation, SupplierScores, SupplierStatus, SupplierStatusBands, SupplierWeights,
};
