//! Estimates - cost configuration, cascading breakdown, items, lifecycle
//!
//! The cascading markup model is normative: indirect compounds on direct,
//! profit on direct+indirect, contingency on direct+indirect+profit. Each
//! stage applies to the running total, never to direct cost alone.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::identity::{EntityId, EntityPrefix};
use crate::entities::component::ComponentGroup;

/// Markup fractions applied by the cascading rollup
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CostConfiguration {
    /// Overhead allocation as a fraction of direct cost
    pub indirect_rate: f64,

    /// Profit as a fraction of direct + indirect
    pub profit_margin: f64,

    /// Risk buffer as a fraction of direct + indirect + profit
    pub contingency_rate: f64,
}

impl Default for CostConfiguration {
    fn default() -> Self {
        Self {
            indirect_rate: 0.15,
            profit_margin: 0.20,
            contingency_rate: 0.05,
        }
    }
}

/// Derived cost stack for one BOQ item
///
/// All stages except `line_total` are per unit of the item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// Materials + labor + equipment subtotals
    pub direct_cost: f64,

    pub indirect_cost: f64,
    pub profit: f64,
    pub contingency: f64,

    /// Selling price per unit
    pub selling_rate: f64,

    /// `selling_rate * quantity`
    pub line_total: f64,
}

impl CostBreakdown {
    /// Run the cascading rollup over a per-unit direct cost
    ///
    /// The order is load-bearing: D=1000 with rates .15/.20/.05 yields a
    /// selling rate of 1449, not the 1450 a flat model would give.
    pub fn calculate(direct_cost: f64, config: &CostConfiguration, quantity: f64) -> Self {
        let indirect_cost = direct_cost * config.indirect_rate;
        let profit = (direct_cost + indirect_cost) * config.profit_margin;
        let contingency = (direct_cost + indirect_cost + profit) * config.contingency_rate;
        let selling_rate = direct_cost + indirect_cost + profit + contingency;

        Self {
            direct_cost,
            indirect_cost,
            profit,
            contingency,
            selling_rate,
            line_total: selling_rate * quantity,
        }
    }
}

/// Estimate lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum EstimateStatus {
    #[default]
    Draft,
    PendingReview,
    Approved,
    Rejected,
    Superseded,
}

impl EstimateStatus {
    /// Check if a status transition is valid
    pub fn is_valid_transition(self, to: EstimateStatus) -> bool {
        matches!(
            (self, to),
            // Normal forward transitions
            (EstimateStatus::Draft, EstimateStatus::PendingReview)
                | (EstimateStatus::PendingReview, EstimateStatus::Approved)
                | (EstimateStatus::PendingReview, EstimateStatus::Rejected)
                // Rejected estimates go back to draft for revision
                | (EstimateStatus::Rejected, EstimateStatus::Draft)
                // A newer version supersedes an approved one
                | (EstimateStatus::Approved, EstimateStatus::Superseded)
        )
    }

    /// Get allowed transitions from the current status
    pub fn allowed_transitions(self) -> Vec<EstimateStatus> {
        match self {
            EstimateStatus::Draft => vec![EstimateStatus::PendingReview],
            EstimateStatus::PendingReview => {
                vec![EstimateStatus::Approved, EstimateStatus::Rejected]
            }
            EstimateStatus::Approved => vec![EstimateStatus::Superseded],
            EstimateStatus::Rejected => vec![EstimateStatus::Draft],
            EstimateStatus::Superseded => vec![],
        }
    }
}

impl std::fmt::Display for EstimateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EstimateStatus::Draft => write!(f, "draft"),
            EstimateStatus::PendingReview => write!(f, "pending_review"),
            EstimateStatus::Approved => write!(f, "approved"),
            EstimateStatus::Rejected => write!(f, "rejected"),
            EstimateStatus::Superseded => write!(f, "superseded"),
        }
    }
}

impl std::str::FromStr for EstimateStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(EstimateStatus::Draft),
            "pending_review" => Ok(EstimateStatus::PendingReview),
            "approved" => Ok(EstimateStatus::Approved),
            "rejected" => Ok(EstimateStatus::Rejected),
            "superseded" => Ok(EstimateStatus::Superseded),
            _ => Err(format!("Unknown estimate status: {}", s)),
        }
    }
}

/// One priced BOQ line within an estimate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateItem {
    /// Unique identifier (ITEM-...)
    pub id: EntityId,

    /// BOQ code (e.g. "CON-RC-FND")
    pub boq_code: String,

    pub description_ar: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_en: Option<String>,

    /// Measurement unit
    pub unit: String,

    /// Quantity of work in the item's unit
    pub quantity: f64,

    pub materials: ComponentGroup,
    pub labor: ComponentGroup,
    pub equipment: ComponentGroup,

    pub breakdown: CostBreakdown,
}

impl EstimateItem {
    /// All codes across the item's groups that priced at zero on a
    /// catalog miss
    pub fn missing_rates(&self) -> Vec<String> {
        let mut codes = Vec::new();
        for group in [&self.materials, &self.labor, &self.equipment] {
            codes.extend(group.missing_rates.iter().cloned());
        }
        codes
    }
}

/// Totals across all items of an estimate
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EstimateTotals {
    pub total_direct: f64,
    pub total_indirect: f64,
    pub total_profit: f64,
    pub total_contingency: f64,
    pub total_selling: f64,

    pub materials_cost: f64,
    pub labor_cost: f64,
    pub equipment_cost: f64,
}

/// A versioned estimate grouping priced items under one configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Estimate {
    /// Unique identifier (EST-...)
    pub id: EntityId,

    pub project_name: String,

    /// Revision number within the project
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub config: CostConfiguration,

    #[serde(default)]
    pub status: EstimateStatus,

    #[serde(default)]
    pub items: Vec<EstimateItem>,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Author (who prepared this estimate)
    pub author: String,
}

fn default_version() -> u32 {
    1
}

impl Estimate {
    /// Create a new draft estimate
    pub fn new(
        project_name: impl Into<String>,
        config: CostConfiguration,
        author: impl Into<String>,
    ) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Est),
            project_name: project_name.into(),
            version: 1,
            name: None,
            config,
            status: EstimateStatus::default(),
            items: Vec::new(),
            created: Utc::now(),
            author: author.into(),
        }
    }

    /// Append a priced item
    pub fn add_item(&mut self, item: EstimateItem) {
        self.items.push(item);
    }

    /// Transition to a new status if the lifecycle allows it
    pub fn transition_to(&mut self, to: EstimateStatus) -> bool {
        if self.status.is_valid_transition(to) {
            self.status = to;
            true
        } else {
            false
        }
    }

    /// Sum the per-unit breakdowns across items, weighted by quantity
    pub fn totals(&self) -> EstimateTotals {
        let mut totals = EstimateTotals::default();

        for item in &self.items {
            let qty = item.quantity;
            totals.total_direct += item.breakdown.direct_cost * qty;
            totals.total_indirect += item.breakdown.indirect_cost * qty;
            totals.total_profit += item.breakdown.profit * qty;
            totals.total_contingency += item.breakdown.contingency * qty;
            totals.total_selling += item.breakdown.line_total;

            totals.materials_cost += item.materials.subtotal * qty;
            totals.labor_cost += item.labor.subtotal * qty;
            totals.equipment_cost += item.equipment.subtotal * qty;
        }

        totals
    }

    /// Flatten the estimate into the record the validation rules read
    pub fn snapshot(&self) -> EstimateSnapshot {
        let totals = self.totals();
        let mut missing_rates = Vec::new();
        let mut has_nonpositive_quantity = false;
        let mut has_zero_direct_item = false;

        for item in &self.items {
            missing_rates.extend(item.missing_rates());
            if item.quantity <= 0.0 {
                has_nonpositive_quantity = true;
            }
            if item.breakdown.direct_cost == 0.0 {
                has_zero_direct_item = true;
            }
        }

        EstimateSnapshot {
            item_count: self.items.len(),
            total_direct: totals.total_direct,
            total_selling: totals.total_selling,
            materials_cost: totals.materials_cost,
            labor_cost: totals.labor_cost,
            equipment_cost: totals.equipment_cost,
            indirect_rate: self.config.indirect_rate,
            profit_margin: self.config.profit_margin,
            contingency_rate: self.config.contingency_rate,
            missing_rates,
            has_nonpositive_quantity,
            has_zero_direct_item,
        }
    }
}

/// Flat snapshot of an assembled estimate, read by validation rules
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EstimateSnapshot {
    pub item_count: usize,

    pub total_direct: f64,
    pub total_selling: f64,

    pub materials_cost: f64,
    pub labor_cost: f64,
    pub equipment_cost: f64,

    pub indirect_rate: f64,
    pub profit_margin: f64,
    pub contingency_rate: f64,

    /// Codes that priced at zero on a catalog miss, across all items
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_rates: Vec<String>,

    pub has_nonpositive_quantity: bool,
    pub has_zero_direct_item: bool,
}
