//! Single-item BOQ markup formula
//!
//! This is a second, independent cost model used by the quick BOQ
//! calculator: profit is folded multiplicatively into the indirect term
//! instead of being a separate additive stage. It intentionally stays a
//! separate function from the cascading rollup — merging the two would
//! silently change historical totals.

use serde::{Deserialize, Serialize};

/// Percentages for the BOQ markup formula
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BoqPercentages {
    /// Indirect share of direct value
    pub indirect_pct: f64,

    /// Net profit folded into the indirect term
    pub net_profit_pct: f64,

    /// Final markup on the subtotal
    pub markup_pct: f64,
}

impl Default for BoqPercentages {
    fn default() -> Self {
        Self {
            indirect_pct: 0.152183,
            net_profit_pct: 0.20,
            markup_pct: 0.16,
        }
    }
}

/// Result of the BOQ markup formula
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoqCalculation {
    pub direct_value: f64,
    pub indirect_value: f64,
    pub total_before_markup: f64,
    pub markup: f64,
    pub grand_total: f64,
}

/// Run the BOQ markup formula over a per-unit direct cost
pub fn calculate_boq(direct_cost: f64, quantity: f64, pct: &BoqPercentages) -> BoqCalculation {
    let direct_value = direct_cost * quantity;
    let indirect_value = direct_value * pct.indirect_pct * (1.0 + pct.net_profit_pct);
    let total_before_markup = direct_value + indirect_value;
    let markup = total_before_markup * pct.markup_pct;
    let grand_total = total_before_markup + markup;

    BoqCalculation {
        direct_value,
        indirect_value,
        total_before_markup,
        markup,
        grand_total,
    }
}
