//! Component resolution and the cascading cost rollup
//!
//! `resolve_components` prices raw lines against a rate snapshot;
//! `calculate_item` rolls the three class subtotals through the cascading
//! markup stack of [`CostBreakdown::calculate`]. Both degrade instead of
//! failing: a missing rate prices at zero and is recorded on the group.

use tracing::warn;

use crate::core::lookup::RateLookup;
use crate::entities::component::{ComponentClass, ComponentGroup, ComponentLine, PricedComponent};
use crate::entities::estimate::{CostBreakdown, CostConfiguration};

/// Price a class of component lines against a rate snapshot
///
/// Resolution order per line: override, catalog, zero. A catalog miss with
/// no override is recorded on the priced line and the group.
pub fn resolve_components(
    class: ComponentClass,
    lines: &[ComponentLine],
    rates: &dyn RateLookup,
) -> ComponentGroup {
    let mut components = Vec::with_capacity(lines.len());
    let mut subtotal = 0.0;
    let mut missing_rates = Vec::new();

    for line in lines {
        let (rate, rate_missing) = match line.rate_override {
            Some(rate) => (rate, false),
            None => {
                let resolution = rates.rate(&line.rate_code);
                if resolution.is_missing() {
                    warn!(code = %line.rate_code, %class, "rate lookup miss, cost coerced to zero");
                    missing_rates.push(line.rate_code.clone());
                }
                (resolution.or_zero(), resolution.is_missing())
            }
        };

        let cost = line.qty * rate;
        subtotal += cost;

        components.push(PricedComponent {
            rate_code: line.rate_code.clone(),
            qty: line.qty,
            rate,
            cost,
            rate_missing,
            description: line.description.clone(),
        });
    }

    ComponentGroup {
        class,
        components,
        subtotal,
        missing_rates,
    }
}

/// Fully costed BOQ item input
#[derive(Debug, Clone)]
pub struct ItemCosting {
    pub materials: ComponentGroup,
    pub labor: ComponentGroup,
    pub equipment: ComponentGroup,
    pub breakdown: CostBreakdown,
}

/// Price an item's components and run the cascading rollup
pub fn calculate_item(
    quantity: f64,
    materials: &[ComponentLine],
    labor: &[ComponentLine],
    equipment: &[ComponentLine],
    rates: &dyn RateLookup,
    config: &CostConfiguration,
) -> ItemCosting {
    let materials = resolve_components(ComponentClass::Materials, materials, rates);
    let labor = resolve_components(ComponentClass::Labor, labor, rates);
    let equipment = resolve_components(ComponentClass::Equipment, equipment, rates);

    let direct_cost = materials.subtotal + labor.subtotal + equipment.subtotal;
    let breakdown = CostBreakdown::calculate(direct_cost, config, quantity);

    ItemCosting {
        materials,
        labor,
        equipment,
        breakdown,
    }
}
