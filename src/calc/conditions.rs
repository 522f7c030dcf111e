//! Condition-factor composition
//!
//! Selected factors multiply together into one combined derating; an empty
//! selection is the identity (1.0). The impact analysis turns the combined
//! factor into a productivity-loss percentage and a severity level for
//! display.

use serde::{Deserialize, Serialize};

use crate::entities::productivity::ConditionFactor;

/// Multiply the selected factors; empty selection composes to 1.0
pub fn combine_factors(factors: &[ConditionFactor]) -> f64 {
    factors.iter().fold(1.0, |combined, f| combined * f.factor)
}

/// Productivity-loss severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactLevel {
    None,
    Low,
    Medium,
    High,
    Severe,
}

impl ImpactLevel {
    /// Bucket a loss percentage; upper bounds are inclusive
    pub fn from_percentage(pct: f64, bands: &ImpactBands) -> Self {
        if pct <= 0.0 {
            ImpactLevel::None
        } else if pct <= bands.low {
            ImpactLevel::Low
        } else if pct <= bands.medium {
            ImpactLevel::Medium
        } else if pct <= bands.high {
            ImpactLevel::High
        } else {
            ImpactLevel::Severe
        }
    }
}

impl std::fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImpactLevel::None => write!(f, "none"),
            ImpactLevel::Low => write!(f, "low"),
            ImpactLevel::Medium => write!(f, "medium"),
            ImpactLevel::High => write!(f, "high"),
            ImpactLevel::Severe => write!(f, "severe"),
        }
    }
}

/// Percentage bounds for the impact levels (inclusive upper bounds)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpactBands {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

impl Default for ImpactBands {
    fn default() -> Self {
        Self {
            low: 10.0,
            medium: 25.0,
            high: 40.0,
        }
    }
}

/// Combined derating with its severity reading
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionImpact {
    pub combined_factor: f64,

    /// Productivity loss, 0–100
    pub impact_percentage: f64,

    pub level: ImpactLevel,
}

/// Analyze the combined effect of the selected factors
pub fn analyze_condition_impact(factors: &[ConditionFactor], bands: &ImpactBands) -> ConditionImpact {
    let combined_factor = combine_factors(factors);
    let impact_percentage = (1.0 - combined_factor) * 100.0;

    ConditionImpact {
        combined_factor,
        impact_percentage,
        level: ImpactLevel::from_percentage(impact_percentage, bands),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::productivity::ConditionCategory;

    fn factor(id: &str, value: f64) -> ConditionFactor {
        ConditionFactor {
            id: id.to_string(),
            code: id.to_uppercase(),
            name_ar: String::new(),
            name_en: String::new(),
            category: ConditionCategory::Weather,
            factor: value,
            description: None,
        }
    }

    #[test]
    fn test_empty_selection_is_identity() {
        assert_eq!(combine_factors(&[]), 1.0);
    }

    #[test]
    fn test_factors_multiply() {
        let combined = combine_factors(&[factor("a", 0.8), factor("b", 0.9)]);
        assert!((combined - 0.72).abs() < 1e-12);
    }

    #[test]
    fn test_combination_is_order_independent() {
        let forward = combine_factors(&[factor("a", 0.8), factor("b", 0.9), factor("c", 0.6)]);
        let reversed = combine_factors(&[factor("c", 0.6), factor("b", 0.9), factor("a", 0.8)]);
        assert!((forward - reversed).abs() < 1e-12);
    }

    #[test]
    fn test_impact_levels_inclusive_bounds() {
        let bands = ImpactBands::default();
        assert_eq!(ImpactLevel::from_percentage(0.0, &bands), ImpactLevel::None);
        assert_eq!(ImpactLevel::from_percentage(10.0, &bands), ImpactLevel::Low);
        assert_eq!(ImpactLevel::from_percentage(10.1, &bands), ImpactLevel::Medium);
        assert_eq!(ImpactLevel::from_percentage(25.0, &bands), ImpactLevel::Medium);
        assert_eq!(ImpactLevel::from_percentage(40.0, &bands), ImpactLevel::High);
        assert_eq!(ImpactLevel::from_percentage(40.1, &bands), ImpactLevel::Severe);
    }

    #[test]
    fn test_analyze_condition_impact() {
        let impact = analyze_condition_impact(
            &[factor("heat", 0.9), factor("night", 0.85)],
            &ImpactBands::default(),
        );

        assert!((impact.combined_factor - 0.765).abs() < 1e-12);
        assert!((impact.impact_percentage - 23.5).abs() < 1e-9);
        assert_eq!(impact.level, ImpactLevel::Medium);
    }

    #[test]
    fn test_no_factors_reads_as_no_impact() {
        let impact = analyze_condition_impact(&[], &ImpactBands::default());
        assert_eq!(impact.impact_percentage, 0.0);
        assert_eq!(impact.level, ImpactLevel::None);
    }
}
