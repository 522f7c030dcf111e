//! Rule-based estimate validation
//!
//! An immutable, ordered table of independent rules is interpreted
//! uniformly over a flat [`EstimateSnapshot`]: each rule is a pure
//! predicate that fires when its condition is violated. Failures bucket
//! into errors, warnings, and infos; an estimate is valid when no error
//! fired. Adding or removing a rule never touches a dispatch branch.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::entities::estimate::EstimateSnapshot;

/// How severely a failed rule counts against the estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// One validation rule: a stateless predicate plus its reporting text
///
/// The predicate returns `true` when the rule is violated.
#[derive(Debug, Clone)]
pub struct ValidationRule {
    pub id: String,
    pub severity: Severity,
    pub predicate: fn(&EstimateSnapshot) -> bool,
    pub message: String,
    pub suggestion: Option<String>,
}

impl ValidationRule {
    pub fn new(
        id: impl Into<String>,
        severity: Severity,
        predicate: fn(&EstimateSnapshot) -> bool,
        message: impl Into<String>,
        suggestion: Option<&str>,
    ) -> Self {
        Self {
            id: id.into(),
            severity,
            predicate,
            message: message.into(),
            suggestion: suggestion.map(str::to_string),
        }
    }
}

/// A fired rule in a report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub rule_id: String,
    pub severity: Severity,
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// Result of evaluating the rule table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
    pub infos: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// True when no error-severity rule fired
    pub fn valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_issues(&self) -> bool {
        !self.errors.is_empty() || !self.warnings.is_empty() || !self.infos.is_empty()
    }

    /// Total fired rules across all severities
    pub fn issue_count(&self) -> usize {
        self.errors.len() + self.warnings.len() + self.infos.len()
    }
}

/// Evaluates an ordered rule table over estimate snapshots
pub struct EstimateValidator {
    rules: Vec<ValidationRule>,
}

impl Default for EstimateValidator {
    fn default() -> Self {
        Self {
            rules: builtin_rules(),
        }
    }
}

impl EstimateValidator {
    /// Validator over a custom rule table
    pub fn with_rules(rules: Vec<ValidationRule>) -> Self {
        Self { rules }
    }

    /// Append a rule to the end of the table
    pub fn push_rule(&mut self, rule: ValidationRule) {
        self.rules.push(rule);
    }

    /// The rules in evaluation order
    pub fn rules(&self) -> &[ValidationRule] {
        &self.rules
    }

    /// Evaluate every rule against the snapshot, in table order
    pub fn validate(&self, snapshot: &EstimateSnapshot) -> ValidationReport {
        let mut report = ValidationReport::default();

        for rule in &self.rules {
            if (rule.predicate)(snapshot) {
                let issue = ValidationIssue {
                    rule_id: rule.id.clone(),
                    severity: rule.severity,
                    message: rule.message.clone(),
                    suggestion: rule.suggestion.clone(),
                };
                match rule.severity {
                    Severity::Error => report.errors.push(issue),
                    Severity::Warning => report.warnings.push(issue),
                    Severity::Info => report.infos.push(issue),
                }
            }
        }

        debug!(
            errors = report.errors.len(),
            warnings = report.warnings.len(),
            infos = report.infos.len(),
            "estimate validation"
        );

        report
    }
}

/// The builtin rule table
pub fn builtin_rules() -> Vec<ValidationRule> {
    vec![
        ValidationRule::new(
            "EST-001",
            Severity::Error,
            |s| s.item_count == 0,
            "Estimate has no items",
            Some("Add at least one BOQ item before submitting for review"),
        ),
        ValidationRule::new(
            "EST-002",
            Severity::Error,
            |s| s.has_nonpositive_quantity,
            "An item has a zero or negative quantity",
            Some("Enter a positive work quantity for every item"),
        ),
        ValidationRule::new(
            "EST-003",
            Severity::Error,
            |s| s.item_count > 0 && s.total_selling < s.total_direct,
            "Selling total is below direct cost",
            Some("Check for negative markup rates in the cost configuration"),
        ),
        ValidationRule::new(
            "EST-004",
            Severity::Warning,
            |s| !s.missing_rates.is_empty(),
            "Some rate codes were missing from the snapshot and priced at zero",
            Some("Update the rate catalog or supply rate overrides for the missing codes"),
        ),
        ValidationRule::new(
            "EST-005",
            Severity::Warning,
            |s| s.indirect_rate < 0.0 || s.indirect_rate > 0.30,
            "Indirect rate is outside the usual 0-30% range",
            None,
        ),
        ValidationRule::new(
            "EST-006",
            Severity::Warning,
            |s| s.profit_margin < 0.0 || s.profit_margin > 0.40,
            "Profit margin is outside the usual 0-40% range",
            None,
        ),
        ValidationRule::new(
            "EST-007",
            Severity::Warning,
            |s| s.contingency_rate < 0.0 || s.contingency_rate > 0.15,
            "Contingency is outside the usual 0-15% range",
            None,
        ),
        ValidationRule::new(
            "EST-008",
            Severity::Warning,
            |s| s.item_count > 0 && s.has_zero_direct_item,
            "An item has zero direct cost",
            Some("Check that the item's component lines are priced"),
        ),
        ValidationRule::new(
            "EST-009",
            Severity::Info,
            |s| s.item_count > 0 && s.labor_cost == 0.0,
            "Estimate carries no labor cost",
            None,
        ),
        ValidationRule::new(
            "EST-010",
            Severity::Info,
            |s| s.item_count > 0 && s.profit_margin < 0.05,
            "Profit margin is below 5%",
            None,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn healthy_snapshot() -> EstimateSnapshot {
        EstimateSnapshot {
            item_count: 3,
            total_direct: 10_000.0,
            total_selling: 14_490.0,
            materials_cost: 6_000.0,
            labor_cost: 3_000.0,
            equipment_cost: 1_000.0,
            indirect_rate: 0.15,
            profit_margin: 0.20,
            contingency_rate: 0.05,
            missing_rates: Vec::new(),
            has_nonpositive_quantity: false,
            has_zero_direct_item: false,
        }
    }

    #[test]
    fn test_healthy_estimate_is_valid() {
        let report = EstimateValidator::default().validate(&healthy_snapshot());
        assert!(report.valid());
        assert!(!report.has_issues());
    }

    #[test]
    fn test_empty_estimate_fails() {
        let snapshot = EstimateSnapshot {
            item_count: 0,
            total_direct: 0.0,
            total_selling: 0.0,
            labor_cost: 0.0,
            ..healthy_snapshot()
        };
        let report = EstimateValidator::default().validate(&snapshot);

        assert!(!report.valid());
        assert_eq!(report.errors[0].rule_id, "EST-001");
        // Item-scoped rules stay quiet on an empty estimate
        assert!(report.infos.is_empty());
    }

    #[test]
    fn test_missing_rates_warn_but_do_not_invalidate() {
        let snapshot = EstimateSnapshot {
            missing_rates: vec!["MAT-GONE".to_string()],
            ..healthy_snapshot()
        };
        let report = EstimateValidator::default().validate(&snapshot);

        assert!(report.valid());
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].rule_id, "EST-004");
        assert!(report.warnings[0].suggestion.is_some());
    }

    #[test]
    fn test_configuration_range_rules() {
        let snapshot = EstimateSnapshot {
            indirect_rate: 0.35,
            profit_margin: 0.45,
            contingency_rate: 0.20,
            ..healthy_snapshot()
        };
        let report = EstimateValidator::default().validate(&snapshot);

        let ids: Vec<&str> = report.warnings.iter().map(|i| i.rule_id.as_str()).collect();
        assert_eq!(ids, vec!["EST-005", "EST-006", "EST-007"]);
    }

    #[test]
    fn test_severity_bucketing() {
        let snapshot = EstimateSnapshot {
            has_nonpositive_quantity: true,
            has_zero_direct_item: true,
            labor_cost: 0.0,
            ..healthy_snapshot()
        };
        let report = EstimateValidator::default().validate(&snapshot);

        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.infos.len(), 1);
        assert!(!report.valid());
        assert_eq!(report.issue_count(), 3);
    }

    #[test]
    fn test_report_order_follows_table_order() {
        let snapshot = EstimateSnapshot {
            item_count: 0,
            has_nonpositive_quantity: true,
            ..healthy_snapshot()
        };
        let report = EstimateValidator::default().validate(&snapshot);
        let ids: Vec<&str> = report.errors.iter().map(|i| i.rule_id.as_str()).collect();
        assert_eq!(ids, vec!["EST-001", "EST-002"]);
    }

    #[test]
    fn test_custom_rule_extends_the_table() {
        let mut validator = EstimateValidator::default();
        validator.push_rule(ValidationRule::new(
            "EST-100",
            Severity::Error,
            |s| s.equipment_cost > s.total_direct,
            "Equipment cost exceeds total direct cost",
            None,
        ));

        let snapshot = EstimateSnapshot {
            equipment_cost: 20_000.0,
            ..healthy_snapshot()
        };
        let report = validator.validate(&snapshot);
        assert!(report.errors.iter().any(|i| i.rule_id == "EST-100"));
    }

    #[test]
    fn test_thin_margin_info() {
        let snapshot = EstimateSnapshot {
            profit_margin: 0.03,
            ..healthy_snapshot()
        };
        let report = EstimateValidator::default().validate(&snapshot);
        assert!(report.infos.iter().any(|i| i.rule_id == "EST-010"));
    }
}
