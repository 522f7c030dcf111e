//! Risk records with EMV assessment
//!
//! Expected Monetary Value is probability × impact, both on a 0–1 scale.
//! Category thresholds are inclusive and checked from high down.

use serde::{Deserialize, Serialize};

use crate::core::identity::{EntityId, EntityPrefix};

/// Risk exposure level derived from EMV
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskCategory {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskCategory::Low => write!(f, "low"),
            RiskCategory::Medium => write!(f, "medium"),
            RiskCategory::High => write!(f, "high"),
        }
    }
}

/// EMV thresholds for risk categorization
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskBands {
    /// EMV at or above this is high
    pub high: f64,

    /// EMV at or above this (and below `high`) is medium
    pub medium: f64,
}

impl Default for RiskBands {
    fn default() -> Self {
        Self {
            high: 0.49,
            medium: 0.25,
        }
    }
}

/// EMV and category for one risk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub emv: f64,
    pub category: RiskCategory,
}

/// A risk register entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskRecord {
    /// Unique identifier (RISK-...)
    pub id: EntityId,

    pub statement_ar: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statement_en: Option<String>,

    /// Category id (e.g. "financial", "schedule")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Probability of occurrence, 0–1
    pub probability: f64,

    /// Relative impact if it occurs, 0–1
    pub impact: f64,
}

impl RiskRecord {
    pub fn new(statement_ar: impl Into<String>, probability: f64, impact: f64) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Risk),
            statement_ar: statement_ar.into(),
            statement_en: None,
            category: None,
            probability,
            impact,
        }
    }

    /// Instantiate a register entry from a catalog template
    pub fn from_template(template: &RiskTemplate) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Risk),
            statement_ar: template.statement_ar.clone(),
            statement_en: Some(template.statement_en.clone()),
            category: Some(template.category.clone()),
            probability: template.default_probability,
            impact: template.default_impact,
        }
    }

    /// Expected Monetary Value = probability × impact
    pub fn emv(&self) -> f64 {
        self.probability * self.impact
    }

    /// Assess EMV against the band thresholds
    pub fn assess(&self, bands: &RiskBands) -> RiskAssessment {
        let emv = self.emv();
        let category = if emv >= bands.high {
            RiskCategory::High
        } else if emv >= bands.medium {
            RiskCategory::Medium
        } else {
            RiskCategory::Low
        };

        RiskAssessment { emv, category }
    }
}

/// Catalog shape for a pre-loaded risk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskTemplate {
    pub id: String,
    pub statement_ar: String,
    pub statement_en: String,
    pub category: String,
    pub default_probability: f64,
    pub default_impact: f64,
}

/// Catalog shape for a risk category label
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskCategoryInfo {
    pub id: String,
    pub name_ar: String,
    pub name_en: String,
}

/// A collection of risks with aggregate exposure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RiskRegister {
    #[serde(default)]
    pub risks: Vec<RiskRecord>,
}

impl RiskRegister {
    pub fn new(risks: Vec<RiskRecord>) -> Self {
        Self { risks }
    }

    pub fn push(&mut self, risk: RiskRecord) {
        self.risks.push(risk);
    }

    /// Sum of EMVs across the register
    pub fn total_emv(&self) -> f64 {
        self.risks.iter().map(|r| r.emv()).sum()
    }

    /// Count of risks per category under the given bands
    pub fn counts(&self, bands: &RiskBands) -> RiskCounts {
        let mut counts = RiskCounts::default();
        for risk in &self.risks {
            match risk.assess(bands).category {
                RiskCategory::High => counts.high += 1,
                RiskCategory::Medium => counts.medium += 1,
                RiskCategory::Low => counts.low += 1,
            }
        }
        counts
    }
}

/// Per-category risk counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}
