//! Supplier evaluation - weighted scoring and status bucketing
//!
//! Seven subscores on a 0–10 scale combine into a weighted total. The risk
//! deduction subscore is collected on a higher-is-worse scale, so its
//! weight is negative and converts it into a penalty.

use serde::{Deserialize, Serialize};

use crate::core::identity::{EntityId, EntityPrefix};

/// Subscores for one supplier, each ~0–10
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SupplierScores {
    pub quality: f64,
    pub price: f64,
    pub delivery: f64,
    pub payment_terms: f64,
    pub experience: f64,
    pub after_sales: f64,

    /// Higher = worse; weighted negatively
    pub risk_deduction: f64,
}

impl SupplierScores {
    /// Weighted total score
    pub fn weighted_total(&self, weights: &SupplierWeights) -> f64 {
        self.quality * weights.quality
            + self.price * weights.price
            + self.delivery * weights.delivery
            + self.payment_terms * weights.payment_terms
            + self.experience * weights.experience
            + self.after_sales * weights.after_sales
            + self.risk_deduction * weights.risk_deduction
    }
}

/// Criterion weights for supplier scoring
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SupplierWeights {
    pub quality: f64,
    pub price: f64,
    pub delivery: f64,
    pub payment_terms: f64,
    pub experience: f64,
    pub after_sales: f64,
    pub risk_deduction: f64,
}

impl Default for SupplierWeights {
    fn default() -> Self {
        Self {
            quality: 0.30,
            price: 0.25,
            delivery: 0.20,
            payment_terms: 0.10,
            experience: 0.10,
            after_sales: 0.05,
            risk_deduction: -0.10,
        }
    }
}

/// Score thresholds for status bucketing, checked in descending order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SupplierStatusBands {
    pub primary: f64,
    pub conditional: f64,
    pub backup: f64,
}

impl Default for SupplierStatusBands {
    fn default() -> Self {
        Self {
            primary: 8.0,
            conditional: 7.0,
            backup: 6.0,
        }
    }
}

/// Supplier ranking bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupplierStatus {
    Primary,
    Conditional,
    Backup,
    Rejected,
}

impl SupplierStatus {
    /// Bucket a total score against the band thresholds
    pub fn from_score(score: f64, bands: &SupplierStatusBands) -> Self {
        if score >= bands.primary {
            SupplierStatus::Primary
        } else if score >= bands.conditional {
            SupplierStatus::Conditional
        } else if score >= bands.backup {
            SupplierStatus::Backup
        } else {
            SupplierStatus::Rejected
        }
    }
}

impl std::fmt::Display for SupplierStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SupplierStatus::Primary => write!(f, "primary"),
            SupplierStatus::Conditional => write!(f, "conditional"),
            SupplierStatus::Backup => write!(f, "backup"),
            SupplierStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for SupplierStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "primary" => Ok(SupplierStatus::Primary),
            "conditional" => Ok(SupplierStatus::Conditional),
            "backup" => Ok(SupplierStatus::Backup),
            "rejected" => Ok(SupplierStatus::Rejected),
            _ => Err(format!("Unknown supplier status: {}", s)),
        }
    }
}

/// A scored supplier with its derived status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierEvaluation {
    /// Unique identifier (SUP-...)
    pub id: EntityId,

    pub name: String,

    /// Supply category (e.g. "materials", "equipment")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    pub scores: SupplierScores,

    pub total_score: f64,
    pub status: SupplierStatus,
}

impl SupplierEvaluation {
    /// Score the supplier and bucket the result
    pub fn evaluate(
        name: impl Into<String>,
        category: Option<String>,
        scores: SupplierScores,
        weights: &SupplierWeights,
        bands: &SupplierStatusBands,
    ) -> Self {
        let total_score = scores.weighted_total(weights);
        let status = SupplierStatus::from_score(total_score, bands);

        Self {
            id: EntityId::new(EntityPrefix::Sup),
            name: name.into(),
            category,
            scores,
            total_score,
            status,
        }
    }
}
