//! Engine configuration with injectable tuning constants
//!
//! Every weight, percentage, and threshold the calculation pipelines use is
//! collected here so callers can tune them per tenant instead of patching
//! module constants. The `Default` impls carry the historical values.

use serde::Deserialize;
use thiserror::Error;

use crate::calc::boq::BoqPercentages;
use crate::calc::conditions::ImpactBands;
use crate::entities::estimate::CostConfiguration;
use crate::entities::risk::RiskBands;
use crate::entities::supplier::{SupplierStatusBands, SupplierWeights};

/// Aggregate engine tuning configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Default markup fractions for new estimates
    pub cost: CostConfiguration,

    /// Percentages for the single-item BOQ markup formula
    pub boq: BoqPercentages,

    /// Criterion weights for supplier scoring
    pub supplier_weights: SupplierWeights,

    /// Score thresholds for supplier status bucketing
    pub supplier_bands: SupplierStatusBands,

    /// EMV thresholds for risk categorization
    pub risk_bands: RiskBands,

    /// Percentage bounds for condition impact levels
    pub impact_bands: ImpactBands,
}

impl EngineConfig {
    /// Engine configuration with the historical constants
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Parse a configuration overlay from YAML; omitted sections keep
    /// their defaults
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        serde_yml::from_str(contents).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }
}

/// Errors that can occur when loading engine configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse engine configuration: {message}")]
    Parse { message: String },
}
