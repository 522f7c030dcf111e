//! Productivity templates and condition factors
//!
//! A productivity template pairs a base daily output with the crew that
//! produces it. The rate is units per day for the whole crew, not per
//! worker. Condition factors derate that output multiplicatively; a factor
//! of 1.0 means no adjustment, factors below 1.0 reduce productivity.

use serde::{Deserialize, Serialize};

use crate::entities::crew::CrewMember;

/// A work type with a productivity rate and crew composition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductivityTemplate {
    pub id: String,

    /// Template code (e.g. "PIPE-001")
    pub code: String,

    pub name_ar: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,

    /// Work category id (e.g. "pipe-installation")
    pub category_id: String,

    /// Measurement unit
    pub unit: String,
    pub unit_ar: String,

    /// Units produced per day by the whole crew
    pub productivity_rate: f64,

    /// Total head count of the crew
    pub crew_size: u32,

    #[serde(default)]
    pub crew: Vec<CrewMember>,

    /// Origin of the productivity figure (source sheet/company)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Condition factor grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionCategory {
    Weather,
    Site,
    Access,
    Complexity,
    Schedule,
}

impl std::fmt::Display for ConditionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConditionCategory::Weather => write!(f, "weather"),
            ConditionCategory::Site => write!(f, "site"),
            ConditionCategory::Access => write!(f, "access"),
            ConditionCategory::Complexity => write!(f, "complexity"),
            ConditionCategory::Schedule => write!(f, "schedule"),
        }
    }
}

/// A multiplicative productivity derating factor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionFactor {
    pub id: String,

    /// Factor code (e.g. "WTH-HEAT")
    pub code: String,

    pub name_ar: String,
    pub name_en: String,

    pub category: ConditionCategory,

    /// 0.6 = 60% of normal productivity
    pub factor: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A named bundle of condition factors for a common scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionPreset {
    pub id: String,
    pub name_ar: String,
    pub name_en: String,

    /// Ids of the bundled [`ConditionFactor`]s
    pub factor_ids: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
