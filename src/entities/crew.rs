//! Crew roles and crew composition
//!
//! A crew role is the catalog shape for one labor trade with a daily rate;
//! a crew member quantifies how many of a role a productivity template
//! needs. Role codes follow the pattern `LAB-{ROLE}[-{SPECIALTY}]`.

use serde::{Deserialize, Serialize};

/// Crew role specialty grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrewRoleCategory {
    Masonry,
    Concrete,
    Finishing,
    Mep,
    Structural,
    General,
    Equipment,
    Supervision,
}

impl std::fmt::Display for CrewRoleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CrewRoleCategory::Masonry => write!(f, "masonry"),
            CrewRoleCategory::Concrete => write!(f, "concrete"),
            CrewRoleCategory::Finishing => write!(f, "finishing"),
            CrewRoleCategory::Mep => write!(f, "mep"),
            CrewRoleCategory::Structural => write!(f, "structural"),
            CrewRoleCategory::General => write!(f, "general"),
            CrewRoleCategory::Equipment => write!(f, "equipment"),
            CrewRoleCategory::Supervision => write!(f, "supervision"),
        }
    }
}

/// A labor role with its daily rate (crew-role catalog shape)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewRole {
    /// Role code (e.g. "LAB-MASON")
    pub code: String,

    pub name_ar: String,
    pub name_en: String,

    /// Billing unit ("day")
    pub unit: String,
    pub unit_ar: String,

    /// Daily rate in the project currency
    pub daily_rate: f64,

    pub category: CrewRoleCategory,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A quantified role within a crew
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewMember {
    /// References a [`CrewRole::code`]
    pub role_code: String,

    /// Head count of this role in the crew
    pub qty: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CrewMember {
    pub fn new(role_code: impl Into<String>, qty: f64) -> Self {
        Self {
            role_code: role_code.into(),
            qty,
            description: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crew_role_roundtrip() {
        let role = CrewRole {
            code: "LAB-STEELFIXER".to_string(),
            name_ar: "حداد مسلح".to_string(),
            name_en: "Steel Fixer".to_string(),
            unit: "day".to_string(),
            unit_ar: "يوم".to_string(),
            daily_rate: 380.0,
            category: CrewRoleCategory::Concrete,
            description: Some("Cuts, bends and fixes reinforcement steel".to_string()),
        };

        let yaml = serde_yml::to_string(&role).unwrap();
        let parsed: CrewRole = serde_yml::from_str(&yaml).unwrap();

        assert_eq!(parsed.code, "LAB-STEELFIXER");
        assert_eq!(parsed.daily_rate, 380.0);
        assert_eq!(parsed.category, CrewRoleCategory::Concrete);
    }

    #[test]
    fn test_category_serializes_lowercase() {
        let yaml = serde_yml::to_string(&CrewRoleCategory::Mep).unwrap();
        assert!(yaml.contains("mep"));
    }

    #[test]
    fn test_crew_member_new() {
        let member = CrewMember::new("LAB-PLUMBER-ASST", 3.0);
        assert_eq!(member.role_code, "LAB-PLUMBER-ASST");
        assert_eq!(member.qty, 3.0);
        assert!(member.description.is_none());
    }
}
