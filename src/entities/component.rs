//! Component lines - the raw inputs of a BOQ item
//!
//! A component line names a rate-catalog code and a per-unit quantity; the
//! resolver prices it against a rate snapshot into a [`PricedComponent`],
//! and priced lines of one class roll up into a [`ComponentGroup`].

use serde::{Deserialize, Serialize};

/// Component classification within a BOQ item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentClass {
    Materials,
    Labor,
    Equipment,
}

impl std::fmt::Display for ComponentClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComponentClass::Materials => write!(f, "materials"),
            ComponentClass::Labor => write!(f, "labor"),
            ComponentClass::Equipment => write!(f, "equipment"),
        }
    }
}

/// An unpriced component line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentLine {
    /// Rate-catalog code (e.g. "MAT-CONC-REINF")
    pub rate_code: String,

    /// Quantity of the resource consumed per unit of the parent item
    pub qty: f64,

    /// Caller-supplied rate that takes precedence over the catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_override: Option<f64>,

    /// Line description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ComponentLine {
    /// Create a line priced from the catalog
    pub fn new(rate_code: impl Into<String>, qty: f64) -> Self {
        Self {
            rate_code: rate_code.into(),
            qty,
            rate_override: None,
            description: None,
        }
    }

    /// Create a line with a description
    pub fn described(
        rate_code: impl Into<String>,
        qty: f64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            rate_code: rate_code.into(),
            qty,
            rate_override: None,
            description: Some(description.into()),
        }
    }

    /// Attach a rate override
    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate_override = Some(rate);
        self
    }
}

/// A component line after rate resolution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricedComponent {
    pub rate_code: String,
    pub qty: f64,

    /// Resolved unit rate (override, catalog, or zero)
    pub rate: f64,

    /// `qty * rate`
    pub cost: f64,

    /// The catalog had no rate for this code and no override was given
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub rate_missing: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Priced component lines of one class
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentGroup {
    pub class: ComponentClass,

    #[serde(default)]
    pub components: Vec<PricedComponent>,

    /// Sum of component costs
    pub subtotal: f64,

    /// Codes that priced at zero because the catalog missed them
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_rates: Vec<String>,
}

impl ComponentGroup {
    /// An empty group of the given class
    pub fn empty(class: ComponentClass) -> Self {
        Self {
            class,
            components: Vec::new(),
            subtotal: 0.0,
            missing_rates: Vec::new(),
        }
    }

    /// True when any line priced at zero due to a catalog miss
    pub fn has_missing_rates(&self) -> bool {
        !self.missing_rates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_class_serializes_lowercase() {
        let yaml = serde_yml::to_string(&ComponentClass::Materials).unwrap();
        assert!(yaml.contains("materials"));
    }

    #[test]
    fn test_line_builders() {
        let line = ComponentLine::described("MAT-SAND", 1.25, "رمل ردم").with_rate(200.0);
        assert_eq!(line.rate_code, "MAT-SAND");
        assert_eq!(line.rate_override, Some(200.0));
        assert_eq!(line.description.as_deref(), Some("رمل ردم"));
    }

    #[test]
    fn test_empty_group() {
        let group = ComponentGroup::empty(ComponentClass::Equipment);
        assert_eq!(group.subtotal, 0.0);
        assert!(!group.has_missing_rates());
    }

    #[test]
    fn test_line_roundtrip() {
        let line = ComponentLine::new("EQP-MIXER", 0.05);
        let yaml = serde_yml::to_string(&line).unwrap();
        let parsed: ComponentLine = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(parsed.rate_code, "EQP-MIXER");
        assert!(parsed.rate_override.is_none());
    }
}
