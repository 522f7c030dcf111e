//! Embedded reference catalogs
//!
//! Ships the static reference tables (condition factors and presets, crew
//! roles, productivity templates, risk catalog, BOQ item templates) as
//! YAML embedded in the binary, parsed once into a [`ReferenceCatalog`].
//! The engine itself only depends on the shapes; callers may substitute
//! their own data and never touch this module.

use rust_embed::Embed;
use serde::Deserialize;
use thiserror::Error;

use crate::calc::conditions::combine_factors;
use crate::core::lookup::CrewSnapshot;
use crate::entities::component::ComponentLine;
use crate::entities::crew::{CrewRole, CrewRoleCategory};
use crate::entities::productivity::{ConditionCategory, ConditionFactor, ConditionPreset, ProductivityTemplate};
use crate::entities::risk::{RiskCategoryInfo, RiskTemplate};

#[derive(Embed)]
#[folder = "data/"]
struct EmbeddedCatalogs;

/// A BOQ item template with its component recipe per unit of work
#[derive(Debug, Clone, Deserialize)]
pub struct BoqTemplate {
    pub code: String,
    pub name_ar: String,
    pub name_en: String,
    pub unit: String,
    pub category: String,

    #[serde(default)]
    pub materials: Vec<ComponentLine>,
    #[serde(default)]
    pub labor: Vec<ComponentLine>,
    #[serde(default)]
    pub equipment: Vec<ComponentLine>,
}

#[derive(Debug, Deserialize)]
struct ConditionFactorsFile {
    factors: Vec<ConditionFactor>,
    #[serde(default)]
    presets: Vec<ConditionPreset>,
}

#[derive(Debug, Deserialize)]
struct CrewRolesFile {
    roles: Vec<CrewRole>,
}

#[derive(Debug, Deserialize)]
struct ProductivityTemplatesFile {
    templates: Vec<ProductivityTemplate>,
}

#[derive(Debug, Deserialize)]
struct RiskCatalogFile {
    #[serde(default)]
    categories: Vec<RiskCategoryInfo>,
    templates: Vec<RiskTemplate>,
}

#[derive(Debug, Deserialize)]
struct BoqTemplatesFile {
    templates: Vec<BoqTemplate>,
}

/// Errors that can occur when loading the embedded catalogs
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("embedded catalog asset not found: {0}")]
    MissingAsset(String),

    #[error("failed to parse catalog '{file}': {message}")]
    Parse { file: String, message: String },
}

fn load_file<T: serde::de::DeserializeOwned + 'static>(name: &str) -> Result<T, CatalogError> {
    let asset = EmbeddedCatalogs::get(name)
        .ok_or_else(|| CatalogError::MissingAsset(name.to_string()))?;
    let contents = std::str::from_utf8(&asset.data).map_err(|e| CatalogError::Parse {
        file: name.to_string(),
        message: e.to_string(),
    })?;
    serde_yml::from_str(contents).map_err(|e| CatalogError::Parse {
        file: name.to_string(),
        message: e.to_string(),
    })
}

/// Parsed reference data with typed accessors
#[derive(Debug, Clone)]
pub struct ReferenceCatalog {
    condition_factors: Vec<ConditionFactor>,
    condition_presets: Vec<ConditionPreset>,
    crew_roles: Vec<CrewRole>,
    productivity_templates: Vec<ProductivityTemplate>,
    risk_categories: Vec<RiskCategoryInfo>,
    risk_templates: Vec<RiskTemplate>,
    boq_templates: Vec<BoqTemplate>,
}

impl ReferenceCatalog {
    /// Parse every embedded catalog file
    pub fn load() -> Result<Self, CatalogError> {
        let conditions: ConditionFactorsFile = load_file("condition_factors.yaml")?;
        let crew: CrewRolesFile = load_file("crew_roles.yaml")?;
        let productivity: ProductivityTemplatesFile = load_file("productivity_templates.yaml")?;
        let risks: RiskCatalogFile = load_file("risk_catalog.yaml")?;
        let boq: BoqTemplatesFile = load_file("boq_templates.yaml")?;

        Ok(Self {
            condition_factors: conditions.factors,
            condition_presets: conditions.presets,
            crew_roles: crew.roles,
            productivity_templates: productivity.templates,
            risk_categories: risks.categories,
            risk_templates: risks.templates,
            boq_templates: boq.templates,
        })
    }

    // ----- condition factors -----

    pub fn condition_factors(&self) -> &[ConditionFactor] {
        &self.condition_factors
    }

    pub fn factor_by_id(&self, id: &str) -> Option<&ConditionFactor> {
        self.condition_factors.iter().find(|f| f.id == id)
    }

    pub fn factor_by_code(&self, code: &str) -> Option<&ConditionFactor> {
        self.condition_factors.iter().find(|f| f.code == code)
    }

    pub fn factors_by_category(&self, category: ConditionCategory) -> Vec<&ConditionFactor> {
        self.condition_factors
            .iter()
            .filter(|f| f.category == category)
            .collect()
    }

    /// Resolve factor ids, silently skipping unknown ids
    pub fn factors_by_ids(&self, ids: &[&str]) -> Vec<ConditionFactor> {
        ids.iter()
            .filter_map(|id| self.factor_by_id(id))
            .cloned()
            .collect()
    }

    // ----- condition presets -----

    pub fn condition_presets(&self) -> &[ConditionPreset] {
        &self.condition_presets
    }

    pub fn preset_by_id(&self, id: &str) -> Option<&ConditionPreset> {
        self.condition_presets.iter().find(|p| p.id == id)
    }

    /// Compose a preset's factors against a base productivity rate
    pub fn apply_preset(&self, preset_id: &str, base_rate: f64) -> Option<AppliedConditions> {
        let preset = self.preset_by_id(preset_id)?;
        let ids: Vec<&str> = preset.factor_ids.iter().map(String::as_str).collect();
        let applied = self.factors_by_ids(&ids);
        let combined_factor = combine_factors(&applied);

        Some(AppliedConditions {
            adjusted_rate: base_rate * combined_factor,
            combined_factor,
            applied,
        })
    }

    // ----- crew roles -----

    pub fn crew_roles(&self) -> &[CrewRole] {
        &self.crew_roles
    }

    pub fn role_by_code(&self, code: &str) -> Option<&CrewRole> {
        self.crew_roles.iter().find(|r| r.code == code)
    }

    pub fn roles_by_category(&self, category: CrewRoleCategory) -> Vec<&CrewRole> {
        self.crew_roles
            .iter()
            .filter(|r| r.category == category)
            .collect()
    }

    /// Build a crew-rate lookup snapshot from the catalog roles
    pub fn crew_snapshot(&self) -> CrewSnapshot {
        CrewSnapshot::from_roles(self.crew_roles.iter().cloned())
    }

    // ----- productivity templates -----

    pub fn productivity_templates(&self) -> &[ProductivityTemplate] {
        &self.productivity_templates
    }

    pub fn template_by_id(&self, id: &str) -> Option<&ProductivityTemplate> {
        self.productivity_templates.iter().find(|t| t.id == id)
    }

    pub fn template_by_code(&self, code: &str) -> Option<&ProductivityTemplate> {
        self.productivity_templates.iter().find(|t| t.code == code)
    }

    pub fn templates_by_category(&self, category_id: &str) -> Vec<&ProductivityTemplate> {
        self.productivity_templates
            .iter()
            .filter(|t| t.category_id == category_id)
            .collect()
    }

    // ----- risk catalog -----

    pub fn risk_categories(&self) -> &[RiskCategoryInfo] {
        &self.risk_categories
    }

    pub fn risk_templates(&self) -> &[RiskTemplate] {
        &self.risk_templates
    }

    pub fn risk_template_by_id(&self, id: &str) -> Option<&RiskTemplate> {
        self.risk_templates.iter().find(|t| t.id == id)
    }

    pub fn risk_templates_by_category(&self, category: &str) -> Vec<&RiskTemplate> {
        self.risk_templates
            .iter()
            .filter(|t| t.category == category)
            .collect()
    }

    // ----- BOQ templates -----

    pub fn boq_templates(&self) -> &[BoqTemplate] {
        &self.boq_templates
    }

    pub fn boq_template_by_code(&self, code: &str) -> Option<&BoqTemplate> {
        self.boq_templates.iter().find(|t| t.code == code)
    }
}

/// Result of applying a condition preset to a base rate
#[derive(Debug, Clone)]
pub struct AppliedConditions {
    pub adjusted_rate: f64,
    pub combined_factor: f64,
    pub applied: Vec<ConditionFactor>,
}
