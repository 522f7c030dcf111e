//! Integration tests for the estimating engine
//!
//! These tests exercise the assembled pipelines end-to-end: catalog data
//! through component resolution, the cascading rollup, productivity
//! costing, risk/supplier/cashflow derivation, and rule-based validation.

use mizan::calc::boq::{calculate_boq, BoqPercentages};
use mizan::calc::conditions::{analyze_condition_impact, combine_factors, ImpactBands, ImpactLevel};
use mizan::calc::productivity::calculate_productivity_cost;
use mizan::calc::rollup::calculate_item;
use mizan::catalog::ReferenceCatalog;
use mizan::core::config::EngineConfig;
use mizan::core::identity::{EntityId, EntityPrefix};
use mizan::core::lookup::{RateLookup, RateSnapshot};
use mizan::entities::cashflow::{CashflowPeriod, CashflowStatement};
use mizan::entities::estimate::{
    CostBreakdown, CostConfiguration, Estimate, EstimateItem, EstimateStatus,
};
use mizan::entities::risk::{RiskBands, RiskCategory, RiskRecord};
use mizan::entities::supplier::{
    SupplierEvaluation, SupplierScores, SupplierStatus, SupplierStatusBands, SupplierWeights,
};
use mizan::validation::EstimateValidator;

/// Rate snapshot covering the BOQ template codes used below
fn sample_rates() -> RateSnapshot {
    [
        ("LAB-HELPER", 150.0),
        ("LAB-CARP-RFND", 3.0),
        ("LAB-STEEL-FND", 3.0),
        ("MAT-CONC-PLAIN", 750.0),
        ("MAT-CONC-REINF", 950.0),
        ("MAT-STEEL-FND", 28.0),
        ("MAT-SAND", 180.0),
        ("EQP-MIXER", 500.0),
        ("EQP-VIBRATOR", 200.0),
        ("EQP-EXCAVATOR", 4500.0),
        ("EQP-COMPACTOR", 2500.0),
    ]
    .into_iter()
    .collect()
}

fn standard_config() -> CostConfiguration {
    CostConfiguration {
        indirect_rate: 0.15,
        profit_margin: 0.20,
        contingency_rate: 0.05,
    }
}

#[test]
fn cascading_rollup_beats_flat_markup() {
    let breakdown = CostBreakdown::calculate(1000.0, &standard_config(), 1.0);

    assert!((breakdown.indirect_cost - 150.0).abs() < 1e-9);
    assert!((breakdown.profit - 230.0).abs() < 1e-9);
    assert!((breakdown.contingency - 69.0).abs() < 1e-9);
    assert!((breakdown.selling_rate - 1449.0).abs() < 1e-9);
    // A flat model would give 1000 × 1.40 = 1450
    assert!(breakdown.selling_rate < 1450.0);
}

#[test]
fn boq_markup_formula_matches_reference_values() {
    let calc = calculate_boq(750.0, 10.0, &BoqPercentages::default());

    assert!((calc.direct_value - 7500.0).abs() < 0.01);
    assert!((calc.indirect_value - 1369.65).abs() < 0.01);
    assert!((calc.total_before_markup - 8869.65).abs() < 0.01);
    assert!((calc.markup - 1419.14).abs() < 0.01);
    assert!((calc.grand_total - 10288.80).abs() < 0.01);
}

#[test]
fn estimate_assembles_from_catalog_boq_template() {
    let catalog = ReferenceCatalog::load().unwrap();
    let rates = sample_rates();
    let config = standard_config();

    let template = catalog.boq_template_by_code("CON-RC-FND").unwrap();
    let costing = calculate_item(
        12.0,
        &template.materials,
        &template.labor,
        &template.equipment,
        &rates,
        &config,
    );

    // Per-unit direct: materials 997.5 + 2520, labor 0.99 + 0.99 + 75,
    // equipment 25 + 10
    assert!((costing.breakdown.direct_cost - 3629.48).abs() < 0.01);
    assert!(!costing.materials.has_missing_rates());

    let mut estimate = Estimate::new("فيلا سكنية - التجمع الخامس", config, "estimator");
    estimate.add_item(EstimateItem {
        id: EntityId::new(EntityPrefix::Item),
        boq_code: template.code.clone(),
        description_ar: template.name_ar.clone(),
        description_en: Some(template.name_en.clone()),
        unit: template.unit.clone(),
        quantity: 12.0,
        materials: costing.materials,
        labor: costing.labor,
        equipment: costing.equipment,
        breakdown: costing.breakdown,
    });

    let totals = estimate.totals();
    assert!((totals.total_direct - 3629.48 * 12.0).abs() < 0.1);
    assert!(totals.total_selling > totals.total_direct);

    let report = EstimateValidator::default().validate(&estimate.snapshot());
    assert!(report.valid());
}

#[test]
fn missing_rates_degrade_to_zero_and_surface_as_warnings() {
    let rates = sample_rates();
    let config = standard_config();
    let catalog = ReferenceCatalog::load().unwrap();

    // PLT-INT references plaster codes absent from the snapshot
    let template = catalog.boq_template_by_code("PLT-INT").unwrap();
    let costing = calculate_item(
        100.0,
        &template.materials,
        &template.labor,
        &template.equipment,
        &rates,
        &config,
    );

    // Labor lines all priced at zero, but nothing failed
    assert_eq!(costing.labor.subtotal, 0.0);
    assert_eq!(costing.labor.missing_rates.len(), 3);
    assert!(costing.breakdown.direct_cost > 0.0);

    let mut estimate = Estimate::new("مشروع تشطيبات", config, "estimator");
    estimate.add_item(EstimateItem {
        id: EntityId::new(EntityPrefix::Item),
        boq_code: template.code.clone(),
        description_ar: template.name_ar.clone(),
        description_en: None,
        unit: template.unit.clone(),
        quantity: 100.0,
        materials: costing.materials,
        labor: costing.labor,
        equipment: costing.equipment,
        breakdown: costing.breakdown,
    });

    let report = EstimateValidator::default().validate(&estimate.snapshot());
    // Missing rates warn without invalidating the estimate
    assert!(report.valid());
    assert!(report.warnings.iter().any(|i| i.rule_id == "EST-004"));
}

#[test]
fn productivity_pipeline_with_catalog_data() {
    let catalog = ReferenceCatalog::load().unwrap();
    let crew = catalog.crew_snapshot();

    let template = catalog.template_by_code("PIPE-001").unwrap();
    let factors = catalog.factors_by_ids(&["weather-heat", "schedule-overtime"]);

    let cost = calculate_productivity_cost(template, 1456.0, &crew, &factors);

    // 145.6 × 0.81 = 117.936 units/day; 1456 / 117.936 days
    assert!((cost.combined_factor - 0.81).abs() < 1e-12);
    assert!((cost.adjusted_rate - 117.936).abs() < 1e-9);
    assert!((cost.days_required - 12.3457).abs() < 1e-3);

    // Plumber 380 + 3 assistants at 200 = 980/day
    assert!((cost.daily_crew_cost - 980.0).abs() < 1e-9);
    assert!((cost.total_labor_cost - cost.daily_crew_cost * cost.days_required).abs() < 1e-6);

    let impact = analyze_condition_impact(&factors, &ImpactBands::default());
    assert_eq!(impact.level, ImpactLevel::Medium);
}

#[test]
fn productivity_days_scale_inversely() {
    let catalog = ReferenceCatalog::load().unwrap();
    let crew = catalog.crew_snapshot();

    let mut template = catalog.template_by_code("SVC-003").unwrap().clone();
    template.productivity_rate = 10.0;
    let ten = calculate_productivity_cost(&template, 100.0, &crew, &[]);
    template.productivity_rate = 20.0;
    let twenty = calculate_productivity_cost(&template, 100.0, &crew, &[]);

    assert!((ten.days_required - 10.0).abs() < 1e-12);
    assert!((twenty.days_required - 5.0).abs() < 1e-12);
}

#[test]
fn empty_condition_selection_is_identity() {
    assert_eq!(combine_factors(&[]), 1.0);
}

#[test]
fn risk_emv_boundaries_from_catalog_defaults() {
    let bands = RiskBands::default();

    let high = RiskRecord::new("تغيير في نطاق العمل", 0.7, 0.7);
    assert_eq!(high.assess(&bands).category, RiskCategory::High);

    let medium = RiskRecord::new("تأخر الموافقات", 0.5, 0.5);
    assert_eq!(medium.assess(&bands).category, RiskCategory::Medium);

    let catalog = ReferenceCatalog::load().unwrap();
    let template = catalog.risk_template_by_id("R4").unwrap();
    let accident = RiskRecord::from_template(template);
    // 0.3 × 0.9 = 0.27 → medium
    assert_eq!(accident.assess(&bands).category, RiskCategory::Medium);
}

#[test]
fn perfect_supplier_ranks_primary() {
    let scores = SupplierScores {
        quality: 10.0,
        price: 10.0,
        delivery: 10.0,
        payment_terms: 10.0,
        experience: 10.0,
        after_sales: 10.0,
        risk_deduction: 0.0,
    };

    let evaluation = SupplierEvaluation::evaluate(
        "شركة المقاولون العرب",
        Some("materials".to_string()),
        scores,
        &SupplierWeights::default(),
        &SupplierStatusBands::default(),
    );

    assert!((evaluation.total_score - 10.0).abs() < 1e-9);
    assert_eq!(evaluation.status, SupplierStatus::Primary);
}

#[test]
fn cashflow_projection_reference_series() {
    // Net series −5M, +1M, +2.3M, +2.5M, +2.7M
    let statement = CashflowStatement::new(vec![
        CashflowPeriod::new(0, 0.0, 5_000_000.0),
        CashflowPeriod::new(1, 1_000_000.0, 0.0),
        CashflowPeriod::new(2, 2_300_000.0, 0.0),
        CashflowPeriod::new(3, 2_500_000.0, 0.0),
        CashflowPeriod::new(4, 2_700_000.0, 0.0),
    ]);

    let projection = statement.project(0.0);

    assert!((projection.npv - 3_500_000.0).abs() < 1e-6);
    assert!((projection.funding_gap - 5_000_000.0).abs() < 1e-6);
    assert_eq!(projection.break_even_period, Some(3));

    let cumulative: Vec<f64> = projection.periods.iter().map(|p| p.cumulative).collect();
    assert!((cumulative[2] - (-1_700_000.0)).abs() < 1e-6);
    assert!((cumulative[4] - 3_500_000.0).abs() < 1e-6);
}

#[test]
fn estimate_lifecycle_walks_the_allowed_path() {
    let mut estimate = Estimate::new("مجمع تجاري", standard_config(), "estimator");

    assert!(estimate.transition_to(EstimateStatus::PendingReview));
    assert!(estimate.transition_to(EstimateStatus::Approved));
    assert!(estimate.transition_to(EstimateStatus::Superseded));
    assert_eq!(estimate.status, EstimateStatus::Superseded);

    // A superseded estimate is frozen
    assert!(!estimate.transition_to(EstimateStatus::Draft));
}

#[test]
fn empty_estimate_fails_validation() {
    let estimate = Estimate::new("مشروع فارغ", standard_config(), "estimator");
    let report = EstimateValidator::default().validate(&estimate.snapshot());

    assert!(!report.valid());
    assert!(report.errors.iter().any(|i| i.rule_id == "EST-001"));
}

#[test]
fn engine_config_overlay_reaches_the_pipelines() {
    let config = EngineConfig::from_yaml(
        r#"
boq:
  indirect_pct: 0.10
  net_profit_pct: 0.0
  markup_pct: 0.0
supplier_bands:
  primary: 9.5
"#,
    )
    .unwrap();

    let calc = calculate_boq(100.0, 1.0, &config.boq);
    assert!((calc.grand_total - 110.0).abs() < 1e-9);

    // 9.4 clears the default primary band (8.0) but not the raised one
    assert_eq!(
        SupplierStatus::from_score(9.4, &config.supplier_bands),
        SupplierStatus::Conditional
    );
}

#[test]
fn two_cost_models_stay_divergent() {
    // Same direct cost and quantity through both models
    let rollup = CostBreakdown::calculate(750.0, &standard_config(), 10.0);
    let boq = calculate_boq(750.0, 10.0, &BoqPercentages::default());

    // Cascading: 750 × 1.15 × 1.20 × 1.05 × 10 = 10867.5
    assert!((rollup.line_total - 10_867.5).abs() < 1e-6);
    assert!((boq.grand_total - 10_288.80).abs() < 0.01);
    assert!((rollup.line_total - boq.grand_total).abs() > 100.0);
}

#[test]
fn rate_snapshot_distinguishes_missing_from_zero() {
    let rates = sample_rates();
    assert!(!rates.rate("LAB-HELPER").is_missing());
    assert!(rates.rate("LAB-NOBODY").is_missing());
    assert_eq!(rates.rate_or_zero("LAB-NOBODY"), 0.0);
}
