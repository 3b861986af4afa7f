// ==========================================
// 供应商优化 / EOQ / 风险分级 集成测试
// ==========================================
// 职责: 通过公开接口验证评分排序、起订量、拆单与风险阈值
// ==========================================

mod helpers;

use helpers::test_data_builder::{flat_config, SupplierBuilder};
use raw_material_planner::config::PlanningConfig;
use raw_material_planner::domain::types::RiskFlag;
use raw_material_planner::engine::{
    AllocationStrategy, EoqCalculator, EoqOutcome, RiskClassifier, SupplierOptimizer,
};

const MATERIAL: &str = "YARN-COTTON-30S";

// ==========================================
// 风险阈值
// ==========================================

#[test]
fn test_risk_threshold_boundaries() {
    let classifier = RiskClassifier::default();

    assert_eq!(classifier.classify(0.85), RiskFlag::Low);
    assert_eq!(classifier.classify(0.8499), RiskFlag::Medium);
    assert_eq!(classifier.classify(0.70), RiskFlag::Medium);
    assert_eq!(classifier.classify(0.6999), RiskFlag::High);
}

// ==========================================
// EOQ
// ==========================================

#[test]
fn test_eoq_reference_value() {
    let outcome = EoqCalculator::new().calculate(1200.0, 50.0, 4.0, 0.25);

    let eoq = outcome.quantity().unwrap();
    assert!((eoq - 346.41).abs() < 0.01);
}

#[test]
fn test_eoq_zero_holding_cost_falls_back() {
    let outcome = EoqCalculator::new().calculate(1200.0, 50.0, 4.0, 0.0);
    assert!(matches!(outcome, EoqOutcome::UseNetRequirement { .. }));
}

// ==========================================
// 单供应商
// ==========================================

#[test]
fn test_single_supplier_raised_to_moq() {
    let optimizer = SupplierOptimizer::new(&flat_config());
    let suppliers = vec![SupplierBuilder::new(MATERIAL, "SUP-A").moq(1000.0).build()];

    let result = optimizer.optimize(MATERIAL, 300.0, &suppliers).unwrap();

    assert_eq!(result.strategy, AllocationStrategy::Single);
    assert_eq!(result.allocations[0].quantity, 1000.0);
    assert_eq!(result.moq_adjustment_qty, 700.0);
}

#[test]
fn test_tie_broken_by_lead_time_then_id() {
    let config = PlanningConfig {
        enable_multi_supplier: false,
        ..flat_config()
    };
    let optimizer = SupplierOptimizer::new(&config);
    let suppliers = vec![
        SupplierBuilder::new(MATERIAL, "SUP-C").lead_time(12).build(),
        SupplierBuilder::new(MATERIAL, "SUP-B").lead_time(8).build(),
        SupplierBuilder::new(MATERIAL, "SUP-A").lead_time(8).build(),
    ];

    let ranking = optimizer.rank(&suppliers);
    let order: Vec<&str> = ranking
        .ranked
        .iter()
        .map(|s| s.supplier.supplier_id.as_str())
        .collect();
    assert_eq!(order, vec!["SUP-A", "SUP-B", "SUP-C"]);

    let result = optimizer.allocate(MATERIAL, 500.0, &ranking).unwrap();
    assert_eq!(result.allocations.len(), 1);
    assert_eq!(result.allocations[0].supplier_id, "SUP-A");
}

#[test]
fn test_contract_cap_leaves_shortfall() {
    let config = PlanningConfig {
        enable_multi_supplier: false,
        ..flat_config()
    };
    let optimizer = SupplierOptimizer::new(&config);
    let suppliers = vec![SupplierBuilder::new(MATERIAL, "SUP-A")
        .reliability(0.95)
        .contract_limit(400.0)
        .build()];

    let result = optimizer.optimize(MATERIAL, 1000.0, &suppliers).unwrap();

    assert_eq!(result.total_qty(), 400.0);
    assert_eq!(result.shortfall_qty, 600.0);
    assert_eq!(result.risk_flag, RiskFlag::High);
}

#[test]
fn test_target_above_requirement_capped_without_shortfall() {
    let config = PlanningConfig {
        enable_multi_supplier: false,
        ..flat_config()
    };
    let optimizer = SupplierOptimizer::new(&config);
    let suppliers = vec![SupplierBuilder::new(MATERIAL, "SUP-A")
        .reliability(0.95)
        .contract_limit(200.0)
        .build()];
    let ranking = optimizer.rank(&suppliers);

    // 需求 110, 下单目标 469 被上限 200 截断
    let result = optimizer
        .allocate_toward(MATERIAL, 110.0, 469.0, &ranking)
        .unwrap();

    assert_eq!(result.total_qty(), 200.0);
    assert_eq!(result.shortfall_qty, 0.0);
    assert_eq!(result.moq_adjustment_qty, 0.0);
    assert_eq!(result.risk_flag, RiskFlag::Low);
    assert_eq!(result.capped_suppliers, vec!["SUP-A".to_string()]);
}

#[test]
fn test_split_target_surplus_keeps_supplier_count() {
    let optimizer = SupplierOptimizer::new(&flat_config());
    let suppliers = vec![
        SupplierBuilder::new(MATERIAL, "SUP-A").reliability(0.95).contract_limit(700.0).build(),
        SupplierBuilder::new(MATERIAL, "SUP-B").reliability(0.90).contract_limit(600.0).build(),
        SupplierBuilder::new(MATERIAL, "SUP-C").reliability(0.88).moq(5000.0).build(),
        SupplierBuilder::new(MATERIAL, "SUP-D").reliability(0.86).build(),
    ];
    let ranking = optimizer.rank(&suppliers);

    let result = optimizer
        .allocate_toward(MATERIAL, 1100.0, 1500.0, &ranking)
        .unwrap();

    let ids: Vec<&str> = result.allocations.iter().map(|a| a.supplier_id.as_str()).collect();
    assert_eq!(ids, vec!["SUP-A", "SUP-B"]);
    assert_eq!(result.total_qty(), 1300.0);
    assert_eq!(result.shortfall_qty, 0.0);
    assert_eq!(result.risk_flag, RiskFlag::Low);
    assert_eq!(result.moq_drops[0].supplier_id, "SUP-C");
}

// ==========================================
// 拆单
// ==========================================

#[test]
fn test_split_respects_max_suppliers_and_worst_risk() {
    let config = PlanningConfig {
        max_suppliers_per_material: 2,
        ..flat_config()
    };
    let optimizer = SupplierOptimizer::new(&config);
    let suppliers = vec![
        SupplierBuilder::new(MATERIAL, "SUP-A").cost(2.0).reliability(0.95).build(),
        SupplierBuilder::new(MATERIAL, "SUP-B").cost(2.0).reliability(0.75).build(),
        SupplierBuilder::new(MATERIAL, "SUP-C").cost(4.0).reliability(0.50).build(),
    ];

    let result = optimizer.optimize(MATERIAL, 1000.0, &suppliers).unwrap();

    assert_eq!(result.strategy, AllocationStrategy::Split);
    assert_eq!(result.allocations.len(), 2);
    assert!(result.allocations.iter().all(|a| a.supplier_id != "SUP-C"));
    assert!((result.total_qty() - 1000.0).abs() < 1e-6);
    // A 优于 B, 份额更大
    assert!(result.allocations[0].quantity > result.allocations[1].quantity);
    assert_eq!(result.risk_flag, RiskFlag::Medium);
}

#[test]
fn test_split_drops_share_below_moq() {
    let optimizer = SupplierOptimizer::new(&flat_config());
    let suppliers = vec![
        SupplierBuilder::new(MATERIAL, "SUP-A").reliability(0.95).build(),
        SupplierBuilder::new(MATERIAL, "SUP-B").reliability(0.90).moq(800.0).build(),
    ];

    let result = optimizer.optimize(MATERIAL, 1000.0, &suppliers).unwrap();

    assert_eq!(result.allocations.len(), 1);
    assert_eq!(result.allocations[0].supplier_id, "SUP-A");
    assert_eq!(result.allocations[0].quantity, 1000.0);
    assert_eq!(result.moq_drops.len(), 1);
    assert_eq!(result.moq_drops[0].supplier_id, "SUP-B");
}

#[test]
fn test_excluded_suppliers_listed_with_reasons() {
    let optimizer = SupplierOptimizer::new(&flat_config());
    let suppliers = vec![
        SupplierBuilder::new(MATERIAL, "SUP-SLOW").lead_time(31).build(),
        SupplierBuilder::new(MATERIAL, "SUP-FREE").cost(0.0).build(),
    ];

    let result = optimizer.optimize(MATERIAL, 1000.0, &suppliers).unwrap();

    assert_eq!(result.strategy, AllocationStrategy::Unallocated);
    assert_eq!(result.risk_flag, RiskFlag::High);
    assert_eq!(result.excluded.len(), 2);
    assert!(result.excluded.iter().all(|e| !e.reason.is_empty()));
}
