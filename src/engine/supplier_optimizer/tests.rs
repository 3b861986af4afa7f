use super::{AllocationStrategy, SupplierOptimizer};
use crate::config::planning_config::PlanningConfig;
use crate::domain::supplier::SupplierMaterial;
use crate::domain::types::RiskFlag;
use crate::domain::warning::WarningCode;
use crate::error::PlanningError;

// ==========================================
// 测试辅助函数
// ==========================================

fn create_test_supplier(
    supplier_id: &str,
    cost_per_unit: f64,
    lead_time_days: u32,
    moq: f64,
    reliability: f64,
) -> SupplierMaterial {
    SupplierMaterial::new("YARN-A", supplier_id, cost_per_unit, lead_time_days, moq, reliability)
}

fn create_optimizer(enable_multi_supplier: bool, max_suppliers: usize) -> SupplierOptimizer {
    let config = PlanningConfig {
        enable_multi_supplier,
        max_suppliers_per_material: max_suppliers,
        ..PlanningConfig::default()
    };
    SupplierOptimizer::new(&config)
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

// ==========================================
// 合格性
// ==========================================

#[test]
fn test_no_eligible_supplier_is_high_risk_not_error() {
    let optimizer = create_optimizer(true, 3);
    let suppliers = vec![
        create_test_supplier("SUP-A", 2.0, 45, 0.0, 0.95),
        create_test_supplier("SUP-B", 1.5, 60, 0.0, 0.90),
    ];

    let result = optimizer.optimize("YARN-A", 500.0, &suppliers).unwrap();

    assert_eq!(result.strategy, AllocationStrategy::Unallocated);
    assert!(result.allocations.is_empty());
    assert_eq!(result.risk_flag, RiskFlag::High);
    assert_eq!(result.excluded.len(), 2);
    assert!(result.excluded[0].reason.contains("交期"));
    assert_eq!(result.total_qty(), 0.0);
}

#[test]
fn test_invalid_cost_and_contract_below_moq_excluded() {
    let optimizer = create_optimizer(true, 3);
    let suppliers = vec![
        create_test_supplier("SUP-A", 0.0, 10, 0.0, 0.95),
        create_test_supplier("SUP-B", 2.0, 10, 500.0, 0.90).with_contract_limit(100.0),
        create_test_supplier("SUP-C", 2.0, 10, 0.0, 0.90),
    ];

    let ranking = optimizer.rank(&suppliers);

    assert_eq!(ranking.ranked.len(), 1);
    assert_eq!(ranking.excluded.len(), 2);
    let codes: Vec<WarningCode> = ranking.warnings.iter().map(|w| w.code).collect();
    assert!(codes.contains(&WarningCode::InvalidSupplierCost));
    assert!(codes.contains(&WarningCode::ContractBelowMoq));
}

#[test]
fn test_reliability_out_of_range_clamped() {
    let optimizer = create_optimizer(false, 1);
    let suppliers = vec![create_test_supplier("SUP-A", 2.0, 10, 0.0, 1.4)];

    let result = optimizer.optimize("YARN-A", 100.0, &suppliers).unwrap();

    assert_eq!(result.allocations[0].reliability_score, 1.0);
    assert_eq!(result.warnings[0].code, WarningCode::ReliabilityOutOfRange);
}

#[test]
fn test_non_positive_requirement_rejected() {
    let optimizer = create_optimizer(true, 3);
    let suppliers = vec![create_test_supplier("SUP-A", 2.0, 10, 0.0, 0.9)];

    assert!(matches!(
        optimizer.optimize("YARN-A", 0.0, &suppliers),
        Err(PlanningError::InvalidInput(_))
    ));
}

// ==========================================
// 评分与排序
// ==========================================

#[test]
fn test_best_score_wins_single_path() {
    let optimizer = create_optimizer(false, 3);
    let suppliers = vec![
        // 0.6 × 0.5 + 0.4 × 0.99 = 0.696
        create_test_supplier("SUP-EXPENSIVE", 4.0, 10, 0.0, 0.99),
        // 0.6 × 1.0 + 0.4 × 0.80 = 0.92
        create_test_supplier("SUP-CHEAP", 2.0, 10, 0.0, 0.80),
    ];

    let result = optimizer.optimize("YARN-A", 400.0, &suppliers).unwrap();

    assert_eq!(result.strategy, AllocationStrategy::Single);
    assert_eq!(result.allocations.len(), 1);
    assert_eq!(result.allocations[0].supplier_id, "SUP-CHEAP");
    assert!(approx(result.allocations[0].score, 0.92));
    assert!(approx(result.total_cost(), 800.0));
    assert_eq!(result.risk_flag, RiskFlag::Medium);
}

#[test]
fn test_tie_break_lead_time_then_supplier_id() {
    let optimizer = create_optimizer(false, 3);

    let suppliers = vec![
        create_test_supplier("SUP-B", 2.0, 14, 0.0, 0.9),
        create_test_supplier("SUP-A", 2.0, 21, 0.0, 0.9),
    ];
    let ranking = optimizer.rank(&suppliers);
    assert_eq!(ranking.ranked[0].supplier.supplier_id, "SUP-B");

    let suppliers = vec![
        create_test_supplier("SUP-B", 2.0, 14, 0.0, 0.9),
        create_test_supplier("SUP-A", 2.0, 14, 0.0, 0.9),
    ];
    let ranking = optimizer.rank(&suppliers);
    assert_eq!(ranking.ranked[0].supplier.supplier_id, "SUP-A");
}

// ==========================================
// 单一供应商规则
// ==========================================

#[test]
fn test_single_path_raises_to_moq() {
    let optimizer = create_optimizer(false, 3);
    let suppliers = vec![create_test_supplier("SUP-A", 2.0, 10, 500.0, 0.9)];

    let result = optimizer.optimize("YARN-A", 120.0, &suppliers).unwrap();

    assert_eq!(result.allocations[0].quantity, 500.0);
    assert!(approx(result.moq_adjustment_qty, 380.0));
    assert_eq!(result.shortfall_qty, 0.0);
    assert_eq!(result.risk_flag, RiskFlag::Low);
}

#[test]
fn test_single_path_contract_cap_is_shortfall() {
    let optimizer = create_optimizer(false, 3);
    let suppliers =
        vec![create_test_supplier("SUP-A", 2.0, 10, 0.0, 0.95).with_contract_limit(300.0)];

    let result = optimizer.optimize("YARN-A", 500.0, &suppliers).unwrap();

    assert_eq!(result.allocations[0].quantity, 300.0);
    assert!(approx(result.shortfall_qty, 200.0));
    assert_eq!(result.capped_suppliers, vec!["SUP-A".to_string()]);
    // 可靠性虽高,部分满足仍升级为高风险
    assert_eq!(result.risk_flag, RiskFlag::High);
}

#[test]
fn test_max_suppliers_one_uses_single_rule() {
    let optimizer = create_optimizer(true, 1);
    let suppliers = vec![
        create_test_supplier("SUP-A", 2.0, 10, 0.0, 0.9),
        create_test_supplier("SUP-B", 2.0, 12, 0.0, 0.9),
    ];

    let result = optimizer.optimize("YARN-A", 1000.0, &suppliers).unwrap();

    assert_eq!(result.strategy, AllocationStrategy::Single);
    assert_eq!(result.allocations[0].supplier_id, "SUP-A");
    assert_eq!(result.allocations[0].quantity, 1000.0);
}

// ==========================================
// 多供应商拆分
// ==========================================

#[test]
fn test_split_proportional_to_score() {
    let optimizer = create_optimizer(true, 3);
    let suppliers = vec![
        create_test_supplier("SUP-A", 2.0, 10, 0.0, 0.9),
        create_test_supplier("SUP-B", 2.0, 12, 0.0, 0.9),
    ];

    let result = optimizer.optimize("YARN-A", 1000.0, &suppliers).unwrap();

    assert_eq!(result.strategy, AllocationStrategy::Split);
    assert_eq!(result.allocations.len(), 2);
    assert!(approx(result.allocations[0].quantity, 500.0));
    assert!(approx(result.allocations[1].quantity, 500.0));
    assert!(approx(result.allocations[0].share_pct, 50.0));
    assert!(approx(result.total_qty(), 1000.0));
}

#[test]
fn test_split_water_fills_contract_cap() {
    let optimizer = create_optimizer(true, 3);
    let suppliers = vec![
        create_test_supplier("SUP-A", 2.0, 10, 0.0, 0.9).with_contract_limit(200.0),
        create_test_supplier("SUP-B", 2.0, 12, 0.0, 0.9),
    ];

    let result = optimizer.optimize("YARN-A", 1000.0, &suppliers).unwrap();

    let a = result
        .allocations
        .iter()
        .find(|a| a.supplier_id == "SUP-A")
        .unwrap();
    let b = result
        .allocations
        .iter()
        .find(|a| a.supplier_id == "SUP-B")
        .unwrap();
    assert!(approx(a.quantity, 200.0));
    assert!(approx(b.quantity, 800.0));
    assert_eq!(result.capped_suppliers, vec!["SUP-A".to_string()]);
    assert_eq!(result.shortfall_qty, 0.0);
}

#[test]
fn test_split_drops_supplier_below_moq() {
    let optimizer = create_optimizer(true, 3);
    let suppliers = vec![
        create_test_supplier("SUP-A", 1.0, 10, 0.0, 0.90),
        create_test_supplier("SUP-B", 1.0, 10, 80.0, 0.85),
    ];

    let result = optimizer.optimize("YARN-A", 100.0, &suppliers).unwrap();

    assert_eq!(result.strategy, AllocationStrategy::Single);
    assert_eq!(result.allocations.len(), 1);
    assert_eq!(result.allocations[0].supplier_id, "SUP-A");
    assert_eq!(result.allocations[0].quantity, 100.0);
    assert_eq!(result.moq_drops.len(), 1);
    assert_eq!(result.moq_drops[0].supplier_id, "SUP-B");
}

#[test]
fn test_split_adds_next_supplier_when_capped() {
    let optimizer = create_optimizer(true, 2);
    let suppliers = vec![
        create_test_supplier("SUP-A", 1.0, 10, 0.0, 0.95).with_contract_limit(100.0),
        create_test_supplier("SUP-B", 1.0, 10, 2000.0, 0.90),
        create_test_supplier("SUP-C", 1.0, 10, 0.0, 0.80),
    ];

    let result = optimizer.optimize("YARN-A", 1000.0, &suppliers).unwrap();

    assert_eq!(result.strategy, AllocationStrategy::Split);
    let ids: Vec<&str> = result
        .allocations
        .iter()
        .map(|a| a.supplier_id.as_str())
        .collect();
    assert_eq!(ids, vec!["SUP-A", "SUP-C"]);
    assert!(approx(result.allocations[0].quantity, 100.0));
    assert!(approx(result.allocations[1].quantity, 900.0));
    assert_eq!(result.moq_drops[0].supplier_id, "SUP-B");
    // 拆单取最差风险
    assert_eq!(result.risk_flag, RiskFlag::Medium);
}

#[test]
fn test_split_conservation_and_moq_invariant() {
    let optimizer = create_optimizer(true, 3);
    let suppliers = vec![
        create_test_supplier("SUP-A", 2.0, 10, 150.0, 0.95),
        create_test_supplier("SUP-B", 2.2, 14, 300.0, 0.88).with_contract_limit(600.0),
        create_test_supplier("SUP-C", 1.8, 20, 50.0, 0.72),
        create_test_supplier("SUP-D", 2.5, 7, 0.0, 0.99),
    ];

    for required in [10.0, 120.0, 480.0, 950.0, 2500.0, 10000.0] {
        let result = optimizer.optimize("YARN-A", required, &suppliers).unwrap();

        assert!(result.allocations.len() <= 3);
        let total = result.total_qty();
        assert!(total + 1e-6 >= required - result.shortfall_qty);
        for allocation in &result.allocations {
            let supplier = suppliers
                .iter()
                .find(|s| s.supplier_id == allocation.supplier_id)
                .unwrap();
            assert!(allocation.quantity > 0.0);
            assert!(allocation.quantity + 1e-6 >= supplier.moq);
            assert!(allocation.quantity <= supplier.capacity() + 1e-6);
            assert!(approx(
                allocation.total_cost,
                allocation.quantity * supplier.cost_per_unit
            ));
        }
        if result.strategy == AllocationStrategy::Split {
            assert!(approx(total + result.shortfall_qty, required));
        }
    }
}
