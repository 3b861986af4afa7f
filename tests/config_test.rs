// ==========================================
// 计划参数集成测试
// ==========================================
// 职责: 验证 JSON 配置加载、校验与类别安全库存在计划中的生效
// ==========================================

mod helpers;

use helpers::test_data_builder::{flat_config, plan_date, SnapshotBuilder, SupplierBuilder};
use raw_material_planner::config::{CategoryRules, ConfigError, ConfigLoader, PlanningConfig};
use raw_material_planner::engine::ProcurementPlanner;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_config_file_with_overrides() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "safety_buffer_pct": 0.2,
            "max_lead_time_days": 60,
            "enable_multi_supplier": false,
            "risk_thresholds": {{ "low_min_reliability": 0.9 }}
        }}"#
    )
    .unwrap();

    let config = ConfigLoader::from_file(file.path()).unwrap();

    assert_eq!(config.safety_buffer_pct, 0.2);
    assert_eq!(config.max_lead_time_days, 60);
    assert!(!config.enable_multi_supplier);
    assert_eq!(config.risk_thresholds.low_min_reliability, 0.9);
    assert_eq!(config.risk_thresholds.medium_min_reliability, 0.70);
    assert_eq!(config.planning_horizon_days, 90);
}

#[test]
fn test_validation_reports_every_issue() {
    let result = ConfigLoader::from_json_str(
        r#"{"cost_weight": 0.9, "reliability_weight": 0.4, "max_suppliers_per_material": 0}"#,
    );

    match result {
        Err(ConfigError::Invalid(issues)) => {
            assert_eq!(issues.len(), 2);
            assert!(issues.iter().any(|i| i.contains("cost_weight + reliability_weight")));
            assert!(issues.iter().any(|i| i.contains("max_suppliers_per_material")));
        }
        other => panic!("期望校验失败, 实际 {:?}", other),
    }
}

#[test]
fn test_missing_config_file() {
    let result = ConfigLoader::from_file("/nonexistent/planner.json");
    assert!(matches!(result, Err(ConfigError::ReadError { .. })));
}

#[test]
fn test_category_buffers_applied_per_material() {
    let config = PlanningConfig {
        category_safety_buffers: CategoryRules::new().recommended_buffers(),
        ..flat_config()
    };
    let snapshot = SnapshotBuilder::new()
        .sales_order("SKU-TEE-01", 1000.0)
        .bom("SKU-TEE-01", "YARN-COTTON", 0.5, "lb")
        .bom("SKU-TEE-01", "BUTTON-12MM", 0.5, "piece")
        .supplier(SupplierBuilder::new("YARN-COTTON", "SUP-A").build())
        .supplier(SupplierBuilder::new("BUTTON-12MM", "SUP-B").build())
        .build();

    let report = ProcurementPlanner::new(config)
        .unwrap()
        .plan(&snapshot, plan_date())
        .unwrap();

    let yarn = report.recommendation_for("YARN-COTTON").unwrap();
    assert_eq!(yarn.safety_buffer_pct, 0.15);
    assert!((yarn.buffered_requirement - 575.0).abs() < 1e-6);

    let button = report.recommendation_for("BUTTON-12MM").unwrap();
    assert_eq!(button.safety_buffer_pct, 0.05);
    assert!((button.recommended_order_qty - 525.0).abs() < 1e-6);
}
