// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use chrono::NaiveDate;
use raw_material_planner::config::PlanningConfig;
use raw_material_planner::domain::types::ForecastSource;
use raw_material_planner::domain::{
    BomEntry, Forecast, InventoryRecord, PlanningSnapshot, SupplierMaterial,
};

/// 固定计划日期,保证测试可复现
pub fn plan_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
}

/// 关闭安全库存与 EOQ 的配置,便于核对数量
pub fn flat_config() -> PlanningConfig {
    PlanningConfig {
        safety_buffer_pct: 0.0,
        enable_eoq_optimization: false,
        ..PlanningConfig::default()
    }
}

// ==========================================
// SupplierMaterial 构建器
// ==========================================

pub struct SupplierBuilder {
    supplier: SupplierMaterial,
}

impl SupplierBuilder {
    pub fn new(material_id: &str, supplier_id: &str) -> Self {
        Self {
            supplier: SupplierMaterial::new(material_id, supplier_id, 2.0, 10, 0.0, 0.9),
        }
    }

    pub fn cost(mut self, cost_per_unit: f64) -> Self {
        self.supplier.cost_per_unit = cost_per_unit;
        self
    }

    pub fn lead_time(mut self, days: u32) -> Self {
        self.supplier.lead_time_days = days;
        self
    }

    pub fn moq(mut self, moq: f64) -> Self {
        self.supplier.moq = moq;
        self
    }

    pub fn contract_limit(mut self, limit: f64) -> Self {
        self.supplier.contract_qty_limit = Some(limit);
        self
    }

    pub fn reliability(mut self, score: f64) -> Self {
        self.supplier.reliability_score = score;
        self
    }

    pub fn ordering_cost(mut self, cost: f64) -> Self {
        self.supplier.ordering_cost = cost;
        self
    }

    pub fn holding_cost_rate(mut self, rate: f64) -> Self {
        self.supplier.holding_cost_rate = rate;
        self
    }

    pub fn build(self) -> SupplierMaterial {
        self.supplier
    }
}

// ==========================================
// PlanningSnapshot 构建器
// ==========================================

#[derive(Default)]
pub struct SnapshotBuilder {
    snapshot: PlanningSnapshot,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sales_order(self, sku_id: &str, quantity: f64) -> Self {
        self.forecast(sku_id, quantity, ForecastSource::SalesOrder)
    }

    pub fn forecast(mut self, sku_id: &str, quantity: f64, source: ForecastSource) -> Self {
        self.snapshot
            .forecasts
            .push(Forecast::new(sku_id, quantity, plan_date(), source));
        self
    }

    pub fn bom(mut self, sku_id: &str, material_id: &str, percentage: f64, unit: &str) -> Self {
        self.snapshot
            .bom_entries
            .push(BomEntry::new(sku_id, material_id, percentage, unit));
        self
    }

    pub fn on_hand(mut self, material_id: &str, qty: f64, unit: &str) -> Self {
        self.snapshot
            .inventory
            .push(InventoryRecord::new(material_id, qty, unit));
        self
    }

    /// 带在途的库存行; days_out 为相对计划日期的到货天数
    pub fn on_hand_with_po(
        mut self,
        material_id: &str,
        qty: f64,
        unit: &str,
        po_qty: f64,
        days_out: i64,
    ) -> Self {
        let expected = plan_date() + chrono::Duration::days(days_out);
        self.snapshot
            .inventory
            .push(InventoryRecord::new(material_id, qty, unit).with_open_po(po_qty, expected));
        self
    }

    pub fn supplier(mut self, supplier: SupplierMaterial) -> Self {
        self.snapshot.supplier_materials.push(supplier);
        self
    }

    pub fn build(self) -> PlanningSnapshot {
        self.snapshot
    }
}
