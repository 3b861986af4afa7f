// ==========================================
// 纺织原料采购计划系统 - 供应商-物料关系领域模型
// ==========================================
// 依据: DESIGN.md - 多供应商优化
// ==========================================
// 关系: 多对多（一个物料多家供应商,一家供应商多个物料）
// 生命周期: 每次计划运行加载一次,优化期间只读
// ==========================================

use serde::{Deserialize, Serialize};

/// 单次下单成本默认值（准备/行政费用）
pub const DEFAULT_ORDERING_COST: f64 = 100.0;

/// 年持有成本率默认值（占单价比例）
pub const DEFAULT_HOLDING_COST_RATE: f64 = 0.2;

fn default_ordering_cost() -> f64 {
    DEFAULT_ORDERING_COST
}

fn default_holding_cost_rate() -> f64 {
    DEFAULT_HOLDING_COST_RATE
}

fn default_reliability() -> f64 {
    1.0
}

// ==========================================
// SupplierMaterial - 供应商供货关系
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierMaterial {
    pub material_id: String,
    pub supplier_id: String,
    pub cost_per_unit: f64,                  // 单价
    pub lead_time_days: u32,                 // 交期（天）
    #[serde(default)]
    pub moq: f64,                            // 最小起订量
    #[serde(default)]
    pub contract_qty_limit: Option<f64>,     // 合同数量上限（可选）
    #[serde(default = "default_reliability")]
    pub reliability_score: f64,              // 可靠性评分 [0,1]

    // ===== EOQ 参数 =====
    #[serde(default = "default_ordering_cost")]
    pub ordering_cost: f64,                  // 单次下单成本 S
    #[serde(default = "default_holding_cost_rate")]
    pub holding_cost_rate: f64,              // 年持有成本率 H
}

impl SupplierMaterial {
    pub fn new(
        material_id: &str,
        supplier_id: &str,
        cost_per_unit: f64,
        lead_time_days: u32,
        moq: f64,
        reliability_score: f64,
    ) -> Self {
        Self {
            material_id: material_id.to_string(),
            supplier_id: supplier_id.to_string(),
            cost_per_unit,
            lead_time_days,
            moq,
            contract_qty_limit: None,
            reliability_score,
            ordering_cost: DEFAULT_ORDERING_COST,
            holding_cost_rate: DEFAULT_HOLDING_COST_RATE,
        }
    }

    pub fn with_contract_limit(mut self, limit: f64) -> Self {
        self.contract_qty_limit = Some(limit);
        self
    }

    /// 合同上限（无上限时为正无穷）
    pub fn capacity(&self) -> f64 {
        self.contract_qty_limit.unwrap_or(f64::INFINITY)
    }

    /// 有效起订量（负数按 0 处理）
    pub fn effective_moq(&self) -> f64 {
        self.moq.max(0.0)
    }
}
