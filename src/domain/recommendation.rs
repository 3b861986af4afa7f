// ==========================================
// 纺织原料采购计划系统 - 采购建议领域模型
// ==========================================
// 依据: DESIGN.md - 采购建议生成
// ==========================================
// 红线: 建议一经输出不可变
// 红线: recommended_order_qty == Σ allocations.quantity
// ==========================================

use crate::domain::types::RiskFlag;
use serde::{Deserialize, Serialize};

// ==========================================
// CostBreakdown - EOQ 成本拆分（仅供参考）
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub ordering_cost: f64, // 年下单成本 D/Q × S
    pub holding_cost: f64,  // 年持有成本 Q/2 × C × H
    pub total_cost: f64,
}

// ==========================================
// EoqAdvice - 附着在建议上的 EOQ 结论
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EoqAdvice {
    pub supplier_id: String,        // 按哪家供应商参数计算
    pub annual_demand: f64,         // D
    pub eoq_qty: f64,               // 经济订货量
    pub breakdown: CostBreakdown,   // 按 EOQ 下单的成本拆分
    pub applied: bool,              // 是否据此上调了下单目标
}

// ==========================================
// SupplierAllocation - 单家供应商分配
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierAllocation {
    pub supplier_id: String,
    pub quantity: f64,
    pub cost_per_unit: f64,
    pub total_cost: f64,
    pub lead_time_days: u32,
    pub reliability_score: f64,
    pub score: f64,         // 综合评分
    pub risk_flag: RiskFlag,
    pub share_pct: f64,     // 占该物料下单量百分比
}

// ==========================================
// ProcurementRecommendation - 采购建议
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcurementRecommendation {
    // ===== 主键 =====
    pub material_id: String,

    // ===== 下单结论 =====
    pub recommended_order_qty: f64,
    pub supplier_ids: Vec<String>,        // 一家或多家（拆单）
    pub allocations: Vec<SupplierAllocation>,
    pub unit: String,
    pub expected_lead_time: Option<u32>,  // 拆单时取最长交期
    pub risk_flag: RiskFlag,
    pub reasoning: String,                // 可解释性

    // ===== 成本 =====
    pub total_cost: f64,
    pub cost_per_unit: f64,               // 拆单时为加权平均

    // ===== 需求追溯 =====
    pub gross_requirement: f64,
    pub net_requirement: f64,
    pub safety_buffer_pct: f64,
    pub safety_buffer_qty: f64,
    pub buffered_requirement: f64,
    pub moq_adjustment_qty: f64,          // 因起订量多订的数量
    pub shortfall_qty: f64,               // 受合同上限影响未覆盖的数量

    // ===== EOQ =====
    pub eoq: Option<EoqAdvice>,
}

impl ProcurementRecommendation {
    /// 是否存在有效分配
    pub fn is_allocated(&self) -> bool {
        !self.allocations.is_empty()
    }

    /// 是否拆单
    pub fn is_split(&self) -> bool {
        self.allocations.len() > 1
    }

    /// 分配数量之和（与 recommended_order_qty 一致）
    pub fn allocated_qty(&self) -> f64 {
        self.allocations.iter().map(|a| a.quantity).sum()
    }
}
