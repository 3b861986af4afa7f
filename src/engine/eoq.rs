// ==========================================
// 纺织原料采购计划系统 - EOQ 计算器
// ==========================================
// 依据: DESIGN.md - EOQ 计算
// ==========================================
// 公式: EOQ = sqrt(2 × D × S / (C × H))
//   D: 年需求量  S: 单次下单成本  C: 单价  H: 年持有成本率
// 红线: C×H <= 0 / D <= 0 / S <= 0 时不报错,返回"按净需求下单"
// 红线: 成本拆分仅供参考,不参与约束判定
// ==========================================

use crate::domain::recommendation::CostBreakdown;
use crate::domain::supplier::SupplierMaterial;
use serde::{Deserialize, Serialize};

// ==========================================
// EoqOutcome - EOQ 计算结论
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EoqOutcome {
    /// 经济订货量及其成本拆分
    Quantity { eoq: f64, breakdown: CostBreakdown },
    /// EOQ 无定义,按净需求原值下单
    UseNetRequirement { reason: String },
}

impl EoqOutcome {
    pub fn quantity(&self) -> Option<f64> {
        match self {
            EoqOutcome::Quantity { eoq, .. } => Some(*eoq),
            EoqOutcome::UseNetRequirement { .. } => None,
        }
    }
}

pub struct EoqCalculator {
    // 无状态引擎
}

impl EoqCalculator {
    pub fn new() -> Self {
        Self {}
    }

    /// 计算经济订货量
    ///
    /// # 参数
    /// - annual_demand: 年需求量 D
    /// - ordering_cost: 单次下单成本 S
    /// - unit_cost: 单价 C
    /// - holding_cost_rate: 年持有成本率 H
    pub fn calculate(
        &self,
        annual_demand: f64,
        ordering_cost: f64,
        unit_cost: f64,
        holding_cost_rate: f64,
    ) -> EoqOutcome {
        let holding_per_unit = unit_cost * holding_cost_rate;

        if !holding_per_unit.is_finite() || holding_per_unit <= 0.0 {
            return EoqOutcome::UseNetRequirement {
                reason: format!("单位持有成本 C×H = {} 非正", holding_per_unit),
            };
        }
        if !annual_demand.is_finite() || annual_demand <= 0.0 {
            return EoqOutcome::UseNetRequirement {
                reason: format!("年需求量 {} 非正", annual_demand),
            };
        }
        if !ordering_cost.is_finite() || ordering_cost <= 0.0 {
            return EoqOutcome::UseNetRequirement {
                reason: format!("下单成本 {} 非正", ordering_cost),
            };
        }

        let eoq = (2.0 * annual_demand * ordering_cost / holding_per_unit).sqrt();
        let breakdown =
            self.cost_breakdown(annual_demand, eoq, ordering_cost, unit_cost, holding_cost_rate);

        EoqOutcome::Quantity { eoq, breakdown }
    }

    /// 按供应商参数计算
    pub fn calculate_for_supplier(
        &self,
        supplier: &SupplierMaterial,
        annual_demand: f64,
    ) -> EoqOutcome {
        self.calculate(
            annual_demand,
            supplier.ordering_cost,
            supplier.cost_per_unit,
            supplier.holding_cost_rate,
        )
    }

    /// 年度成本拆分
    ///
    /// ordering = D/Q × S, holding = Q/2 × C × H
    pub fn cost_breakdown(
        &self,
        annual_demand: f64,
        order_qty: f64,
        ordering_cost: f64,
        unit_cost: f64,
        holding_cost_rate: f64,
    ) -> CostBreakdown {
        let ordering = if order_qty > 0.0 {
            annual_demand / order_qty * ordering_cost
        } else {
            0.0
        };
        let holding = order_qty / 2.0 * unit_cost * holding_cost_rate;

        CostBreakdown {
            ordering_cost: ordering,
            holding_cost: holding,
            total_cost: ordering + holding,
        }
    }
}

impl Default for EoqCalculator {
    fn default() -> Self {
        Self::new()
    }
}
