use super::allocation::{plan_split, single_quantity, DroppedShare, SplitPlan, QTY_EPSILON};
use super::scoring::{
    check_eligibility, normalized_reliability, score_and_rank, ExcludedSupplier, ScoredSupplier,
};
use crate::config::planning_config::PlanningConfig;
use crate::domain::recommendation::SupplierAllocation;
use crate::domain::supplier::SupplierMaterial;
use crate::domain::types::RiskFlag;
use crate::domain::warning::{DataQualityWarning, DqLevel, WarningCode};
use crate::engine::risk::RiskClassifier;
use crate::error::{PlanningError, PlanningResult};
use serde::Serialize;
use std::fmt;
use tracing::{debug, instrument};

// ==========================================
// 分配策略
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationStrategy {
    Single,      // 单一供应商
    Split,       // 多供应商拆分
    Unallocated, // 无合格供应商
}

impl fmt::Display for AllocationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocationStrategy::Single => write!(f, "single"),
            AllocationStrategy::Split => write!(f, "split"),
            AllocationStrategy::Unallocated => write!(f, "unallocated"),
        }
    }
}

// ==========================================
// SupplierRanking - 合格性判定 + 评分排序结果
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct SupplierRanking {
    pub ranked: Vec<ScoredSupplier>,        // 合格供应商,最优在前
    pub excluded: Vec<ExcludedSupplier>,    // 不合格供应商及原因
    pub warnings: Vec<DataQualityWarning>,
}

impl SupplierRanking {
    pub fn best(&self) -> Option<&ScoredSupplier> {
        self.ranked.first()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }
}

// ==========================================
// MoqDrop - 拆分时因份额不足起订量被剔除
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoqDrop {
    pub supplier_id: String,
    pub share: f64,
    pub moq: f64,
}

// ==========================================
// OptimizationResult - 单物料分配结果
// ==========================================
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    pub material_id: String,
    pub required_qty: f64, // 必须覆盖的需求量
    pub target_qty: f64,   // 下单目标（>= required_qty）
    pub strategy: AllocationStrategy,
    pub allocations: Vec<SupplierAllocation>,
    pub risk_flag: RiskFlag,
    pub moq_adjustment_qty: f64,
    pub shortfall_qty: f64,
    pub capped_suppliers: Vec<String>, // 触及合同上限的供应商
    pub moq_drops: Vec<MoqDrop>,
    pub excluded: Vec<ExcludedSupplier>,
    pub warnings: Vec<DataQualityWarning>,
}

impl OptimizationResult {
    pub fn total_qty(&self) -> f64 {
        self.allocations.iter().map(|a| a.quantity).sum()
    }

    pub fn total_cost(&self) -> f64 {
        self.allocations.iter().map(|a| a.total_cost).sum()
    }
}

// ==========================================
// SupplierOptimizer - 多供应商优化器
// ==========================================
pub struct SupplierOptimizer {
    max_lead_time_days: u32,
    cost_weight: f64,
    reliability_weight: f64,
    enable_multi_supplier: bool,
    max_suppliers_per_material: usize,
    risk: RiskClassifier,
}

impl SupplierOptimizer {
    /// 构造函数
    ///
    /// # 参数
    /// - config: 已校验的计划参数
    pub fn new(config: &PlanningConfig) -> Self {
        Self {
            max_lead_time_days: config.max_lead_time_days,
            cost_weight: config.cost_weight,
            reliability_weight: config.reliability_weight,
            enable_multi_supplier: config.enable_multi_supplier,
            max_suppliers_per_material: config.max_suppliers_per_material,
            risk: RiskClassifier::new(config.risk_thresholds),
        }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 合格性判定 + 评分排序
    ///
    /// # 参数
    /// - suppliers: 该物料的全部供货关系
    pub fn rank<'a, I>(&self, suppliers: I) -> SupplierRanking
    where
        I: IntoIterator<Item = &'a SupplierMaterial>,
    {
        let mut ranking = SupplierRanking::default();
        let mut eligible = Vec::new();

        for supplier in suppliers {
            match check_eligibility(supplier, self.max_lead_time_days) {
                Ok(()) => {
                    let reliability = normalized_reliability(supplier, &mut ranking.warnings);
                    eligible.push((supplier.clone(), reliability));
                }
                Err(reason) => {
                    debug!(
                        supplier_id = %supplier.supplier_id,
                        material_id = %supplier.material_id,
                        reason = %reason,
                        "供应商不合格"
                    );
                    if let Some(code) = Self::warning_code_for(supplier) {
                        ranking.warnings.push(DataQualityWarning::new(
                            DqLevel::Warning,
                            code,
                            &supplier.supplier_id,
                            match code {
                                WarningCode::InvalidSupplierCost => "cost_per_unit",
                                _ => "contract_qty_limit",
                            },
                            format!("物料 {}: {}", supplier.material_id, reason),
                        ));
                    }
                    ranking.excluded.push(ExcludedSupplier {
                        supplier_id: supplier.supplier_id.clone(),
                        reason,
                    });
                }
            }
        }

        ranking.ranked = score_and_rank(eligible, self.cost_weight, self.reliability_weight);
        ranking
    }

    /// 在已排序的合格供应商间分配数量（下单目标 = 需求量）
    ///
    /// # 参数
    /// - material_id: 物料编号
    /// - required: 需求量（必须 > 0）
    /// - ranking: rank() 的结果
    ///
    /// # 返回
    /// - Ok(OptimizationResult): 无合格供应商时为空分配 + 高风险,不报错
    /// - Err(InvalidInput): required 非正或非有限值
    pub fn allocate(
        &self,
        material_id: &str,
        required: f64,
        ranking: &SupplierRanking,
    ) -> PlanningResult<OptimizationResult> {
        self.allocate_toward(material_id, required, required, ranking)
    }

    /// 按下单目标分配,缺口与高风险只按需求量判定
    ///
    /// # 参数
    /// - material_id: 物料编号
    /// - required: 必须覆盖的需求量（含安全库存,必须 > 0）
    /// - target: 下单目标（EOQ 上调后的数量,低于 required 时按 required）
    /// - ranking: rank() 的结果
    ///
    /// # 返回
    /// - Ok(OptimizationResult): 上限截掉的 EOQ 上调部分不计入 shortfall_qty
    /// - Err(InvalidInput): required / target 非正或非有限值
    #[instrument(skip(self, ranking), fields(eligible = ranking.ranked.len()))]
    pub fn allocate_toward(
        &self,
        material_id: &str,
        required: f64,
        target: f64,
        ranking: &SupplierRanking,
    ) -> PlanningResult<OptimizationResult> {
        if !required.is_finite() || required <= 0.0 {
            return Err(PlanningError::InvalidInput(format!(
                "物料 {} 需求量 {} 非法",
                material_id, required
            )));
        }
        if !target.is_finite() {
            return Err(PlanningError::InvalidInput(format!(
                "物料 {} 下单目标 {} 非法",
                material_id, target
            )));
        }
        let target = target.max(required);

        let mut result = OptimizationResult {
            material_id: material_id.to_string(),
            required_qty: required,
            target_qty: target,
            strategy: AllocationStrategy::Unallocated,
            allocations: Vec::new(),
            risk_flag: RiskFlag::High,
            moq_adjustment_qty: 0.0,
            shortfall_qty: required,
            capped_suppliers: Vec::new(),
            moq_drops: Vec::new(),
            excluded: ranking.excluded.clone(),
            warnings: ranking.warnings.clone(),
        };

        let ranked = &ranking.ranked;
        if ranked.is_empty() {
            return Ok(result);
        }

        let use_split = self.enable_multi_supplier && ranked.len() > 1;
        let (plan, dropped) = if use_split {
            plan_split(ranked, target, required, self.max_suppliers_per_material)
        } else {
            let quantity = single_quantity(&ranked[0], target, required);
            (SplitPlan::Single { index: 0, quantity }, Vec::new())
        };

        result.moq_drops = dropped
            .into_iter()
            .map(|DroppedShare { index, share, moq }| MoqDrop {
                supplier_id: ranked[index].supplier.supplier_id.clone(),
                share,
                moq,
            })
            .collect();

        let quantities: Vec<(usize, f64)> = match plan {
            SplitPlan::Single { index, quantity } => {
                result.strategy = AllocationStrategy::Single;
                result.moq_adjustment_qty = quantity.moq_adjustment;
                result.shortfall_qty = quantity.shortfall;
                vec![(index, quantity.qty)]
            }
            SplitPlan::Split { shares, shortfall } => {
                result.strategy = AllocationStrategy::Split;
                result.shortfall_qty = shortfall;
                shares
            }
        };

        let order_total: f64 = quantities.iter().map(|(_, q)| q).sum();
        for (index, qty) in quantities {
            let candidate = &ranked[index];
            if let Some(limit) = candidate.supplier.contract_qty_limit {
                if qty + QTY_EPSILON >= limit {
                    result.capped_suppliers.push(candidate.supplier.supplier_id.clone());
                }
            }
            result.allocations.push(self.build_allocation(candidate, qty, order_total));
        }

        let worst = self
            .risk
            .worst(result.allocations.iter().map(|a| a.risk_flag));
        result.risk_flag = if result.shortfall_qty > QTY_EPSILON {
            RiskFlag::High
        } else {
            worst
        };

        debug!(
            material_id,
            strategy = %result.strategy,
            allocations = result.allocations.len(),
            total_qty = order_total,
            shortfall = result.shortfall_qty,
            risk = %result.risk_flag,
            "供应商分配完成"
        );

        Ok(result)
    }

    /// rank + allocate
    pub fn optimize<'a, I>(
        &self,
        material_id: &str,
        required: f64,
        suppliers: I,
    ) -> PlanningResult<OptimizationResult>
    where
        I: IntoIterator<Item = &'a SupplierMaterial>,
    {
        let ranking = self.rank(suppliers);
        self.allocate(material_id, required, &ranking)
    }

    // ==========================================
    // 辅助方法
    // ==========================================

    fn build_allocation(
        &self,
        candidate: &ScoredSupplier,
        qty: f64,
        order_total: f64,
    ) -> SupplierAllocation {
        let supplier = &candidate.supplier;
        SupplierAllocation {
            supplier_id: supplier.supplier_id.clone(),
            quantity: qty,
            cost_per_unit: supplier.cost_per_unit,
            total_cost: qty * supplier.cost_per_unit,
            lead_time_days: supplier.lead_time_days,
            reliability_score: candidate.reliability,
            score: candidate.score,
            risk_flag: self.risk.classify(candidate.reliability),
            share_pct: if order_total > 0.0 {
                qty / order_total * 100.0
            } else {
                0.0
            },
        }
    }

    fn warning_code_for(supplier: &SupplierMaterial) -> Option<WarningCode> {
        if !supplier.cost_per_unit.is_finite() || supplier.cost_per_unit <= 0.0 {
            return Some(WarningCode::InvalidSupplierCost);
        }
        match supplier.contract_qty_limit {
            Some(limit) if limit < supplier.effective_moq() => Some(WarningCode::ContractBelowMoq),
            _ => None,
        }
    }
}
