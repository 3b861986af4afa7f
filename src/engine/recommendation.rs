// ==========================================
// 纺织原料采购计划系统 - 采购建议生成器
// ==========================================
// 依据: DESIGN.md - 采购建议生成
// ==========================================
// 职责: 净需求 + 安全库存 + EOQ + 供应商分配 => 采购建议
// 红线: 每个缺料物料一条建议,附全部供应商分配
// 红线: recommended_order_qty = Σ allocations; 安全库存每次运行只加一次
// 红线: 所有调整必须写入 reasoning
// ==========================================

use crate::config::category_rules::CategoryRules;
use crate::config::planning_config::PlanningConfig;
use crate::domain::inventory::NetRequirement;
use crate::domain::recommendation::{EoqAdvice, ProcurementRecommendation};
use crate::domain::supplier::SupplierMaterial;
use crate::domain::types::MaterialCategory;
use crate::domain::warning::DataQualityWarning;
use crate::engine::eoq::{EoqCalculator, EoqOutcome};
use crate::engine::supplier_optimizer::{
    AllocationStrategy, OptimizationResult, SupplierOptimizer,
};
use crate::error::PlanningResult;
use tracing::debug;

/// 单物料建议及附带告警
#[derive(Debug, Clone)]
pub struct BuiltRecommendation {
    pub recommendation: ProcurementRecommendation,
    pub warnings: Vec<DataQualityWarning>,
}

// ==========================================
// RecommendationBuilder - 采购建议生成器
// ==========================================
pub struct RecommendationBuilder {
    config: PlanningConfig,
    categories: CategoryRules,
    eoq: EoqCalculator,
    optimizer: SupplierOptimizer,
}

impl RecommendationBuilder {
    /// 构造函数
    ///
    /// # 参数
    /// - config: 已校验的计划参数
    pub fn new(config: &PlanningConfig) -> Self {
        Self {
            config: config.clone(),
            categories: CategoryRules::new(),
            eoq: EoqCalculator::new(),
            optimizer: SupplierOptimizer::new(config),
        }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 生成单个物料的采购建议
    ///
    /// # 参数
    /// - net: 物料净需求（net_qty > 0）
    /// - suppliers: 该物料全部供货关系
    ///
    /// # 返回
    /// 采购建议; 无合格供应商时为空分配的高风险建议
    pub fn build<'a, I>(&self, net: &NetRequirement, suppliers: I) -> PlanningResult<BuiltRecommendation>
    where
        I: IntoIterator<Item = &'a SupplierMaterial>,
    {
        let material_id = net.material_id.as_str();

        // ===== 1. 安全库存 =====
        let (category, buffer_pct) = self.categories.resolve_buffer(&self.config, material_id);
        let buffered = net.net_qty * (1.0 + buffer_pct);
        let buffer_qty = buffered - net.net_qty;

        // ===== 2. 供应商排序（EOQ 依赖最优供应商参数） =====
        let ranking = self.optimizer.rank(suppliers);

        // ===== 3. EOQ =====
        let mut eoq_note = None;
        let mut eoq_advice = None;
        let mut target = buffered;

        if self.config.enable_eoq_optimization {
            if let Some(best) = ranking.best() {
                let annual_demand = buffered * self.config.annual_demand_multiplier;
                match self.eoq.calculate_for_supplier(&best.supplier, annual_demand) {
                    EoqOutcome::Quantity { eoq, breakdown } => {
                        let applied = eoq > buffered;
                        if applied {
                            target = eoq;
                        }
                        eoq_note = Some(if applied {
                            format!(
                                "EOQ {:.2}（按 {} 参数,年需求 {:.2}）高于目标,下单目标上调至 EOQ",
                                eoq, best.supplier.supplier_id, annual_demand
                            )
                        } else {
                            format!("EOQ {:.2} 不高于目标,维持目标数量", eoq)
                        });
                        eoq_advice = Some(EoqAdvice {
                            supplier_id: best.supplier.supplier_id.clone(),
                            annual_demand,
                            eoq_qty: eoq,
                            breakdown,
                            applied,
                        });
                    }
                    EoqOutcome::UseNetRequirement { reason } => {
                        eoq_note = Some(format!("EOQ 不适用（{}）,按需求数量下单", reason));
                    }
                }
            }
        }

        // ===== 4. 供应商分配 =====
        let result = self
            .optimizer
            .allocate_toward(material_id, buffered, target, &ranking)?;

        // ===== 5. 汇总 =====
        let recommended_order_qty = result.total_qty();
        let total_cost = result.total_cost();
        let cost_per_unit = if recommended_order_qty > 0.0 {
            total_cost / recommended_order_qty
        } else {
            0.0
        };
        let expected_lead_time = result.allocations.iter().map(|a| a.lead_time_days).max();

        let reasoning = self.compose_reasoning(
            net,
            category,
            buffer_pct,
            buffered,
            eoq_note.as_deref(),
            &result,
        );

        debug!(
            material_id,
            net_qty = net.net_qty,
            buffered,
            target,
            recommended_order_qty,
            risk = %result.risk_flag,
            "采购建议生成"
        );

        let recommendation = ProcurementRecommendation {
            material_id: net.material_id.clone(),
            recommended_order_qty,
            supplier_ids: result
                .allocations
                .iter()
                .map(|a| a.supplier_id.clone())
                .collect(),
            unit: net.unit.clone(),
            expected_lead_time,
            risk_flag: result.risk_flag,
            reasoning,
            total_cost,
            cost_per_unit,
            gross_requirement: net.gross_qty,
            net_requirement: net.net_qty,
            safety_buffer_pct: buffer_pct,
            safety_buffer_qty: buffer_qty,
            buffered_requirement: buffered,
            moq_adjustment_qty: result.moq_adjustment_qty,
            shortfall_qty: result.shortfall_qty,
            eoq: eoq_advice,
            allocations: result.allocations,
        };

        Ok(BuiltRecommendation {
            recommendation,
            warnings: result.warnings,
        })
    }

    // ==========================================
    // 可解释性
    // ==========================================

    fn compose_reasoning(
        &self,
        net: &NetRequirement,
        category: MaterialCategory,
        buffer_pct: f64,
        buffered: f64,
        eoq_note: Option<&str>,
        result: &OptimizationResult,
    ) -> String {
        let mut parts = Vec::new();

        parts.push(format!(
            "净需求 {:.2} {}（毛需求 {:.2},现货 {:.2},计划期内在途 {:.2}）",
            net.net_qty, net.unit, net.gross_qty, net.on_hand_qty, net.qualifying_po_qty
        ));
        parts.push(format!(
            "安全库存 {:.1}%（类别 {}）,目标 {:.2}",
            buffer_pct * 100.0,
            category,
            buffered
        ));
        if let Some(note) = eoq_note {
            parts.push(note.to_string());
        }

        match result.strategy {
            AllocationStrategy::Unallocated => {
                if result.excluded.is_empty() {
                    parts.push("该物料无供应商记录,无法下单".to_string());
                } else {
                    let reasons: Vec<String> = result
                        .excluded
                        .iter()
                        .map(|e| format!("{}: {}", e.supplier_id, e.reason))
                        .collect();
                    parts.push(format!("无合格供应商（{}）", reasons.join(", ")));
                }
            }
            AllocationStrategy::Single => {
                if let Some(a) = result.allocations.first() {
                    parts.push(format!(
                        "选择供应商 {}（评分 {:.3},单价 {:.2},交期 {} 天,可靠性 {:.2}）",
                        a.supplier_id, a.score, a.cost_per_unit, a.lead_time_days, a.reliability_score
                    ));
                    parts.push(self.selection_basis());
                }
            }
            AllocationStrategy::Split => {
                let shares: Vec<String> = result
                    .allocations
                    .iter()
                    .map(|a| {
                        format!(
                            "{} {:.2}（{:.1}%,评分 {:.3}）",
                            a.supplier_id, a.quantity, a.share_pct, a.score
                        )
                    })
                    .collect();
                parts.push(format!(
                    "按评分比例拆分至 {} 家供应商: {}",
                    result.allocations.len(),
                    shares.join(", ")
                ));
            }
        }

        for drop in &result.moq_drops {
            parts.push(format!(
                "供应商 {} 份额 {:.2} 低于起订量 {:.2},已剔除并重新分配",
                drop.supplier_id, drop.share, drop.moq
            ));
        }
        if result.moq_adjustment_qty > 0.0 {
            parts.push(format!("按起订量多订 {:.2}", result.moq_adjustment_qty));
        }
        if !result.capped_suppliers.is_empty() {
            parts.push(format!(
                "供应商 {} 触及合同上限",
                result.capped_suppliers.join(", ")
            ));
        }
        let ordered = result.total_qty();
        if result.shortfall_qty <= 0.0
            && result.strategy != AllocationStrategy::Unallocated
            && ordered + 1e-6 < result.target_qty
        {
            parts.push(format!(
                "合同上限截断 EOQ 上调部分,实际下单 {:.2},需求 {:.2} 已覆盖",
                ordered, result.required_qty
            ));
        }
        if result.shortfall_qty > 0.0 && result.strategy != AllocationStrategy::Unallocated {
            parts.push(format!(
                "合同上限导致缺口 {:.2},存在部分满足风险",
                result.shortfall_qty
            ));
        }
        if !result.excluded.is_empty() && result.strategy != AllocationStrategy::Unallocated {
            parts.push(format!("排除 {} 家不合格供应商", result.excluded.len()));
        }

        parts.push(format!("风险等级 {}", result.risk_flag));
        parts.join("; ")
    }

    /// 选择依据: 评分权重 + 交期上限
    fn selection_basis(&self) -> String {
        format!(
            "选择依据: 成本/可靠性综合评分最高（成本权重 {:.2},可靠性权重 {:.2}）,交期上限 {} 天内",
            self.config.cost_weight, self.config.reliability_weight, self.config.max_lead_time_days
        )
    }
}
