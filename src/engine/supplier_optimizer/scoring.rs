use crate::domain::supplier::SupplierMaterial;
use crate::domain::warning::{DataQualityWarning, DqLevel, WarningCode};
use serde::Serialize;
use std::cmp::Ordering;

/// 评分相等判定容差
pub(super) const SCORE_EPSILON: f64 = 1e-9;

// ==========================================
// 合格性判定
// ==========================================

/// 不合格供应商及原因
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExcludedSupplier {
    pub supplier_id: String,
    pub reason: String,
}

/// 判定单个供应商是否合格
///
/// 排除条件:
/// 1) 交期超过 max_lead_time_days
/// 2) 单价非正或非有限值
/// 3) 合同上限低于自身起订量（永远无法下单）
pub(super) fn check_eligibility(
    supplier: &SupplierMaterial,
    max_lead_time_days: u32,
) -> Result<(), String> {
    if supplier.lead_time_days > max_lead_time_days {
        return Err(format!(
            "交期 {} 天超过上限 {} 天",
            supplier.lead_time_days, max_lead_time_days
        ));
    }

    if !supplier.cost_per_unit.is_finite() || supplier.cost_per_unit <= 0.0 {
        return Err(format!("单价 {} 非法", supplier.cost_per_unit));
    }

    if let Some(limit) = supplier.contract_qty_limit {
        if limit < supplier.effective_moq() {
            return Err(format!(
                "合同上限 {} 低于起订量 {}",
                limit, supplier.moq
            ));
        }
    }

    Ok(())
}

/// 可靠性评分落在 [0,1] 之外时截断并告警
pub(super) fn normalized_reliability(
    supplier: &SupplierMaterial,
    warnings: &mut Vec<DataQualityWarning>,
) -> f64 {
    let r = supplier.reliability_score;
    if r.is_finite() && (0.0..=1.0).contains(&r) {
        return r;
    }

    let clamped = if r.is_finite() { r.clamp(0.0, 1.0) } else { 0.0 };
    warnings.push(DataQualityWarning::new(
        DqLevel::Warning,
        WarningCode::ReliabilityOutOfRange,
        &supplier.supplier_id,
        "reliability_score",
        format!(
            "供应商 {} 物料 {} 的可靠性评分 {} 越界,按 {} 计算",
            supplier.supplier_id, supplier.material_id, r, clamped
        ),
    ));
    clamped
}

// ==========================================
// 评分与排序
// ==========================================

/// 已评分的合格供应商
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredSupplier {
    pub supplier: SupplierMaterial,
    pub reliability: f64, // 截断到 [0,1] 后的可靠性
    pub normalized_inverse_cost: f64,
    pub score: f64,
}

/// 综合评分
///
/// score = cost_weight × (min_cost / cost) + reliability_weight × reliability
pub(super) fn compute_score(
    cost_per_unit: f64,
    min_cost: f64,
    reliability: f64,
    cost_weight: f64,
    reliability_weight: f64,
) -> (f64, f64) {
    let inverse_cost = if cost_per_unit > 0.0 {
        min_cost / cost_per_unit
    } else {
        0.0
    };
    (
        inverse_cost,
        cost_weight * inverse_cost + reliability_weight * reliability,
    )
}

/// 排序比较: 评分降序 -> 交期升序 -> supplier_id 字典序
pub(super) fn compare_ranked(a: &ScoredSupplier, b: &ScoredSupplier) -> Ordering {
    if (a.score - b.score).abs() > SCORE_EPSILON {
        return b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal);
    }

    a.supplier
        .lead_time_days
        .cmp(&b.supplier.lead_time_days)
        .then_with(|| a.supplier.supplier_id.cmp(&b.supplier.supplier_id))
}

/// 对合格供应商评分并排序（最优在前）
pub(super) fn score_and_rank(
    eligible: Vec<(SupplierMaterial, f64)>,
    cost_weight: f64,
    reliability_weight: f64,
) -> Vec<ScoredSupplier> {
    let min_cost = eligible
        .iter()
        .map(|(s, _)| s.cost_per_unit)
        .fold(f64::INFINITY, f64::min);

    let mut ranked: Vec<ScoredSupplier> = eligible
        .into_iter()
        .map(|(supplier, reliability)| {
            let (normalized_inverse_cost, score) = compute_score(
                supplier.cost_per_unit,
                min_cost,
                reliability,
                cost_weight,
                reliability_weight,
            );
            ScoredSupplier {
                supplier,
                reliability,
                normalized_inverse_cost,
                score,
            }
        })
        .collect();

    ranked.sort_by(compare_ranked);
    ranked
}
