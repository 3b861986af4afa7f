// ==========================================
// 纺织原料采购计划系统 - 计划汇总统计
// ==========================================
// 职责: 基于采购建议生成运行级汇总（成本/风险分布/交期窗口）
// ==========================================

use crate::domain::recommendation::ProcurementRecommendation;
use crate::domain::types::RiskFlag;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 风险分布
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskDistribution {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

/// 计划汇总
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanningSummary {
    pub recommendation_count: usize,
    pub allocated_count: usize,
    pub unallocated_count: usize,   // 无合格供应商
    pub split_count: usize,         // 多供应商拆单
    pub sufficient_count: usize,    // 库存已满足
    pub failure_count: usize,
    pub warning_count: usize,
    pub total_cost: f64,
    pub supplier_count: usize,      // 涉及的供应商（去重）
    pub risk_distribution: RiskDistribution,
    pub eoq_adjusted_count: usize,
    pub moq_adjusted_count: usize,
    pub shortfall_count: usize,
    pub average_lead_time_days: Option<f64>,
    pub earliest_delivery: Option<NaiveDate>,
    pub latest_delivery: Option<NaiveDate>,
}

pub struct SummaryBuilder {
    // 无状态
}

impl SummaryBuilder {
    pub fn new() -> Self {
        Self {}
    }

    /// 汇总
    ///
    /// # 参数
    /// - recommendations: 本次运行全部建议
    /// - plan_date: 计划日期（交期窗口起点）
    /// - sufficient_count / failure_count / warning_count: 由编排器统计
    pub fn build(
        &self,
        recommendations: &[ProcurementRecommendation],
        plan_date: NaiveDate,
        sufficient_count: usize,
        failure_count: usize,
        warning_count: usize,
    ) -> PlanningSummary {
        let mut summary = PlanningSummary {
            recommendation_count: recommendations.len(),
            sufficient_count,
            failure_count,
            warning_count,
            ..PlanningSummary::default()
        };

        let mut suppliers = BTreeSet::new();
        let mut lead_times = Vec::new();

        for rec in recommendations {
            if rec.is_allocated() {
                summary.allocated_count += 1;
            } else {
                summary.unallocated_count += 1;
            }
            if rec.is_split() {
                summary.split_count += 1;
            }

            summary.total_cost += rec.total_cost;
            suppliers.extend(rec.supplier_ids.iter().cloned());

            match rec.risk_flag {
                RiskFlag::Low => summary.risk_distribution.low += 1,
                RiskFlag::Medium => summary.risk_distribution.medium += 1,
                RiskFlag::High => summary.risk_distribution.high += 1,
            }

            if rec.eoq.as_ref().map(|e| e.applied).unwrap_or(false) {
                summary.eoq_adjusted_count += 1;
            }
            if rec.moq_adjustment_qty > 0.0 {
                summary.moq_adjusted_count += 1;
            }
            if rec.shortfall_qty > 0.0 && rec.is_allocated() {
                summary.shortfall_count += 1;
            }
            if let Some(days) = rec.expected_lead_time {
                lead_times.push(days);
            }
        }

        summary.supplier_count = suppliers.len();

        if !lead_times.is_empty() {
            let sum: u64 = lead_times.iter().map(|&d| u64::from(d)).sum();
            summary.average_lead_time_days = Some(sum as f64 / lead_times.len() as f64);
        }
        summary.earliest_delivery = lead_times
            .iter()
            .min()
            .map(|&d| plan_date + Duration::days(i64::from(d)));
        summary.latest_delivery = lead_times
            .iter()
            .max()
            .map(|&d| plan_date + Duration::days(i64::from(d)));

        summary
    }
}

impl Default for SummaryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
