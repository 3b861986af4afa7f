// ==========================================
// 纺织原料采购计划系统 - 成品需求预测领域模型
// ==========================================
// 依据: DESIGN.md - 预测统一
// ==========================================

use crate::domain::types::ForecastSource;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// Forecast - 成品需求预测
// ==========================================
// 红线: 创建后不可变,由上游预测整合环节产出
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub sku_id: String,         // 成品 SKU
    pub quantity: f64,          // 预测数量
    pub period: NaiveDate,      // 预测期间（期初日期）
    pub source: ForecastSource, // 预测来源
}

impl Forecast {
    pub fn new(sku_id: &str, quantity: f64, period: NaiveDate, source: ForecastSource) -> Self {
        Self {
            sku_id: sku_id.to_string(),
            quantity,
            period,
            source,
        }
    }

    /// 按来源权重折算后的数量
    pub fn weighted_quantity(&self) -> f64 {
        self.quantity * self.source.weight()
    }
}
