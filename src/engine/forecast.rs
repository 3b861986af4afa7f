// ==========================================
// 纺织原料采购计划系统 - 预测统一引擎
// ==========================================
// 依据: DESIGN.md - 预测统一
// ==========================================
// 职责: 按来源权重把同一 SKU 的多条预测汇总为单一需求量
// 输入: 预测列表
// 输出: SKU -> 统一需求量 (BTreeMap,按 SKU 排序)
// 红线: 负数/非有限值预测跳过并告警,不参与汇总
// ==========================================

use crate::domain::forecast::Forecast;
use crate::domain::warning::{DataQualityWarning, DqLevel, WarningCode};
use std::collections::BTreeMap;
use tracing::{info, warn};

/// 预测统一结果
#[derive(Debug, Clone, Default)]
pub struct UnifiedForecast {
    pub quantities: BTreeMap<String, f64>, // SKU -> 加权需求量
    pub warnings: Vec<DataQualityWarning>,
}

pub struct ForecastUnifier {
    // 无状态引擎
}

impl ForecastUnifier {
    pub fn new() -> Self {
        Self {}
    }

    /// 汇总预测
    ///
    /// # 参数
    /// - forecasts: 预测列表（可含多来源、多期间）
    ///
    /// # 返回
    /// 统一后的 SKU 需求量与数据质量告警
    pub fn unify(&self, forecasts: &[Forecast]) -> UnifiedForecast {
        let mut result = UnifiedForecast::default();

        for forecast in forecasts {
            if !forecast.quantity.is_finite() || forecast.quantity < 0.0 {
                warn!(
                    sku_id = %forecast.sku_id,
                    quantity = forecast.quantity,
                    source = %forecast.source,
                    "预测数量非法,已跳过"
                );
                result.warnings.push(DataQualityWarning::new(
                    DqLevel::Warning,
                    WarningCode::NegativeForecast,
                    &forecast.sku_id,
                    "quantity",
                    format!(
                        "预测数量 {} 非法（来源 {}, 期间 {}）,已跳过",
                        forecast.quantity, forecast.source, forecast.period
                    ),
                ));
                continue;
            }

            *result
                .quantities
                .entry(forecast.sku_id.clone())
                .or_insert(0.0) += forecast.weighted_quantity();
        }

        info!(
            forecast_rows = forecasts.len(),
            sku_count = result.quantities.len(),
            skipped = result.warnings.len(),
            "预测统一完成"
        );

        result
    }
}

impl Default for ForecastUnifier {
    fn default() -> Self {
        Self::new()
    }
}
