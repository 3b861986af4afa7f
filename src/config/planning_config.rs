// ==========================================
// 纺织原料采购计划系统 - 计划参数配置
// ==========================================
// 依据: DESIGN.md - 计划参数
// ==========================================
// 红线: 所有字段带默认值,缺省字段按默认值补齐
// 红线: cost_weight + reliability_weight 必须为 1.0
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::domain::types::MaterialCategory;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 权重之和允许的偏差
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

// ==========================================
// RiskThresholds - 风险分级阈值
// ==========================================
// reliability >= low_min_reliability    -> low
// reliability >= medium_min_reliability -> medium
// 其余                                  -> high
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    pub low_min_reliability: f64,
    pub medium_min_reliability: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            low_min_reliability: 0.85,
            medium_min_reliability: 0.70,
        }
    }
}

// ==========================================
// PlanningConfig - 计划参数
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanningConfig {
    /// 统一安全库存比例（未配置类别比例时使用）
    pub safety_buffer_pct: f64,

    /// 可接受的最长交期（天）,超过则供应商不合格
    pub max_lead_time_days: u32,

    /// 计划期（天）,在途到货日期须落在 today + horizon 之内
    pub planning_horizon_days: u32,

    /// 成本权重
    pub cost_weight: f64,

    /// 可靠性权重
    pub reliability_weight: f64,

    pub enable_eoq_optimization: bool,
    pub enable_multi_supplier: bool,

    /// 单物料最多拆分的供应商数
    pub max_suppliers_per_material: usize,

    /// 计划期净需求折算年需求的倍数（EOQ 的 D）
    pub annual_demand_multiplier: f64,

    pub risk_thresholds: RiskThresholds,

    /// 类别级安全库存比例（键: yarn / fabric / accessories / other）
    /// 为空时全部物料使用 safety_buffer_pct
    pub category_safety_buffers: BTreeMap<String, f64>,
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            safety_buffer_pct: 0.10,
            max_lead_time_days: 30,
            planning_horizon_days: 90,
            cost_weight: 0.6,
            reliability_weight: 0.4,
            enable_eoq_optimization: true,
            enable_multi_supplier: true,
            max_suppliers_per_material: 3,
            annual_demand_multiplier: 4.0,
            risk_thresholds: RiskThresholds::default(),
            category_safety_buffers: BTreeMap::new(),
        }
    }
}

impl PlanningConfig {
    // ==========================================
    // 校验
    // ==========================================

    /// 校验配置,一次性返回全部违规项
    ///
    /// # 返回
    /// - Ok(()): 配置合法
    /// - Err(ConfigError::Invalid): 全部违规描述
    pub fn validate(&self) -> ConfigResult<()> {
        let mut issues = Vec::new();

        if !(0.0..=1.0).contains(&self.safety_buffer_pct) {
            issues.push(format!(
                "safety_buffer_pct 必须在 [0, 1] 之间,实际 {}",
                self.safety_buffer_pct
            ));
        }

        if self.max_lead_time_days == 0 {
            issues.push("max_lead_time_days 必须为正数".to_string());
        }

        if self.planning_horizon_days == 0 {
            issues.push("planning_horizon_days 必须为正数".to_string());
        }

        for (name, w) in [
            ("cost_weight", self.cost_weight),
            ("reliability_weight", self.reliability_weight),
        ] {
            if !(0.0..=1.0).contains(&w) {
                issues.push(format!("{} 必须在 [0, 1] 之间,实际 {}", name, w));
            }
        }

        let weight_sum = self.cost_weight + self.reliability_weight;
        if (weight_sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            issues.push(format!(
                "cost_weight + reliability_weight 必须等于 1.0,实际 {:.6}",
                weight_sum
            ));
        }

        if self.max_suppliers_per_material == 0 {
            issues.push("max_suppliers_per_material 至少为 1".to_string());
        }

        if !self.annual_demand_multiplier.is_finite() || self.annual_demand_multiplier <= 0.0 {
            issues.push(format!(
                "annual_demand_multiplier 必须为正数,实际 {}",
                self.annual_demand_multiplier
            ));
        }

        let t = &self.risk_thresholds;
        if !(0.0..=1.0).contains(&t.low_min_reliability)
            || !(0.0..=1.0).contains(&t.medium_min_reliability)
        {
            issues.push("risk_thresholds 必须在 [0, 1] 之间".to_string());
        } else if t.medium_min_reliability > t.low_min_reliability {
            issues.push(format!(
                "risk_thresholds.medium_min_reliability ({}) 不得高于 low_min_reliability ({})",
                t.medium_min_reliability, t.low_min_reliability
            ));
        }

        for (key, pct) in &self.category_safety_buffers {
            if MaterialCategory::from_str(key).is_none() {
                issues.push(format!("category_safety_buffers 含未知类别: {}", key));
            }
            if !(0.0..=1.0).contains(pct) {
                issues.push(format!(
                    "category_safety_buffers[{}] 必须在 [0, 1] 之间,实际 {}",
                    key, pct
                ));
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(issues))
        }
    }

    /// 某类别的安全库存比例（未配置则回退到统一比例）
    pub fn safety_buffer_for(&self, category: MaterialCategory) -> f64 {
        self.category_safety_buffers
            .iter()
            .find(|(key, _)| MaterialCategory::from_str(key) == Some(category))
            .map(|(_, pct)| *pct)
            .unwrap_or(self.safety_buffer_pct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PlanningConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_suppliers_per_material, 3);
        assert_eq!(config.risk_thresholds.low_min_reliability, 0.85);
    }

    #[test]
    fn test_validate_reports_all_issues() {
        let config = PlanningConfig {
            safety_buffer_pct: 1.5,
            cost_weight: 0.7,
            reliability_weight: 0.4,
            max_suppliers_per_material: 0,
            ..PlanningConfig::default()
        };

        match config.validate() {
            Err(ConfigError::Invalid(issues)) => {
                assert_eq!(issues.len(), 3);
                assert!(issues.iter().any(|i| i.contains("safety_buffer_pct")));
                assert!(issues.iter().any(|i| i.contains("reliability_weight")));
                assert!(issues.iter().any(|i| i.contains("max_suppliers_per_material")));
            }
            other => panic!("期望校验失败, 实际: {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_unknown_category() {
        let mut config = PlanningConfig::default();
        config.category_safety_buffers.insert("leather".to_string(), 0.2);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_safety_buffer_for_category_fallback() {
        let mut config = PlanningConfig::default();
        config.category_safety_buffers.insert("yarn".to_string(), 0.15);

        assert_eq!(config.safety_buffer_for(MaterialCategory::Yarn), 0.15);
        assert_eq!(config.safety_buffer_for(MaterialCategory::Fabric), 0.10);
    }
}
