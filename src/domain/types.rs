// ==========================================
// 纺织原料采购计划系统 - 领域类型定义
// ==========================================
// 依据: DESIGN.md - 领域模型
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 风险等级 (Risk Flag)
// ==========================================
// 顺序: Low < Medium < High (多供应商拆分取最差)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFlag {
    Low,    // 低风险
    Medium, // 中风险
    High,   // 高风险
}

impl fmt::Display for RiskFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskFlag::Low => write!(f, "low"),
            RiskFlag::Medium => write!(f, "medium"),
            RiskFlag::High => write!(f, "high"),
        }
    }
}

impl RiskFlag {
    /// 从字符串解析风险等级
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(RiskFlag::Low),
            "medium" => Some(RiskFlag::Medium),
            "high" => Some(RiskFlag::High),
            _ => None,
        }
    }

    /// 两个风险等级取较差者
    pub fn worst(self, other: RiskFlag) -> RiskFlag {
        self.max(other)
    }
}

// ==========================================
// 预测来源 (Forecast Source)
// ==========================================
// 权重固定: sales_order=1.0, production_plan=0.9, projection=0.7
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastSource {
    SalesOrder,     // 销售订单
    ProductionPlan, // 生产计划
    Projection,     // 销售预估
}

impl fmt::Display for ForecastSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForecastSource::SalesOrder => write!(f, "sales_order"),
            ForecastSource::ProductionPlan => write!(f, "production_plan"),
            ForecastSource::Projection => write!(f, "projection"),
        }
    }
}

impl ForecastSource {
    /// 从字符串解析预测来源（兼容历史写法 prod_plan）
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "sales_order" | "order" => Some(ForecastSource::SalesOrder),
            "production_plan" | "prod_plan" => Some(ForecastSource::ProductionPlan),
            "projection" => Some(ForecastSource::Projection),
            _ => None,
        }
    }

    /// 来源权重
    pub fn weight(&self) -> f64 {
        match self {
            ForecastSource::SalesOrder => 1.0,
            ForecastSource::ProductionPlan => 0.9,
            ForecastSource::Projection => 0.7,
        }
    }
}

// ==========================================
// 库存状态 (Inventory Status)
// ==========================================
// 依据: 净需求计算结果分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InventoryStatus {
    Sufficient,       // 无需采购
    OnHandSufficient, // 现货即可满足
    WithPoSufficient, // 现货+在途满足
    Shortage,         // 缺料
}

impl fmt::Display for InventoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InventoryStatus::Sufficient => write!(f, "sufficient"),
            InventoryStatus::OnHandSufficient => write!(f, "on_hand_sufficient"),
            InventoryStatus::WithPoSufficient => write!(f, "with_po_sufficient"),
            InventoryStatus::Shortage => write!(f, "shortage"),
        }
    }
}

// ==========================================
// 物料类别 (Material Category)
// ==========================================
// 用于类别级安全库存比例
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialCategory {
    Yarn,        // 纱线
    Fabric,      // 面料
    Accessories, // 辅料
    Other,       // 其他
}

impl fmt::Display for MaterialCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaterialCategory::Yarn => write!(f, "yarn"),
            MaterialCategory::Fabric => write!(f, "fabric"),
            MaterialCategory::Accessories => write!(f, "accessories"),
            MaterialCategory::Other => write!(f, "other"),
        }
    }
}

impl MaterialCategory {
    /// 从字符串解析物料类别
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "yarn" => Some(MaterialCategory::Yarn),
            "fabric" => Some(MaterialCategory::Fabric),
            "accessories" | "accessory" => Some(MaterialCategory::Accessories),
            "other" => Some(MaterialCategory::Other),
            _ => None,
        }
    }
}

// ==========================================
// 计划运行状态 (Run Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Success,        // 全部物料成功
    PartialFailure, // 部分物料/SKU 失败,其余已输出
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::Success => write!(f, "success"),
            RunStatus::PartialFailure => write!(f, "partial_failure"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_flag_ordering() {
        assert!(RiskFlag::Low < RiskFlag::Medium);
        assert!(RiskFlag::Medium < RiskFlag::High);
        assert_eq!(RiskFlag::Low.worst(RiskFlag::High), RiskFlag::High);
        assert_eq!(RiskFlag::Medium.worst(RiskFlag::Low), RiskFlag::Medium);
    }

    #[test]
    fn test_forecast_source_parse_and_weight() {
        assert_eq!(
            ForecastSource::from_str("prod_plan"),
            Some(ForecastSource::ProductionPlan)
        );
        assert_eq!(
            ForecastSource::from_str(" Sales_Order "),
            Some(ForecastSource::SalesOrder)
        );
        assert_eq!(ForecastSource::from_str("rumor"), None);
        assert_eq!(ForecastSource::Projection.weight(), 0.7);
    }

    #[test]
    fn test_risk_flag_serde_lowercase() {
        let json = serde_json::to_string(&RiskFlag::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
        assert_eq!(RiskFlag::from_str("HIGH"), Some(RiskFlag::High));
    }
}
