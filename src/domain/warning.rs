// ==========================================
// 纺织原料采购计划系统 - 数据质量告警与失败记录
// ==========================================
// 依据: DESIGN.md - 计划编排与错误处理
// ==========================================
// 红线: 数据完整性问题以结构化告警附着在运行结果上,不抛异常
// 红线: 单个物料/SKU 的失败不得越过其边界影响整次运行
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// DqLevel - 告警级别
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DqLevel {
    Info,    // 提示（仅记录）
    Warning, // 警告（继续计算）
    Error,   // 错误（该条数据被忽略或被修正为安全值）
}

impl fmt::Display for DqLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DqLevel::Info => write!(f, "INFO"),
            DqLevel::Warning => write!(f, "WARNING"),
            DqLevel::Error => write!(f, "ERROR"),
        }
    }
}

// ==========================================
// WarningCode - 告警编码
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningCode {
    BomPercentageSum,      // BOM 配比之和不为 1
    NegativeForecast,      // 负数预测
    NegativeOnHand,        // 负数现货
    NegativeOpenPo,        // 负数在途
    OpenPoWithoutDate,     // 在途无预计到货日期
    OpenPoOutsideHorizon,  // 在途到货日期超出计划期
    InvalidSupplierCost,   // 单价非法
    ReliabilityOutOfRange, // 可靠性评分越界
    ContractBelowMoq,      // 合同上限低于起订量
}

// ==========================================
// DataQualityWarning - 数据质量告警
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataQualityWarning {
    pub level: DqLevel,
    pub code: WarningCode,
    pub entity_id: String, // SKU / 物料 / 供应商编号
    pub field: String,
    pub message: String,
}

impl DataQualityWarning {
    pub fn new(
        level: DqLevel,
        code: WarningCode,
        entity_id: &str,
        field: &str,
        message: String,
    ) -> Self {
        Self {
            level,
            code,
            entity_id: entity_id.to_string(),
            field: field.to_string(),
            message,
        }
    }
}

// ==========================================
// FailureScope / PlanningFailure - 局部失败记录
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureScope {
    Sku,
    Material,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningFailure {
    pub scope: FailureScope,
    pub entity_id: String,
    pub stage: String, // bom_explosion / netting / optimization
    pub message: String,
}

impl PlanningFailure {
    pub fn sku(sku_id: &str, stage: &str, message: String) -> Self {
        Self {
            scope: FailureScope::Sku,
            entity_id: sku_id.to_string(),
            stage: stage.to_string(),
            message,
        }
    }

    pub fn material(material_id: &str, stage: &str, message: String) -> Self {
        Self {
            scope: FailureScope::Material,
            entity_id: material_id.to_string(),
            stage: stage.to_string(),
            message,
        }
    }
}
