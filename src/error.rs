// ==========================================
// 纺织原料采购计划系统 - 计划引擎错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 单个 SKU/物料 的错误由编排器收敛为失败记录,不越过其边界
// ==========================================

use crate::config::ConfigError;
use thiserror::Error;

/// 计划引擎错误类型
#[derive(Error, Debug)]
pub enum PlanningError {
    // ===== 主数据缺失 =====
    #[error("SKU 缺少 BOM 定义: {sku_id}")]
    MissingBom { sku_id: String },

    // ===== 单位换算 =====
    #[error("单位换算失败 ({from} -> {to}): {reason}")]
    UnitConversion {
        from: String,
        to: String,
        reason: String,
    },

    // ===== 输入校验 =====
    #[error("输入数据非法: {0}")]
    InvalidInput(String),

    // ===== 配置 =====
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PlanningError {
    pub fn unit_conversion(from: &str, to: &str, reason: impl Into<String>) -> Self {
        PlanningError::UnitConversion {
            from: from.to_string(),
            to: to.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result 类型别名
pub type PlanningResult<T> = Result<T, PlanningError>;
