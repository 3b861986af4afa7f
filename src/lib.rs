// ==========================================
// 纺织原料采购计划系统 - 核心库
// ==========================================
// 技术栈: Rust + CSV/Excel 输入
// 系统定位: 决策支持系统 (采购员最终下单)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 计划规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 导出层 - 建议输出
pub mod export;

// 配置层 - 计划参数
pub mod config;

// 错误类型
pub mod error;

// 日志系统
pub mod logging;

// 阶段耗时统计
pub mod perf;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{ForecastSource, InventoryStatus, MaterialCategory, RiskFlag, RunStatus};

// 领域实体
pub use domain::{
    BomEntry, DataQualityWarning, Forecast, GrossRequirement, InventoryRecord, NetRequirement,
    PlanningFailure, PlanningSnapshot, ProcurementRecommendation, SupplierAllocation,
    SupplierMaterial,
};

// 引擎
pub use engine::{
    BomExplosionEngine, EoqCalculator, ForecastUnifier, InventoryNettingEngine, PlanningReport,
    ProcurementPlanner, RecommendationBuilder, RiskClassifier, SupplierOptimizer, UnitConverter,
};

// 配置与错误
pub use config::{ConfigLoader, PlanningConfig};
pub use error::{PlanningError, PlanningResult};

// 导入导出
pub use export::RecommendationExporter;
pub use importer::SnapshotLoader;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "纺织原料采购计划系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
