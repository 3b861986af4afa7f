// ==========================================
// 纺织原料采购计划系统 - 领域模型层
// ==========================================
// 职责: 定义预测/BOM/库存/供应商/建议等领域实体
// 红线: 不含文件读写逻辑,不含引擎逻辑
// ==========================================

pub mod bom;
pub mod forecast;
pub mod inventory;
pub mod recommendation;
pub mod snapshot;
pub mod supplier;
pub mod types;
pub mod warning;

// 重导出核心类型
pub use bom::{BomEntry, GrossRequirement, RequirementSource, BOM_PERCENTAGE_TOLERANCE};
pub use forecast::Forecast;
pub use inventory::{InventoryRecord, NetRequirement};
pub use recommendation::{CostBreakdown, EoqAdvice, ProcurementRecommendation, SupplierAllocation};
pub use snapshot::PlanningSnapshot;
pub use supplier::{SupplierMaterial, DEFAULT_HOLDING_COST_RATE, DEFAULT_ORDERING_COST};
pub use types::{ForecastSource, InventoryStatus, MaterialCategory, RiskFlag, RunStatus};
pub use warning::{DataQualityWarning, DqLevel, FailureScope, PlanningFailure, WarningCode};
