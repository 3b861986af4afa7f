// ==========================================
// 纺织原料采购计划系统 - 引擎层
// ==========================================
// 依据: DESIGN.md - 计划编排与错误处理
// ==========================================
// 职责: 实现采购计划规则引擎,不做 IO
// 红线: 引擎只读快照, 所有调整必须输出 reason
// ==========================================

pub mod bom_explosion;
pub mod eoq;
pub mod forecast;
pub mod netting;
pub mod orchestrator;
pub mod recommendation;
pub mod risk;
pub mod summary;
pub mod supplier_optimizer;
pub mod unit_converter;

// 重导出核心引擎
pub use bom_explosion::{BomExplosionEngine, BomExplosionResult, ExplodedLine, SkuExplosion};
pub use eoq::{EoqCalculator, EoqOutcome};
pub use forecast::{ForecastUnifier, UnifiedForecast};
pub use netting::{InventoryNettingEngine, MaterialNetting, NettingResult};
pub use orchestrator::{PlanningReport, ProcurementPlanner};
pub use recommendation::{BuiltRecommendation, RecommendationBuilder};
pub use risk::RiskClassifier;
pub use summary::{PlanningSummary, RiskDistribution, SummaryBuilder};
pub use supplier_optimizer::{
    AllocationStrategy, ExcludedSupplier, MoqDrop, OptimizationResult, ScoredSupplier,
    SupplierOptimizer, SupplierRanking,
};
pub use unit_converter::{Dimension, Unit, UnitConverter};
