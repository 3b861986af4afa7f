// ==========================================
// 纺织原料采购计划系统 - 配置层
// ==========================================
// 职责: 计划参数定义、加载、校验与快照
// 红线: 配置在计划运行开始时一次性校验,运行期间只读
// ==========================================

pub mod category_rules;
pub mod config_loader;
pub mod error;
pub mod planning_config;

// 重导出核心配置类型
pub use category_rules::CategoryRules;
pub use config_loader::ConfigLoader;
pub use error::{ConfigError, ConfigResult};
pub use planning_config::{PlanningConfig, RiskThresholds};
