// ==========================================
// 纺织原料采购计划系统 - 多供应商优化器
// ==========================================
// 依据: DESIGN.md - 多供应商优化
// 红线: 无合格供应商 => 高风险 + 空分配 + 说明,不报错
// 红线: 拆单时每家分配量 >= 该供应商起订量
// 红线: 评分相同 -> 交期短者优先 -> supplier_id 字典序
// ==========================================
// 职责: 供应商合格性判定、评分排序、数量分配
// 输入: 下单目标数量 + 该物料全部供货关系
// 输出: 供应商分配 + 风险等级 + 调整明细
// ==========================================

mod allocation;
mod core;
mod scoring;

#[cfg(test)]
mod tests;

pub use self::core::{AllocationStrategy, MoqDrop, OptimizationResult, SupplierOptimizer, SupplierRanking};
pub use scoring::{ExcludedSupplier, ScoredSupplier};
