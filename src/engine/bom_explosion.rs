// ==========================================
// 纺织原料采购计划系统 - BOM 展开引擎
// ==========================================
// 依据: DESIGN.md - BOM 展开
// ==========================================
// 职责: 将成品 SKU 需求按配比展开为原料毛需求
// 输入: SKU 统一需求量 + BOM 表 + 物料库存单位
// 输出: 物料 -> 毛需求 (含 SKU 来源追溯)
// 红线: 配比之和不为 1 时照原值展开并告警,禁止自动归一化
// 红线: 纯计算,无 I/O
// ==========================================

use crate::domain::bom::{BomEntry, GrossRequirement, RequirementSource, BOM_PERCENTAGE_TOLERANCE};
use crate::domain::warning::{
    DataQualityWarning, DqLevel, FailureScope, PlanningFailure, WarningCode,
};
use crate::engine::unit_converter::UnitConverter;
use crate::error::{PlanningError, PlanningResult};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info, instrument, warn};

const STAGE: &str = "bom_explosion";

// ==========================================
// 单个 SKU 的展开结果
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct SkuExplosion {
    pub sku_id: String,
    pub lines: Vec<ExplodedLine>,
    pub warnings: Vec<DataQualityWarning>,
    pub failures: Vec<PlanningFailure>, // 单位换算等物料级失败
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExplodedLine {
    pub material_id: String,
    pub unit: String, // 物料库存单位
    pub source: RequirementSource,
}

// ==========================================
// 全部 SKU 的展开结果
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct BomExplosionResult {
    pub gross: BTreeMap<String, GrossRequirement>,
    pub warnings: Vec<DataQualityWarning>,
    pub failures: Vec<PlanningFailure>,
}

// ==========================================
// BomExplosionEngine - BOM 展开引擎
// ==========================================
pub struct BomExplosionEngine {
    converter: UnitConverter,
}

impl BomExplosionEngine {
    pub fn new() -> Self {
        Self {
            converter: UnitConverter::new(),
        }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 展开单个 SKU
    ///
    /// # 参数
    /// - sku_id: 成品 SKU
    /// - forecast_qty: 统一后的需求量（必须 >= 0）
    /// - bom: 完整 BOM 表
    /// - material_units: 物料 -> 库存单位（缺省时沿用 BOM 单位）
    ///
    /// # 返回
    /// - Ok(SkuExplosion): 展开行 + 告警 + 物料级失败
    /// - Err(InvalidInput): 需求量为负或非有限值
    /// - Err(MissingBom): 该 SKU 无 BOM
    pub fn explode_sku(
        &self,
        sku_id: &str,
        forecast_qty: f64,
        bom: &[BomEntry],
        material_units: &HashMap<String, String>,
    ) -> PlanningResult<SkuExplosion> {
        if !forecast_qty.is_finite() || forecast_qty < 0.0 {
            return Err(PlanningError::InvalidInput(format!(
                "SKU {} 需求量 {} 非法",
                sku_id, forecast_qty
            )));
        }

        let entries: Vec<&BomEntry> = bom.iter().filter(|e| e.sku_id == sku_id).collect();
        if entries.is_empty() {
            return Err(PlanningError::MissingBom {
                sku_id: sku_id.to_string(),
            });
        }

        let mut explosion = SkuExplosion {
            sku_id: sku_id.to_string(),
            ..SkuExplosion::default()
        };

        // 配比校验: 只告警,不修正
        let pct_sum: f64 = entries.iter().map(|e| e.percentage).sum();
        if (pct_sum - 1.0).abs() > BOM_PERCENTAGE_TOLERANCE {
            warn!(sku_id, pct_sum, "BOM 配比之和不为 1,按原值展开");
            explosion.warnings.push(DataQualityWarning::new(
                DqLevel::Warning,
                WarningCode::BomPercentageSum,
                sku_id,
                "percentage",
                format!("SKU {} 的 BOM 配比之和为 {:.4},未做归一化", sku_id, pct_sum),
            ));
        }

        for entry in entries {
            let target_unit = material_units
                .get(&entry.material_id)
                .map(String::as_str)
                .unwrap_or(entry.unit.as_str());

            if !entry.percentage.is_finite() || entry.percentage < 0.0 {
                explosion.failures.push(PlanningFailure::material(
                    &entry.material_id,
                    STAGE,
                    format!("SKU {} 的配比 {} 非法", sku_id, entry.percentage),
                ));
                continue;
            }

            let bom_qty = forecast_qty * entry.percentage;
            match self.converter.convert(bom_qty, &entry.unit, target_unit) {
                Ok(material_qty) => {
                    debug!(
                        sku_id,
                        material_id = %entry.material_id,
                        bom_qty,
                        material_qty,
                        unit = target_unit,
                        "BOM 行展开"
                    );
                    explosion.lines.push(ExplodedLine {
                        material_id: entry.material_id.clone(),
                        unit: target_unit.to_string(),
                        source: RequirementSource {
                            sku_id: sku_id.to_string(),
                            forecast_qty,
                            percentage: entry.percentage,
                            material_qty,
                        },
                    });
                }
                Err(e) => {
                    warn!(sku_id, material_id = %entry.material_id, error = %e, "BOM 行单位换算失败");
                    explosion.failures.push(PlanningFailure::material(
                        &entry.material_id,
                        STAGE,
                        e.to_string(),
                    ));
                }
            }
        }

        Ok(explosion)
    }

    /// 展开全部 SKU 并按物料合并毛需求
    ///
    /// # 参数
    /// - forecasts: SKU -> 统一需求量
    /// - bom: 完整 BOM 表
    /// - material_units: 物料 -> 库存单位
    ///
    /// # 返回
    /// 合并后的毛需求; MissingBom 等 SKU 级错误记录为失败,不中断其余 SKU;
    /// 出现物料级失败的物料不进入毛需求
    #[instrument(skip(self, forecasts, bom, material_units), fields(sku_count = forecasts.len()))]
    pub fn explode_all(
        &self,
        forecasts: &BTreeMap<String, f64>,
        bom: &[BomEntry],
        material_units: &HashMap<String, String>,
    ) -> BomExplosionResult {
        let mut result = BomExplosionResult::default();

        for (sku_id, qty) in forecasts {
            match self.explode_sku(sku_id, *qty, bom, material_units) {
                Ok(explosion) => {
                    for line in explosion.lines {
                        result
                            .gross
                            .entry(line.material_id.clone())
                            .or_insert_with(|| GrossRequirement::new(&line.material_id, &line.unit))
                            .add_source(line.source);
                    }
                    result.warnings.extend(explosion.warnings);
                    result.failures.extend(explosion.failures);
                }
                Err(e) => {
                    warn!(sku_id = %sku_id, error = %e, "SKU 展开失败");
                    result
                        .failures
                        .push(PlanningFailure::sku(sku_id, STAGE, e.to_string()));
                }
            }
        }

        // 部分 SKU 换算失败的物料毛需求不完整,整体剔除
        for failure in &result.failures {
            if failure.scope == FailureScope::Material {
                result.gross.remove(&failure.entity_id);
            }
        }

        info!(
            material_count = result.gross.len(),
            warning_count = result.warnings.len(),
            failure_count = result.failures.len(),
            "BOM 展开完成"
        );

        result
    }
}

impl Default for BomExplosionEngine {
    fn default() -> Self {
        Self::new()
    }
}
