// ==========================================
// 纺织原料采购计划系统 - 库存净算引擎
// ==========================================
// 依据: DESIGN.md - 库存净算
// ==========================================
// 职责: 毛需求扣减现货与计划期内在途,得到净需求
// 公式: available = on_hand + Σ(open_po | po_expected_date <= today + horizon)
//       net = max(0, gross - available)
// 红线: 无库存记录 => available = 0,不是错误
// 红线: 负数库存按 0 处理并告警
// ==========================================

use crate::domain::bom::GrossRequirement;
use crate::domain::inventory::{InventoryRecord, NetRequirement};
use crate::domain::types::InventoryStatus;
use crate::domain::warning::{DataQualityWarning, DqLevel, PlanningFailure, WarningCode};
use crate::engine::unit_converter::UnitConverter;
use crate::error::PlanningResult;
use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument, warn};

const STAGE: &str = "netting";

/// 单物料净算结果
#[derive(Debug, Clone)]
pub struct MaterialNetting {
    pub requirement: NetRequirement,
    pub warnings: Vec<DataQualityWarning>,
}

/// 全部物料净算结果
#[derive(Debug, Clone, Default)]
pub struct NettingResult {
    pub requirements: BTreeMap<String, NetRequirement>,
    pub warnings: Vec<DataQualityWarning>,
    pub failures: Vec<PlanningFailure>,
}

impl NettingResult {
    /// 需要进入采购优化的物料
    pub fn shortages(&self) -> impl Iterator<Item = &NetRequirement> {
        self.requirements.values().filter(|r| r.needs_procurement())
    }

    /// 库存已满足的物料编号
    pub fn sufficient_materials(&self) -> Vec<String> {
        self.requirements
            .values()
            .filter(|r| !r.needs_procurement())
            .map(|r| r.material_id.clone())
            .collect()
    }
}

// ==========================================
// InventoryNettingEngine - 库存净算引擎
// ==========================================
pub struct InventoryNettingEngine {
    converter: UnitConverter,
}

impl InventoryNettingEngine {
    pub fn new() -> Self {
        Self {
            converter: UnitConverter::new(),
        }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 单物料净算
    ///
    /// # 参数
    /// - gross: 物料毛需求
    /// - records: 该物料的库存行（可多行,可不同单位）
    /// - today: 计划日期
    /// - horizon_days: 计划期天数
    ///
    /// # 返回
    /// - Ok(MaterialNetting): 净需求 + 数据质量告警
    /// - Err(UnitConversion): 库存行单位无法换算到需求单位
    pub fn net_material(
        &self,
        gross: &GrossRequirement,
        records: &[&InventoryRecord],
        today: NaiveDate,
        horizon_days: u32,
    ) -> PlanningResult<MaterialNetting> {
        let cutoff = today + Duration::days(i64::from(horizon_days));
        let mut warnings = Vec::new();

        let mut on_hand = 0.0;
        let mut qualifying_po = 0.0;
        let mut excluded_po = 0.0;

        for record in records {
            let material_id = &record.material_id;

            let raw_on_hand = if record.on_hand_qty < 0.0 || !record.on_hand_qty.is_finite() {
                warnings.push(DataQualityWarning::new(
                    DqLevel::Error,
                    WarningCode::NegativeOnHand,
                    material_id,
                    "on_hand_qty",
                    format!("现货数量 {} 非法,按 0 处理", record.on_hand_qty),
                ));
                0.0
            } else {
                record.on_hand_qty
            };

            let raw_po = if record.open_po_qty < 0.0 || !record.open_po_qty.is_finite() {
                warnings.push(DataQualityWarning::new(
                    DqLevel::Error,
                    WarningCode::NegativeOpenPo,
                    material_id,
                    "open_po_qty",
                    format!("在途数量 {} 非法,按 0 处理", record.open_po_qty),
                ));
                0.0
            } else {
                record.open_po_qty
            };

            on_hand += self.converter.convert(raw_on_hand, &record.unit, &gross.unit)?;

            if raw_po <= 0.0 {
                continue;
            }
            let po_qty = self.converter.convert(raw_po, &record.unit, &gross.unit)?;

            match record.po_expected_date {
                Some(date) if date <= cutoff => qualifying_po += po_qty,
                Some(date) => {
                    excluded_po += po_qty;
                    warnings.push(DataQualityWarning::new(
                        DqLevel::Info,
                        WarningCode::OpenPoOutsideHorizon,
                        material_id,
                        "po_expected_date",
                        format!("在途 {:.2} 预计 {} 到货,晚于计划期截止 {},未计入", po_qty, date, cutoff),
                    ));
                }
                None => {
                    excluded_po += po_qty;
                    warnings.push(DataQualityWarning::new(
                        DqLevel::Info,
                        WarningCode::OpenPoWithoutDate,
                        material_id,
                        "po_expected_date",
                        format!("在途 {:.2} 无预计到货日期,未计入", po_qty),
                    ));
                }
            }
        }

        let gross_qty = gross.gross_qty.max(0.0);
        let available = on_hand + qualifying_po;
        let net_qty = (gross_qty - available).max(0.0);

        let status = if net_qty > 0.0 {
            InventoryStatus::Shortage
        } else if gross_qty <= 0.0 {
            InventoryStatus::Sufficient
        } else if on_hand >= gross_qty {
            InventoryStatus::OnHandSufficient
        } else {
            InventoryStatus::WithPoSufficient
        };

        debug!(
            material_id = %gross.material_id,
            gross_qty,
            on_hand,
            qualifying_po,
            excluded_po,
            net_qty,
            status = %status,
            "物料净算"
        );

        Ok(MaterialNetting {
            requirement: NetRequirement {
                material_id: gross.material_id.clone(),
                gross_qty,
                on_hand_qty: on_hand,
                qualifying_po_qty: qualifying_po,
                excluded_po_qty: excluded_po,
                available_qty: available,
                net_qty,
                unit: gross.unit.clone(),
                status,
            },
            warnings,
        })
    }

    /// 全部物料净算
    ///
    /// # 返回
    /// 按物料编号排序的净需求; 单物料失败记录后继续
    #[instrument(skip(self, gross, inventory), fields(material_count = gross.len()))]
    pub fn net_all(
        &self,
        gross: &BTreeMap<String, GrossRequirement>,
        inventory: &[InventoryRecord],
        today: NaiveDate,
        horizon_days: u32,
    ) -> NettingResult {
        let mut result = NettingResult::default();

        for (material_id, requirement) in gross {
            let records: Vec<&InventoryRecord> = inventory
                .iter()
                .filter(|r| &r.material_id == material_id)
                .collect();

            match self.net_material(requirement, &records, today, horizon_days) {
                Ok(netting) => {
                    result.warnings.extend(netting.warnings);
                    result
                        .requirements
                        .insert(material_id.clone(), netting.requirement);
                }
                Err(e) => {
                    warn!(material_id = %material_id, error = %e, "物料净算失败");
                    result
                        .failures
                        .push(PlanningFailure::material(material_id, STAGE, e.to_string()));
                }
            }
        }

        info!(
            material_count = result.requirements.len(),
            shortage_count = result.shortages().count(),
            failure_count = result.failures.len(),
            "库存净算完成"
        );

        result
    }
}

impl Default for InventoryNettingEngine {
    fn default() -> Self {
        Self::new()
    }
}
