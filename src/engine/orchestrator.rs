// ==========================================
// 纺织原料采购计划系统 - 计划编排器
// ==========================================
// 依据: DESIGN.md - 计划编排与错误处理
// 用途: 协调预测统一 -> BOM 展开 -> 库存净算 -> EOQ/供应商优化 -> 建议生成
// ==========================================
// 红线: 单线程、同步、基于只读快照; 输出按 material_id 排序
// 红线: 单个 SKU/物料 失败只记录,不中断整次运行
// ==========================================

use crate::config::config_loader::ConfigLoader;
use crate::config::planning_config::PlanningConfig;
use crate::domain::inventory::NetRequirement;
use crate::domain::recommendation::ProcurementRecommendation;
use crate::domain::snapshot::PlanningSnapshot;
use crate::domain::types::RunStatus;
use crate::domain::warning::{DataQualityWarning, PlanningFailure};
use crate::engine::bom_explosion::BomExplosionEngine;
use crate::engine::forecast::ForecastUnifier;
use crate::engine::netting::InventoryNettingEngine;
use crate::engine::recommendation::RecommendationBuilder;
use crate::engine::summary::{PlanningSummary, SummaryBuilder};
use crate::error::PlanningResult;
use crate::perf::PerfGuard;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info, warn};
use uuid::Uuid;

// ==========================================
// PlanningReport - 计划运行报告
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanningReport {
    pub run_id: String,
    pub plan_date: NaiveDate,
    pub status: RunStatus,

    // 建议输出（按 material_id 排序）
    pub recommendations: Vec<ProcurementRecommendation>,

    // 净算追溯
    pub net_requirements: Vec<NetRequirement>,
    pub sufficient_materials: Vec<String>,

    // 告警与失败
    pub warnings: Vec<DataQualityWarning>,
    pub failures: Vec<PlanningFailure>,

    pub summary: PlanningSummary,
    pub config_snapshot: String,
}

impl PlanningReport {
    pub fn recommendation_for(&self, material_id: &str) -> Option<&ProcurementRecommendation> {
        self.recommendations
            .iter()
            .find(|r| r.material_id == material_id)
    }
}

// ==========================================
// ProcurementPlanner - 计划编排器
// ==========================================
pub struct ProcurementPlanner {
    config: PlanningConfig,
    config_snapshot: String,
    unifier: ForecastUnifier,
    explosion: BomExplosionEngine,
    netting: InventoryNettingEngine,
    builder: RecommendationBuilder,
    summary: SummaryBuilder,
}

impl ProcurementPlanner {
    /// 创建新的编排器实例
    ///
    /// # 参数
    /// - config: 计划参数（在此一次性校验）
    ///
    /// # 返回
    /// - Err(Config): 配置非法
    pub fn new(config: PlanningConfig) -> PlanningResult<Self> {
        config.validate()?;
        let config_snapshot = ConfigLoader::snapshot(&config)?;

        Ok(Self {
            unifier: ForecastUnifier::new(),
            explosion: BomExplosionEngine::new(),
            netting: InventoryNettingEngine::new(),
            builder: RecommendationBuilder::new(&config),
            summary: SummaryBuilder::new(),
            config_snapshot,
            config,
        })
    }

    pub fn config(&self) -> &PlanningConfig {
        &self.config
    }

    /// 执行完整计划流程
    ///
    /// # 参数
    /// - snapshot: 输入快照（只读）
    /// - today: 计划日期（计划期起点）
    ///
    /// # 返回
    /// 计划运行报告（success / partial_failure）
    pub fn plan(&self, snapshot: &PlanningSnapshot, today: NaiveDate) -> PlanningResult<PlanningReport> {
        let _perf = PerfGuard::new("plan");
        let run_id = Uuid::new_v4().to_string();

        info!(
            run_id = %run_id,
            plan_date = %today,
            forecasts = snapshot.forecasts.len(),
            bom_entries = snapshot.bom_entries.len(),
            inventory = snapshot.inventory.len(),
            supplier_materials = snapshot.supplier_materials.len(),
            "开始执行采购计划"
        );

        let mut warnings = Vec::new();
        let mut failures = Vec::new();

        // ==========================================
        // 步骤1: 预测统一
        // ==========================================
        debug!("步骤1: 执行预测统一");
        let unified = {
            let _perf = PerfGuard::new("forecast_unification");
            self.unifier.unify(&snapshot.forecasts)
        };
        warnings.extend(unified.warnings);

        // ==========================================
        // 步骤2: BOM 展开
        // ==========================================
        debug!("步骤2: 执行 BOM 展开");
        let material_units = Self::material_units(snapshot);
        let explosion = {
            let _perf = PerfGuard::new("bom_explosion");
            self.explosion
                .explode_all(&unified.quantities, &snapshot.bom_entries, &material_units)
        };
        warnings.extend(explosion.warnings);
        failures.extend(explosion.failures);

        // ==========================================
        // 步骤3: 库存净算
        // ==========================================
        debug!("步骤3: 执行库存净算");
        let mut netting = {
            let _perf = PerfGuard::new("netting");
            self.netting.net_all(
                &explosion.gross,
                &snapshot.inventory,
                today,
                self.config.planning_horizon_days,
            )
        };
        let sufficient_materials = netting.sufficient_materials();
        warnings.append(&mut netting.warnings);
        failures.append(&mut netting.failures);

        // ==========================================
        // 步骤4: EOQ + 供应商优化 + 建议生成
        // ==========================================
        debug!("步骤4: 执行供应商优化与建议生成");
        let mut recommendations = Vec::new();
        {
            let _perf = PerfGuard::new("optimization");
            for net in netting.shortages() {
                match self
                    .builder
                    .build(net, snapshot.suppliers_for(&net.material_id))
                {
                    Ok(built) => {
                        warnings.extend(built.warnings);
                        recommendations.push(built.recommendation);
                    }
                    Err(e) => {
                        warn!(material_id = %net.material_id, error = %e, "采购建议生成失败");
                        failures.push(PlanningFailure::material(
                            &net.material_id,
                            "optimization",
                            e.to_string(),
                        ));
                    }
                }
            }
        }

        info!(
            recommendations = recommendations.len(),
            sufficient = sufficient_materials.len(),
            "供应商优化完成"
        );

        // ==========================================
        // 返回结果
        // ==========================================
        let status = if failures.is_empty() {
            RunStatus::Success
        } else {
            RunStatus::PartialFailure
        };

        let summary = self.summary.build(
            &recommendations,
            today,
            sufficient_materials.len(),
            failures.len(),
            warnings.len(),
        );

        info!(
            run_id = %run_id,
            status = %status,
            recommendations = summary.recommendation_count,
            failures = summary.failure_count,
            warnings = summary.warning_count,
            total_cost = summary.total_cost,
            "采购计划完成"
        );

        Ok(PlanningReport {
            run_id,
            plan_date: today,
            status,
            recommendations,
            net_requirements: netting.requirements.into_values().collect(),
            sufficient_materials,
            warnings,
            failures,
            summary,
            config_snapshot: self.config_snapshot.clone(),
        })
    }

    /// 物料库存单位（取该物料第一条库存记录的单位）
    fn material_units(snapshot: &PlanningSnapshot) -> HashMap<String, String> {
        let mut units = HashMap::new();
        for record in &snapshot.inventory {
            units
                .entry(record.material_id.clone())
                .or_insert_with(|| record.unit.clone());
        }
        units
    }
}
