// ==========================================
// 纺织原料采购计划系统 - BOM 领域模型
// ==========================================
// 依据: DESIGN.md - BOM 展开
// 红线: 同一 SKU 的配比之和应为 1.0 (容差 0.001),不得自动归一化
// ==========================================

use serde::{Deserialize, Serialize};

/// BOM 配比之和允许的偏差
pub const BOM_PERCENTAGE_TOLERANCE: f64 = 0.001;

// ==========================================
// BomEntry - BOM 明细行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BomEntry {
    pub sku_id: String,      // 成品 SKU
    pub material_id: String, // 原料编号
    pub percentage: f64,     // 配比（小数,0.6 表示 60%）
    pub unit: String,        // BOM 原生单位
}

impl BomEntry {
    pub fn new(sku_id: &str, material_id: &str, percentage: f64, unit: &str) -> Self {
        Self {
            sku_id: sku_id.to_string(),
            material_id: material_id.to_string(),
            percentage,
            unit: unit.to_string(),
        }
    }
}

// ==========================================
// RequirementSource - 毛需求来源追溯
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementSource {
    pub sku_id: String,
    pub forecast_qty: f64,  // SKU 统一后的预测量
    pub percentage: f64,    // 使用的配比（原值,未归一化）
    pub material_qty: f64,  // 折算到物料单位后的需求量
}

// ==========================================
// GrossRequirement - 物料毛需求
// ==========================================
// 生命周期: 仅在单次计划运行内
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrossRequirement {
    pub material_id: String,
    pub gross_qty: f64,
    pub unit: String,
    pub sources: Vec<RequirementSource>,
}

impl GrossRequirement {
    pub fn new(material_id: &str, unit: &str) -> Self {
        Self {
            material_id: material_id.to_string(),
            gross_qty: 0.0,
            unit: unit.to_string(),
            sources: Vec::new(),
        }
    }

    /// 累加一个 SKU 的贡献
    pub fn add_source(&mut self, source: RequirementSource) {
        self.gross_qty += source.material_qty;
        self.sources.push(source);
    }
}
