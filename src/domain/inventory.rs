// ==========================================
// 纺织原料采购计划系统 - 库存领域模型
// ==========================================
// 依据: DESIGN.md - 库存净算
// ==========================================

use crate::domain::types::InventoryStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// InventoryRecord - 库存快照行
// ==========================================
// 红线: on_hand_qty 不得为负（负数属于调用方数据错误）
// 红线: open_po_qty 仅当 po_expected_date 落在计划期内才计入
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub material_id: String,
    pub on_hand_qty: f64,                    // 现货数量
    pub unit: String,                        // 库存单位
    #[serde(default)]
    pub open_po_qty: f64,                    // 在途采购数量
    #[serde(default)]
    pub po_expected_date: Option<NaiveDate>, // 在途预计到货日期
}

impl InventoryRecord {
    pub fn new(material_id: &str, on_hand_qty: f64, unit: &str) -> Self {
        Self {
            material_id: material_id.to_string(),
            on_hand_qty,
            unit: unit.to_string(),
            open_po_qty: 0.0,
            po_expected_date: None,
        }
    }

    pub fn with_open_po(mut self, qty: f64, expected_date: NaiveDate) -> Self {
        self.open_po_qty = qty;
        self.po_expected_date = Some(expected_date);
        self
    }
}

// ==========================================
// NetRequirement - 物料净需求
// ==========================================
// 生命周期: 派生对象,不单独持久化,计算后立即交给优化器
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetRequirement {
    pub material_id: String,
    pub gross_qty: f64,           // 毛需求
    pub on_hand_qty: f64,         // 计入的现货
    pub qualifying_po_qty: f64,   // 计划期内在途
    pub excluded_po_qty: f64,     // 计划期外/无日期在途（未计入）
    pub available_qty: f64,       // 可用量 = 现货 + 计划期内在途
    pub net_qty: f64,             // 净需求 = max(0, 毛需求 - 可用量)
    pub unit: String,
    pub status: InventoryStatus,
}

impl NetRequirement {
    /// 是否需要进入采购优化
    pub fn needs_procurement(&self) -> bool {
        self.net_qty > 0.0
    }
}
