// ==========================================
// 纺织原料采购计划系统 - 计划输入快照
// ==========================================
// 红线: 快照在整个计划运行期间只读,各阶段按引用传入
// ==========================================

use crate::domain::bom::BomEntry;
use crate::domain::forecast::Forecast;
use crate::domain::inventory::InventoryRecord;
use crate::domain::supplier::SupplierMaterial;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanningSnapshot {
    pub forecasts: Vec<Forecast>,
    pub bom_entries: Vec<BomEntry>,
    pub inventory: Vec<InventoryRecord>,
    pub supplier_materials: Vec<SupplierMaterial>,
}

impl PlanningSnapshot {
    pub fn new(
        forecasts: Vec<Forecast>,
        bom_entries: Vec<BomEntry>,
        inventory: Vec<InventoryRecord>,
        supplier_materials: Vec<SupplierMaterial>,
    ) -> Self {
        Self {
            forecasts,
            bom_entries,
            inventory,
            supplier_materials,
        }
    }

    /// 某物料的全部供货关系
    pub fn suppliers_for<'a>(
        &'a self,
        material_id: &'a str,
    ) -> impl Iterator<Item = &'a SupplierMaterial> + 'a {
        self.supplier_materials
            .iter()
            .filter(move |s| s.material_id == material_id)
    }

    /// 某物料的全部库存行
    pub fn inventory_for<'a>(
        &'a self,
        material_id: &'a str,
    ) -> impl Iterator<Item = &'a InventoryRecord> + 'a {
        self.inventory
            .iter()
            .filter(move |r| r.material_id == material_id)
    }
}
