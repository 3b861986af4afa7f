// ==========================================
// 纺织原料采购计划系统 - 物料类别规则
// ==========================================
// 职责: 按物料编号关键字识别类别,给出类别推荐安全库存比例
// 识别顺序: YARN -> FABRIC -> BUTTON/ZIPPER/THREAD -> 其他
// ==========================================

use crate::config::planning_config::PlanningConfig;
use crate::domain::types::MaterialCategory;
use std::collections::BTreeMap;

const ACCESSORY_KEYWORDS: [&str; 3] = ["BUTTON", "ZIPPER", "THREAD"];

pub struct CategoryRules {
    // 无状态
}

impl CategoryRules {
    pub fn new() -> Self {
        Self {}
    }

    /// 由物料编号识别类别（大小写不敏感）
    pub fn detect(&self, material_id: &str) -> MaterialCategory {
        let upper = material_id.to_uppercase();

        if upper.contains("YARN") {
            MaterialCategory::Yarn
        } else if upper.contains("FABRIC") {
            MaterialCategory::Fabric
        } else if ACCESSORY_KEYWORDS.iter().any(|k| upper.contains(k)) {
            MaterialCategory::Accessories
        } else {
            MaterialCategory::Other
        }
    }

    /// 类别推荐安全库存比例
    pub fn recommended_buffer(&self, category: MaterialCategory) -> f64 {
        match category {
            MaterialCategory::Yarn => 0.15,
            MaterialCategory::Fabric => 0.10,
            MaterialCategory::Accessories => 0.05,
            MaterialCategory::Other => 0.10,
        }
    }

    /// 推荐的类别比例表,可直接填入 PlanningConfig.category_safety_buffers
    pub fn recommended_buffers(&self) -> BTreeMap<String, f64> {
        [
            MaterialCategory::Yarn,
            MaterialCategory::Fabric,
            MaterialCategory::Accessories,
        ]
        .into_iter()
        .map(|c| (c.to_string(), self.recommended_buffer(c)))
        .collect()
    }

    /// 解析某物料实际使用的安全库存比例
    ///
    /// # 返回
    /// (物料类别, 安全库存比例)
    pub fn resolve_buffer(
        &self,
        config: &PlanningConfig,
        material_id: &str,
    ) -> (MaterialCategory, f64) {
        let category = self.detect(material_id);
        (category, config.safety_buffer_for(category))
    }
}

impl Default for CategoryRules {
    fn default() -> Self {
        Self::new()
    }
}
