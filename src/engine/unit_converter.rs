// ==========================================
// 纺织原料采购计划系统 - 单位换算
// ==========================================
// 依据: DESIGN.md - 单位换算
// ==========================================
// 职责: 纺织常用计量单位之间的静态换算
// 长度经米换算,重量经千克换算,计数单位只能换算到自身
// 红线: 重量<->长度必须显式给出线密度（kg/码）,不得猜测
// ==========================================

use crate::error::{PlanningError, PlanningResult};

/// 1 码 = 0.9144 米
const METERS_PER_YARD: f64 = 0.9144;

// ==========================================
// Dimension - 量纲
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Length,
    Weight,
    Count,
}

// ==========================================
// Unit - 受支持的计量单位
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Meter,
    Yard,
    Foot,
    Kilogram,
    Pound,
    Gram,
    Ounce,
    Ton,
    Each,
}

impl Unit {
    /// 解析单位写法（兼容单复数与常见缩写）
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "m" | "meter" | "meters" | "metre" | "metres" => Some(Unit::Meter),
            "yd" | "yds" | "yard" | "yards" => Some(Unit::Yard),
            "ft" | "foot" | "feet" => Some(Unit::Foot),
            "kg" | "kgs" | "kilogram" | "kilograms" => Some(Unit::Kilogram),
            "lb" | "lbs" | "pound" | "pounds" => Some(Unit::Pound),
            "g" | "gram" | "grams" => Some(Unit::Gram),
            "oz" | "ounce" | "ounces" => Some(Unit::Ounce),
            "ton" | "tons" | "t" => Some(Unit::Ton),
            "unit" | "units" | "each" | "ea" | "pcs" | "pc" => Some(Unit::Each),
            _ => None,
        }
    }

    pub fn dimension(&self) -> Dimension {
        match self {
            Unit::Meter | Unit::Yard | Unit::Foot => Dimension::Length,
            Unit::Kilogram | Unit::Pound | Unit::Gram | Unit::Ounce | Unit::Ton => {
                Dimension::Weight
            }
            Unit::Each => Dimension::Count,
        }
    }

    /// 折算到本量纲基准单位（米 / 千克 / 个）的系数
    fn base_factor(&self) -> f64 {
        match self {
            Unit::Meter => 1.0,
            Unit::Yard => METERS_PER_YARD,
            Unit::Foot => 0.3048,
            Unit::Kilogram => 1.0,
            Unit::Pound => 0.453592,
            Unit::Gram => 0.001,
            Unit::Ounce => 0.0283495,
            Unit::Ton => 1000.0,
            Unit::Each => 1.0,
        }
    }
}

// ==========================================
// UnitConverter - 单位换算器
// ==========================================
pub struct UnitConverter {
    // 无状态引擎,换算系数为静态常量
}

impl UnitConverter {
    pub fn new() -> Self {
        Self {}
    }

    /// 两个单位写法是否表示同一单位
    pub fn same_unit(&self, a: &str, b: &str) -> bool {
        if a.trim().eq_ignore_ascii_case(b.trim()) {
            return true;
        }
        matches!((Unit::parse(a), Unit::parse(b)), (Some(x), Some(y)) if x == y)
    }

    /// 同量纲换算
    ///
    /// # 参数
    /// - quantity: 数量
    /// - from: 源单位
    /// - to: 目标单位
    ///
    /// # 返回
    /// - Ok(f64): 换算后的数量
    /// - Err(UnitConversion): 未知单位或跨量纲
    pub fn convert(&self, quantity: f64, from: &str, to: &str) -> PlanningResult<f64> {
        self.convert_with_density(quantity, from, to, None)
    }

    /// 换算,允许借助线密度在重量与长度之间换算
    ///
    /// # 参数
    /// - kg_per_yard: 线密度（每码千克数）,仅重量<->长度时使用
    pub fn convert_with_density(
        &self,
        quantity: f64,
        from: &str,
        to: &str,
        kg_per_yard: Option<f64>,
    ) -> PlanningResult<f64> {
        // 同一写法（包括本表未收录的自定义单位）直接返回
        if from.trim().eq_ignore_ascii_case(to.trim()) {
            return Ok(quantity);
        }

        let from_unit = Unit::parse(from)
            .ok_or_else(|| PlanningError::unit_conversion(from, to, "未知的源单位"))?;
        let to_unit = Unit::parse(to)
            .ok_or_else(|| PlanningError::unit_conversion(from, to, "未知的目标单位"))?;

        if from_unit == to_unit {
            return Ok(quantity);
        }

        let base = quantity * from_unit.base_factor();

        match (from_unit.dimension(), to_unit.dimension()) {
            (a, b) if a == b => Ok(base / to_unit.base_factor()),
            (Dimension::Weight, Dimension::Length) => {
                let density = Self::require_density(from, to, kg_per_yard)?;
                // base: 千克 -> 码 -> 米
                let meters = base / density * METERS_PER_YARD;
                Ok(meters / to_unit.base_factor())
            }
            (Dimension::Length, Dimension::Weight) => {
                let density = Self::require_density(from, to, kg_per_yard)?;
                // base: 米 -> 码 -> 千克
                let kg = base / METERS_PER_YARD * density;
                Ok(kg / to_unit.base_factor())
            }
            _ => Err(PlanningError::unit_conversion(
                from,
                to,
                "计数单位不能与长度/重量互换",
            )),
        }
    }

    fn require_density(from: &str, to: &str, kg_per_yard: Option<f64>) -> PlanningResult<f64> {
        match kg_per_yard {
            Some(d) if d.is_finite() && d > 0.0 => Ok(d),
            Some(_) => Err(PlanningError::unit_conversion(from, to, "线密度必须为正数")),
            None => Err(PlanningError::unit_conversion(
                from,
                to,
                "重量与长度互换需要提供线密度",
            )),
        }
    }
}

impl Default for UnitConverter {
    fn default() -> Self {
        Self::new()
    }
}
