// ==========================================
// 纺织原料采购计划系统 - 结果导出
// ==========================================
// 职责: 采购建议导出为扁平 CSV, 运行报告导出为 JSON
// 红线: 每条供应商分配一行; 未分配物料单独一行
// ==========================================

use crate::domain::recommendation::ProcurementRecommendation;
use crate::engine::orchestrator::PlanningReport;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// 导出错误类型
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("文件写入失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV 写入失败: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON 序列化失败: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ExportResult<T> = Result<T, ExportError>;

// ==========================================
// RecommendationRow - CSV 扁平行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationRow {
    pub material_id: String,
    pub supplier_id: String,
    pub allocated_qty: f64,
    pub recommended_order_qty: f64,
    pub unit: String,
    pub cost_per_unit: f64,
    pub total_cost: f64,
    pub lead_time_days: Option<u32>,
    pub reliability_score: Option<f64>,
    pub supplier_risk_flag: String,
    pub risk_flag: String,
    pub net_requirement: f64,
    pub buffered_requirement: f64,
    pub shortfall_qty: f64,
    pub reasoning: String,
}

impl RecommendationRow {
    /// 展开一条建议为若干行
    pub fn from_recommendation(rec: &ProcurementRecommendation) -> Vec<Self> {
        let base = |supplier_id: String| RecommendationRow {
            material_id: rec.material_id.clone(),
            supplier_id,
            allocated_qty: 0.0,
            recommended_order_qty: rec.recommended_order_qty,
            unit: rec.unit.clone(),
            cost_per_unit: 0.0,
            total_cost: 0.0,
            lead_time_days: None,
            reliability_score: None,
            supplier_risk_flag: rec.risk_flag.to_string(),
            risk_flag: rec.risk_flag.to_string(),
            net_requirement: rec.net_requirement,
            buffered_requirement: rec.buffered_requirement,
            shortfall_qty: rec.shortfall_qty,
            reasoning: rec.reasoning.clone(),
        };

        if rec.allocations.is_empty() {
            return vec![base(String::new())];
        }

        rec.allocations
            .iter()
            .map(|alloc| RecommendationRow {
                allocated_qty: alloc.quantity,
                cost_per_unit: alloc.cost_per_unit,
                total_cost: alloc.total_cost,
                lead_time_days: Some(alloc.lead_time_days),
                reliability_score: Some(alloc.reliability_score),
                supplier_risk_flag: alloc.risk_flag.to_string(),
                ..base(alloc.supplier_id.clone())
            })
            .collect()
    }
}

// ==========================================
// RecommendationExporter
// ==========================================
pub struct RecommendationExporter {
    // 无状态
}

impl RecommendationExporter {
    pub fn new() -> Self {
        Self {}
    }

    /// 写出 CSV 到任意 writer
    ///
    /// # 返回
    /// 写出的数据行数（不含表头）
    pub fn write_csv<W: Write>(
        &self,
        writer: W,
        recommendations: &[ProcurementRecommendation],
    ) -> ExportResult<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        let mut rows = 0;

        for rec in recommendations {
            for row in RecommendationRow::from_recommendation(rec) {
                csv_writer.serialize(row)?;
                rows += 1;
            }
        }

        csv_writer.flush()?;
        Ok(rows)
    }

    /// 导出 CSV 文件
    pub fn export_csv<P: AsRef<Path>>(
        &self,
        path: P,
        recommendations: &[ProcurementRecommendation],
    ) -> ExportResult<usize> {
        let path = path.as_ref();
        let rows = self.write_csv(BufWriter::new(File::create(path)?), recommendations)?;

        info!(path = %path.display(), rows, "采购建议 CSV 导出完成");
        Ok(rows)
    }

    /// 导出运行报告 JSON 文件（pretty 格式）
    pub fn export_report_json<P: AsRef<Path>>(
        &self,
        path: P,
        report: &PlanningReport,
    ) -> ExportResult<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, report)?;
        writer.flush()?;

        info!(path = %path.display(), run_id = %report.run_id, "运行报告 JSON 导出完成");
        Ok(())
    }
}

impl Default for RecommendationExporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::recommendation::SupplierAllocation;
    use crate::domain::types::RiskFlag;

    fn create_recommendation(allocations: Vec<SupplierAllocation>) -> ProcurementRecommendation {
        let qty = allocations.iter().map(|a| a.quantity).sum();
        ProcurementRecommendation {
            material_id: "YARN-COTTON-30S".to_string(),
            recommended_order_qty: qty,
            supplier_ids: allocations.iter().map(|a| a.supplier_id.clone()).collect(),
            allocations,
            unit: "lb".to_string(),
            expected_lead_time: None,
            risk_flag: RiskFlag::Medium,
            reasoning: "净需求 1000.00 lb".to_string(),
            total_cost: 0.0,
            cost_per_unit: 0.0,
            gross_requirement: 1000.0,
            net_requirement: 1000.0,
            safety_buffer_pct: 0.0,
            safety_buffer_qty: 0.0,
            buffered_requirement: 1000.0,
            moq_adjustment_qty: 0.0,
            shortfall_qty: 0.0,
            eoq: None,
        }
    }

    fn create_allocation(supplier_id: &str, quantity: f64, risk: RiskFlag) -> SupplierAllocation {
        SupplierAllocation {
            supplier_id: supplier_id.to_string(),
            quantity,
            cost_per_unit: 2.0,
            total_cost: quantity * 2.0,
            lead_time_days: 10,
            reliability_score: 0.8,
            score: 0.9,
            risk_flag: risk,
            share_pct: 50.0,
        }
    }

    #[test]
    fn test_one_row_per_allocation() {
        let rec = create_recommendation(vec![
            create_allocation("SUP-A", 600.0, RiskFlag::Low),
            create_allocation("SUP-B", 400.0, RiskFlag::Medium),
        ]);

        let rows = RecommendationRow::from_recommendation(&rec);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].supplier_id, "SUP-A");
        assert_eq!(rows[0].supplier_risk_flag, "low");
        assert_eq!(rows[1].risk_flag, "medium");
        assert_eq!(rows[1].total_cost, 800.0);
    }

    #[test]
    fn test_unallocated_material_single_row() {
        let rec = create_recommendation(Vec::new());

        let rows = RecommendationRow::from_recommendation(&rec);

        assert_eq!(rows.len(), 1);
        assert!(rows[0].supplier_id.is_empty());
        assert_eq!(rows[0].lead_time_days, None);
        assert_eq!(rows[0].allocated_qty, 0.0);
    }

    #[test]
    fn test_write_csv_header_and_rows() {
        let exporter = RecommendationExporter::new();
        let recs = vec![
            create_recommendation(vec![create_allocation("SUP-A", 1000.0, RiskFlag::Low)]),
            create_recommendation(Vec::new()),
        ];

        let mut buffer = Vec::new();
        let rows = exporter.write_csv(&mut buffer, &recs).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(rows, 2);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("material_id,supplier_id,allocated_qty"));
        assert!(lines[1].starts_with("YARN-COTTON-30S,SUP-A,1000"));
    }
}
