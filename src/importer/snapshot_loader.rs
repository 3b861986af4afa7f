// ==========================================
// 纺织原料采购计划系统 - 输入快照加载器
// ==========================================
// 职责: 从数据目录读取四张输入表并转换为领域对象
//   forecasts.{csv|xlsx}  : sku_id, quantity, period, source
//   bom.{csv|xlsx}        : sku_id, material_id, percentage, unit
//   inventory.{csv|xlsx}  : material_id, on_hand_qty, unit, [open_po_qty], [po_expected_date]
//   suppliers.{csv|xlsx}  : material_id, supplier_id, cost_per_unit, lead_time_days,
//                           [moq], [contract_qty_limit], [reliability_score],
//                           [ordering_cost], [holding_cost_rate]
// 红线: 类型错误按行号报错,不静默丢弃
// ==========================================

use crate::domain::bom::BomEntry;
use crate::domain::forecast::Forecast;
use crate::domain::inventory::InventoryRecord;
use crate::domain::snapshot::PlanningSnapshot;
use crate::domain::supplier::{SupplierMaterial, DEFAULT_HOLDING_COST_RATE, DEFAULT_ORDERING_COST};
use crate::domain::types::ForecastSource;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{RawRecord, UniversalFileParser};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::info;

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y%m%d", "%Y/%m/%d"];

// ==========================================
// 行读取辅助
// ==========================================
struct Row<'a> {
    index: usize, // 1 起,不含表头
    record: &'a RawRecord,
}

impl<'a> Row<'a> {
    fn optional(&self, field: &str) -> Option<&'a str> {
        self.record
            .get(field)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    fn key(&self, field: &str) -> ImportResult<String> {
        self.optional(field)
            .map(str::to_string)
            .ok_or_else(|| ImportError::PrimaryKeyMissing {
                row: self.index,
                field: field.to_string(),
            })
    }

    fn text(&self, field: &str) -> ImportResult<String> {
        self.optional(field)
            .map(str::to_string)
            .ok_or_else(|| self.conversion_error(field, "值为空"))
    }

    fn number(&self, field: &str) -> ImportResult<f64> {
        let raw = self
            .optional(field)
            .ok_or_else(|| self.conversion_error(field, "值为空"))?;
        self.parse_number(field, raw)
    }

    fn optional_number(&self, field: &str) -> ImportResult<Option<f64>> {
        self.optional(field)
            .map(|raw| self.parse_number(field, raw))
            .transpose()
    }

    fn parse_number(&self, field: &str, raw: &str) -> ImportResult<f64> {
        raw.replace(',', "")
            .parse::<f64>()
            .map_err(|e| self.conversion_error(field, &format!("'{}' 不是数值: {}", raw, e)))
    }

    fn days(&self, field: &str) -> ImportResult<u32> {
        let value = self.number(field)?;
        if value < 0.0 || value.fract() != 0.0 || value > f64::from(u32::MAX) {
            return Err(self.conversion_error(field, &format!("'{}' 不是非负整数天数", value)));
        }
        Ok(value as u32)
    }

    fn optional_date(&self, field: &str) -> ImportResult<Option<NaiveDate>> {
        match self.optional(field) {
            None => Ok(None),
            Some(raw) => parse_date(raw).map(Some).ok_or_else(|| ImportError::DateFormatError {
                row: self.index,
                field: field.to_string(),
                value: raw.to_string(),
            }),
        }
    }

    fn date(&self, field: &str) -> ImportResult<NaiveDate> {
        self.optional_date(field)?
            .ok_or_else(|| self.conversion_error(field, "值为空"))
    }

    fn conversion_error(&self, field: &str, message: &str) -> ImportError {
        ImportError::TypeConversionError {
            row: self.index,
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    // Excel 日期单元格可能带时间部分
    let date_part = raw.split([' ', 'T']).next().unwrap_or(raw);
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
}

fn require_columns(file: &Path, records: &[RawRecord], columns: &[&str]) -> ImportResult<()> {
    let Some(first) = records.first() else {
        return Ok(());
    };
    for column in columns {
        if !first.contains_key(*column) {
            return Err(ImportError::MissingColumn {
                file: file.display().to_string(),
                column: column.to_string(),
            });
        }
    }
    Ok(())
}

fn rows(records: &[RawRecord]) -> impl Iterator<Item = Row<'_>> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| Row { index: i + 1, record })
}

// ==========================================
// SnapshotLoader - 输入快照加载器
// ==========================================
pub struct SnapshotLoader {
    parser: UniversalFileParser,
}

impl SnapshotLoader {
    pub fn new() -> Self {
        Self {
            parser: UniversalFileParser,
        }
    }

    /// 从数据目录加载完整快照
    ///
    /// # 参数
    /// - data_dir: 包含 forecasts / bom / inventory / suppliers 四张表的目录
    ///
    /// # 返回
    /// - Err(FileNotFound): 某张表 csv/xlsx/xls 均不存在
    pub fn load_dir<P: AsRef<Path>>(&self, data_dir: P) -> ImportResult<PlanningSnapshot> {
        let dir = data_dir.as_ref();

        let snapshot = PlanningSnapshot::new(
            self.load_forecasts(Self::locate(dir, "forecasts")?)?,
            self.load_bom(Self::locate(dir, "bom")?)?,
            self.load_inventory(Self::locate(dir, "inventory")?)?,
            self.load_suppliers(Self::locate(dir, "suppliers")?)?,
        );

        info!(
            data_dir = %dir.display(),
            forecasts = snapshot.forecasts.len(),
            bom_entries = snapshot.bom_entries.len(),
            inventory = snapshot.inventory.len(),
            supplier_materials = snapshot.supplier_materials.len(),
            "输入快照加载完成"
        );

        Ok(snapshot)
    }

    /// 预测表
    pub fn load_forecasts<P: AsRef<Path>>(&self, path: P) -> ImportResult<Vec<Forecast>> {
        let path = path.as_ref();
        let records = self.parser.parse(path)?;
        require_columns(path, &records, &["sku_id", "quantity", "period", "source"])?;

        rows(&records)
            .map(|row| -> ImportResult<Forecast> {
                let raw_source = row.text("source")?;
                let source = ForecastSource::from_str(&raw_source).ok_or_else(|| {
                    row.conversion_error("source", &format!("未知预测来源 '{}'", raw_source))
                })?;
                Ok(Forecast {
                    sku_id: row.key("sku_id")?,
                    quantity: row.number("quantity")?,
                    period: row.date("period")?,
                    source,
                })
            })
            .collect()
    }

    /// BOM 表
    pub fn load_bom<P: AsRef<Path>>(&self, path: P) -> ImportResult<Vec<BomEntry>> {
        let path = path.as_ref();
        let records = self.parser.parse(path)?;
        require_columns(path, &records, &["sku_id", "material_id", "percentage", "unit"])?;

        rows(&records)
            .map(|row| -> ImportResult<BomEntry> {
                Ok(BomEntry {
                    sku_id: row.key("sku_id")?,
                    material_id: row.key("material_id")?,
                    percentage: row.number("percentage")?,
                    unit: row.text("unit")?,
                })
            })
            .collect()
    }

    /// 库存表
    pub fn load_inventory<P: AsRef<Path>>(&self, path: P) -> ImportResult<Vec<InventoryRecord>> {
        let path = path.as_ref();
        let records = self.parser.parse(path)?;
        require_columns(path, &records, &["material_id", "on_hand_qty", "unit"])?;

        rows(&records)
            .map(|row| -> ImportResult<InventoryRecord> {
                Ok(InventoryRecord {
                    material_id: row.key("material_id")?,
                    on_hand_qty: row.number("on_hand_qty")?,
                    unit: row.text("unit")?,
                    open_po_qty: row.optional_number("open_po_qty")?.unwrap_or(0.0),
                    po_expected_date: row.optional_date("po_expected_date")?,
                })
            })
            .collect()
    }

    /// 供应商-物料表
    pub fn load_suppliers<P: AsRef<Path>>(&self, path: P) -> ImportResult<Vec<SupplierMaterial>> {
        let path = path.as_ref();
        let records = self.parser.parse(path)?;
        require_columns(
            path,
            &records,
            &["material_id", "supplier_id", "cost_per_unit", "lead_time_days"],
        )?;

        rows(&records)
            .map(|row| -> ImportResult<SupplierMaterial> {
                Ok(SupplierMaterial {
                    material_id: row.key("material_id")?,
                    supplier_id: row.key("supplier_id")?,
                    cost_per_unit: row.number("cost_per_unit")?,
                    lead_time_days: row.days("lead_time_days")?,
                    moq: row.optional_number("moq")?.unwrap_or(0.0),
                    contract_qty_limit: row.optional_number("contract_qty_limit")?,
                    reliability_score: row.optional_number("reliability_score")?.unwrap_or(1.0),
                    ordering_cost: row
                        .optional_number("ordering_cost")?
                        .unwrap_or(DEFAULT_ORDERING_COST),
                    holding_cost_rate: row
                        .optional_number("holding_cost_rate")?
                        .unwrap_or(DEFAULT_HOLDING_COST_RATE),
                })
            })
            .collect()
    }

    /// 按 csv -> xlsx -> xls 顺序查找表文件
    fn locate(dir: &Path, stem: &str) -> ImportResult<PathBuf> {
        ["csv", "xlsx", "xls"]
            .iter()
            .map(|ext| dir.join(format!("{}.{}", stem, ext)))
            .find(|p| p.exists())
            .ok_or_else(|| ImportError::FileNotFound(dir.join(format!("{}.csv", stem)).display().to_string()))
    }
}

impl Default for SnapshotLoader {
    fn default() -> Self {
        Self::new()
    }
}
