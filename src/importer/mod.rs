// ==========================================
// 纺织原料采购计划系统 - 导入层
// ==========================================
// 职责: 外部数据导入,生成只读输入快照
// 支持: Excel, CSV
// ==========================================

// 模块声明
pub mod error;
pub mod file_parser;
pub mod snapshot_loader;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, FileParser, RawRecord, UniversalFileParser};
pub use snapshot_loader::SnapshotLoader;
