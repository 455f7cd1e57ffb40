// ==========================================
// 缝制产线负荷排产系统 - 导入层
// ==========================================
// 职责: 外部文件 → 原始表 → 领域记录
// 支持: Excel, CSV
// ==========================================

pub mod data_cleaner;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod raw_table;

// 重导出核心类型
pub use data_cleaner::DataCleaner;
pub use error::{ImportError, ImportResult};
pub use field_mapper::{columns, FieldMapper};
pub use file_parser::{
    pick_planning_tables, CsvParser, ExcelParser, FileParser, PlanningTables, UniversalFileParser,
};
pub use raw_table::{RawTable, DEMAND_TABLE, GROUP_TABLE};
