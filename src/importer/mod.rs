// ==========================================
// 穿孔爆破引擎 - 导入层
// ==========================================
// 职责: 外部孔位/连接表格导入,生成领域对象
// 支持: Excel, CSV
// ==========================================

pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod pattern_importer;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper;
pub use file_parser::{CsvParser, ExcelParser, FileParser, RawRow, UniversalFileParser};
pub use pattern_importer::{ImportReport, PatternImporter, SkippedRow};
