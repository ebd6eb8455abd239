// ==========================================
// 穿孔爆破引擎 - 文件解析器实现
// ==========================================
// 支持: Excel (.xlsx/.xls) / CSV (.csv)
// 输出: 表头 → 单元格文本 的原始行,跳过完全空白行
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// 原始行: 表头 → 单元格文本（已 trim）
pub type RawRow = HashMap<String, String>;

/// 文件解析 Trait
pub trait FileParser: Send + Sync {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRow>>;
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

fn ensure_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

fn push_non_blank(records: &mut Vec<RawRow>, row_map: RawRow) {
    if row_map.values().all(|v| v.is_empty()) {
        return;
    }
    records.push(row_map);
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRow>> {
        ensure_exists(file_path)?;

        let ext = extension_of(file_path);
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .trim(csv::Trim::All)
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().trim_start_matches('\u{feff}').to_string())
            .collect();

        let mut records = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut row_map = RawRow::new();

            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), value.trim().to_string());
                }
            }

            push_non_blank(&mut records, row_map);
        }

        Ok(records)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
// 只读取第一个工作表,第一行为表头
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRow>> {
        ensure_exists(file_path)?;

        let ext = extension_of(file_path);
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let mut workbook = open_workbook_auto(file_path)?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;
        let range = workbook.worksheet_range(&sheet_name)?;

        let mut rows = range.rows();
        let header_row = rows
            .next()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无数据行".to_string()))?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let mut records = Vec::new();
        for data_row in rows {
            let mut row_map = RawRow::new();

            for (col_idx, cell) in data_row.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), cell.to_string().trim().to_string());
                }
            }

            push_non_blank(&mut records, row_map);
        }

        Ok(records)
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl FileParser for UniversalFileParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRow>> {
        match extension_of(file_path).as_str() {
            "csv" => CsvParser.parse_to_raw_records(file_path),
            "xlsx" | "xls" => ExcelParser.parse_to_raw_records(file_path),
            other => Err(ImportError::UnsupportedFormat(other.to_string())),
        }
    }
}
