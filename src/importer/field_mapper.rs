// ==========================================
// 穿孔爆破引擎 - 字段映射器实现
// ==========================================
// 职责: 原始行 → DrillPoint / ConnectorEdge + 类型转换
// 表头匹配不区分大小写,支持别名
// ==========================================

use crate::domain::connection::ConnectorEdge;
use crate::domain::drill_point::DrillPoint;
use crate::domain::types::{ConnectorType, SiteScope};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::RawRow;
use std::str::FromStr;
use uuid::Uuid;

// ===== 炮孔表头别名 =====
const POINT_ID: &[&str] = &["id", "hole", "hole_id", "name"];
const POINT_X: &[&str] = &["x", "east", "easting"];
const POINT_Y: &[&str] = &["y", "north", "northing"];
const POINT_DEPTH: &[&str] = &["depth", "length"];
const POINT_SPACING: &[&str] = &["spacing"];
const POINT_BURDEN: &[&str] = &["burden"];
const POINT_DIAMETER: &[&str] = &["diameter"];
const POINT_STEMMING: &[&str] = &["stemming"];

// ===== 连接表头别名 =====
const EDGE_ID: &[&str] = &["id", "connection_id"];
const EDGE_FROM: &[&str] = &["from", "from_id", "from_hole_id"];
const EDGE_TO: &[&str] = &["to", "to_id", "to_hole_id"];
const EDGE_TYPE: &[&str] = &["connector_type", "type"];
const EDGE_DELAY: &[&str] = &["delay", "delay_ms"];
const EDGE_SEQUENCE: &[&str] = &["sequence", "seq"];
const EDGE_STARTING: &[&str] = &["is_starting_hole", "starting", "start"];

pub struct FieldMapper;

impl FieldMapper {
    /// 映射炮孔行（编号/X/Y 必填,其余缺省为 0）
    pub fn map_drill_point(
        &self,
        row: &RawRow,
        row_number: usize,
        scope: SiteScope,
    ) -> ImportResult<DrillPoint> {
        let id = self.require_string(row, POINT_ID, row_number)?;
        let x = self.require_f64(row, POINT_X, row_number)?;
        let y = self.require_f64(row, POINT_Y, row_number)?;

        let mut point = DrillPoint::new(id, scope, x, y).with_pattern(
            self.parse_f64(row, POINT_DEPTH, row_number)?.unwrap_or(0.0),
            self.parse_f64(row, POINT_SPACING, row_number)?.unwrap_or(0.0),
            self.parse_f64(row, POINT_BURDEN, row_number)?.unwrap_or(0.0),
        );
        point.diameter = self.parse_f64(row, POINT_DIAMETER, row_number)?.unwrap_or(0.0);
        point.stemming = self.parse_f64(row, POINT_STEMMING, row_number)?.unwrap_or(0.0);

        Ok(point)
    }

    /// 映射连接行（起止孔与延时必填,缺少编号时生成 UUID）
    pub fn map_connection(&self, row: &RawRow, row_number: usize) -> ImportResult<ConnectorEdge> {
        let id = self
            .get_string(row, EDGE_ID)
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let from_id = self.require_string(row, EDGE_FROM, row_number)?;
        let to_id = self.require_string(row, EDGE_TO, row_number)?;

        let delay_ms = match self.get_string(row, EDGE_DELAY) {
            None => {
                return Err(ImportError::FieldMappingError {
                    row: row_number,
                    message: format!("缺少必填字段: {}", EDGE_DELAY[0]),
                })
            }
            Some(value) => parse_number::<u32>(&value, EDGE_DELAY[0], row_number)?,
        };

        let mut edge = ConnectorEdge::new(id, from_id, to_id, delay_ms);

        if let Some(value) = self.get_string(row, EDGE_TYPE) {
            edge.connector_type =
                ConnectorType::from_str(&value).map_err(|message| ImportError::TypeConversionError {
                    row: row_number,
                    field: EDGE_TYPE[0].to_string(),
                    message,
                })?;
        }
        if let Some(value) = self.get_string(row, EDGE_SEQUENCE) {
            edge.sequence = parse_number::<i32>(&value, EDGE_SEQUENCE[0], row_number)?;
        }
        if let Some(value) = self.get_string(row, EDGE_STARTING) {
            edge.is_starting_hole = parse_flag(&value).ok_or_else(|| {
                ImportError::TypeConversionError {
                    row: row_number,
                    field: EDGE_STARTING[0].to_string(),
                    message: format!("无法解析为布尔值: {}", value),
                }
            })?;
        }

        Ok(edge)
    }

    /// 按别名顺序取第一个非空值
    fn get_string(&self, row: &RawRow, aliases: &[&str]) -> Option<String> {
        for alias in aliases {
            let hit = row
                .iter()
                .find(|(header, _)| header.trim().eq_ignore_ascii_case(alias));
            if let Some((_, value)) = hit {
                let trimmed = value.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }
        None
    }

    fn require_string(&self, row: &RawRow, aliases: &[&str], row_number: usize) -> ImportResult<String> {
        self.get_string(row, aliases)
            .ok_or_else(|| ImportError::FieldMappingError {
                row: row_number,
                message: format!("缺少必填字段: {}", aliases[0]),
            })
    }

    fn parse_f64(
        &self,
        row: &RawRow,
        aliases: &[&str],
        row_number: usize,
    ) -> ImportResult<Option<f64>> {
        match self.get_string(row, aliases) {
            None => Ok(None),
            Some(value) => parse_number::<f64>(&value, aliases[0], row_number).map(Some),
        }
    }

    fn require_f64(&self, row: &RawRow, aliases: &[&str], row_number: usize) -> ImportResult<f64> {
        self.parse_f64(row, aliases, row_number)?
            .ok_or_else(|| ImportError::FieldMappingError {
                row: row_number,
                message: format!("缺少必填字段: {}", aliases[0]),
            })
    }
}

fn parse_number<T: FromStr>(value: &str, field: &str, row_number: usize) -> ImportResult<T> {
    value.parse::<T>().map_err(|_| ImportError::TypeConversionError {
        row: row_number,
        field: field.to_string(),
        message: format!("无法解析为数值: {}", value),
    })
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "是" => Some(true),
        "0" | "false" | "no" | "n" | "否" | "" => Some(false),
        _ => None,
    }
}
