// ==========================================
// 穿孔爆破引擎 - 孔网数据导入器
// ==========================================
// 职责: 整合导入流程,从文件到内存中的炮孔/连接集合
// 流程: 解析 → 映射 → 坐标舍入 → 几何校验 → 汇总报告
// 红线: 单行失败不中断导入,记录行号与原因后跳过
// ==========================================

use crate::config::EngineConfig;
use crate::domain::connection::ConnectorEdge;
use crate::domain::drill_point::DrillPoint;
use crate::domain::types::SiteScope;
use crate::engine::error::EngineError;
use crate::engine::geometry::GeometryValidator;
use crate::engine::rounding::round_to;
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::{FileParser, UniversalFileParser};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// 被跳过的行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    pub row_number: usize,
    pub reason: String,
}

/// 导入报告
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportReport<T> {
    pub batch_id: String,
    pub source: String,
    pub imported_at: DateTime<Utc>,
    /// 解析出的非空数据行数
    pub total_rows: usize,
    pub records: Vec<T>,
    pub skipped: Vec<SkippedRow>,
}

impl<T> ImportReport<T> {
    fn new(source: &Path, total_rows: usize) -> Self {
        Self {
            batch_id: Uuid::new_v4().to_string(),
            source: source.display().to_string(),
            imported_at: Utc::now(),
            total_rows,
            records: Vec::with_capacity(total_rows),
            skipped: Vec::new(),
        }
    }

    fn skip(&mut self, row_number: usize, reason: String) {
        warn!(batch_id = %self.batch_id, row_number, reason = %reason, "跳过数据行");
        self.skipped.push(SkippedRow { row_number, reason });
    }
}

// ==========================================
// PatternImporter - 孔网数据导入器
// ==========================================
pub struct PatternImporter {
    config: EngineConfig,
    file_parser: Box<dyn FileParser>,
    field_mapper: FieldMapper,
}

impl PatternImporter {
    /// 按扩展名自动选择解析器
    pub fn new(config: EngineConfig) -> Self {
        Self::with_parser(config, Box::new(UniversalFileParser))
    }

    pub fn with_parser(config: EngineConfig, file_parser: Box<dyn FileParser>) -> Self {
        Self {
            config,
            file_parser,
            field_mapper: FieldMapper,
        }
    }

    /// 导入炮孔
    ///
    /// 坐标舍入后逐行做几何校验: 无效坐标/重复坐标/重复编号跳过;
    /// 达到孔数上限后剩余行全部跳过
    #[instrument(skip(self, file_path))]
    pub fn import_points<P: AsRef<Path>>(
        &self,
        file_path: P,
        scope: SiteScope,
    ) -> ImportResult<ImportReport<DrillPoint>> {
        let path = file_path.as_ref();
        let raw_rows = self.file_parser.parse_to_raw_records(path)?;
        let mut report = ImportReport::new(path, raw_rows.len());
        info!(batch_id = %report.batch_id, file_path = %report.source, total_rows = report.total_rows, "开始导入炮孔");

        let validator = GeometryValidator::new(self.config.clone());
        let decimals = self.config.coordinate_decimals;
        let mut seen_ids: HashSet<String> = HashSet::new();

        for (idx, row) in raw_rows.iter().enumerate() {
            let row_number = idx + 1;

            let mapped = match self.field_mapper.map_drill_point(row, row_number, scope) {
                Ok(point) => point,
                Err(e) => {
                    report.skip(row_number, e.to_string());
                    continue;
                }
            };

            if seen_ids.contains(&mapped.id) {
                report.skip(row_number, format!("炮孔编号重复: {}", mapped.id));
                continue;
            }

            let x = round_to(mapped.x, decimals);
            let y = round_to(mapped.y, decimals);

            match validator.check_new_point(x, y, &report.records) {
                Ok(()) => {}
                Err(EngineError::PointCountExceeded { max }) => {
                    warn!(max, row_number, "炮孔数量达到上限,停止导入");
                    for rest in row_number..=raw_rows.len() {
                        report.skip(rest, EngineError::PointCountExceeded { max }.to_string());
                    }
                    break;
                }
                Err(e) => {
                    report.skip(row_number, e.to_string());
                    continue;
                }
            }

            debug!(point_id = %mapped.id, x, y, "炮孔已接收");
            seen_ids.insert(mapped.id.clone());
            report.records.push(mapped.relocated(x, y));
        }

        info!(
            batch_id = %report.batch_id,
            imported = report.records.len(),
            skipped = report.skipped.len(),
            "炮孔导入完成"
        );
        Ok(report)
    }

    /// 导入连接
    ///
    /// 只做字段级校验,结构校验由 BlastNetworkBuilder 统一完成
    #[instrument(skip(self, file_path))]
    pub fn import_connections<P: AsRef<Path>>(
        &self,
        file_path: P,
    ) -> ImportResult<ImportReport<ConnectorEdge>> {
        let path = file_path.as_ref();
        let raw_rows = self.file_parser.parse_to_raw_records(path)?;
        let mut report = ImportReport::new(path, raw_rows.len());
        info!(batch_id = %report.batch_id, file_path = %report.source, total_rows = report.total_rows, "开始导入连接");

        for (idx, row) in raw_rows.iter().enumerate() {
            let row_number = idx + 1;
            match self.field_mapper.map_connection(row, row_number) {
                Ok(edge) => report.records.push(edge),
                Err(e) => report.skip(row_number, e.to_string()),
            }
        }

        info!(
            batch_id = %report.batch_id,
            imported = report.records.len(),
            skipped = report.skipped.len(),
            "连接导入完成"
        );
        Ok(report)
    }
}
