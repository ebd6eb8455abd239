// ==========================================
// 穿孔爆破引擎 - 孔网设计 API
// ==========================================
// 职责: 新孔校验、孔网间距推断、原点锚定、装药建议、文件导入
// 流程: 读取场地配置 → 调用引擎 → 记录日志 → 错误转换
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::EngineConfigReader;
use crate::domain::connection::ConnectorEdge;
use crate::domain::drill_point::DrillPoint;
use crate::domain::types::SiteScope;
use crate::engine::charge_design::{ChargeDesignCalculator, DEFAULT_EXPLOSIVE_DENSITY};
use crate::engine::rounding::round_to;
use crate::engine::{GeometryValidator, GridPitch, OriginAnchorer, PitchEstimator};
use crate::importer::{ImportReport, PatternImporter};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// 孔网分析结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternAnalysis {
    pub scope: SiteScope,
    pub point_count: usize,
    pub pitch: GridPitch,
    /// 平移到原点后的点集（输入顺序）
    pub anchored_points: Vec<DrillPoint>,
}

/// 单孔装药建议
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeAdvice {
    pub point_id: String,
    pub recommended_stemming: f64,
    pub recommended_diameter: f64,
    /// 以实际孔径/填塞计算,未指定时使用推荐值
    pub powder_factor: f64,
    pub stemming_ok: bool,
    pub diameter_ok: bool,
}

/// 文件导入结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternImport {
    pub points: ImportReport<DrillPoint>,
    pub connections: Option<ImportReport<ConnectorEdge>>,
}

// ==========================================
// PatternApi - 孔网设计 API
// ==========================================
pub struct PatternApi<C>
where
    C: EngineConfigReader,
{
    config_reader: Arc<C>,
}

impl<C> PatternApi<C>
where
    C: EngineConfigReader,
{
    pub fn new(config_reader: Arc<C>) -> Self {
        Self { config_reader }
    }

    /// 校验新孔坐标（不创建）
    #[instrument(skip(self, existing_points), fields(existing = existing_points.len()))]
    pub async fn validate_new_point(
        &self,
        scope: SiteScope,
        x: f64,
        y: f64,
        existing_points: &[DrillPoint],
    ) -> ApiResult<()> {
        let config = self.config_reader.get_engine_config(Some(scope)).await?;
        let validator = GeometryValidator::new(config);

        validator.check_new_point(x, y, existing_points).map_err(|e| {
            warn!(scope = %scope, x, y, error = %e, "新孔校验未通过");
            ApiError::from(e)
        })
    }

    /// 创建新孔
    ///
    /// 坐标先按配置小数位舍入再校验; 孔号在场地内必须唯一
    #[instrument(skip(self, existing_points))]
    pub async fn create_point(
        &self,
        scope: SiteScope,
        point_id: &str,
        x: f64,
        y: f64,
        existing_points: &[DrillPoint],
    ) -> ApiResult<DrillPoint> {
        let point_id = point_id.trim();
        if point_id.is_empty() {
            return Err(ApiError::InvalidInput("炮孔编号不能为空".to_string()));
        }
        if existing_points.iter().any(|p| p.id == point_id) {
            return Err(ApiError::InvalidInput(format!("炮孔编号已存在: {}", point_id)));
        }

        let config = self.config_reader.get_engine_config(Some(scope)).await?;
        let x = round_to(x, config.coordinate_decimals);
        let y = round_to(y, config.coordinate_decimals);

        let validator = GeometryValidator::new(config);
        if let Err(e) = validator.check_new_point(x, y, existing_points) {
            warn!(scope = %scope, point_id, error = %e, "新孔创建被拒绝");
            return Err(e.into());
        }

        info!(scope = %scope, point_id, x, y, "新孔已创建");
        Ok(DrillPoint::new(point_id, scope, x, y))
    }

    /// 孔网分析: 间距推断 + 原点锚定
    #[instrument(skip(self, points), fields(points = points.len()))]
    pub async fn analyze_pattern(
        &self,
        scope: SiteScope,
        points: &[DrillPoint],
    ) -> ApiResult<PatternAnalysis> {
        let config = self.config_reader.get_engine_config(Some(scope)).await?;
        let decimals = config.coordinate_decimals;

        let pitch = PitchEstimator::new(config).calculate_grid_pitch(points);
        let anchored_points = OriginAnchorer::new(decimals).anchor_points_to_origin(points);

        info!(
            scope = %scope,
            holes = points.len(),
            spacing = pitch.spacing,
            burden = pitch.burden,
            "孔网分析完成"
        );

        Ok(PatternAnalysis {
            scope,
            point_count: points.len(),
            pitch,
            anchored_points,
        })
    }

    /// 单孔装药建议
    pub fn charge_advice(&self, point: &DrillPoint) -> ChargeAdvice {
        let calc = ChargeDesignCalculator::new();
        let recommended_stemming = calc.optimal_stemming(point.depth, point.burden);
        let recommended_diameter = calc.optimal_diameter(point.burden, point.spacing);

        let diameter = if point.diameter > 0.0 {
            point.diameter
        } else {
            recommended_diameter
        };
        let stemming = if point.stemming > 0.0 {
            point.stemming
        } else {
            recommended_stemming
        };

        ChargeAdvice {
            point_id: point.id.clone(),
            recommended_stemming,
            recommended_diameter,
            powder_factor: calc.powder_factor(
                diameter,
                point.depth,
                stemming,
                point.burden,
                point.spacing,
                DEFAULT_EXPLOSIVE_DENSITY,
            ),
            stemming_ok: calc.validate_stemming(stemming, point.depth, point.burden),
            diameter_ok: calc.validate_diameter(diameter, point.burden, point.spacing),
        }
    }

    /// 从文件导入炮孔（及可选的连接）
    #[instrument(skip(self, points_path, connections_path))]
    pub async fn import_pattern(
        &self,
        scope: SiteScope,
        points_path: &Path,
        connections_path: Option<&Path>,
    ) -> ApiResult<PatternImport> {
        let config = self.config_reader.get_engine_config(Some(scope)).await?;
        let importer = PatternImporter::new(config);

        let points = importer.import_points(points_path, scope)?;
        let connections = match connections_path {
            Some(path) => Some(importer.import_connections(path)?),
            None => None,
        };

        info!(
            scope = %scope,
            points = points.records.len(),
            connections = connections.as_ref().map(|c| c.records.len()).unwrap_or(0),
            "孔网文件导入完成"
        );

        Ok(PatternImport {
            points,
            connections,
        })
    }
}
