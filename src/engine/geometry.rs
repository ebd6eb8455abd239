// ==========================================
// 穿孔爆破引擎 - 几何校验器
// ==========================================
// 职责: 坐标有限性、重复坐标、孔数上限校验
// 红线: validate_* 只返回判定结果,由调用方决定拒绝或警告;
//       check_new_point 才转为类型化错误
// ==========================================

use crate::config::EngineConfig;
use crate::domain::drill_point::DrillPoint;
use crate::engine::error::{EngineError, EngineResult};

// ==========================================
// GeometryValidator - 几何校验器
// ==========================================
pub struct GeometryValidator {
    config: EngineConfig,
}

impl GeometryValidator {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// 坐标是否有效（任一轴为 NaN/Infinity 即无效）
    pub fn validate_coordinates(&self, x: f64, y: f64) -> bool {
        x.is_finite() && y.is_finite()
    }

    /// 坐标是否与已有炮孔不重合
    ///
    /// 逐轴比较: 两轴差值同时小于容差才视为重合（非欧氏距离）
    pub fn validate_unique_coordinates(
        &self,
        x: f64,
        y: f64,
        existing_points: &[DrillPoint],
        tolerance_m: f64,
    ) -> bool {
        !existing_points
            .iter()
            .any(|p| (p.x - x).abs() < tolerance_m && (p.y - y).abs() < tolerance_m)
    }

    /// 是否还能再添加一个炮孔
    pub fn validate_point_count(&self, current_count: usize, max_allowed: usize) -> bool {
        current_count < max_allowed
    }

    /// 两孔欧氏距离
    pub fn distance(&self, a: &DrillPoint, b: &DrillPoint) -> f64 {
        let dx = a.x - b.x;
        let dy = a.y - b.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// 按配置阈值对新孔做完整校验,并转为类型化错误
    ///
    /// 校验顺序: 坐标有效 → 数量上限 → 重复坐标
    pub fn check_new_point(&self, x: f64, y: f64, existing_points: &[DrillPoint]) -> EngineResult<()> {
        if !self.validate_coordinates(x, y) {
            return Err(EngineError::InvalidCoordinate { x, y });
        }

        if !self.validate_point_count(existing_points.len(), self.config.max_drill_points) {
            return Err(EngineError::PointCountExceeded {
                max: self.config.max_drill_points,
            });
        }

        if !self.validate_unique_coordinates(
            x,
            y,
            existing_points,
            self.config.coordinate_tolerance_m,
        ) {
            return Err(EngineError::DuplicateCoordinate { x, y });
        }

        Ok(())
    }
}
