// ==========================================
// 穿孔爆破引擎 - 孔网间距推断
// ==========================================
// 职责: 从无序孔位坐标推断孔距(X)与排距(Y)
// 方法: 相邻差值 → 0.1m 分档众数,支持度不足时回退中位数
// 红线: 算法步骤需与既有数据保持兼容,不可随意调整
// ==========================================

use crate::config::EngineConfig;
use crate::domain::drill_point::DrillPoint;
use crate::engine::rounding::{round_to, tenth_bucket};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 孔网间距推断结果
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridPitch {
    /// X 轴孔距
    pub spacing: f64,
    /// Y 轴排距
    pub burden: f64,
}

// ==========================================
// PitchEstimator - 间距推断器
// ==========================================
pub struct PitchEstimator {
    config: EngineConfig,
}

impl PitchEstimator {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// 同时推断孔距与排距
    pub fn calculate_grid_pitch(&self, points: &[DrillPoint]) -> GridPitch {
        let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
        let ys: Vec<f64> = points.iter().map(|p| p.y).collect();

        GridPitch {
            spacing: self.estimate_pitch(&xs),
            burden: self.estimate_pitch(&ys),
        }
    }

    /// 单轴间距推断
    ///
    /// # 步骤
    /// 1. 少于 2 个坐标 → 默认值
    /// 2. 升序排序,相邻差值保留 3 位小数
    /// 3. 丢弃小于最小步长的差值（抖动/近重复）
    /// 4. 0.1m 分档统计频次,取众数档
    /// 5. 众数支持度 >= 阈值 → 众数档; 否则 → 中位数舍入到 0.1m
    pub fn estimate_pitch(&self, coordinates: &[f64]) -> f64 {
        let default_pitch = self.config.default_pitch_m;

        // 非有限值由几何校验负责拦截,这里仅跳过以免排序失序
        let mut sorted: Vec<f64> = coordinates.iter().copied().filter(|c| c.is_finite()).collect();
        if sorted.len() < 2 {
            return default_pitch;
        }
        sorted.sort_by(|a, b| a.total_cmp(b));

        let deltas: Vec<f64> = sorted
            .windows(2)
            .map(|w| round_to(w[1] - w[0], 3))
            .filter(|d| *d >= self.config.grid_pitch_min_threshold_m)
            .collect();

        if deltas.is_empty() {
            return default_pitch;
        }

        // 档 → (频次, 首次出现位置); 频次相同取先出现的档
        let mut histogram: HashMap<i64, (usize, usize)> = HashMap::with_capacity(deltas.len());
        for (position, delta) in deltas.iter().enumerate() {
            let slot = histogram.entry(tenth_bucket(*delta)).or_insert((0, position));
            slot.0 += 1;
        }

        let Some((mode_bucket, (mode_count, _))) = histogram
            .into_iter()
            .max_by(|(_, a), (_, b)| a.0.cmp(&b.0).then(b.1.cmp(&a.1)))
        else {
            return default_pitch;
        };

        let support = mode_count as f64 / deltas.len() as f64;
        if support >= self.config.grid_pitch_support_threshold {
            return mode_bucket as f64 / 10.0;
        }

        let mut ordered = deltas;
        ordered.sort_by(|a, b| a.total_cmp(b));
        let median = ordered[ordered.len() / 2];
        round_to(median, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn estimator() -> PitchEstimator {
        PitchEstimator::new(EngineConfig::default())
    }

    #[test]
    fn test_degenerate_inputs_return_default() {
        let e = estimator();
        assert_eq!(e.estimate_pitch(&[]), 1.0);
        assert_eq!(e.estimate_pitch(&[4.2]), 1.0);
        // 差值全部低于 0.5m
        assert_eq!(e.estimate_pitch(&[0.0, 0.1, 0.2, 0.3]), 1.0);
    }

    #[test]
    fn test_mode_wins_with_enough_support() {
        let e = estimator();
        // deltas [3,3,3,6] → 众数 3,支持度 0.75
        assert_eq!(e.estimate_pitch(&[0.0, 3.0, 6.0, 9.0, 15.0]), 3.0);
    }

    #[test]
    fn test_order_of_input_does_not_matter() {
        let e = estimator();
        assert_eq!(e.estimate_pitch(&[15.0, 0.0, 9.0, 3.0, 6.0]), 3.0);
    }

    #[test]
    fn test_jitter_is_absorbed_by_bucketing() {
        let e = estimator();
        // deltas: 3.02, 2.98, 3.01, 3.0 → 全部落在 3.0 档
        assert_eq!(e.estimate_pitch(&[0.0, 3.02, 6.0, 9.01, 12.01]), 3.0);
    }

    #[test]
    fn test_rows_collapse_duplicates_below_threshold() {
        let e = estimator();
        // 多排同列 X: 重复值差值 0 被丢弃
        let xs = [0.0, 0.0, 0.0, 2.5, 2.5, 2.5, 5.0, 5.0, 5.0];
        assert_eq!(e.estimate_pitch(&xs), 2.5);
    }

    #[test]
    fn test_median_fallback_when_support_too_low() {
        let mut config = EngineConfig::default();
        config.grid_pitch_support_threshold = 0.5;
        let e = PitchEstimator::new(config);

        // deltas [1,2,3,4] 各档频次 1,支持度 0.25 < 0.5
        // 中位数取排序后下标 n/2 = 2 → 3.0
        assert_eq!(e.estimate_pitch(&[0.0, 1.0, 3.0, 6.0, 10.0]), 3.0);
    }

    #[test]
    fn test_median_is_rounded_to_tenth() {
        let mut config = EngineConfig::default();
        config.grid_pitch_support_threshold = 0.9;
        let e = PitchEstimator::new(config);

        // deltas [1.11, 2.26, 3.37] → 中位数 2.26 → 2.3
        assert_eq!(e.estimate_pitch(&[0.0, 1.11, 3.37, 6.74]), 2.3);
    }

    #[test]
    fn test_tie_prefers_first_seen_bucket() {
        let e = estimator();
        // deltas [4,2,4,2] 频次相同,先出现的 4.0 档胜出
        assert_eq!(e.estimate_pitch(&[0.0, 4.0, 6.0, 10.0, 12.0]), 4.0);
    }

    #[test]
    fn test_delta_equal_to_min_threshold_is_kept() {
        let e = estimator();
        // 0.5 == 最小步长 → 保留
        assert_eq!(e.estimate_pitch(&[0.0, 0.5, 1.0]), 0.5);
        // 0.499 < 0.5 → 丢弃,回到默认值
        assert_eq!(e.estimate_pitch(&[0.0, 0.499]), 1.0);
    }

    #[test]
    fn test_support_equal_to_threshold_keeps_mode() {
        let mut config = EngineConfig::default();
        config.grid_pitch_support_threshold = 0.5;
        let e = PitchEstimator::new(config.clone());

        // deltas [1,1,2,3]: 众数 1.0 支持度 0.5 == 阈值 → 众数
        assert_eq!(e.estimate_pitch(&[0.0, 1.0, 2.0, 4.0, 7.0]), 1.0);

        // 阈值略高于支持度 → 中位数 sorted[2] = 2.0
        config.grid_pitch_support_threshold = 0.51;
        let e = PitchEstimator::new(config);
        assert_eq!(e.estimate_pitch(&[0.0, 1.0, 2.0, 4.0, 7.0]), 2.0);
    }

    #[test]
    fn test_calculate_grid_pitch_runs_per_axis() {
        use crate::domain::types::SiteScope;
        let scope = SiteScope::new(1, 1);
        let mut points = Vec::new();
        for row in 0..3 {
            for col in 0..4 {
                points.push(DrillPoint::new(
                    format!("H{}{}", row, col),
                    scope,
                    col as f64 * 3.5,
                    row as f64 * 2.8,
                ));
            }
        }

        let pitch = estimator().calculate_grid_pitch(&points);
        assert_eq!(pitch.spacing, 3.5);
        assert_eq!(pitch.burden, 2.8);
    }
}
