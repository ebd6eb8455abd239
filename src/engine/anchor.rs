// ==========================================
// 穿孔爆破引擎 - 坐标原点锚定
// ==========================================
// 职责: 平移点集使 min(X)/min(Y) 落在 (0,0)
// 红线: 纯变换,产生新点集,幂等
// ==========================================

use crate::domain::drill_point::DrillPoint;
use crate::engine::rounding::round_to;

/// OriginAnchorer - 原点锚定器
pub struct OriginAnchorer {
    decimals: u32,
}

impl OriginAnchorer {
    /// # 参数
    /// - decimals: 平移后坐标保留的小数位（默认配置为 2）
    pub fn new(decimals: u32) -> Self {
        Self { decimals }
    }

    /// 平移点集到原点
    ///
    /// 空输入返回空输出; 孔深/孔距/排距/标识/时间戳原样复制
    pub fn anchor_points_to_origin(&self, points: &[DrillPoint]) -> Vec<DrillPoint> {
        if points.is_empty() {
            return Vec::new();
        }

        let min_x = points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let min_y = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);

        points
            .iter()
            .map(|p| {
                p.relocated(
                    round_to(p.x - min_x, self.decimals),
                    round_to(p.y - min_y, self.decimals),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::SiteScope;

    fn pt(id: &str, x: f64, y: f64) -> DrillPoint {
        DrillPoint::new(id, SiteScope::new(1, 1), x, y).with_pattern(12.0, 3.0, 2.5)
    }

    #[test]
    fn test_empty_is_noop() {
        assert!(OriginAnchorer::new(2).anchor_points_to_origin(&[]).is_empty());
    }

    #[test]
    fn test_translates_min_to_origin() {
        let points = vec![pt("A", 512_340.127, 7_210_005.5), pt("B", 512_343.131, 7_210_008.25)];
        let anchored = OriginAnchorer::new(2).anchor_points_to_origin(&points);

        assert_eq!(anchored[0].x, 0.0);
        assert_eq!(anchored[0].y, 0.0);
        assert_eq!(anchored[1].x, 3.0);
        assert_eq!(anchored[1].y, 2.75);

        // 非坐标字段不变
        assert_eq!(anchored[1].id, "B");
        assert_eq!(anchored[1].depth, 12.0);
        assert_eq!(anchored[1].created_at, points[1].created_at);
    }

    #[test]
    fn test_idempotent() {
        let anchorer = OriginAnchorer::new(2);
        let points = vec![pt("A", -4.0, 10.0), pt("B", 2.333, 7.0), pt("C", 0.5, 12.129)];

        let once = anchorer.anchor_points_to_origin(&points);
        let twice = anchorer.anchor_points_to_origin(&once);
        assert_eq!(once, twice);

        let min_x = once.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let min_y = once.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        assert_eq!(min_x, 0.0);
        assert_eq!(min_y, 0.0);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let points = vec![pt("A", 5.0, 5.0)];
        let _ = OriginAnchorer::new(2).anchor_points_to_origin(&points);
        assert_eq!(points[0].x, 5.0);
    }
}
