// ==========================================
// 穿孔爆破引擎 - 装药设计计算
// ==========================================
// 职责: 填塞长度/孔径推荐、炸药单耗、参数合理性判定
// 红线: 纯函数,无状态; 单位统一为米
// ==========================================

use crate::engine::rounding::round_to;
use std::f64::consts::PI;

/// 默认装药密度（g/cm³）
pub const DEFAULT_EXPLOSIVE_DENSITY: f64 = 1.2;

/// 标准钻头规格（米,升序）
pub const STANDARD_BIT_SIZES_M: [f64; 15] = [
    0.089, 0.102, 0.115, 0.127, 0.140, 0.152, 0.165, 0.178, 0.191, 0.203, 0.216, 0.229, 0.254,
    0.279, 0.305,
];

#[derive(Debug, Clone, Copy, Default)]
pub struct ChargeDesignCalculator;

impl ChargeDesignCalculator {
    pub fn new() -> Self {
        Self
    }

    /// 推荐填塞长度
    ///
    /// 取 max(25% 孔深, 排距),限制在 [max(1.0, 0.8 排距), min(40% 孔深, 8.0)],
    /// 区间倒挂时下限优先; 结果保留 1 位小数
    pub fn optimal_stemming(&self, depth: f64, burden: f64) -> f64 {
        let preferred = (depth * 0.25).max(burden);
        let lower = (burden * 0.8).max(1.0);
        let upper = (depth * 0.4).min(8.0);

        round_to(lower.max(preferred.min(upper)), 1)
    }

    /// 推荐孔径（就近取标准钻头规格,距离相同取较小规格）
    pub fn optimal_diameter(&self, burden: f64, spacing: f64) -> f64 {
        let by_burden = burden / 35.0;
        let by_area = (burden * spacing).sqrt() / 20.0;
        let target = by_burden.max(by_area);

        let mut best = STANDARD_BIT_SIZES_M[0];
        for size in STANDARD_BIT_SIZES_M.iter().skip(1) {
            if (size - target).abs() < (best - target).abs() {
                best = *size;
            }
        }
        best
    }

    /// 炸药单耗 = 装药质量 / 岩石体积
    ///
    /// 装药长度 = max(0, 孔深 - 填塞); 岩石体积 <= 0 时返回 0
    pub fn powder_factor(
        &self,
        diameter: f64,
        depth: f64,
        stemming: f64,
        burden: f64,
        spacing: f64,
        explosive_density: f64,
    ) -> f64 {
        let radius = diameter / 2.0;
        let charge_length = (depth - stemming).max(0.0);
        let charge_mass = PI * radius * radius * charge_length * explosive_density;
        let rock_volume = burden * spacing * depth;

        if rock_volume > 0.0 {
            charge_mass / rock_volume
        } else {
            0.0
        }
    }

    /// 填塞长度是否合理: <= 50% 孔深, >= 0.5m, >= 60% 排距
    pub fn validate_stemming(&self, stemming: f64, depth: f64, burden: f64) -> bool {
        if stemming < 0.0 || depth <= 0.0 || burden <= 0.0 {
            return false;
        }
        stemming <= depth * 0.5 && stemming >= 0.5 && stemming >= burden * 0.6
    }

    /// 孔径是否合理: 排距的 1/50 ~ 1/15,且在 [0.05, 0.5] 米
    pub fn validate_diameter(&self, diameter: f64, burden: f64, spacing: f64) -> bool {
        if diameter <= 0.0 || burden <= 0.0 || spacing <= 0.0 {
            return false;
        }
        diameter <= burden / 15.0
            && diameter >= burden / 50.0
            && (0.05..=0.5).contains(&diameter)
    }
}
