// ==========================================
// 穿孔爆破引擎 - 引擎配置
// ==========================================
// 职责: 阈值显式传入各引擎组件,不使用全局常量
// ==========================================

use serde::{Deserialize, Serialize};

/// 引擎配置
///
/// 所有阈值均可按测试/场地覆写
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// 重复坐标判定容差（米,逐轴比较）
    pub coordinate_tolerance_m: f64,
    /// 单场地最大炮孔数
    pub max_drill_points: usize,
    /// 孔网间距最小有效步长（米）,低于此值视为抖动
    pub grid_pitch_min_threshold_m: f64,
    /// 众数支持度阈值（0.10 = 10%）
    pub grid_pitch_support_threshold: f64,
    /// 无法推断时的默认间距（米）
    pub default_pitch_m: f64,
    /// 坐标保留小数位
    pub coordinate_decimals: u32,
    /// 入度为 0 的孔是否隐式视为起爆孔
    pub implicit_entry_points: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            coordinate_tolerance_m: 0.01,
            max_drill_points: 500,
            grid_pitch_min_threshold_m: 0.5,
            grid_pitch_support_threshold: 0.10,
            default_pitch_m: 1.0,
            coordinate_decimals: 2,
            implicit_entry_points: true,
        }
    }
}

impl EngineConfig {
    /// 验证配置有效性
    ///
    /// # 验证规则
    /// 1. 容差、步长、默认间距必须为有限正数
    /// 2. 支持度必须在 [0.0, 1.0]
    /// 3. 最大孔数必须大于 0
    /// 4. 小数位不超过 6
    pub fn validate(&self) -> Result<(), String> {
        let positive = [
            ("coordinate_tolerance_m", self.coordinate_tolerance_m),
            ("grid_pitch_min_threshold_m", self.grid_pitch_min_threshold_m),
            ("default_pitch_m", self.default_pitch_m),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("{} 必须为有限正数,实际 {}", name, value));
            }
        }

        let support = self.grid_pitch_support_threshold;
        if !support.is_finite() || !(0.0..=1.0).contains(&support) {
            return Err(format!(
                "grid_pitch_support_threshold {} 超出有效范围 [0.0, 1.0]",
                support
            ));
        }

        if self.max_drill_points == 0 {
            return Err("max_drill_points 必须大于 0".to_string());
        }

        if self.coordinate_decimals > 6 {
            return Err(format!(
                "coordinate_decimals {} 超出有效范围 [0, 6]",
                self.coordinate_decimals
            ));
        }

        Ok(())
    }
}
