// ==========================================
// 穿孔爆破引擎 - 数值舍入
// ==========================================
// 规则: 四舍五入远离零（half away from zero）
// ==========================================

/// 按小数位舍入
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// 舍入到 0.1 的整数档位（返回以 0.1 为单位的整数键）
pub fn tenth_bucket(value: f64) -> i64 {
    (value * 10.0).round() as i64
}
