// ==========================================
// 穿孔爆破引擎 - 起爆时序结果
// ==========================================
// 派生视图,按需重算,不落库
// ==========================================

use serde::{Deserialize, Serialize};

/// 单孔起爆时刻
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoleInitiation {
    pub point_id: String,
    /// 相对网络起点的绝对时刻（毫秒）
    pub initiation_ms: u64,
    /// 展示用排序键（来自连接的 sequence）
    pub sequence: Option<i32>,
}

/// InitiationSchedule - 起爆时序表
///
/// entries 按 (initiation_ms, sequence, 输入顺序) 升序
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InitiationSchedule {
    pub entries: Vec<HoleInitiation>,
    pub total_duration_ms: u64,
}

impl InitiationSchedule {
    /// 查询某孔的起爆时刻
    pub fn time_of(&self, point_id: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|e| e.point_id == point_id)
            .map(|e| e.initiation_ms)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 按顺序返回孔号
    pub fn ordered_ids(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.point_id.as_str()).collect()
    }
}

/// ScheduleStatistics - 分段（波次）统计
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScheduleStatistics {
    pub hole_count: usize,
    pub total_duration_ms: u64,
    /// 不同起爆时刻的数量
    pub wave_count: usize,
    /// 同一时刻起爆的最大孔数
    pub max_simultaneous: usize,
    /// 相邻波次平均间隔（毫秒）
    pub average_interval_ms: f64,
}

impl ScheduleStatistics {
    /// 按时序表统计波次（同一时刻起爆的孔视为一个波次）
    pub fn from_schedule(schedule: &InitiationSchedule) -> Self {
        if schedule.is_empty() {
            return Self::default();
        }

        // entries 已按时刻升序
        let mut waves: Vec<(u64, usize)> = Vec::new();
        for entry in &schedule.entries {
            match waves.last_mut() {
                Some((time, count)) if *time == entry.initiation_ms => *count += 1,
                _ => waves.push((entry.initiation_ms, 1)),
            }
        }

        let max_simultaneous = waves.iter().map(|(_, c)| *c).max().unwrap_or(0);
        let average_interval_ms = if waves.len() > 1 {
            let first = waves[0].0;
            let last = waves[waves.len() - 1].0;
            (last - first) as f64 / (waves.len() - 1) as f64
        } else {
            0.0
        };

        Self {
            hole_count: schedule.len(),
            total_duration_ms: schedule.total_duration_ms,
            wave_count: waves.len(),
            max_simultaneous,
            average_interval_ms,
        }
    }
}
