// ==========================================
// 穿孔爆破引擎 - 起爆时序计算
// ==========================================
// 职责: 在已校验的起爆网络上计算每孔绝对起爆时刻
// 规则: 起爆孔 t = 0; 多条入边取最晚到达信号 max(t(u) + delay)
// 红线: 时序只由网络拓扑和延时决定,sequence 只参与同时刻排序
// ==========================================

use crate::domain::schedule::{HoleInitiation, InitiationSchedule, ScheduleStatistics};
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::network::BlastNetwork;

// ==========================================
// DetonationScheduler - 起爆时序计算器
// ==========================================
pub struct DetonationScheduler;

impl DetonationScheduler {
    pub fn new() -> Self {
        Self
    }

    /// 计算起爆时序
    ///
    /// 按拓扑序单遍松弛,O(V + E)。起爆孔固定为 0,不接受入边改写
    ///
    /// # 错误
    /// 存在无法从任何起爆孔到达的炮孔 → UnreachableHole（按炮孔输入顺序报告第一个）
    pub fn schedule(&self, network: &BlastNetwork) -> EngineResult<InitiationSchedule> {
        let n = network.point_count();
        let mut times: Vec<Option<u64>> = (0..n)
            .map(|idx| network.is_entry(idx).then_some(0))
            .collect();

        for &node in network.topological_order() {
            let Some(base) = times[node] else {
                continue;
            };
            for edge in network.outgoing(node) {
                if network.is_entry(edge.target) {
                    continue;
                }
                let candidate = base + u64::from(edge.delay_ms);
                times[edge.target] = Some(match times[edge.target] {
                    Some(current) => current.max(candidate),
                    None => candidate,
                });
            }
        }

        let mut entries = Vec::with_capacity(n);
        for (idx, (point, time)) in network.points().iter().zip(&times).enumerate() {
            let Some(initiation_ms) = *time else {
                return Err(EngineError::UnreachableHole {
                    point_id: point.id.clone(),
                });
            };
            entries.push((
                idx,
                HoleInitiation {
                    point_id: point.id.clone(),
                    initiation_ms,
                    sequence: network.hole_sequence(idx),
                },
            ));
        }

        // 时刻 → 序号（无序号排后）→ 输入顺序
        entries.sort_by(|(ia, a), (ib, b)| {
            a.initiation_ms
                .cmp(&b.initiation_ms)
                .then_with(|| a.sequence.is_none().cmp(&b.sequence.is_none()))
                .then_with(|| a.sequence.cmp(&b.sequence))
                .then_with(|| ia.cmp(ib))
        });

        let total_duration_ms = entries
            .iter()
            .map(|(_, e)| e.initiation_ms)
            .max()
            .unwrap_or(0);

        Ok(InitiationSchedule {
            entries: entries.into_iter().map(|(_, e)| e).collect(),
            total_duration_ms,
        })
    }

    /// 波次统计（同一时刻起爆的孔视为一个波次）
    pub fn statistics(&self, schedule: &InitiationSchedule) -> ScheduleStatistics {
        ScheduleStatistics::from_schedule(schedule)
    }
}

impl Default for DetonationScheduler {
    fn default() -> Self {
        Self::new()
    }
}
