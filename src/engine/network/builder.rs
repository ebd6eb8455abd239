use super::graph::{BlastNetwork, OutEdge};
use crate::config::EngineConfig;
use crate::domain::connection::ConnectorEdge;
use crate::domain::drill_point::DrillPoint;
use crate::engine::error::{EngineError, EngineResult};
use std::collections::{HashMap, HashSet};

// DFS 访问状态
const UNVISITED: u8 = 0;
const ON_STACK: u8 = 1;
const DONE: u8 = 2;

// ==========================================
// BlastNetworkBuilder - 起爆网络构建器
// ==========================================
pub struct BlastNetworkBuilder {
    config: EngineConfig,
}

impl BlastNetworkBuilder {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// 构建并校验起爆网络
    ///
    /// # 校验顺序（每一步覆盖全部连接后才进入下一步）
    /// 0. 炮孔编号唯一
    /// 1. 连接两端炮孔存在（先查 from 再查 to）
    /// 2. 无自环
    /// 3. 无重复 (from, to)
    /// 4. 存在连接时至少有一个起爆孔
    /// 5. 无环
    ///
    /// 起爆孔 = 连接上显式标记 is_starting_hole 的源孔,
    /// 开启 implicit_entry_points 时再加上所有入度为 0 的炮孔
    pub fn build(
        &self,
        points: &[DrillPoint],
        edges: &[ConnectorEdge],
    ) -> EngineResult<BlastNetwork> {
        // ===== 0. 炮孔编号 =====
        let mut index: HashMap<String, usize> = HashMap::with_capacity(points.len());
        for (idx, point) in points.iter().enumerate() {
            if index.insert(point.id.clone(), idx).is_some() {
                return Err(EngineError::DuplicatePoint {
                    point_id: point.id.clone(),
                });
            }
        }

        // ===== 1. 悬空连接 =====
        for edge in edges {
            for endpoint in [&edge.from_id, &edge.to_id] {
                if !index.contains_key(endpoint.as_str()) {
                    return Err(EngineError::DanglingEdge {
                        edge_id: edge.id.clone(),
                        missing_point_id: endpoint.clone(),
                    });
                }
            }
        }

        // ===== 2. 自环 =====
        if let Some(edge) = edges.iter().find(|e| e.from_id == e.to_id) {
            return Err(EngineError::SelfLoop {
                edge_id: edge.id.clone(),
            });
        }

        // ===== 3. 重复连接 =====
        let mut seen: HashSet<(&str, &str)> = HashSet::with_capacity(edges.len());
        for edge in edges {
            if !seen.insert((edge.from_id.as_str(), edge.to_id.as_str())) {
                return Err(EngineError::DuplicateEdge {
                    from_id: edge.from_id.clone(),
                    to_id: edge.to_id.clone(),
                });
            }
        }

        // 邻接表（出边保持连接输入顺序）
        let n = points.len();
        let mut outgoing: Vec<Vec<OutEdge>> = vec![Vec::new(); n];
        let mut in_degree = vec![0usize; n];
        let mut incoming_seq: Vec<Option<i32>> = vec![None; n];
        let mut outgoing_seq: Vec<Option<i32>> = vec![None; n];
        let mut entry = vec![false; n];

        for (edge_index, edge) in edges.iter().enumerate() {
            let from = index[edge.from_id.as_str()];
            let to = index[edge.to_id.as_str()];

            outgoing[from].push(OutEdge {
                target: to,
                delay_ms: edge.delay_ms,
                sequence: edge.sequence,
                edge_index,
            });
            in_degree[to] += 1;
            incoming_seq[to] = min_seq(incoming_seq[to], edge.sequence);
            outgoing_seq[from] = min_seq(outgoing_seq[from], edge.sequence);

            if edge.is_starting_hole {
                entry[from] = true;
            }
        }

        // 孤立孔（无任何连接）总是起爆孔; 显式模式只约束接入网络的孔
        let isolated: Vec<bool> = (0..n)
            .map(|idx| in_degree[idx] == 0 && outgoing[idx].is_empty())
            .collect();
        for idx in 0..n {
            if isolated[idx] || (self.config.implicit_entry_points && in_degree[idx] == 0) {
                entry[idx] = true;
            }
        }

        // ===== 4. 起爆孔 =====
        let has_connected_entry = (0..n).any(|idx| entry[idx] && !isolated[idx]);
        if !edges.is_empty() && !has_connected_entry {
            // 隐式模式下无起爆孔必然意味着存在环,优先报告环成员
            if let Err(cycle) = depth_first_order(&outgoing) {
                return Err(cycle_error(points, cycle));
            }
            return Err(EngineError::NoStartingHole);
        }

        // ===== 5. 环路检测 + 拓扑序 =====
        let topo_order = depth_first_order(&outgoing).map_err(|cycle| cycle_error(points, cycle))?;

        let hole_sequence = incoming_seq
            .into_iter()
            .zip(outgoing_seq)
            .map(|(incoming, outgoing)| incoming.or(outgoing))
            .collect();

        Ok(BlastNetwork {
            points: points.to_vec(),
            edges: edges.to_vec(),
            index,
            outgoing,
            in_degree,
            entry,
            topo_order,
            hole_sequence,
        })
    }
}

fn min_seq(current: Option<i32>, candidate: i32) -> Option<i32> {
    Some(current.map_or(candidate, |c| c.min(candidate)))
}

fn cycle_error(points: &[DrillPoint], cycle: Vec<usize>) -> EngineError {
    EngineError::CycleDetected {
        cycle: cycle.into_iter().map(|idx| points[idx].id.clone()).collect(),
    }
}

/// 迭代式 DFS
///
/// 无环时返回拓扑序（后序逆序）; 遇到回边时返回环成员（按遍历顺序）
fn depth_first_order(outgoing: &[Vec<OutEdge>]) -> Result<Vec<usize>, Vec<usize>> {
    let n = outgoing.len();
    let mut state = vec![UNVISITED; n];
    let mut post_order = Vec::with_capacity(n);
    // (节点, 下一条待访问出边)
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for root in 0..n {
        if state[root] != UNVISITED {
            continue;
        }
        state[root] = ON_STACK;
        stack.push((root, 0));

        while let Some(top) = stack.last_mut() {
            let (node, next) = *top;
            if let Some(edge) = outgoing[node].get(next) {
                top.1 += 1;
                let target = edge.target;
                match state[target] {
                    UNVISITED => {
                        state[target] = ON_STACK;
                        stack.push((target, 0));
                    }
                    ON_STACK => {
                        let start = stack.iter().position(|(v, _)| *v == target).unwrap_or(0);
                        return Err(stack[start..].iter().map(|(v, _)| *v).collect());
                    }
                    _ => {}
                }
            } else {
                state[node] = DONE;
                post_order.push(node);
                stack.pop();
            }
        }
    }

    post_order.reverse();
    Ok(post_order)
}
