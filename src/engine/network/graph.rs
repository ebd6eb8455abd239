use crate::domain::connection::ConnectorEdge;
use crate::domain::drill_point::DrillPoint;
use std::collections::HashMap;

/// 出边（索引化）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutEdge {
    /// 目标孔下标
    pub target: usize,
    pub delay_ms: u32,
    pub sequence: i32,
    /// 原始连接在 edges() 中的下标
    pub edge_index: usize,
}

// ==========================================
// BlastNetwork - 已校验的起爆网络
// ==========================================
// 构建后不可变,可通过 Arc 在多个调度请求间共享
#[derive(Debug, Clone)]
pub struct BlastNetwork {
    pub(super) points: Vec<DrillPoint>,
    pub(super) edges: Vec<ConnectorEdge>,
    pub(super) index: HashMap<String, usize>,
    pub(super) outgoing: Vec<Vec<OutEdge>>,
    pub(super) in_degree: Vec<usize>,
    pub(super) entry: Vec<bool>,
    pub(super) topo_order: Vec<usize>,
    pub(super) hole_sequence: Vec<Option<i32>>,
}

impl BlastNetwork {
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn points(&self) -> &[DrillPoint] {
        &self.points
    }

    pub fn edges(&self) -> &[ConnectorEdge] {
        &self.edges
    }

    /// 越界返回 None
    pub fn point(&self, idx: usize) -> Option<&DrillPoint> {
        self.points.get(idx)
    }

    pub fn index_of(&self, point_id: &str) -> Option<usize> {
        self.index.get(point_id).copied()
    }

    /// 越界返回空切片
    pub fn outgoing(&self, idx: usize) -> &[OutEdge] {
        self.outgoing.get(idx).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn in_degree(&self, idx: usize) -> usize {
        self.in_degree.get(idx).copied().unwrap_or(0)
    }

    /// 是否为起爆孔（显式标记、隐式入度为 0 或孤立孔）; 越界为 false
    pub fn is_entry(&self, idx: usize) -> bool {
        self.entry.get(idx).copied().unwrap_or(false)
    }

    /// 起爆孔编号（按炮孔输入顺序）
    pub fn entry_ids(&self) -> Vec<&str> {
        self.points
            .iter()
            .enumerate()
            .filter(|(idx, _)| self.entry[*idx])
            .map(|(_, p)| p.id.as_str())
            .collect()
    }

    /// 拓扑序（孔下标）
    pub fn topological_order(&self) -> &[usize] {
        &self.topo_order
    }

    /// 展示排序键: 入边最小 sequence,无入边取出边最小 sequence
    pub fn hole_sequence(&self, idx: usize) -> Option<i32> {
        self.hole_sequence.get(idx).copied().flatten()
    }
}
