// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use drill_blast_engine::domain::{ConnectorEdge, DrillPoint, SiteScope};

// ==========================================
// 孔网构建器
// ==========================================
// 生成 rows × cols 的规则孔网,孔号形如 R{row}C{col}

pub struct GridBuilder {
    scope: SiteScope,
    rows: usize,
    cols: usize,
    spacing: f64,
    burden: f64,
    origin: (f64, f64),
    depth: f64,
}

impl GridBuilder {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            scope: SiteScope::new(1, 1),
            rows,
            cols,
            spacing: 3.0,
            burden: 2.5,
            origin: (0.0, 0.0),
            depth: 12.0,
        }
    }

    pub fn scope(mut self, scope: SiteScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn pitch(mut self, spacing: f64, burden: f64) -> Self {
        self.spacing = spacing;
        self.burden = burden;
        self
    }

    pub fn origin(mut self, x: f64, y: f64) -> Self {
        self.origin = (x, y);
        self
    }

    pub fn build(self) -> Vec<DrillPoint> {
        let mut points = Vec::with_capacity(self.rows * self.cols);
        for row in 0..self.rows {
            for col in 0..self.cols {
                points.push(
                    DrillPoint::new(
                        hole_id(row, col),
                        self.scope,
                        self.origin.0 + col as f64 * self.spacing,
                        self.origin.1 + row as f64 * self.burden,
                    )
                    .with_pattern(self.depth, self.spacing, self.burden),
                );
            }
        }
        points
    }
}

pub fn hole_id(row: usize, col: usize) -> String {
    format!("R{}C{}", row, col)
}

/// 按孔号列表生成一排炮孔（间距 3m）
pub fn points(ids: &[&str]) -> Vec<DrillPoint> {
    ids.iter()
        .enumerate()
        .map(|(i, id)| DrillPoint::new(*id, SiteScope::new(1, 1), i as f64 * 3.0, 0.0))
        .collect()
}

/// 连接简写
pub fn edge(from: &str, to: &str, delay_ms: u32) -> ConnectorEdge {
    ConnectorEdge::new(format!("{}->{}", from, to), from, to, delay_ms)
}

// ==========================================
// 起爆网络构建器
// ==========================================
// 排间接力: 每排从首孔沿排传爆（孔间延时）,首列逐排传爆（排间延时）

pub fn echelon_edges(rows: usize, cols: usize, hole_delay: u32, row_delay: u32) -> Vec<ConnectorEdge> {
    let mut edges = Vec::new();
    let mut sequence = 0;

    for row in 0..rows {
        if row > 0 {
            let mut e = edge(&hole_id(row - 1, 0), &hole_id(row, 0), row_delay).with_sequence(sequence);
            sequence += 1;
            if row == 1 {
                e = e.starting();
            }
            edges.push(e);
        }
        for col in 1..cols {
            edges.push(
                edge(&hole_id(row, col - 1), &hole_id(row, col), hole_delay).with_sequence(sequence),
            );
            sequence += 1;
        }
    }

    if rows == 1 && !edges.is_empty() {
        edges[0] = edges[0].clone().starting();
    }
    edges
}
