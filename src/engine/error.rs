// ==========================================
// 穿孔爆破引擎 - 引擎错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 均为数据校验/结构错误,不可重试,必须携带定位信息
// ==========================================

use thiserror::Error;

/// 引擎错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    // ===== 几何校验错误 =====
    #[error("坐标无效: ({x}, {y})")]
    InvalidCoordinate { x: f64, y: f64 },

    #[error("坐标重复: ({x}, {y}) 与已有炮孔重合")]
    DuplicateCoordinate { x: f64, y: f64 },

    #[error("炮孔数量超出上限: {max}")]
    PointCountExceeded { max: usize },

    // ===== 网络结构错误 =====
    #[error("炮孔编号重复: {point_id}")]
    DuplicatePoint { point_id: String },

    #[error("连接 {edge_id} 引用了不存在的炮孔 {missing_point_id}")]
    DanglingEdge {
        edge_id: String,
        missing_point_id: String,
    },

    #[error("连接 {edge_id} 首尾为同一炮孔")]
    SelfLoop { edge_id: String },

    #[error("重复连接: {from_id} -> {to_id}")]
    DuplicateEdge { from_id: String, to_id: String },

    #[error("起爆网络缺少起爆孔")]
    NoStartingHole,

    #[error("起爆网络存在环路: {}", cycle.join(" -> "))]
    CycleDetected { cycle: Vec<String> },

    // ===== 时序错误 =====
    #[error("炮孔 {point_id} 无法从任何起爆孔到达")]
    UnreachableHole { point_id: String },
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
