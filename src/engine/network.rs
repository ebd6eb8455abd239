// ==========================================
// 穿孔爆破引擎 - 起爆网络构建
// ==========================================
// 职责: 由炮孔 + 连接边构建有向图并做结构校验
// 输入: 单场地全部炮孔 + 全部连接
// 输出: 不可变 BlastNetwork（邻接表 + 起爆孔集合 + 拓扑序）
// 红线: 快速失败,遇到第一个错误即返回; 不修改输入
// ==========================================

mod builder;
mod graph;

#[cfg(test)]
mod tests;

pub use builder::BlastNetworkBuilder;
pub use graph::{BlastNetwork, OutEdge};
