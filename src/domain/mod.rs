// ==========================================
// 穿孔爆破引擎 - 领域模型层
// ==========================================
// 职责: 定义炮孔、连接、时序结果等纯数据记录
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod connection;
pub mod drill_point;
pub mod schedule;
pub mod types;

// 重导出核心类型
pub use connection::ConnectorEdge;
pub use drill_point::DrillPoint;
pub use schedule::{HoleInitiation, InitiationSchedule, ScheduleStatistics};
pub use types::{ConnectorType, SiteScope};
