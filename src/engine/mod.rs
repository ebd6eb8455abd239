// ==========================================
// 穿孔爆破引擎 - 引擎层
// ==========================================
// 职责: 孔网几何推断 + 起爆网络校验 + 起爆时序计算
// 红线: Engine 为纯同步计算,不读库、不打日志、不修改输入
// ==========================================

pub mod anchor;
pub mod charge_design;
pub mod error;
pub mod geometry;
pub mod network;
pub mod pitch;
pub mod rounding;
pub mod scheduler;

// 重导出核心引擎
pub use anchor::OriginAnchorer;
pub use charge_design::ChargeDesignCalculator;
pub use error::{EngineError, EngineResult};
pub use geometry::GeometryValidator;
pub use network::{BlastNetwork, BlastNetworkBuilder, OutEdge};
pub use pitch::{GridPitch, PitchEstimator};
pub use scheduler::DetonationScheduler;
