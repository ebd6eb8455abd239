// ==========================================
// 穿孔爆破引擎 - API 层
// ==========================================
// 职责: 读取场地配置、调用引擎、统一日志与错误转换
// ==========================================

pub mod error;
pub mod pattern_api;
pub mod sequence_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use pattern_api::{ChargeAdvice, PatternAnalysis, PatternApi, PatternImport};
pub use sequence_api::{schedule_network, SequenceApi, SequenceReport, SimulationJob};
