// ==========================================
// 穿孔爆破引擎 - 核心库
// ==========================================
// 技术栈: Rust + SQLite（配置存储）
// 系统定位: 孔网几何推断 + 起爆网络时序计算
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 炮孔/连接/时序记录
pub mod domain;

// 引擎层 - 纯计算
pub mod engine;

// 导入层 - 外部表格
pub mod importer;

// 配置层 - 引擎阈值
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::{
    ConnectorEdge, ConnectorType, DrillPoint, HoleInitiation, InitiationSchedule,
    ScheduleStatistics, SiteScope,
};

// 引擎
pub use engine::{
    BlastNetwork, BlastNetworkBuilder, ChargeDesignCalculator, DetonationScheduler, EngineError,
    EngineResult, GeometryValidator, GridPitch, OriginAnchorer, PitchEstimator,
};

// 配置
pub use config::EngineConfig;

// API
pub use api::{ApiError, ApiResult, PatternApi, SequenceApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "穿孔爆破引擎";
