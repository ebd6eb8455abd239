// ==========================================
// 穿孔爆破引擎 - 配置层
// ==========================================
// 职责: 引擎阈值配置,支持全局/场地两级覆写
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod config_reader_trait;
pub mod engine_config;
pub mod error;

// 重导出核心配置类型
pub use config_manager::{config_keys, get_default_db_path, ConfigManager, ConfigScope};
pub use config_reader_trait::{EngineConfigReader, StaticConfigReader};
pub use engine_config::EngineConfig;
pub use error::{ConfigError, ConfigResult};
