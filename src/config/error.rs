// ==========================================
// 穿孔爆破引擎 - 配置层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 配置层错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("数据库错误: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("配置锁获取失败: {0}")]
    LockError(String),

    #[error("配置快照格式错误: {0}")]
    SnapshotFormat(#[from] serde_json::Error),

    #[error("配置值无效 (key: {key}, value: {value}): {message}")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
