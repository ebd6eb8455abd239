// ==========================================
// 穿孔爆破引擎 - API层错误类型
// ==========================================
// 职责: 汇总引擎/导入/配置错误,转换为调用方可展示的错误
// 红线: 引擎错误原样保留,携带的孔号/连接号用于前端高亮
// ==========================================

use crate::config::error::ConfigError;
use crate::engine::error::EngineError;
use crate::importer::error::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    /// 几何/网络/时序校验失败
    #[error("校验失败: {0}")]
    Engine(EngineError),

    // ==========================================
    // 导入错误
    // ==========================================
    #[error("文件导入失败: {0}")]
    ImportError(String),

    #[error("数据映射失败: {0}")]
    MappingError(String),

    // ==========================================
    // 配置错误
    // ==========================================
    #[error("配置错误: {0}")]
    ConfigError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        ApiError::Engine(err)
    }
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::FileNotFound(path) => ApiError::NotFound(format!("文件 {} 不存在", path)),
            ImportError::UnsupportedFormat(ext) => {
                ApiError::InvalidInput(format!("文件格式不支持: {}", ext))
            }
            ImportError::FieldMappingError { .. } | ImportError::TypeConversionError { .. } => {
                ApiError::MappingError(err.to_string())
            }
            ImportError::Other(inner) => ApiError::Other(inner),
            other => ApiError::ImportError(other.to_string()),
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::InvalidValue { .. } => ApiError::InvalidInput(err.to_string()),
            other => ApiError::ConfigError(other.to_string()),
        }
    }
}

impl ApiError {
    /// 取出引擎错误（用于按孔号/连接号定位）
    pub fn engine_error(&self) -> Option<&EngineError> {
        match self {
            ApiError::Engine(e) => Some(e),
            _ => None,
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_is_preserved() {
        let api: ApiError = EngineError::SelfLoop {
            edge_id: "e7".to_string(),
        }
        .into();

        assert_eq!(
            api.engine_error(),
            Some(&EngineError::SelfLoop {
                edge_id: "e7".to_string()
            })
        );
        assert!(api.to_string().contains("e7"));
    }

    #[test]
    fn test_import_error_mapping() {
        let api: ApiError = ImportError::FileNotFound("a.csv".to_string()).into();
        assert!(matches!(api, ApiError::NotFound(_)));

        let api: ApiError = ImportError::FieldMappingError {
            row: 3,
            message: "缺少必填字段: x".to_string(),
        }
        .into();
        assert!(matches!(api, ApiError::MappingError(ref m) if m.contains("行 3")));
    }

    #[test]
    fn test_config_error_mapping() {
        let api: ApiError = ConfigError::LockError("poisoned".to_string()).into();
        assert!(matches!(api, ApiError::ConfigError(_)));
    }
}
