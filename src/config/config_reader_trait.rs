// ==========================================
// 穿孔爆破引擎 - 引擎配置读取 Trait
// ==========================================
// 职责: 定义 API 层所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::config::engine_config::EngineConfig;
use crate::config::error::ConfigResult;
use crate::domain::types::SiteScope;
use async_trait::async_trait;

// ==========================================
// EngineConfigReader Trait
// ==========================================
// 实现者: ConfigManager（从 config_kv 表读取）
#[async_trait]
pub trait EngineConfigReader: Send + Sync {
    /// 获取生效的引擎配置
    ///
    /// # 参数
    /// - scope: None 表示仅读取全局配置
    ///
    /// # 覆写顺序
    /// 默认值 → global → site
    async fn get_engine_config(&self, scope: Option<SiteScope>) -> ConfigResult<EngineConfig>;
}

/// 固定配置读取器（测试/命令行无数据库时使用）
pub struct StaticConfigReader {
    config: EngineConfig,
}

impl StaticConfigReader {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }
}

impl Default for StaticConfigReader {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[async_trait]
impl EngineConfigReader for StaticConfigReader {
    async fn get_engine_config(&self, _scope: Option<SiteScope>) -> ConfigResult<EngineConfig> {
        Ok(self.config.clone())
    }
}
