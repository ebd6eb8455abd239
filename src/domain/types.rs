// ==========================================
// 穿孔爆破引擎 - 领域类型定义
// ==========================================
// 职责: 作用域、连接器类型等基础值类型
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 作用域 (Project + Site)
// ==========================================
// 孔号只在同一 project_id + site_id 内唯一
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SiteScope {
    pub project_id: i64,
    pub site_id: i64,
}

impl SiteScope {
    pub fn new(project_id: i64, site_id: i64) -> Self {
        Self {
            project_id,
            site_id,
        }
    }

    /// config_kv 中使用的 scope_id
    pub fn scope_key(&self) -> String {
        format!("site/{}/{}", self.project_id, self.site_id)
    }
}

impl fmt::Display for SiteScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}/S{}", self.project_id, self.site_id)
    }
}

// ==========================================
// 连接器类型 (Connector Type)
// ==========================================
// 仅作信息展示,不参与时序计算
// 序列化格式: SCREAMING_SNAKE_CASE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConnectorType {
    #[default]
    DetonatingCord, // 导爆索
    Connectors,     // 连接器(雷管)
}

impl ConnectorType {
    /// 旧 API 使用的数值编码
    pub fn api_code(&self) -> i32 {
        match self {
            ConnectorType::DetonatingCord => 0,
            ConnectorType::Connectors => 1,
        }
    }
}

impl fmt::Display for ConnectorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectorType::DetonatingCord => write!(f, "DETONATING_CORD"),
            ConnectorType::Connectors => write!(f, "CONNECTORS"),
        }
    }
}

impl FromStr for ConnectorType {
    type Err = String;

    /// 兼容三种写法: 数值编码 / 前端小写 / 序列化大写
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "0" | "detonating_cord" | "detonatingcord" | "cord" => {
                Ok(ConnectorType::DetonatingCord)
            }
            "1" | "connectors" | "connector" => Ok(ConnectorType::Connectors),
            _ => Err(format!("未知的连接器类型: {}", s)),
        }
    }
}
