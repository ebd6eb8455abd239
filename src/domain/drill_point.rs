// ==========================================
// 穿孔爆破引擎 - 炮孔实体
// ==========================================
// 红线: 创建后不可原地修改,坐标锚定产生新点集
// ==========================================

use crate::domain::types::SiteScope;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// DrillPoint - 炮孔
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillPoint {
    // ===== 标识 =====
    pub id: String,
    pub scope: SiteScope,

    // ===== 坐标（米） =====
    pub x: f64,
    pub y: f64,

    // ===== 孔参数（米） =====
    pub depth: f64,
    pub spacing: f64,
    pub burden: f64,
    /// 孔径,0 表示未指定
    #[serde(default)]
    pub diameter: f64,
    /// 填塞长度,0 表示未指定
    #[serde(default)]
    pub stemming: f64,

    // ===== 时间戳 =====
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DrillPoint {
    /// 以坐标创建炮孔,其余参数置零
    pub fn new(id: impl Into<String>, scope: SiteScope, x: f64, y: f64) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            scope,
            x,
            y,
            depth: 0.0,
            spacing: 0.0,
            burden: 0.0,
            diameter: 0.0,
            stemming: 0.0,
            created_at: now,
            updated_at: now,
        }
    }

    /// 设置孔深/孔距/排距
    pub fn with_pattern(mut self, depth: f64, spacing: f64, burden: f64) -> Self {
        self.depth = depth;
        self.spacing = spacing;
        self.burden = burden;
        self
    }

    /// 复制一个仅坐标不同的新炮孔
    pub fn relocated(&self, x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..self.clone()
        }
    }
}
