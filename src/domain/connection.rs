// ==========================================
// 穿孔爆破引擎 - 起爆连接
// ==========================================
// 职责: 孔间有向、带延时的连接（导爆索/连接器）
// 红线: sequence 只是作者填写的序号,不作为时序依据
// ==========================================

use crate::domain::types::ConnectorType;
use serde::{Deserialize, Serialize};

// ==========================================
// ConnectorEdge - 起爆连接边
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorEdge {
    pub id: String,
    pub from_id: String,
    pub to_id: String,
    #[serde(default)]
    pub connector_type: ConnectorType,
    /// 本段延时（毫秒）
    pub delay_ms: u32,
    /// 作者序号,仅用于同时刻排序
    #[serde(default)]
    pub sequence: i32,
    /// 标记 from_id 为起爆孔（t = 0）
    #[serde(default)]
    pub is_starting_hole: bool,
}

impl ConnectorEdge {
    pub fn new(
        id: impl Into<String>,
        from_id: impl Into<String>,
        to_id: impl Into<String>,
        delay_ms: u32,
    ) -> Self {
        Self {
            id: id.into(),
            from_id: from_id.into(),
            to_id: to_id.into(),
            connector_type: ConnectorType::default(),
            delay_ms,
            sequence: 0,
            is_starting_hole: false,
        }
    }

    pub fn with_sequence(mut self, sequence: i32) -> Self {
        self.sequence = sequence;
        self
    }

    pub fn with_connector_type(mut self, connector_type: ConnectorType) -> Self {
        self.connector_type = connector_type;
        self
    }

    /// 将源孔标记为起爆孔
    pub fn starting(mut self) -> Self {
        self.is_starting_hole = true;
        self
    }
}
