// ==========================================
// 穿孔爆破引擎 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::config_reader_trait::EngineConfigReader;
use crate::config::engine_config::EngineConfig;
use crate::config::error::{ConfigError, ConfigResult};
use crate::db::{configure_sqlite_connection, init_config_schema, open_sqlite_connection};
use crate::domain::types::SiteScope;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

/// 快照中不回写的元信息键前缀
const META_KEY_PREFIX: &str = "__meta_";

// ==========================================
// ConfigScope - 配置作用域
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigScope {
    Global,            // 全局
    Site(SiteScope),   // 场地
}

impl ConfigScope {
    pub fn scope_id(&self) -> String {
        match self {
            ConfigScope::Global => "global".to_string(),
            ConfigScope::Site(scope) => scope.scope_key(),
        }
    }
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径（不存在时自动建表）
    pub fn new(db_path: &str) -> ConfigResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        init_config_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：会对传入连接再次应用统一 PRAGMA 与建表（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> ConfigResult<Self> {
        {
            let guard = conn
                .lock()
                .map_err(|e| ConfigError::LockError(e.to_string()))?;
            configure_sqlite_connection(&guard)?;
            init_config_schema(&guard)?;
        }

        Ok(Self { conn })
    }

    fn lock(&self) -> ConfigResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| ConfigError::LockError(e.to_string()))
    }

    /// 读取指定作用域的配置值
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_config_value(&self, scope: &ConfigScope, key: &str) -> ConfigResult<Option<String>> {
        let conn = self.lock()?;
        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = ?1 AND key = ?2",
                params![scope.scope_id(), key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// 写入配置值（UPSERT）
    pub fn set_config_value(&self, scope: &ConfigScope, key: &str, value: &str) -> ConfigResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES (?1, ?2, ?3)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?3, updated_at = datetime('now')",
            params![scope.scope_id(), key, value],
        )?;

        tracing::info!(
            scope_id = %scope.scope_id(),
            config_key = key,
            value = value,
            "配置已更新"
        );
        Ok(())
    }

    /// 删除配置值
    ///
    /// # 返回
    /// - true: 删除成功
    /// - false: 配置不存在
    pub fn remove_config_value(&self, scope: &ConfigScope, key: &str) -> ConfigResult<bool> {
        let conn = self.lock()?;
        let affected = conn.execute(
            "DELETE FROM config_kv WHERE scope_id = ?1 AND key = ?2",
            params![scope.scope_id(), key],
        )?;
        Ok(affected > 0)
    }

    fn scope_values(&self, scope: &ConfigScope) -> ConfigResult<BTreeMap<String, String>> {
        let conn = self.lock()?;
        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = ?1 ORDER BY key")?;
        let rows = stmt.query_map(params![scope.scope_id()], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut values = BTreeMap::new();
        for row in rows {
            let (key, value) = row?;
            values.insert(key, value);
        }
        Ok(values)
    }

    /// 解析生效配置（同步版本）
    ///
    /// 逐级覆写: 默认 → 全局 → 场地。非法取值记 warn 并保留上一级的值;
    /// 某一级覆写后整体校验失败时,整级作废,沿用上一级配置
    pub fn resolve_engine_config(&self, scope: Option<SiteScope>) -> ConfigResult<EngineConfig> {
        let config = EngineConfig::default();

        let global = self.scope_values(&ConfigScope::Global)?;
        let config = apply_level(config, &global, &ConfigScope::Global);

        let Some(site) = scope else {
            return Ok(config);
        };
        let site_scope = ConfigScope::Site(site);
        let site_values = self.scope_values(&site_scope)?;
        Ok(apply_level(config, &site_values, &site_scope))
    }

    /// 获取全局配置快照（JSON格式）
    pub fn get_config_snapshot(&self) -> ConfigResult<String> {
        let values = self.scope_values(&ConfigScope::Global)?;
        Ok(serde_json::to_string(&values)?)
    }

    /// 从配置快照恢复全局配置
    ///
    /// # 返回
    /// - Ok(usize): 恢复的配置项数量
    ///
    /// # 注意
    /// - 会覆盖现有的 global 配置
    /// - `__meta_` 前缀的键不回写
    pub fn restore_config_from_snapshot(&self, snapshot_json: &str) -> ConfigResult<usize> {
        let values: BTreeMap<String, String> = serde_json::from_str(snapshot_json)?;

        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let mut count = 0;
        for (key, value) in values.iter() {
            if key.starts_with(META_KEY_PREFIX) {
                continue;
            }
            count += tx.execute(
                "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
                 ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
                params![key, value],
            )?;
        }

        tx.commit()?;

        tracing::info!(restored = count, "配置快照已恢复");
        Ok(count)
    }
}

// ==========================================
// EngineConfigReader Trait 实现
// ==========================================
#[async_trait]
impl EngineConfigReader for ConfigManager {
    async fn get_engine_config(&self, scope: Option<SiteScope>) -> ConfigResult<EngineConfig> {
        self.resolve_engine_config(scope)
    }
}

/// 应用一级覆写; 结果校验失败则返回上一级配置
fn apply_level(
    previous: EngineConfig,
    values: &BTreeMap<String, String>,
    scope: &ConfigScope,
) -> EngineConfig {
    if values.is_empty() {
        return previous;
    }

    let mut config = previous.clone();
    apply_overrides(&mut config, values);
    match config.validate() {
        Ok(()) => config,
        Err(message) => {
            tracing::warn!(
                scope_id = %scope.scope_id(),
                reason = %message,
                "该级配置校验失败,沿用上一级配置"
            );
            previous
        }
    }
}

/// 将 config_kv 键值覆写到配置上
fn apply_overrides(config: &mut EngineConfig, values: &BTreeMap<String, String>) {
    for (key, raw) in values {
        let value = raw.trim();
        let applied = match key.as_str() {
            config_keys::COORDINATE_TOLERANCE_M => parse_into(value, &mut config.coordinate_tolerance_m),
            config_keys::MAX_DRILL_POINTS => parse_into(value, &mut config.max_drill_points),
            config_keys::GRID_PITCH_MIN_THRESHOLD_M => {
                parse_into(value, &mut config.grid_pitch_min_threshold_m)
            }
            config_keys::GRID_PITCH_SUPPORT_THRESHOLD => {
                parse_into(value, &mut config.grid_pitch_support_threshold)
            }
            config_keys::DEFAULT_PITCH_M => parse_into(value, &mut config.default_pitch_m),
            config_keys::COORDINATE_DECIMALS => parse_into(value, &mut config.coordinate_decimals),
            config_keys::IMPLICIT_ENTRY_POINTS => match parse_bool(value) {
                Some(v) => {
                    config.implicit_entry_points = v;
                    true
                }
                None => false,
            },
            // 未知键忽略（可能属于其他模块）
            _ => true,
        };

        if !applied {
            tracing::warn!(
                config_key = %key,
                raw_value = %raw,
                "配置值格式错误,沿用上一级配置"
            );
        }
    }
}

fn parse_into<T: std::str::FromStr>(value: &str, target: &mut T) -> bool {
    match value.parse::<T>() {
        Ok(v) => {
            *target = v;
            true
        }
        Err(_) => false,
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

/// 默认配置数据库路径（用户数据目录下）
pub fn get_default_db_path() -> String {
    let mut path = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("drill-blast-engine");
    if let Err(e) = std::fs::create_dir_all(&path) {
        tracing::warn!(error = %e, path = %path.display(), "无法创建数据目录,使用当前目录");
        return "drill_blast_engine.db".to_string();
    }
    path.push("drill_blast_engine.db");
    path.to_string_lossy().to_string()
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 几何校验
    pub const COORDINATE_TOLERANCE_M: &str = "coordinate_tolerance_m";
    pub const MAX_DRILL_POINTS: &str = "max_drill_points";
    pub const COORDINATE_DECIMALS: &str = "coordinate_decimals";

    // 孔网间距推断
    pub const GRID_PITCH_MIN_THRESHOLD_M: &str = "grid_pitch_min_threshold_m";
    pub const GRID_PITCH_SUPPORT_THRESHOLD: &str = "grid_pitch_support_threshold";
    pub const DEFAULT_PITCH_M: &str = "default_pitch_m";

    // 起爆网络
    pub const IMPLICIT_ENTRY_POINTS: &str = "implicit_entry_points";
}
