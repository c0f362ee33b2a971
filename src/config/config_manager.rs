// ==========================================
// 瓷砖产线成本核算系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::config_reader::CostingConfigReader;
use crate::config::costing_config::CostingConfig;
use crate::config::error::{ConfigError, ConfigResult};
use crate::db::open_sqlite_connection;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// 配置键
// ==========================================
pub mod config_keys {
    /// 完整核算口径（JSON,可只写部分字段）
    pub const COSTING_CONFIG: &str = "costing_config";
    /// 历史趋势并发度（单值覆写,优先级高于 JSON 中的同名字段）
    pub const HISTORY_PARALLELISM: &str = "history_parallelism";
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
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> ConfigResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> ConfigResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| ConfigError::LockError(e.to_string()))
    }

    /// 读取 global scope 的配置值
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_global_config_value(&self, key: &str) -> ConfigResult<Option<String>> {
        let conn = self.get_conn()?;
        conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        )
        .optional()
        .map_err(|e| ConfigError::ReadError {
            key: key.to_string(),
            message: e.to_string(),
        })
    }

    /// 写入 global scope 的配置值（UPSERT）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> ConfigResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )
        .map_err(|e| ConfigError::WriteError {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// 保存完整核算口径
    pub fn save_costing_config(&self, config: &CostingConfig) -> ConfigResult<()> {
        let raw = serde_json::to_string(config)?;
        self.set_global_config_value(config_keys::COSTING_CONFIG, &raw)
    }

    /// 获取所有 global 配置的快照
    ///
    /// # 用途
    /// - 核算结果留档时记录当时的口径
    pub fn get_config_snapshot(&self) -> ConfigResult<BTreeMap<String, String>> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key")?;

        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut snapshot = BTreeMap::new();
        for row in rows {
            let (key, value) = row?;
            snapshot.insert(key, value);
        }
        Ok(snapshot)
    }

    /// 解析核算口径 JSON,格式错误时回退默认值
    fn parse_costing_config(raw: &str) -> CostingConfig {
        serde_json::from_str(raw).unwrap_or_else(|e| {
            tracing::warn!(
                config_key = config_keys::COSTING_CONFIG,
                error = %e,
                "核算口径配置格式错误，使用默认配置"
            );
            CostingConfig::default()
        })
    }
}

// ==========================================
// CostingConfigReader Trait 实现
// ==========================================
#[async_trait]
impl CostingConfigReader for ConfigManager {
    async fn load_costing_config(&self) -> ConfigResult<CostingConfig> {
        let mut config = match self.get_global_config_value(config_keys::COSTING_CONFIG)? {
            Some(raw) => Self::parse_costing_config(&raw),
            None => CostingConfig::default(),
        };

        if let Some(raw) = self.get_global_config_value(config_keys::HISTORY_PARALLELISM)? {
            match raw.trim().parse::<usize>() {
                Ok(n) => config.history_parallelism = n,
                Err(_) => tracing::warn!(
                    config_key = config_keys::HISTORY_PARALLELISM,
                    raw_value = %raw,
                    "并发度配置不是非负整数，忽略"
                ),
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_schema;

    fn manager() -> ConfigManager {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        ConfigManager::from_connection(Arc::new(Mutex::new(conn)))
    }

    #[tokio::test]
    async fn test_missing_config_uses_defaults() {
        let manager = manager();
        let config = manager.load_costing_config().await.unwrap();
        assert_eq!(config, CostingConfig::default());
    }

    #[tokio::test]
    async fn test_partial_override_and_parallelism() {
        let manager = manager();
        manager
            .set_global_config_value(config_keys::COSTING_CONFIG, r#"{"area_equivalence": 9.0}"#)
            .unwrap();
        manager
            .set_global_config_value(config_keys::HISTORY_PARALLELISM, "2")
            .unwrap();

        let config = manager.load_costing_config().await.unwrap();
        assert_eq!(config.area_equivalence, 9.0);
        assert_eq!(config.moisture_multiplier, 1.05);
        assert_eq!(manager.get_history_parallelism().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_malformed_json_falls_back() {
        let manager = manager();
        manager
            .set_global_config_value(config_keys::COSTING_CONFIG, "{not json")
            .unwrap();
        manager
            .set_global_config_value(config_keys::HISTORY_PARALLELISM, "many")
            .unwrap();

        let config = manager.load_costing_config().await.unwrap();
        assert_eq!(config, CostingConfig::default());
    }

    #[test]
    fn test_save_and_snapshot() {
        let manager = manager();
        let mut config = CostingConfig::default();
        config.days_per_month = 31.0;
        manager.save_costing_config(&config).unwrap();

        let snapshot = manager.get_config_snapshot().unwrap();
        assert!(snapshot.contains_key(config_keys::COSTING_CONFIG));
    }
}
