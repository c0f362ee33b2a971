// ==========================================
// 瓷砖产线成本核算系统 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为
// - 统一 busy_timeout,减少并发写入时的偶发 busy 错误
// - 提供参考实现所需的最小 schema（生产记录/费率快照/归属档案/配置）
// ==========================================

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use std::path::PathBuf;
use std::time::Duration;

/// 显式指定数据库路径的环境变量
pub const DB_PATH_ENV: &str = "TILE_COSTING_DB_PATH";

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 当前代码所期望的 schema_version
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要“每个连接”单独开启
/// - busy_timeout 需要“每个连接”单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 默认数据库路径
///
/// 优先级: 环境变量 > 用户数据目录 > 当前目录
pub fn default_db_path() -> String {
    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from(".").join(crate::DB_FILE_NAME);
    if let Some(data_dir) = dirs::data_dir() {
        let app_dir = data_dir.join("tile-costing");
        // 目录创建失败时回退到当前目录
        if std::fs::create_dir_all(&app_dir).is_ok() {
            path = app_dir.join(crate::DB_FILE_NAME);
        }
    }

    path.to_string_lossy().into_owned()
}

/// 初始化 schema（幂等）
///
/// 数值列不声明类型: 上游可能写入文本,由引擎侧统一容错转换
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS production_entry (
            entry_id INTEGER PRIMARY KEY AUTOINCREMENT,
            owner_id TEXT,
            entry_date TEXT NOT NULL,
            size TEXT,
            press_box,
            green_box_weight,
            kiln_entry_box,
            packing_loss_box,
            kiln_fired_loss_box,
            sizing_loss_box,
            premium_box,
            standard_box,
            eco_box,
            total_packing_box,
            spray_dryer_production,
            coal_used_kg,
            daily_gas_consumption,
            daily_electricity_units_use,
            colorant_blue,
            colorant_black,
            colorant_brown,
            colorant_yellow,
            colorant_pink,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        CREATE INDEX IF NOT EXISTS idx_production_entry_date
            ON production_entry(entry_date);

        CREATE TABLE IF NOT EXISTS cost_settings (
            settings_id INTEGER PRIMARY KEY AUTOINCREMENT,
            effective_date TEXT NOT NULL,
            electricity_rate_per_unit,
            gas_rate_per_unit,
            premium_box_rate,
            standard_box_rate,
            corner_stapling_rate,
            monthly_salary,
            monthly_maintenance,
            monthly_administration,
            monthly_interest,
            monthly_depreciation,
            monthly_other,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS owner_profile (
            user_id TEXT PRIMARY KEY,
            owner_id TEXT NOT NULL,
            plant_name TEXT
        );

        CREATE TABLE IF NOT EXISTS config_kv (
            scope_id TEXT NOT NULL DEFAULT 'global',
            key TEXT NOT NULL,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (scope_id, key)
        );
        "#,
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [CURRENT_SCHEMA_VERSION],
    )?;
    Ok(())
}

/// 读取 schema_version（若表不存在则返回 None）
pub fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    let has_table: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if !has_table {
        return Ok(None);
    }

    let v: Option<i64> =
        conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(v)
}
