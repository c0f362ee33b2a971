// ==========================================
// 瓷砖产线成本核算系统 - 费率快照仓储
// ==========================================
// 红线: Repository 不含业务逻辑（快照选择由引擎完成）
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::settings::SettingsSnapshot;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::sql_value::{read_date, read_f64};
use rusqlite::{params, Connection, Row};
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// SettingsRepository - 费率快照仓储
// ==========================================
/// 职责: 管理 cost_settings 表的读写
pub struct SettingsRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SettingsRepository {
    /// 创建新的 SettingsRepository 实例
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 新增一个费率快照（历史快照只追加,不覆盖）
    pub fn insert(&self, snapshot: &SettingsSnapshot) -> RepositoryResult<i64> {
        let effective_date = snapshot
            .effective_date
            .ok_or_else(|| RepositoryError::FieldValueError {
                field: "effective_date".to_string(),
                message: "费率快照缺少生效日期".to_string(),
            })?;

        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO cost_settings (
                effective_date,
                electricity_rate_per_unit, gas_rate_per_unit,
                premium_box_rate, standard_box_rate, corner_stapling_rate,
                monthly_salary, monthly_maintenance, monthly_administration,
                monthly_interest, monthly_depreciation, monthly_other
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
            params![
                effective_date.to_string(),
                snapshot.electricity_rate_per_unit,
                snapshot.gas_rate_per_unit,
                snapshot.premium_box_rate,
                snapshot.standard_box_rate,
                snapshot.corner_stapling_rate,
                snapshot.monthly_salary,
                snapshot.monthly_maintenance,
                snapshot.monthly_administration,
                snapshot.monthly_interest,
                snapshot.monthly_depreciation,
                snapshot.monthly_other,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// 查询全部快照（按录入顺序）
    ///
    /// 录入顺序决定同一生效日期的优先级,不在此处按日期排序
    pub fn find_all(&self) -> RepositoryResult<Vec<SettingsSnapshot>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT
                effective_date,
                electricity_rate_per_unit, gas_rate_per_unit,
                premium_box_rate, standard_box_rate, corner_stapling_rate,
                monthly_salary, monthly_maintenance, monthly_administration,
                monthly_interest, monthly_depreciation, monthly_other
            FROM cost_settings
            ORDER BY settings_id
            "#,
        )?;

        let snapshots = stmt
            .query_map([], map_snapshot)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(snapshots)
    }
}

fn map_snapshot(row: &Row<'_>) -> rusqlite::Result<SettingsSnapshot> {
    Ok(SettingsSnapshot {
        effective_date: read_date(row, 0)?,
        electricity_rate_per_unit: read_f64(row, 1)?,
        gas_rate_per_unit: read_f64(row, 2)?,
        premium_box_rate: read_f64(row, 3)?,
        standard_box_rate: read_f64(row, 4)?,
        corner_stapling_rate: read_f64(row, 5)?,
        monthly_salary: read_f64(row, 6)?,
        monthly_maintenance: read_f64(row, 7)?,
        monthly_administration: read_f64(row, 8)?,
        monthly_interest: read_f64(row, 9)?,
        monthly_depreciation: read_f64(row, 10)?,
        monthly_other: read_f64(row, 11)?,
    })
}
