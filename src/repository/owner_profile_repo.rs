// ==========================================
// 瓷砖产线成本核算系统 - 归属档案仓储
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::owner::OwnerProfile;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex, MutexGuard};

/// 职责: 管理 owner_profile 表
pub struct OwnerProfileRepository {
    conn: Arc<Mutex<Connection>>,
}

impl OwnerProfileRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 写入或更新归属档案（UPSERT）
    pub fn upsert(&self, profile: &OwnerProfile) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO owner_profile (user_id, owner_id, plant_name)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(user_id) DO UPDATE SET owner_id = ?2, plant_name = ?3
            "#,
            params![profile.user_id, profile.owner_id, profile.plant_name],
        )?;
        Ok(())
    }

    /// 按用户查询
    pub fn find_by_user(&self, user_id: &str) -> RepositoryResult<Option<OwnerProfile>> {
        let conn = self.get_conn()?;
        let profile = conn
            .query_row(
                "SELECT user_id, owner_id, plant_name FROM owner_profile WHERE user_id = ?1",
                params![user_id],
                |row| {
                    Ok(OwnerProfile {
                        user_id: row.get(0)?,
                        owner_id: row.get(1)?,
                        plant_name: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(profile)
    }
}
