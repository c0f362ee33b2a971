// ==========================================
// 瓷砖产线成本核算系统 - SQLite 数据源
// ==========================================
// 组合三个仓储,共享同一个连接
// ==========================================

use crate::db::{init_schema, open_sqlite_connection};
use crate::domain::owner::OwnerProfile;
use crate::domain::production::ProductionRow;
use crate::domain::settings::SettingsSnapshot;
use crate::repository::data_source::{CostDataSource, DateRangeFilter};
use crate::repository::error::RepositoryResult;
use crate::repository::owner_profile_repo::OwnerProfileRepository;
use crate::repository::production_repo::ProductionRepository;
use crate::repository::settings_repo::SettingsRepository;
use async_trait::async_trait;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

pub struct SqliteCostDataSource {
    production: ProductionRepository,
    settings: SettingsRepository,
    profiles: OwnerProfileRepository,
}

impl SqliteCostDataSource {
    /// 打开数据库并初始化 schema
    pub fn open(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        init_schema(&conn)?;
        info!(db_path = db_path, "SQLite 数据源已打开");
        Ok(Self::from_connection(Arc::new(Mutex::new(conn))))
    }

    /// 从已有连接创建（schema 由调用方负责）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self {
            production: ProductionRepository::from_connection(conn.clone()),
            settings: SettingsRepository::from_connection(conn.clone()),
            profiles: OwnerProfileRepository::from_connection(conn),
        }
    }

    pub fn production(&self) -> &ProductionRepository {
        &self.production
    }

    pub fn settings(&self) -> &SettingsRepository {
        &self.settings
    }

    pub fn profiles(&self) -> &OwnerProfileRepository {
        &self.profiles
    }
}

#[async_trait]
impl CostDataSource for SqliteCostDataSource {
    async fn get_production_rows(
        &self,
        filter: &DateRangeFilter,
    ) -> RepositoryResult<Vec<ProductionRow>> {
        let rows = self.production.find_by_filter(filter)?;
        debug!(
            start = ?filter.start,
            end = ?filter.end,
            rows = rows.len(),
            "读取生产记录"
        );
        Ok(rows)
    }

    async fn get_settings_history(&self) -> RepositoryResult<Vec<SettingsSnapshot>> {
        self.settings.find_all()
    }

    async fn get_owner_profile(&self, user_id: &str) -> RepositoryResult<Option<OwnerProfile>> {
        self.profiles.find_by_user(user_id)
    }
}
