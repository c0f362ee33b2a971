// ==========================================
// 瓷砖产线成本核算系统 - 内存数据源
// ==========================================
// 用途: 测试与嵌入式调用（数据已在内存中）
// ==========================================

use crate::domain::owner::OwnerProfile;
use crate::domain::production::ProductionRow;
use crate::domain::settings::SettingsSnapshot;
use crate::repository::data_source::{CostDataSource, DateRangeFilter};
use crate::repository::error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Default)]
pub struct InMemoryCostDataSource {
    rows: RwLock<Vec<ProductionRow>>,
    settings: RwLock<Vec<SettingsSnapshot>>,
    profiles: RwLock<HashMap<String, OwnerProfile>>,
}

impl InMemoryCostDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(rows: Vec<ProductionRow>, settings: Vec<SettingsSnapshot>) -> Self {
        Self {
            rows: RwLock::new(rows),
            settings: RwLock::new(settings),
            profiles: RwLock::new(HashMap::new()),
        }
    }

    pub fn push_row(&self, row: ProductionRow) -> RepositoryResult<()> {
        self.rows
            .write()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?
            .push(row);
        Ok(())
    }

    pub fn put_profile(&self, profile: OwnerProfile) -> RepositoryResult<()> {
        self.profiles
            .write()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?
            .insert(profile.user_id.clone(), profile);
        Ok(())
    }
}

#[async_trait]
impl CostDataSource for InMemoryCostDataSource {
    async fn get_production_rows(
        &self,
        filter: &DateRangeFilter,
    ) -> RepositoryResult<Vec<ProductionRow>> {
        let rows = self
            .rows
            .read()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;
        Ok(rows.iter().filter(|r| filter.matches(r)).cloned().collect())
    }

    async fn get_settings_history(&self) -> RepositoryResult<Vec<SettingsSnapshot>> {
        let settings = self
            .settings
            .read()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;
        Ok(settings.clone())
    }

    async fn get_owner_profile(&self, user_id: &str) -> RepositoryResult<Option<OwnerProfile>> {
        let profiles = self
            .profiles
            .read()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;
        Ok(profiles.get(user_id).cloned())
    }
}
