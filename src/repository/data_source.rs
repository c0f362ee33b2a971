// ==========================================
// 瓷砖产线成本核算系统 - 数据访问接口
// ==========================================
// 职责: 为引擎提供生产行、费率快照与归属档案
// 红线: 接口不含业务公式,只负责取数
// ==========================================

use crate::domain::owner::OwnerProfile;
use crate::domain::production::ProductionRow;
use crate::domain::settings::SettingsSnapshot;
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;
use chrono::NaiveDate;

// ==========================================
// DateRangeFilter - 取数范围（闭区间）
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRangeFilter {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub owner_id: Option<String>,
}

impl DateRangeFilter {
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            owner_id: None,
        }
    }

    /// 单日
    pub fn day(day: NaiveDate) -> Self {
        Self::between(day, day)
    }

    pub fn with_owner(mut self, owner_id: Option<String>) -> Self {
        self.owner_id = owner_id;
        self
    }

    /// 起止日期是否颠倒
    pub fn is_inverted(&self) -> bool {
        matches!((self.start, self.end), (Some(s), Some(e)) if s > e)
    }

    /// 行是否落在范围内
    ///
    /// 设置了日期边界时,无日期的行不匹配
    pub fn matches(&self, row: &ProductionRow) -> bool {
        if let Some(owner) = &self.owner_id {
            if row.owner_id.as_deref() != Some(owner.as_str()) {
                return false;
            }
        }

        match row.date {
            Some(date) => {
                self.start.map_or(true, |s| date >= s) && self.end.map_or(true, |e| date <= e)
            }
            None => self.start.is_none() && self.end.is_none(),
        }
    }
}

// ==========================================
// CostDataSource Trait
// ==========================================
#[async_trait]
pub trait CostDataSource: Send + Sync {
    /// 查询范围内的生产行
    async fn get_production_rows(
        &self,
        filter: &DateRangeFilter,
    ) -> RepositoryResult<Vec<ProductionRow>>;

    /// 查询全部费率快照（顺序不限,按录入先后返回）
    async fn get_settings_history(&self) -> RepositoryResult<Vec<SettingsSnapshot>>;

    /// 查询用户的归属档案
    async fn get_owner_profile(&self, user_id: &str) -> RepositoryResult<Option<OwnerProfile>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn row(date: Option<NaiveDate>, owner: Option<&str>) -> ProductionRow {
        ProductionRow {
            date,
            owner_id: owner.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_inclusive_bounds() {
        let filter = DateRangeFilter::between(d(2024, 1, 1), d(2024, 1, 31));
        assert!(filter.matches(&row(Some(d(2024, 1, 1)), None)));
        assert!(filter.matches(&row(Some(d(2024, 1, 31)), None)));
        assert!(!filter.matches(&row(Some(d(2024, 2, 1)), None)));
        assert!(!filter.matches(&row(None, None)));
        assert!(DateRangeFilter::default().matches(&row(None, None)));
    }

    #[test]
    fn test_owner_filter_and_inversion() {
        let filter = DateRangeFilter::day(d(2024, 1, 10)).with_owner(Some("plant-a".to_string()));
        assert!(filter.matches(&row(Some(d(2024, 1, 10)), Some("plant-a"))));
        assert!(!filter.matches(&row(Some(d(2024, 1, 10)), Some("plant-b"))));
        assert!(!filter.matches(&row(Some(d(2024, 1, 10)), None)));

        assert!(DateRangeFilter::between(d(2024, 2, 1), d(2024, 1, 1)).is_inverted());
        assert!(!filter.is_inverted());
    }
}
