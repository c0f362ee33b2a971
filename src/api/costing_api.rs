// ==========================================
// 瓷砖产线成本核算系统 - 成本核算 API
// ==========================================
// 职责:
// - 取数（生产行 + 费率快照）后调用纯计算引擎
// - 历史趋势: 费率快照只取一次,生产行按天取
// - 登录用户 → 归属标识的解析与缓存
// 红线: 不做公式计算,所有数值来自引擎
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::api::profile_cache::OwnerProfileCache;
use crate::config::{CostingConfig, CostingConfigReader};
use crate::domain::cost::{CostMatrix, HistoryPoint};
use crate::domain::owner::OwnerProfile;
use crate::domain::production::ProductionRow;
use crate::engine::history::{DailyRowProvider, HistoryAggregator};
use crate::engine::orchestrator::{CostBreakdown, CostEngine};
use crate::repository::data_source::{CostDataSource, DateRangeFilter};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{info, instrument};

// ==========================================
// SourceDayProvider - 按天取数适配器
// ==========================================
/// 把数据源适配为历史汇总所需的按天取数接口
pub struct SourceDayProvider<'a, D: CostDataSource> {
    source: &'a D,
    owner_id: Option<String>,
}

impl<'a, D: CostDataSource> SourceDayProvider<'a, D> {
    pub fn new(source: &'a D, owner_id: Option<String>) -> Self {
        Self { source, owner_id }
    }
}

#[async_trait]
impl<'a, D: CostDataSource> DailyRowProvider for SourceDayProvider<'a, D> {
    async fn rows_for_day(&self, day: NaiveDate) -> anyhow::Result<Vec<ProductionRow>> {
        let filter = DateRangeFilter::day(day).with_owner(self.owner_id.clone());
        let rows = self.source.get_production_rows(&filter).await?;
        Ok(rows)
    }
}

// ==========================================
// CostingApi - 成本核算 API
// ==========================================
pub struct CostingApi<D: CostDataSource> {
    source: Arc<D>,
    engine: CostEngine,
    profile_cache: Arc<OwnerProfileCache>,
}

impl<D: CostDataSource> CostingApi<D> {
    /// 创建新的 CostingApi 实例
    ///
    /// # 参数
    /// - source: 数据源
    /// - config: 核算口径
    /// - profile_cache: 归属档案缓存（可与其他组件共享）
    pub fn new(source: Arc<D>, config: CostingConfig, profile_cache: Arc<OwnerProfileCache>) -> Self {
        Self {
            source,
            engine: CostEngine::new(config),
            profile_cache,
        }
    }

    /// 通过配置读取器加载核算口径后创建
    pub async fn with_config_reader<C>(
        source: Arc<D>,
        reader: &C,
        profile_cache: Arc<OwnerProfileCache>,
    ) -> ApiResult<Self>
    where
        C: CostingConfigReader + ?Sized,
    {
        let config = reader.load_costing_config().await?;
        Ok(Self::new(source, config, profile_cache))
    }

    pub fn engine(&self) -> &CostEngine {
        &self.engine
    }

    /// 计算范围内的成本矩阵
    #[instrument(skip(self), fields(start = ?filter.start, end = ?filter.end))]
    pub async fn compute_cost_matrix(&self, filter: &DateRangeFilter) -> ApiResult<CostMatrix> {
        Self::validate_filter(filter)?;

        let rows = self.source.get_production_rows(filter).await?;
        let settings = self.source.get_settings_history().await?;
        info!(rows = rows.len(), snapshots = settings.len(), "成本矩阵取数完成");

        Ok(self.engine.compute_cost_matrix(&rows, &settings))
    }

    /// 计算范围内的完整核算明细
    pub async fn compute_breakdown(&self, filter: &DateRangeFilter) -> ApiResult<CostBreakdown> {
        Self::validate_filter(filter)?;

        let rows = self.source.get_production_rows(filter).await?;
        let settings = self.source.get_settings_history().await?;
        Ok(self.engine.compute_breakdown(&rows, &settings))
    }

    /// 计算历史趋势
    ///
    /// # 参数
    /// - range_keyword: today/day/week/month/all（未知关键字按单日）
    /// - end_date: 窗口最后一天
    /// - owner_id: 归属过滤（None 为全部）
    #[instrument(skip(self))]
    pub async fn compute_history(
        &self,
        range_keyword: &str,
        end_date: NaiveDate,
        owner_id: Option<String>,
    ) -> ApiResult<Vec<HistoryPoint>> {
        let settings = self.source.get_settings_history().await?;
        let provider = SourceDayProvider::new(self.source.as_ref(), owner_id);

        let points = HistoryAggregator::new(&self.engine)
            .build_history_by_keyword(range_keyword, end_date, &settings, &provider)
            .await;
        Ok(points)
    }

    /// 解析登录用户的归属档案（优先读缓存）
    pub async fn resolve_owner(&self, user_id: &str) -> ApiResult<OwnerProfile> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(ApiError::InvalidInput("用户ID不能为空".to_string()));
        }

        if let Some(profile) = self.profile_cache.get(user_id) {
            return Ok(profile);
        }

        let profile = self
            .source
            .get_owner_profile(user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("用户{}的归属档案不存在", user_id)))?;
        self.profile_cache.insert(profile.clone());
        Ok(profile)
    }

    /// 用户退出: 清除其归属档案缓存
    pub fn sign_out(&self, user_id: &str) {
        if self.profile_cache.invalidate(user_id.trim()) {
            info!(user_id = user_id, "已清除归属档案缓存");
        }
    }

    fn validate_filter(filter: &DateRangeFilter) -> ApiResult<()> {
        if filter.is_inverted() {
            return Err(ApiError::InvalidInput(format!(
                "起始日期晚于结束日期: start={:?}, end={:?}",
                filter.start, filter.end
            )));
        }
        Ok(())
    }
}
