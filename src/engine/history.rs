// ==========================================
// 瓷砖产线成本核算系统 - 历史趋势汇总
// ==========================================
// 窗口: day=1, week=7, month=30, all=90（有界回看）
// 每天独立: 取当日行 → 只保留日期精确匹配的行 → 完整核算流程
// 当日取数失败: 记录警告并输出全零矩阵,不中断整个窗口
// 输出按日期升序
// ==========================================

use crate::domain::cost::{CostMatrix, HistoryPoint};
use crate::domain::production::ProductionRow;
use crate::domain::settings::SettingsSnapshot;
use crate::domain::types::HistoryRange;
use crate::engine::orchestrator::CostEngine;
use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use futures::stream::{self, StreamExt};
use tracing::{info, instrument, warn};

// ==========================================
// DailyRowProvider - 按日取数接口
// ==========================================
#[async_trait]
pub trait DailyRowProvider: Send + Sync {
    /// 取指定日期的生产行（可能含其他日期的行,由调用方过滤）
    async fn rows_for_day(&self, day: NaiveDate) -> anyhow::Result<Vec<ProductionRow>>;
}

/// 历史窗口内的日期序列（升序,以 end_date 结尾）
pub fn window_days(range: HistoryRange, end_date: NaiveDate) -> Vec<NaiveDate> {
    let days = range.days() as i64;
    (0..days)
        .rev()
        .map(|offset| end_date - Duration::days(offset))
        .collect()
}

// ==========================================
// HistoryAggregator - 历史趋势汇总器
// ==========================================
pub struct HistoryAggregator<'e> {
    engine: &'e CostEngine,
    parallelism: usize,
}

impl<'e> HistoryAggregator<'e> {
    pub fn new(engine: &'e CostEngine) -> Self {
        Self {
            parallelism: engine.config().effective_parallelism(),
            engine,
        }
    }

    /// 覆盖并发度（最小为 1）
    pub fn with_parallelism(mut self, parallelism: usize) -> Self {
        self.parallelism = parallelism.max(1);
        self
    }

    /// 按关键字构建历史（未知关键字按单日处理）
    pub async fn build_history_by_keyword<P>(
        &self,
        range_keyword: &str,
        end_date: NaiveDate,
        settings_history: &[SettingsSnapshot],
        provider: &P,
    ) -> Vec<HistoryPoint>
    where
        P: DailyRowProvider + ?Sized,
    {
        let range = HistoryRange::from_keyword(range_keyword).unwrap_or_else(|| {
            warn!(keyword = range_keyword, "未知的历史范围关键字，按单日处理");
            HistoryRange::Day
        });
        self.build_history(range, end_date, settings_history, provider)
            .await
    }

    /// 构建历史趋势
    #[instrument(skip(self, settings_history, provider), fields(
        range = ?range,
        end_date = %end_date,
        parallelism = self.parallelism
    ))]
    pub async fn build_history<P>(
        &self,
        range: HistoryRange,
        end_date: NaiveDate,
        settings_history: &[SettingsSnapshot],
        provider: &P,
    ) -> Vec<HistoryPoint>
    where
        P: DailyRowProvider + ?Sized,
    {
        let days = window_days(range, end_date);

        let mut points: Vec<HistoryPoint> = stream::iter(days)
            .map(|day| async move {
                let matrix = self.compute_day(day, settings_history, provider).await;
                HistoryPoint { date: day, matrix }
            })
            .buffer_unordered(self.parallelism.max(1))
            .collect()
            .await;

        points.sort_by_key(|p| p.date);

        info!(points = points.len(), "历史趋势计算完成");
        points
    }

    async fn compute_day<P>(
        &self,
        day: NaiveDate,
        settings_history: &[SettingsSnapshot],
        provider: &P,
    ) -> CostMatrix
    where
        P: DailyRowProvider + ?Sized,
    {
        let rows = match provider.rows_for_day(day).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!(day = %day, error = %e, "当日生产数据读取失败，按空数据处理");
                return CostMatrix::zeroed(self.engine.config().size_catalog.keys().cloned());
            }
        };

        let day_rows: Vec<ProductionRow> = rows
            .into_iter()
            .filter(|r| r.date == Some(day))
            .collect();

        self.engine.compute_cost_matrix(&day_rows, settings_history)
    }
}
