// ==========================================
// 历史趋势集成测试
// ==========================================
// 测试范围: 窗口天数、升序输出、空日/失败日降级、日期精确过滤
// ==========================================

mod helpers;

use async_trait::async_trait;
use chrono::NaiveDate;
use helpers::test_data_builder::*;
use std::collections::{HashMap, HashSet};
use tile_costing::{CostEngine, CostHead, DailyRowProvider, HistoryAggregator, ProductionRow};

/// 按日期返回预置数据的 Provider
#[derive(Default)]
struct MapProvider {
    days: HashMap<NaiveDate, Vec<ProductionRow>>,
    failing: HashSet<NaiveDate>,
}

#[async_trait]
impl DailyRowProvider for MapProvider {
    async fn rows_for_day(&self, day: NaiveDate) -> anyhow::Result<Vec<ProductionRow>> {
        if self.failing.contains(&day) {
            anyhow::bail!("数据源不可用: {}", day);
        }
        Ok(self.days.get(&day).cloned().unwrap_or_default())
    }
}

#[tokio::test]
async fn test_week_yields_seven_ascending_points() {
    let end = d(2024, 1, 10);
    let mut provider = MapProvider::default();
    provider
        .days
        .insert(d(2024, 1, 8), vec![typical_row(d(2024, 1, 8), "400x400")]);

    let engine = CostEngine::default();
    let history = vec![typical_snapshot(d(2024, 1, 1))];
    let points = HistoryAggregator::new(&engine)
        .build_history_by_keyword("week", end, &history, &provider)
        .await;

    assert_eq!(points.len(), 7);
    assert_eq!(points[0].date, d(2024, 1, 4));
    assert_eq!(points[6].date, end);
    assert!(points.windows(2).all(|w| w[0].date < w[1].date));

    for point in &points {
        if point.date == d(2024, 1, 8) {
            assert!(point.total_row()["400x400"] > 0.0);
        } else {
            assert!(point.matrix.is_zero(), "date={}", point.date);
        }
    }
}

#[tokio::test]
async fn test_range_keywords_map_to_window_sizes() {
    let engine = CostEngine::default();
    let provider = MapProvider::default();
    let aggregator = HistoryAggregator::new(&engine).with_parallelism(8);
    let end = d(2024, 3, 31);

    for (keyword, expected) in [("today", 1), ("month", 30), ("all", 90), ("bogus", 1)] {
        let points = aggregator
            .build_history_by_keyword(keyword, end, &[], &provider)
            .await;
        assert_eq!(points.len(), expected, "keyword={}", keyword);
        assert_eq!(points.last().map(|p| p.date), Some(end));
    }
}

#[tokio::test]
async fn test_failed_day_degrades_to_zero_matrix() {
    let end = d(2024, 1, 10);
    let mut provider = MapProvider::default();
    for offset in 0..3 {
        let day = d(2024, 1, 8 + offset);
        provider.days.insert(day, vec![typical_row(day, "600x600")]);
    }
    provider.failing.insert(d(2024, 1, 9));

    let engine = CostEngine::default();
    let history = vec![typical_snapshot(d(2024, 1, 1))];
    let points = HistoryAggregator::new(&engine)
        .build_history_by_keyword("week", end, &history, &provider)
        .await;

    assert_eq!(points.len(), 7);
    let failed = points.iter().find(|p| p.date == d(2024, 1, 9)).unwrap();
    assert!(failed.matrix.is_zero());
    let ok = points.iter().find(|p| p.date == d(2024, 1, 10)).unwrap();
    assert!(ok.matrix.get(CostHead::Total, "600x600") > 0.0);
}

#[tokio::test]
async fn test_rows_from_other_dates_are_ignored() {
    let day = d(2024, 1, 10);
    let mut provider = MapProvider::default();
    // Provider 返回了相邻日期的行: 只取当日
    provider.days.insert(
        day,
        vec![
            typical_row(day, "400x400"),
            typical_row(d(2024, 1, 9), "600x600"),
        ],
    );

    let engine = CostEngine::default();
    let history = vec![typical_snapshot(d(2024, 1, 1))];
    let points = HistoryAggregator::new(&engine)
        .build_history_by_keyword("day", day, &history, &provider)
        .await;

    assert_eq!(points.len(), 1);
    let direct = engine.compute_cost_matrix(&[typical_row(day, "400x400")], &history);
    assert_eq!(points[0].matrix, direct);
    assert_eq!(points[0].matrix.get(CostHead::Total, "600x600"), 0.0);
}

#[tokio::test]
async fn test_parallelism_does_not_change_result() {
    let end = d(2024, 1, 30);
    let mut provider = MapProvider::default();
    for offset in 0..30 {
        let day = d(2024, 1, 1 + offset);
        let size = if offset % 2 == 0 { "400x400" } else { "600x600" };
        provider.days.insert(day, vec![typical_row(day, size)]);
    }

    let engine = CostEngine::default();
    let history = vec![typical_snapshot(d(2024, 1, 1))];
    let serial = HistoryAggregator::new(&engine)
        .with_parallelism(1)
        .build_history_by_keyword("month", end, &history, &provider)
        .await;
    let parallel = HistoryAggregator::new(&engine)
        .with_parallelism(16)
        .build_history_by_keyword("month", end, &history, &provider)
        .await;

    assert_eq!(serial, parallel);
}
