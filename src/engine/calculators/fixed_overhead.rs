// ==========================================
// 瓷砖产线成本核算系统 - 固定费用分摊计算器
// ==========================================
// 按日期分组:
// 1) 每个日期解析一次费率快照
// 2) 日固定费用池 = 月固定费用合计 / 30
// 3) 行分摊 = 行净产面积 / 当日净产面积合计 × 日费用池
// 4) 当日面积或费用池 <= 0 时整日跳过
// 行净产面积 = 净产量 × 规格面积(m²),规格无法解析的行面积为 0
// ==========================================

use super::{any_size, CalcContext, CategoryCalculator};
use crate::common::safe_div;
use crate::domain::cost::CategoryResult;
use crate::domain::production::ProductionRow;
use crate::domain::size::size_area_sqm;
use crate::domain::types::CostCategory;
use crate::engine::production::net_quantity;
use chrono::NaiveDate;
use std::collections::BTreeMap;

pub struct FixedOverheadCalculator {
    // 无状态计算器
}

impl FixedOverheadCalculator {
    pub fn new() -> Self {
        Self {}
    }

    fn row_area(row: &ProductionRow, shrinkage_rate: f64) -> f64 {
        net_quantity(row, shrinkage_rate) * size_area_sqm(&row.size_code())
    }
}

impl Default for FixedOverheadCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryCalculator for FixedOverheadCalculator {
    fn category(&self) -> CostCategory {
        CostCategory::Fixed
    }

    fn calculate(&self, ctx: &CalcContext<'_>) -> CategoryResult {
        let mut result = CategoryResult::new();
        let shrinkage = ctx.config.shrinkage_rate;

        // 无日期的行无法归入任何日期
        let mut by_date: BTreeMap<NaiveDate, Vec<&ProductionRow>> = BTreeMap::new();
        for row in ctx.rows {
            if let Some(date) = row.date {
                by_date.entry(date).or_default().push(row);
            }
        }

        for (date, rows) in by_date {
            let Some(snapshot) = ctx.settings.resolve(Some(date)) else {
                tracing::debug!(date = %date, "无可用费率快照，跳过固定费用分摊");
                continue;
            };

            let daily_pool = safe_div(snapshot.monthly_fixed_total(), ctx.config.days_per_month);
            let date_area: f64 = rows
                .iter()
                .filter(|r| r.has_size())
                .map(|r| Self::row_area(r, shrinkage))
                .sum();

            if date_area <= 0.0 || daily_pool <= 0.0 {
                continue;
            }

            for row in rows {
                let Some(size) = any_size(row) else {
                    continue;
                };
                let area = Self::row_area(row, shrinkage);
                if area == 0.0 {
                    continue;
                }
                result.add(&size, area / date_area * daily_pool);
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CostingConfig;
    use crate::domain::settings::SettingsSnapshot;
    use crate::engine::calculators::test_support::*;
    use crate::engine::settings_resolver::SettingsResolver;

    fn producing(date: NaiveDate, size: &str, kiln_entry: f64) -> ProductionRow {
        let mut r = row(date, size);
        r.kiln_entry_box = kiln_entry;
        r
    }

    fn monthly(date: NaiveDate, salary: f64) -> SettingsSnapshot {
        SettingsSnapshot {
            monthly_salary: salary,
            ..snapshot(date)
        }
    }

    #[test]
    fn test_pool_split_by_area() {
        // 400x400 = 0.16 m², 600x600 = 0.36 m²
        let rows = vec![
            producing(d(2024, 1, 10), "400x400", 100.0),
            producing(d(2024, 1, 10), "600x600", 100.0),
        ];
        let history = vec![monthly(d(2024, 1, 1), 3000.0)];
        let config = CostingConfig::default();
        let resolver = SettingsResolver::new(&history);
        let ctx = CalcContext::new(&rows, &resolver, &config);

        let result = FixedOverheadCalculator::new().calculate(&ctx);
        assert!((result.total - 100.0).abs() < 1e-9);
        assert!((result.size_value("400x400") - 100.0 * 0.16 / 0.52).abs() < 1e-9);
        assert!((result.size_value("600x600") - 100.0 * 0.36 / 0.52).abs() < 1e-9);
        assert_sum_invariant(&result);
    }

    #[test]
    fn test_each_date_gets_its_own_pool() {
        let rows = vec![
            producing(d(2024, 1, 10), "400x400", 100.0),
            producing(d(2024, 2, 10), "400x400", 10.0),
        ];
        let history = vec![
            monthly(d(2024, 1, 1), 3000.0),
            monthly(d(2024, 2, 1), 6000.0),
        ];
        let config = CostingConfig::default();
        let resolver = SettingsResolver::new(&history);
        let ctx = CalcContext::new(&rows, &resolver, &config);

        let result = FixedOverheadCalculator::new().calculate(&ctx);
        // 每日池子全部分摊完,与产量大小无关
        assert!((result.total - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_area_or_zero_pool_skipped() {
        let rows = vec![
            producing(d(2024, 1, 10), "bad-size", 100.0),
            producing(d(2024, 1, 11), "400x400", 0.0),
        ];
        let history = vec![monthly(d(2024, 1, 1), 3000.0)];
        let config = CostingConfig::default();
        let resolver = SettingsResolver::new(&history);
        let ctx = CalcContext::new(&rows, &resolver, &config);

        let result = FixedOverheadCalculator::new().calculate(&ctx);
        assert_eq!(result.total, 0.0);

        let rows = vec![producing(d(2024, 1, 10), "400x400", 100.0)];
        let empty_pool = vec![monthly(d(2024, 1, 1), 0.0)];
        let resolver = SettingsResolver::new(&empty_pool);
        let ctx = CalcContext::new(&rows, &resolver, &config);
        assert_eq!(FixedOverheadCalculator::new().calculate(&ctx).total, 0.0);
    }
}
