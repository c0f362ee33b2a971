// ==========================================
// 瓷砖产线成本核算系统 - 燃料（煤）计算器
// ==========================================
// 两遍计算:
// 1) 全批次（含未登记规格行）汇总耗煤与喷雾塔产量,得到窑线统一燃料比
//    燃料比 = 耗煤 / 喷雾塔产量 × 1000 × 5.9
// 2) 逐行: 绿粉重量 × 燃料比 / 1000 → 该行燃料量,按规格归集
// ==========================================

use super::{green_powder_kg, CalcContext, CategoryCalculator};
use crate::common::safe_div;
use crate::config::CostingConfig;
use crate::domain::cost::CategoryResult;
use crate::domain::production::ProductionRow;
use crate::domain::types::CostCategory;

pub struct FuelCalculator {
    // 无状态计算器
}

impl FuelCalculator {
    pub fn new() -> Self {
        Self {}
    }

    /// 窑线统一燃料比（全批次口径）
    ///
    /// 喷雾塔产量为 0 时返回 0
    pub fn kiln_fuel_ratio(rows: &[ProductionRow], config: &CostingConfig) -> f64 {
        let (coal, output) = rows.iter().fold((0.0, 0.0), |(coal, output), row| {
            (coal + row.coal_used_kg, output + row.spray_dryer_production)
        });
        safe_div(coal, output) * 1000.0 * config.fuel_scale_factor
    }
}

impl Default for FuelCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryCalculator for FuelCalculator {
    fn category(&self) -> CostCategory {
        CostCategory::Fuel
    }

    fn calculate(&self, ctx: &CalcContext<'_>) -> CategoryResult {
        let mut result = CategoryResult::new();

        let ratio = Self::kiln_fuel_ratio(ctx.rows, ctx.config);
        if ratio == 0.0 {
            return result;
        }

        for row in ctx.rows {
            let Some(size) = ctx.catalog_size(row) else {
                continue;
            };
            let fuel_kg = green_powder_kg(row, ctx.config) * ratio / 1000.0;
            result.add(&size, fuel_kg);
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::calculators::test_support::*;
    use crate::engine::settings_resolver::SettingsResolver;

    #[test]
    fn test_ratio_includes_unrecognized_rows() {
        let mut known = row(d(2024, 1, 10), "400x400");
        known.coal_used_kg = 100.0;
        known.spray_dryer_production = 1000.0;
        known.press_box = 10.0;
        known.green_box_weight = 10.0;

        // 规格未登记: 计入燃料比,但不归集
        let mut unknown = row(d(2024, 1, 10), "999x999");
        unknown.coal_used_kg = 100.0;
        unknown.spray_dryer_production = 3000.0;
        unknown.press_box = 50.0;
        unknown.green_box_weight = 10.0;

        let config = CostingConfig::default();
        let rows = vec![known, unknown];
        let ratio = FuelCalculator::kiln_fuel_ratio(&rows, &config);
        assert!((ratio - 200.0 / 4000.0 * 1000.0 * 5.9).abs() < 1e-9);

        let resolver = SettingsResolver::new(NO_SETTINGS);
        let ctx = CalcContext::new(&rows, &resolver, &config);
        let result = FuelCalculator::new().calculate(&ctx);

        let expected = 10.0 * 10.0 * 1.05 * ratio / 1000.0;
        assert!((result.total - expected).abs() < 1e-9);
        assert_eq!(result.size_wise.len(), 1);
        assert_sum_invariant(&result);
    }

    #[test]
    fn test_zero_output_yields_zero() {
        let mut r = row(d(2024, 1, 10), "400x400");
        r.coal_used_kg = 100.0;
        r.press_box = 10.0;
        r.green_box_weight = 10.0;

        let config = CostingConfig::default();
        let rows = vec![r];
        let resolver = SettingsResolver::new(NO_SETTINGS);
        let ctx = CalcContext::new(&rows, &resolver, &config);

        let result = FuelCalculator::new().calculate(&ctx);
        assert_eq!(result.total, 0.0);
        assert!(result.total.is_finite());
    }
}
