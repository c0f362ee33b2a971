// ==========================================
// 瓷砖产线成本核算系统 - 色料计算器
// ==========================================
// 公式: Σ(通道用量 × 通道单价),通道: 蓝/黑/棕/黄/粉
// 单价为配置常量,不随费率快照变化
// ==========================================

use super::{any_size, CalcContext, CategoryCalculator};
use crate::domain::cost::CategoryResult;
use crate::domain::types::{ColorantChannel, CostCategory};

pub struct ColorantCalculator {
    // 无状态计算器
}

impl ColorantCalculator {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for ColorantCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryCalculator for ColorantCalculator {
    fn category(&self) -> CostCategory {
        CostCategory::Colorant
    }

    fn calculate(&self, ctx: &CalcContext<'_>) -> CategoryResult {
        let mut result = CategoryResult::new();
        let rates = &ctx.config.colorant_rates;

        for row in ctx.rows {
            let Some(size) = any_size(row) else {
                continue;
            };

            let cost: f64 = ColorantChannel::ALL
                .iter()
                .map(|channel| row.colorant.usage(*channel) * rates.rate(*channel))
                .sum();
            result.add(&size, cost);
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CostingConfig;
    use crate::engine::calculators::test_support::*;
    use crate::engine::settings_resolver::SettingsResolver;

    #[test]
    fn test_colorant_uses_config_rates() {
        let mut r = row(d(2024, 1, 10), "300x600");
        r.colorant.blue = 2.0;
        r.colorant.pink = 1.0;

        let mut config = CostingConfig::default();
        config.colorant_rates.blue = 100.0;
        config.colorant_rates.pink = 10.0;

        // 无快照也能计算
        let resolver = SettingsResolver::new(NO_SETTINGS);
        let rows = vec![r];
        let ctx = CalcContext::new(&rows, &resolver, &config);

        let result = ColorantCalculator::new().calculate(&ctx);
        assert_eq!(result.total, 210.0);
        assert_eq!(result.size_value("300x600"), 210.0);
    }

    #[test]
    fn test_no_usage_is_zero() {
        let config = CostingConfig::default();
        let resolver = SettingsResolver::new(NO_SETTINGS);
        let rows = vec![row(d(2024, 1, 10), "400x400")];
        let ctx = CalcContext::new(&rows, &resolver, &config);

        let result = ColorantCalculator::new().calculate(&ctx);
        assert_eq!(result.total, 0.0);
        assert_sum_invariant(&result);
    }
}
