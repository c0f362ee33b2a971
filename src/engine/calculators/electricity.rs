// ==========================================
// 瓷砖产线成本核算系统 - 电费计算器
// ==========================================
// 公式: 日用电量 × 快照电价
// ==========================================

use super::{any_size, CalcContext, CategoryCalculator};
use crate::domain::cost::CategoryResult;
use crate::domain::types::CostCategory;

pub struct ElectricityCalculator {
    // 无状态计算器
}

impl ElectricityCalculator {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for ElectricityCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryCalculator for ElectricityCalculator {
    fn category(&self) -> CostCategory {
        CostCategory::Electricity
    }

    fn calculate(&self, ctx: &CalcContext<'_>) -> CategoryResult {
        let mut result = CategoryResult::new();

        for row in ctx.rows {
            let Some(size) = any_size(row) else {
                continue;
            };
            let Some(snapshot) = ctx.settings.resolve(row.date) else {
                tracing::debug!(size = %size, "无可用费率快照，跳过电费");
                continue;
            };

            result.add(
                &size,
                row.daily_electricity_units_use * snapshot.electricity_rate_per_unit,
            );
        }

        result
    }
}
