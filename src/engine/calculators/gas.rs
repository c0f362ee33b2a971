// ==========================================
// 瓷砖产线成本核算系统 - 天然气计算器
// ==========================================
// 成本: 日耗气量 × 快照燃气单价
// 附加指标: 单耗 kcal/kg = 耗气量 × 热值 / 绿粉重量
//           仅统计绿粉重量 > 0 的行,简单平均（不按产量加权）
// ==========================================

use super::{any_size, green_powder_kg, CalcContext, CategoryCalculator};
use crate::common::safe_div;
use crate::domain::cost::{CategoryResult, GasResult};
use crate::domain::types::CostCategory;

pub struct GasCalculator {
    // 无状态计算器
}

impl GasCalculator {
    pub fn new() -> Self {
        Self {}
    }

    /// 计算成本与热效率指标
    pub fn calculate_detailed(&self, ctx: &CalcContext<'_>) -> GasResult {
        let mut result = GasResult::default();
        let mut kcal_sum = 0.0;

        for row in ctx.rows {
            // 热效率与费率无关,所有行都参与
            let weight = green_powder_kg(row, ctx.config);
            if weight > 0.0 {
                let kcal_per_kg =
                    safe_div(row.daily_gas_consumption * ctx.config.gas_calorific_value, weight);
                kcal_sum += kcal_per_kg;
                result.qualifying_rows += 1;
            }

            let Some(size) = any_size(row) else {
                continue;
            };
            let Some(snapshot) = ctx.settings.resolve(row.date) else {
                tracing::debug!(size = %size, "无可用费率快照，跳过燃气成本");
                continue;
            };

            result
                .cost
                .add(&size, row.daily_gas_consumption * snapshot.gas_rate_per_unit);
        }

        result.avg_kcal_per_kg = safe_div(kcal_sum, result.qualifying_rows as f64);
        result
    }
}

impl Default for GasCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryCalculator for GasCalculator {
    fn category(&self) -> CostCategory {
        CostCategory::Gas
    }

    fn calculate(&self, ctx: &CalcContext<'_>) -> CategoryResult {
        self.calculate_detailed(ctx).cost
    }
}
