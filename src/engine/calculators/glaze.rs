// ==========================================
// 瓷砖产线成本核算系统 - 釉料计算器
// ==========================================
// 施釉前数量 = 压制箱数 × 得率系数(0.995)
// 损耗 = (施釉前数量 − 入窑箱数) × 规格损耗系数      → 仅跟踪
// 消耗 = 施釉前数量 × 规格单耗                       → 计入成本
// ==========================================

use super::{CalcContext, CategoryCalculator};
use crate::domain::cost::{CategoryResult, GlazeResult};
use crate::domain::types::CostCategory;

pub struct GlazeCalculator {
    // 无状态计算器
}

impl GlazeCalculator {
    pub fn new() -> Self {
        Self {}
    }

    /// 计算消耗与损耗
    pub fn calculate_detailed(&self, ctx: &CalcContext<'_>) -> GlazeResult {
        let mut result = GlazeResult::default();

        for row in ctx.rows {
            let Some(size) = ctx.catalog_size(row) else {
                continue;
            };
            let Some(profile) = ctx.config.size_profile(&size) else {
                continue;
            };

            let before_glaze = row.press_box * ctx.config.glaze_yield_multiplier;
            let loss = (before_glaze - row.kiln_entry_box) * profile.glaze_loss_factor;
            let consumption = before_glaze * profile.glaze_consumption_factor;

            result.loss.add(&size, loss);
            result.consumption.add(&size, consumption);
        }

        result
    }
}

impl Default for GlazeCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryCalculator for GlazeCalculator {
    fn category(&self) -> CostCategory {
        CostCategory::Glaze
    }

    fn calculate(&self, ctx: &CalcContext<'_>) -> CategoryResult {
        self.calculate_detailed(ctx).consumption
    }
}
