// ==========================================
// 瓷砖产线成本核算系统 - 包装成本计算器
// ==========================================
// 公式:
//   优等品箱数 × 优等品包装单价
// + (合格品 + 环保品箱数) × 普通包装单价
// + 包装总箱数 × 护角/打钉单价
// ==========================================

use super::{any_size, CalcContext, CategoryCalculator};
use crate::domain::cost::CategoryResult;
use crate::domain::types::CostCategory;

pub struct PackingCalculator {
    // 无状态计算器
}

impl PackingCalculator {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for PackingCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryCalculator for PackingCalculator {
    fn category(&self) -> CostCategory {
        CostCategory::Packing
    }

    fn calculate(&self, ctx: &CalcContext<'_>) -> CategoryResult {
        let mut result = CategoryResult::new();

        for row in ctx.rows {
            let Some(size) = any_size(row) else {
                continue;
            };
            let Some(snapshot) = ctx.settings.resolve(row.date) else {
                tracing::debug!(size = %size, "无可用费率快照，跳过包装成本");
                continue;
            };

            let cost = row.premium_box * snapshot.premium_box_rate
                + (row.standard_box + row.eco_box) * snapshot.standard_box_rate
                + row.total_packing_box * snapshot.corner_stapling_rate;
            result.add(&size, cost);
        }

        result
    }
}
