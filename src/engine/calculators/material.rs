// ==========================================
// 瓷砖产线成本核算系统 - 坯料（粉料）成本计算器
// ==========================================
// 公式: 压制箱数 × 生坯单箱重 × 含水系数(1.05) × 规格单位成本
// 费率: 不依赖设置快照,规格单位成本取自规格目录
// ==========================================

use super::{green_powder_kg, CalcContext, CategoryCalculator};
use crate::domain::cost::CategoryResult;
use crate::domain::types::CostCategory;

pub struct MaterialCalculator {
    // 无状态计算器
}

impl MaterialCalculator {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for MaterialCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryCalculator for MaterialCalculator {
    fn category(&self) -> CostCategory {
        CostCategory::Material
    }

    fn calculate(&self, ctx: &CalcContext<'_>) -> CategoryResult {
        let mut result = CategoryResult::new();

        for row in ctx.rows {
            let Some(size) = ctx.catalog_size(row) else {
                continue;
            };
            let Some(profile) = ctx.config.size_profile(&size) else {
                continue;
            };

            let consumption = green_powder_kg(row, ctx.config) * profile.material_unit_cost;
            result.add(&size, consumption);
        }

        result
    }
}
