// ==========================================
// 瓷砖产线成本核算系统 - 成本矩阵组装
// ==========================================
// 规格列: 类别分规格值 / 该规格净产量
// Total 列: 类别合计 / 全期净产量（不是规格列之和）
// total 行: 各类别单位成本之和
// per_sqm 行: total / 面积折算系数(8.6)
// 分母为 0 时单位成本记 0
// ==========================================

use crate::common::safe_div;
use crate::config::CostingConfig;
use crate::domain::cost::{CategoryResult, CostMatrix, TOTAL_COLUMN};
use crate::domain::production::ProductionRow;
use crate::domain::types::{CostCategory, CostHead};
use crate::engine::production::ProductionSummary;
use std::collections::{BTreeMap, BTreeSet};

pub struct ResultAssembler {
    area_equivalence: f64,
}

impl ResultAssembler {
    pub fn new(config: &CostingConfig) -> Self {
        Self {
            area_equivalence: config.area_equivalence,
        }
    }

    /// 矩阵规格列: 规格目录 ∪ 本批次出现的非空规格
    pub fn matrix_columns(config: &CostingConfig, rows: &[ProductionRow]) -> BTreeSet<String> {
        let mut columns: BTreeSet<String> = config.size_catalog.keys().cloned().collect();
        columns.extend(
            rows.iter()
                .filter(|r| r.has_size())
                .map(|r| r.size_code().into_owned()),
        );
        columns
    }

    /// 组装成本矩阵
    pub fn assemble(
        &self,
        columns: BTreeSet<String>,
        categories: &BTreeMap<CostCategory, CategoryResult>,
        production: &ProductionSummary,
    ) -> CostMatrix {
        let mut matrix = CostMatrix::zeroed(columns);
        let sizes: Vec<String> = matrix.size_columns().map(str::to_string).collect();

        for category in CostCategory::ALL {
            let Some(result) = categories.get(&category) else {
                continue;
            };
            let head = category.head();

            for size in &sizes {
                let unit = safe_div(result.size_value(size), production.net_for(size));
                matrix.set(head, size, unit);
            }
            let overall = safe_div(result.total, production.net_production);
            matrix.set(head, TOTAL_COLUMN, overall);
        }

        let all_columns: Vec<String> = matrix.columns().to_vec();
        for column in &all_columns {
            let total: f64 = CostCategory::ALL
                .iter()
                .map(|c| matrix.get(c.head(), column))
                .sum();
            matrix.set(CostHead::Total, column, total);
            matrix.set(
                CostHead::PerSqm,
                column,
                safe_div(total, self.area_equivalence),
            );
        }

        matrix
    }
}
