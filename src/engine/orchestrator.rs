// ==========================================
// 瓷砖产线成本核算系统 - 成本引擎编排器
// ==========================================
// 流程:
// 1) 构造费率快照解析器（一次排序,多行复用）
// 2) 八个类别计算器并行执行（互不依赖）
// 3) 产量汇总（净产量 / 分规格净产量）
// 4) 组装成本矩阵
// ==========================================
// 红线: 纯计算,不做 I/O,不返回错误
// ==========================================

use crate::config::CostingConfig;
use crate::domain::cost::{CategoryResult, CostMatrix, GasResult, GlazeResult};
use crate::domain::production::ProductionRow;
use crate::domain::settings::SettingsSnapshot;
use crate::domain::types::CostCategory;
use crate::engine::assembler::ResultAssembler;
use crate::engine::calculators::{
    default_calculators, CalcContext, CategoryCalculator, GasCalculator, GlazeCalculator,
};
use crate::engine::production::{ProductionAggregator, ProductionSummary};
use crate::engine::settings_resolver::SettingsResolver;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

// ==========================================
// CostBreakdown - 完整核算明细
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct CostBreakdown {
    /// 各类别原始归集值（未除以产量）
    pub categories: BTreeMap<CostCategory, CategoryResult>,
    /// 釉料消耗与损耗
    pub glaze: GlazeResult,
    /// 天然气成本与热效率
    pub gas: GasResult,
    /// 产量汇总
    pub production: ProductionSummary,
    /// 单位成本矩阵
    pub matrix: CostMatrix,
}

// ==========================================
// CostEngine - 成本引擎
// ==========================================
pub struct CostEngine {
    config: CostingConfig,
    calculators: Vec<Box<dyn CategoryCalculator>>,
}

impl CostEngine {
    /// 使用默认八个计算器创建引擎
    pub fn new(config: CostingConfig) -> Self {
        Self::with_calculators(config, default_calculators())
    }

    /// 使用自定义计算器集合创建引擎
    pub fn with_calculators(
        config: CostingConfig,
        calculators: Vec<Box<dyn CategoryCalculator>>,
    ) -> Self {
        Self {
            config,
            calculators,
        }
    }

    pub fn config(&self) -> &CostingConfig {
        &self.config
    }

    /// 计算成本矩阵
    #[instrument(skip(self, rows, settings_history), fields(
        rows = rows.len(),
        snapshots = settings_history.len()
    ))]
    pub fn compute_cost_matrix(
        &self,
        rows: &[ProductionRow],
        settings_history: &[SettingsSnapshot],
    ) -> CostMatrix {
        let resolver = SettingsResolver::new(settings_history);
        let ctx = CalcContext::new(rows, &resolver, &self.config);

        let categories = self.run_calculators(&ctx);
        let production = ProductionAggregator::new(&self.config).summarize(rows);
        self.assemble(rows, &categories, &production)
    }

    /// 计算完整核算明细（含釉料损耗与燃气热效率）
    #[instrument(skip(self, rows, settings_history), fields(
        rows = rows.len(),
        snapshots = settings_history.len()
    ))]
    pub fn compute_breakdown(
        &self,
        rows: &[ProductionRow],
        settings_history: &[SettingsSnapshot],
    ) -> CostBreakdown {
        let resolver = SettingsResolver::new(settings_history);
        let ctx = CalcContext::new(rows, &resolver, &self.config);

        let categories = self.run_calculators(&ctx);
        let glaze = GlazeCalculator::new().calculate_detailed(&ctx);
        let gas = GasCalculator::new().calculate_detailed(&ctx);
        let production = ProductionAggregator::new(&self.config).summarize(rows);
        let matrix = self.assemble(rows, &categories, &production);

        CostBreakdown {
            categories,
            glaze,
            gas,
            production,
            matrix,
        }
    }

    fn run_calculators(&self, ctx: &CalcContext<'_>) -> BTreeMap<CostCategory, CategoryResult> {
        let results: BTreeMap<CostCategory, CategoryResult> = self
            .calculators
            .par_iter()
            .map(|calculator| (calculator.category(), calculator.calculate(ctx)))
            .collect();

        debug!(categories = results.len(), "类别计算完成");
        results
    }

    fn assemble(
        &self,
        rows: &[ProductionRow],
        categories: &BTreeMap<CostCategory, CategoryResult>,
        production: &ProductionSummary,
    ) -> CostMatrix {
        let columns = ResultAssembler::matrix_columns(&self.config, rows);
        ResultAssembler::new(&self.config).assemble(columns, categories, production)
    }
}

impl Default for CostEngine {
    fn default() -> Self {
        Self::new(CostingConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::CostHead;
    use chrono::NaiveDate;

    #[test]
    fn test_empty_input_all_zero() {
        let engine = CostEngine::default();
        let matrix = engine.compute_cost_matrix(&[], &[]);
        assert!(matrix.is_zero());
        assert!(matrix.columns().iter().any(|c| c == "Total"));
    }

    #[test]
    fn test_breakdown_contains_all_categories() {
        let row = ProductionRow {
            date: NaiveDate::from_ymd_opt(2024, 1, 10),
            size: "400x400".to_string(),
            press_box: 100.0,
            green_box_weight: 10.0,
            kiln_entry_box: 90.0,
            ..Default::default()
        };
        let engine = CostEngine::default();
        let breakdown = engine.compute_breakdown(&[row], &[]);

        assert_eq!(breakdown.categories.len(), CostCategory::ALL.len());
        assert!((breakdown.categories[&CostCategory::Material].total - 1278.9).abs() < 1e-9);
        assert!(breakdown.glaze.loss.total > 0.0);

        let expected = 1278.9 / 88.65;
        assert!((breakdown.matrix.get(CostHead::Material, "400x400") - expected).abs() < 1e-9);
    }
}
