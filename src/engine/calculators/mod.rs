// ==========================================
// 瓷砖产线成本核算系统 - 成本类别计算器
// ==========================================
// 八个相互独立的计算单元,可任意顺序/并行执行
// 共同模式: 逐行（按需解析费率快照）→ 固定公式 → 同步累加合计与分规格
// ==========================================
// 红线:
// - 计算器不抛错,异常输入降级为 0
// - 规格不可识别的行不参与分规格归集（也不计入合计,保证合计 == 分规格之和）
// - 找不到费率快照的行跳过该类别
// ==========================================

pub mod colorant;
pub mod electricity;
pub mod fixed_overhead;
pub mod fuel;
pub mod gas;
pub mod glaze;
pub mod material;
pub mod packing;

pub use colorant::ColorantCalculator;
pub use electricity::ElectricityCalculator;
pub use fixed_overhead::FixedOverheadCalculator;
pub use fuel::FuelCalculator;
pub use gas::GasCalculator;
pub use glaze::GlazeCalculator;
pub use material::MaterialCalculator;
pub use packing::PackingCalculator;

use crate::config::CostingConfig;
use crate::domain::cost::CategoryResult;
use crate::domain::production::ProductionRow;
use crate::domain::types::CostCategory;
use crate::engine::settings_resolver::SettingsResolver;
use std::borrow::Cow;

// ==========================================
// CalcContext - 单次计算的只读输入
// ==========================================
pub struct CalcContext<'a> {
    pub rows: &'a [ProductionRow],
    pub settings: &'a SettingsResolver<'a>,
    pub config: &'a CostingConfig,
}

impl<'a> CalcContext<'a> {
    pub fn new(
        rows: &'a [ProductionRow],
        settings: &'a SettingsResolver<'a>,
        config: &'a CostingConfig,
    ) -> Self {
        Self {
            rows,
            settings,
            config,
        }
    }

    /// 规格目录口径: 仅已登记规格可归集
    pub fn catalog_size<'r>(&self, row: &'r ProductionRow) -> Option<Cow<'r, str>> {
        let size = row.size_code();
        if self.config.is_catalog_size(&size) {
            Some(size)
        } else {
            None
        }
    }
}

/// 通用口径: 非空规格即可归集
pub fn any_size(row: &ProductionRow) -> Option<Cow<'_, str>> {
    if row.has_size() {
        Some(row.size_code())
    } else {
        None
    }
}

/// 绿粉（含水）重量: 压制箱数 × 生坯单箱重 × 含水系数
pub fn green_powder_kg(row: &ProductionRow, config: &CostingConfig) -> f64 {
    row.press_box * row.green_box_weight * config.moisture_multiplier
}

// ==========================================
// CategoryCalculator Trait
// ==========================================
pub trait CategoryCalculator: Send + Sync {
    /// 所属成本类别
    fn category(&self) -> CostCategory;

    /// 计算类别合计与分规格明细
    fn calculate(&self, ctx: &CalcContext<'_>) -> CategoryResult;
}

/// 默认的八个计算器（矩阵行顺序）
pub fn default_calculators() -> Vec<Box<dyn CategoryCalculator>> {
    vec![
        Box::new(MaterialCalculator::new()),
        Box::new(GlazeCalculator::new()),
        Box::new(PackingCalculator::new()),
        Box::new(FuelCalculator::new()),
        Box::new(GasCalculator::new()),
        Box::new(ElectricityCalculator::new()),
        Box::new(ColorantCalculator::new()),
        Box::new(FixedOverheadCalculator::new()),
    ]
}
