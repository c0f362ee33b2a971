// ==========================================
// 瓷砖产线成本核算系统 - 核算口径配置
// ==========================================
// 职责: 集中定义所有公式常量、规格目录、色料单价
// 覆写: 支持 JSON 局部覆写（未给出的字段取默认值）
// ==========================================

use crate::domain::size::normalize_size_code;
use crate::domain::types::ColorantChannel;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

// ==========================================
// SizeProfile - 规格参数
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeProfile {
    /// 坯料单位成本（元/kg）
    pub material_unit_cost: f64,
    /// 釉料损耗系数
    pub glaze_loss_factor: f64,
    /// 釉料单耗（kg/箱）
    pub glaze_consumption_factor: f64,
}

// ==========================================
// ColorantRates - 色料单价（元/kg）
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorantRates {
    pub blue: f64,
    pub black: f64,
    pub brown: f64,
    pub yellow: f64,
    pub pink: f64,
}

impl Default for ColorantRates {
    fn default() -> Self {
        Self {
            blue: 420.0,
            black: 380.0,
            brown: 350.0,
            yellow: 300.0,
            pink: 460.0,
        }
    }
}

impl ColorantRates {
    pub fn rate(&self, channel: ColorantChannel) -> f64 {
        match channel {
            ColorantChannel::Blue => self.blue,
            ColorantChannel::Black => self.black,
            ColorantChannel::Brown => self.brown,
            ColorantChannel::Yellow => self.yellow,
            ColorantChannel::Pink => self.pink,
        }
    }
}

// ==========================================
// CostingConfig - 核算口径
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostingConfig {
    /// 含水/损耗系数（坯料、燃料绿粉口径）
    pub moisture_multiplier: f64,
    /// 施釉前得率系数
    pub glaze_yield_multiplier: f64,
    /// 燃料比折算系数（kg煤/吨产量 × 1000 × 该值）
    pub fuel_scale_factor: f64,
    /// 净产量收缩扣减率（作用于损耗差额）
    pub shrinkage_rate: f64,
    /// 面积折算系数（合计 / 该值 = 折算单位成本）
    pub area_equivalence: f64,
    /// 月度固定费用折日天数
    pub days_per_month: f64,
    /// 天然气热值（kcal/单位）
    pub gas_calorific_value: f64,
    /// 历史趋势并发度（0 = 按 CPU 核数）
    pub history_parallelism: usize,
    /// 规格目录（未登记规格不参与坯料/釉料/燃料分规格归集）
    #[serde(deserialize_with = "normalized_catalog")]
    pub size_catalog: BTreeMap<String, SizeProfile>,
    /// 色料单价
    pub colorant_rates: ColorantRates,
}

impl Default for CostingConfig {
    fn default() -> Self {
        Self {
            moisture_multiplier: 1.05,
            glaze_yield_multiplier: 0.995,
            fuel_scale_factor: 5.9,
            shrinkage_rate: 0.015,
            area_equivalence: 8.6,
            days_per_month: 30.0,
            gas_calorific_value: 8_500.0,
            history_parallelism: 0,
            size_catalog: default_size_catalog(),
            colorant_rates: ColorantRates::default(),
        }
    }
}

impl CostingConfig {
    /// 查询规格参数
    pub fn size_profile(&self, size: &str) -> Option<&SizeProfile> {
        self.size_catalog.get(&*normalize_size_code(size))
    }

    /// 规格是否已登记
    pub fn is_catalog_size(&self, size: &str) -> bool {
        self.size_profile(size).is_some()
    }

    /// 实际使用的历史趋势并发度
    pub fn effective_parallelism(&self) -> usize {
        if self.history_parallelism > 0 {
            return self.history_parallelism;
        }
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4)
    }
}

/// 覆写的规格目录键统一为标准写法
fn normalized_catalog<'de, D>(deserializer: D) -> Result<BTreeMap<String, SizeProfile>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, SizeProfile>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(size, profile)| (normalize_size_code(&size).into_owned(), profile))
        .collect())
}

/// 默认规格目录
fn default_size_catalog() -> BTreeMap<String, SizeProfile> {
    // (规格, 坯料单位成本, 釉料损耗系数, 釉料单耗)
    let entries: &[(&str, f64, f64, f64)] = &[
        ("300x300", 1.180, 0.020, 0.45),
        ("300x450", 1.195, 0.022, 0.55),
        ("300x600", 1.205, 0.024, 0.62),
        ("400x400", 1.218, 0.025, 0.58),
        ("600x600", 1.240, 0.030, 0.85),
        ("800x800", 1.255, 0.035, 1.05),
        ("600x1200", 1.265, 0.040, 1.10),
    ];

    entries
        .iter()
        .map(|(size, material, loss, consumption)| {
            (
                size.to_string(),
                SizeProfile {
                    material_unit_cost: *material,
                    glaze_loss_factor: *loss,
                    glaze_consumption_factor: *consumption,
                },
            )
        })
        .collect()
}
